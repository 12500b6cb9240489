use tracing::debug;

use super::domain::{FactorImpact, PriceEstimateRequest, PriceEstimateResult, PriceFactor};
use super::error::{ensure_range, InputConstraint, ValuationError};
use super::format_quantity;

const BASE_PRICE: f64 = 250_000.0;
const PER_BEDROOM: f64 = 25_000.0;
const PER_BATHROOM: f64 = 15_000.0;
const PER_AREA_UNIT: f64 = 100.0;

const CONFIDENCE_FLOOR: f64 = 70.0;
const CONFIDENCE_CAP: f64 = 95.0;

pub(crate) const MAX_BEDROOMS: u32 = 10;
const MAX_BATHROOMS: f64 = 10.0;
const MIN_AREA: f64 = 100.0;
const MAX_AREA: f64 = 50_000.0;

/// Bedroom count from which the layout counts as a selling point.
const FAMILY_BEDROOMS: u32 = 3;

/// Estimates a sale price from the property's size and layout.
pub fn estimate(request: &PriceEstimateRequest) -> Result<PriceEstimateResult, ValuationError> {
    validate(request)?;

    let bedrooms = f64::from(request.bedrooms);
    let subtotal = BASE_PRICE
        + bedrooms * PER_BEDROOM
        + request.bathrooms * PER_BATHROOM
        + request.area * PER_AREA_UNIT;
    let estimated_price = (subtotal * request.property_type.price_multiplier()).round() as u64;

    let confidence_score =
        CONFIDENCE_FLOOR + bedrooms * 2.0 + request.bathrooms * 3.0 + request.area / 100.0;
    let confidence = confidence_score.round().min(CONFIDENCE_CAP) as u8;

    debug!(
        property_type = %request.property_type,
        estimated_price,
        confidence,
        "price estimate computed"
    );

    Ok(PriceEstimateResult {
        estimated_price,
        confidence,
        factors: factors(request),
    })
}

pub(crate) fn validate(request: &PriceEstimateRequest) -> Result<(), ValuationError> {
    if request.bedrooms > MAX_BEDROOMS {
        return Err(ValuationError::invalid(
            "bedrooms",
            InputConstraint::OutOfRange {
                min: 0.0,
                max: f64::from(MAX_BEDROOMS),
                found: f64::from(request.bedrooms),
            },
        ));
    }

    ensure_range("bathrooms", request.bathrooms, 0.0, MAX_BATHROOMS)?;
    if (request.bathrooms * 2.0).fract() != 0.0 {
        return Err(ValuationError::invalid(
            "bathrooms",
            InputConstraint::NotHalfStep {
                found: request.bathrooms,
            },
        ));
    }

    ensure_range("area", request.area, MIN_AREA, MAX_AREA)
}

fn factors(request: &PriceEstimateRequest) -> Vec<PriceFactor> {
    let property_type = request.property_type;
    let location = match request.location.trim() {
        "" => "The selected area",
        trimmed => trimmed,
    };

    let bedroom_factor = if request.bedrooms >= FAMILY_BEDROOMS {
        PriceFactor {
            factor: "Bedrooms".to_string(),
            impact: FactorImpact::Positive,
            description: format!(
                "{} bedrooms appeal to family buyers",
                request.bedrooms
            ),
        }
    } else {
        PriceFactor {
            factor: "Bedrooms".to_string(),
            impact: FactorImpact::Neutral,
            description: format!(
                "{} bedroom(s) suit a narrower pool of buyers",
                request.bedrooms
            ),
        }
    };

    vec![
        PriceFactor {
            factor: "Property Type".to_string(),
            impact: FactorImpact::Positive,
            description: format!(
                "{} properties are valued at {:.1}x the base rate",
                property_type,
                property_type.price_multiplier()
            ),
        },
        PriceFactor {
            factor: "Location".to_string(),
            impact: FactorImpact::Positive,
            description: format!("{location} shows steady buyer demand"),
        },
        PriceFactor {
            factor: "Size".to_string(),
            impact: FactorImpact::Positive,
            description: format!(
                "{} sq ft of space adds {} to the base price",
                format_quantity(request.area),
                format_quantity(request.area * PER_AREA_UNIT)
            ),
        },
        bedroom_factor,
    ]
}
