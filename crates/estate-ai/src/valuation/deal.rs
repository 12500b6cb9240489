use tracing::debug;

use super::domain::{DealEvaluationRequest, DealEvaluationResult, DealScore};
use super::error::{ensure_amount, InputConstraint, ValuationError};

/// Price-to-value band. Bands are checked in ascending order and the first
/// whose ceiling is not exceeded wins, so boundaries land in the cheaper band.
struct DealTier {
    ceiling: f64,
    score: DealScore,
    confidence: u8,
    kind: TierKind,
}

#[derive(Clone, Copy)]
enum TierKind {
    DeepDiscount,
    Discount,
    AtMarket,
    SlightPremium,
    Overpriced,
}

const TIERS: [DealTier; 4] = [
    DealTier {
        ceiling: 0.85,
        score: DealScore::Buy,
        confidence: 90,
        kind: TierKind::DeepDiscount,
    },
    DealTier {
        ceiling: 0.95,
        score: DealScore::Buy,
        confidence: 80,
        kind: TierKind::Discount,
    },
    DealTier {
        ceiling: 1.05,
        score: DealScore::Hold,
        confidence: 75,
        kind: TierKind::AtMarket,
    },
    DealTier {
        ceiling: 1.15,
        score: DealScore::Hold,
        confidence: 70,
        kind: TierKind::SlightPremium,
    },
];

const OVERPRICED_CONFIDENCE: u8 = 85;

/// Scores an asking price against the estimated market value.
pub fn evaluate(request: &DealEvaluationRequest) -> Result<DealEvaluationResult, ValuationError> {
    validate(request)?;

    let ratio = request.property_price / request.estimated_market_value;
    if !ratio.is_finite() {
        return Err(ValuationError::invalid(
            "estimatedMarketValue",
            InputConstraint::NonFiniteResult,
        ));
    }
    let (score, confidence, kind) = TIERS
        .iter()
        .find(|tier| ratio <= tier.ceiling)
        .map(|tier| (tier.score, tier.confidence, tier.kind))
        .unwrap_or((DealScore::Avoid, OVERPRICED_CONFIDENCE, TierKind::Overpriced));

    debug!(ratio, deal_score = score.label(), "deal evaluated");

    Ok(DealEvaluationResult {
        deal_score: score,
        confidence_level: confidence,
        explanation: explain(kind, ratio, request.location.trim()),
    })
}

pub(crate) fn validate(request: &DealEvaluationRequest) -> Result<(), ValuationError> {
    ensure_amount("propertyPrice", request.property_price)?;
    if request.estimated_market_value == 0.0 {
        return Err(ValuationError::invalid(
            "estimatedMarketValue",
            InputConstraint::ZeroDenominator,
        ));
    }
    ensure_amount("estimatedMarketValue", request.estimated_market_value)
}

fn explain(kind: TierKind, ratio: f64, location: &str) -> String {
    let of_market = ratio * 100.0;
    let spread = (1.0 - ratio).abs() * 100.0;
    let place = if location.is_empty() {
        String::new()
    } else {
        format!(" in {location}")
    };

    match kind {
        TierKind::DeepDiscount => format!(
            "Excellent deal{place}: the asking price is {of_market:.1}% of estimated market value, \
             a {spread:.1}% discount. Strong buy signal."
        ),
        TierKind::Discount => format!(
            "Good deal{place}: the asking price is {of_market:.1}% of estimated market value, \
             a {spread:.1}% discount. Consider making an offer."
        ),
        TierKind::AtMarket => {
            let position = if ratio > 1.0 {
                format!("{spread:.1}% above market")
            } else if ratio < 1.0 {
                format!("{spread:.1}% below market")
            } else {
                "in line with market".to_string()
            };
            format!(
                "Fair price{place}: the asking price is {of_market:.1}% of estimated market value, \
                 {position}. Monitor for price changes."
            )
        }
        TierKind::SlightPremium => format!(
            "Slightly overpriced{place}: the asking price is {of_market:.1}% of estimated market \
             value, a {spread:.1}% premium. Negotiate before committing."
        ),
        TierKind::Overpriced => format!(
            "Overpriced{place}: the asking price is {of_market:.1}% of estimated market value, \
             a {spread:.1}% premium. Consider other opportunities."
        ),
    }
}
