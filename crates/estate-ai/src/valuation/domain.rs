use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ensure_range, InputConstraint, ValuationError};
use super::price::MAX_BEDROOMS;

/// Category of property being valued. Drives the price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum PropertyType {
    House,
    Apartment,
    Land,
}

impl PropertyType {
    pub const NAMES: &'static [&'static str] = &["House", "Apartment", "Land"];

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Land => "Land",
        }
    }

    pub fn price_multiplier(self) -> f64 {
        match self {
            PropertyType::House => 1.2,
            PropertyType::Apartment => 1.0,
            PropertyType::Land => 0.8,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = ValuationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "house" => Ok(Self::House),
            "apartment" => Ok(Self::Apartment),
            "land" => Ok(Self::Land),
            _ => Err(ValuationError::invalid(
                "propertyType",
                InputConstraint::UnknownVariant {
                    found: raw.to_string(),
                    expected: Self::NAMES,
                },
            )),
        }
    }
}

impl TryFrom<String> for PropertyType {
    type Error = ValuationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Inputs for a single price estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimateRequest {
    pub property_type: PropertyType,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub area: f64,
    #[serde(default)]
    pub location: String,
}

/// Estimate request as it arrives over HTTP, before the property type and
/// bedroom count are checked. Converting it reports failures as
/// [`ValuationError`] so the offending field reaches the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimatePayload {
    pub property_type: String,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area: f64,
    #[serde(default)]
    pub location: String,
}

impl TryFrom<PriceEstimatePayload> for PriceEstimateRequest {
    type Error = ValuationError;

    fn try_from(payload: PriceEstimatePayload) -> Result<Self, Self::Error> {
        let property_type = payload.property_type.parse::<PropertyType>()?;
        ensure_range("bedrooms", payload.bedrooms, 0.0, f64::from(MAX_BEDROOMS))?;
        if payload.bedrooms.fract() != 0.0 {
            return Err(ValuationError::invalid(
                "bedrooms",
                InputConstraint::NotWholeNumber {
                    found: payload.bedrooms,
                },
            ));
        }

        Ok(Self {
            property_type,
            bedrooms: payload.bedrooms as u32,
            bathrooms: payload.bathrooms,
            area: payload.area,
            location: payload.location,
        })
    }
}

/// Direction in which a factor moved the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactorImpact {
    Positive,
    Negative,
    Neutral,
}

/// Human-readable contribution shown next to an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFactor {
    pub factor: String,
    pub impact: FactorImpact,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimateResult {
    pub estimated_price: u64,
    pub confidence: u8,
    pub factors: Vec<PriceFactor>,
}

/// Inputs for comparing an asking price against market value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealEvaluationRequest {
    pub property_price: f64,
    pub estimated_market_value: f64,
    #[serde(default)]
    pub location: String,
}

/// Recommendation tier for a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealScore {
    Buy,
    Hold,
    Avoid,
}

impl DealScore {
    pub fn label(self) -> &'static str {
        match self {
            DealScore::Buy => "Buy",
            DealScore::Hold => "Hold",
            DealScore::Avoid => "Avoid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealEvaluationResult {
    pub deal_score: DealScore,
    pub confidence_level: u8,
    pub explanation: String,
}

/// Inputs for rental yield metrics. Omitted fields fall back to rule-of-thumb rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequest {
    pub purchase_price: f64,
    #[serde(default)]
    pub monthly_rent: Option<f64>,
    #[serde(default)]
    pub annual_property_tax: Option<f64>,
    #[serde(default)]
    pub monthly_hoa_fees: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingExpenses {
    pub property_tax: f64,
    pub insurance: f64,
    pub maintenance: f64,
    pub hoa_fees: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentMetrics {
    pub monthly_rent: f64,
    pub annual_rent: f64,
    pub cap_rate: f64,
    pub net_operating_income: f64,
    pub cash_on_cash_return: f64,
    pub total_investment: f64,
    pub expenses: OperatingExpenses,
}

/// Inputs for grading the risks of a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentRequest {
    pub purchase_price: f64,
    /// Defaults to 2000 when unknown.
    #[serde(default)]
    pub year_built: Option<u16>,
    /// Neighborhood score on a 0-10 scale, e.g. a catalog safety rating.
    pub location_score: f64,
    #[serde(default)]
    pub monthly_rent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub(crate) fn weight(self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub market: RiskLevel,
    pub property: RiskLevel,
    pub location: RiskLevel,
    pub financial: RiskLevel,
}

/// Course of action suggested by the combined investment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentStrategy {
    Buy,
    Consider,
    Hold,
    Avoid,
}

impl InvestmentStrategy {
    pub fn label(self) -> &'static str {
        match self {
            InvestmentStrategy::Buy => "Buy",
            InvestmentStrategy::Consider => "Consider",
            InvestmentStrategy::Hold => "Hold",
            InvestmentStrategy::Avoid => "Avoid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub factors: RiskFactors,
    pub overall_risk: RiskLevel,
    /// 0-10, higher is safer.
    pub risk_score: f64,
    pub cash_on_cash_return: f64,
    /// 0-10 blend of return and risk.
    pub investment_score: f64,
    pub strategy: InvestmentStrategy,
    pub recommendations: Vec<String>,
}
