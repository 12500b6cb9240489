//! Price estimation, deal scoring, rental yield metrics, risk grading and
//! location summaries.
//!
//! Every formula here is a pure function of its request: no clocks, no
//! randomness, no shared state. Calling an operation twice with the same
//! input yields the same output.

pub mod deal;
pub mod domain;
pub mod error;
pub mod investment;
pub mod location;
pub mod price;
pub mod risk;
pub mod router;

#[cfg(test)]
mod tests;

pub use deal::evaluate;
pub use domain::{
    DealEvaluationRequest, DealEvaluationResult, DealScore, FactorImpact, InvestmentMetrics,
    InvestmentRequest, InvestmentStrategy, OperatingExpenses, PriceEstimatePayload,
    PriceEstimateRequest, PriceEstimateResult, PriceFactor, PropertyType, RiskAssessment,
    RiskAssessmentRequest, RiskFactors, RiskLevel,
};
pub use error::{InputConstraint, ValuationError};
pub use investment::analyze;
pub use location::{
    CatalogError, LocationAnalysis, LocationAnalysisRequest, LocationAnalyzer, LocationCatalog,
    LocationDataSource, LocationError, LocationSourceError,
};
pub use price::estimate;
pub use risk::assess;
pub use router::valuation_router;

/// Renders whole numbers without a fractional part, e.g. `2500` rather than `2500.0`.
pub(crate) fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
