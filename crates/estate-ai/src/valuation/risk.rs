use tracing::debug;

use super::domain::{
    InvestmentRequest, InvestmentStrategy, RiskAssessment, RiskAssessmentRequest, RiskFactors,
    RiskLevel,
};
use super::error::{ensure_amount, ensure_range, ValuationError};
use super::investment::{self, cents};

const HIGH_VALUE_PRICE: f64 = 1_000_000.0;
const LARGE_LOAN_PRICE: f64 = 500_000.0;

const DEFAULT_YEAR_BUILT: u16 = 2000;
const MIN_YEAR_BUILT: u16 = 1700;
const MAX_YEAR_BUILT: u16 = 2100;
const AGING_STOCK_YEAR: u16 = 1980;
const HISTORIC_STOCK_YEAR: u16 = 1960;

const MAX_LOCATION_SCORE: f64 = 10.0;
const WEAK_LOCATION_SCORE: f64 = 7.0;
const POOR_LOCATION_SCORE: f64 = 5.0;

/// Cash-on-cash percentage that earns the full return component.
const FULL_MARKS_RETURN: f64 = 10.0;
const RETURN_WEIGHT: f64 = 0.4;
const RISK_WEIGHT: f64 = 0.3;

/// Grades the purchase across four risk dimensions and suggests a strategy.
pub fn assess(request: &RiskAssessmentRequest) -> Result<RiskAssessment, ValuationError> {
    let year_built = validate(request)?;

    let metrics = investment::analyze(&InvestmentRequest {
        purchase_price: request.purchase_price,
        monthly_rent: request.monthly_rent,
        annual_property_tax: None,
        monthly_hoa_fees: None,
    })?;

    let price = request.purchase_price;
    let factors = RiskFactors {
        market: if price > HIGH_VALUE_PRICE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        },
        property: if year_built < HISTORIC_STOCK_YEAR {
            RiskLevel::High
        } else if year_built < AGING_STOCK_YEAR {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        },
        location: if request.location_score < POOR_LOCATION_SCORE {
            RiskLevel::High
        } else if request.location_score < WEAK_LOCATION_SCORE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        },
        financial: if price > LARGE_LOAN_PRICE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        },
    };

    let weights = [
        factors.market,
        factors.property,
        factors.location,
        factors.financial,
    ]
    .map(|level| f64::from(level.weight()));
    let average = weights.iter().sum::<f64>() / weights.len() as f64;
    let overall_risk = if average <= 1.5 {
        RiskLevel::Low
    } else if average <= 2.5 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };
    let risk_score = 10.0 - average * 2.0;

    let return_score = metrics.cash_on_cash_return.clamp(0.0, FULL_MARKS_RETURN);
    let investment_score = ((return_score * RETURN_WEIGHT + risk_score * RISK_WEIGHT)
        / (RETURN_WEIGHT + RISK_WEIGHT))
        .min(10.0);
    let strategy = strategy_for(investment_score);

    debug!(
        overall_risk = overall_risk.label(),
        investment_score,
        strategy = strategy.label(),
        "risk assessed"
    );

    Ok(RiskAssessment {
        factors,
        overall_risk,
        risk_score: cents(risk_score),
        cash_on_cash_return: metrics.cash_on_cash_return,
        investment_score: cents(investment_score),
        strategy,
        recommendations: recommendations(strategy)
            .iter()
            .map(|line| line.to_string())
            .collect(),
    })
}

/// Checks the request and resolves the construction year.
pub(crate) fn validate(request: &RiskAssessmentRequest) -> Result<u16, ValuationError> {
    ensure_amount("purchasePrice", request.purchase_price)?;
    ensure_range(
        "locationScore",
        request.location_score,
        0.0,
        MAX_LOCATION_SCORE,
    )?;
    let year_built = request.year_built.unwrap_or(DEFAULT_YEAR_BUILT);
    ensure_range(
        "yearBuilt",
        f64::from(year_built),
        f64::from(MIN_YEAR_BUILT),
        f64::from(MAX_YEAR_BUILT),
    )?;
    Ok(year_built)
}

fn strategy_for(score: f64) -> InvestmentStrategy {
    if score >= 8.0 {
        InvestmentStrategy::Buy
    } else if score >= 6.0 {
        InvestmentStrategy::Consider
    } else if score < 4.0 {
        InvestmentStrategy::Avoid
    } else {
        InvestmentStrategy::Hold
    }
}

fn recommendations(strategy: InvestmentStrategy) -> &'static [&'static str] {
    match strategy {
        InvestmentStrategy::Buy => &[
            "Strong investment opportunity",
            "Consider making an offer",
            "Monitor market conditions",
            "Prepare financing options",
        ],
        InvestmentStrategy::Consider => &[
            "Moderate investment potential",
            "Negotiate for better terms",
            "Conduct thorough due diligence",
            "Compare against alternative investments",
        ],
        InvestmentStrategy::Hold => &[
            "Wait for better market conditions",
            "Monitor for price changes",
            "Look at other properties",
            "Focus on portfolio optimization",
        ],
        InvestmentStrategy::Avoid => &[
            "Not recommended for investment",
            "Consider other opportunities",
            "Focus on different markets",
            "Reassess investment criteria",
        ],
    }
}
