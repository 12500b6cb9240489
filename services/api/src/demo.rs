use crate::infra::{load_location_catalog, parse_property_type};
use clap::Args;
use estate_ai::config::AppConfig;
use estate_ai::error::AppError;
use estate_ai::valuation::{
    analyze, assess, estimate, evaluate, DealEvaluationRequest, FactorImpact, InvestmentRequest,
    LocationAnalysis, LocationAnalysisRequest, LocationAnalyzer, LocationCatalog, LocationError,
    PriceEstimateRequest, PropertyType, RiskAssessmentRequest,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// House, Apartment, or Land
    #[arg(long, value_parser = parse_property_type)]
    pub(crate) property_type: PropertyType,
    /// Number of bedrooms (0-10)
    #[arg(long)]
    pub(crate) bedrooms: u32,
    /// Number of bathrooms in half steps (0-10)
    #[arg(long)]
    pub(crate) bathrooms: f64,
    /// Living area in square feet (100-50000)
    #[arg(long)]
    pub(crate) area: f64,
    /// Location label used in the factor descriptions
    #[arg(long)]
    pub(crate) location: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DealArgs {
    /// Asking price
    #[arg(long)]
    pub(crate) property_price: f64,
    /// Estimated market value
    #[arg(long)]
    pub(crate) market_value: f64,
    /// Location label used in the explanation
    #[arg(long)]
    pub(crate) location: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct InvestmentArgs {
    /// Purchase price
    #[arg(long)]
    pub(crate) purchase_price: f64,
    /// Expected monthly rent (defaults to 0.8% of the price)
    #[arg(long)]
    pub(crate) monthly_rent: Option<f64>,
    /// Annual property tax (defaults to 1.2% of the price)
    #[arg(long)]
    pub(crate) annual_property_tax: Option<f64>,
    /// Monthly HOA fees
    #[arg(long)]
    pub(crate) monthly_hoa_fees: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct LocationArgs {
    /// Location to look up
    #[arg(long)]
    pub(crate) name: String,
    /// CSV catalog to read instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RiskArgs {
    /// Purchase price
    #[arg(long)]
    pub(crate) purchase_price: f64,
    /// Construction year (defaults to 2000)
    #[arg(long)]
    pub(crate) year_built: Option<u16>,
    /// Neighborhood score from 0 to 10
    #[arg(long, required_unless_present = "location")]
    pub(crate) location_score: Option<f64>,
    /// Catalog location whose safety rating stands in for the score
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Expected monthly rent (defaults to 0.8% of the price)
    #[arg(long)]
    pub(crate) monthly_rent: Option<f64>,
    /// CSV catalog to read instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Location used for the sample property (must exist in the catalog)
    #[arg(long, default_value = "Austin")]
    pub(crate) location: String,
    /// Asking price compared against the estimate
    #[arg(long)]
    pub(crate) asking_price: Option<f64>,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let request = PriceEstimateRequest {
        property_type: args.property_type,
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        area: args.area,
        location: args.location.unwrap_or_default(),
    };
    print_json(&estimate(&request)?)
}

pub(crate) fn run_deal(args: DealArgs) -> Result<(), AppError> {
    let request = DealEvaluationRequest {
        property_price: args.property_price,
        estimated_market_value: args.market_value,
        location: args.location.unwrap_or_default(),
    };
    print_json(&evaluate(&request)?)
}

pub(crate) fn run_investment(args: InvestmentArgs) -> Result<(), AppError> {
    let request = InvestmentRequest {
        purchase_price: args.purchase_price,
        monthly_rent: args.monthly_rent,
        annual_property_tax: args.annual_property_tax,
        monthly_hoa_fees: args.monthly_hoa_fees,
    };
    print_json(&analyze(&request)?)
}

pub(crate) fn run_location(args: LocationArgs) -> Result<(), AppError> {
    let analyzer = location_analyzer(args.catalog)?;
    let analysis = analyzer.analyze(&LocationAnalysisRequest {
        location: args.name,
    })?;
    print_json(&analysis)
}

pub(crate) fn run_risk(args: RiskArgs) -> Result<(), AppError> {
    let location_score = match args.location_score {
        Some(score) => score,
        None => {
            let analyzer = location_analyzer(args.catalog)?;
            analyzer
                .analyze(&LocationAnalysisRequest {
                    location: args.location.unwrap_or_default(),
                })?
                .safety_rating
        }
    };

    let assessment = assess(&RiskAssessmentRequest {
        purchase_price: args.purchase_price,
        year_built: args.year_built,
        location_score,
        monthly_rent: args.monthly_rent,
    })?;
    print_json(&assessment)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        location,
        asking_price,
    } = args;

    println!("Estate AI valuation demo");
    let estimate_request = PriceEstimateRequest {
        property_type: PropertyType::House,
        bedrooms: 4,
        bathrooms: 3.0,
        area: 2500.0,
        location: location.clone(),
    };
    let estimate_result = estimate(&estimate_request)?;
    println!(
        "\nPrice estimate for a {}-bed {} in {}",
        estimate_request.bedrooms, estimate_request.property_type, location
    );
    println!(
        "- Estimated price: ${} (confidence {}%)",
        estimate_result.estimated_price, estimate_result.confidence
    );
    for factor in &estimate_result.factors {
        println!(
            "  - [{}] {}: {}",
            impact_marker(factor.impact),
            factor.factor,
            factor.description
        );
    }

    let market_value = estimate_result.estimated_price as f64;
    let asking_price = asking_price.unwrap_or(market_value * 0.9);
    let deal_result = evaluate(&DealEvaluationRequest {
        property_price: asking_price,
        estimated_market_value: market_value,
        location: location.clone(),
    })?;
    println!("\nDeal evaluation at an asking price of ${asking_price:.0}");
    println!(
        "- Recommendation: {} (confidence {}%)",
        deal_result.deal_score.label(),
        deal_result.confidence_level
    );
    println!("  {}", deal_result.explanation);

    let metrics = analyze(&InvestmentRequest {
        purchase_price: asking_price,
        monthly_rent: None,
        annual_property_tax: None,
        monthly_hoa_fees: None,
    })?;
    println!("\nRental yield at the asking price");
    println!(
        "- Rent ${:.2}/month | cap rate {:.2}% | cash-on-cash {:.2}%",
        metrics.monthly_rent, metrics.cap_rate, metrics.cash_on_cash_return
    );
    println!(
        "- Net operating income ${:.2} on ${:.2} invested",
        metrics.net_operating_income, metrics.total_investment
    );

    let analyzer = location_analyzer(None)?;
    println!("\nLocation overview");
    let location_score = match analyzer.analyze(&LocationAnalysisRequest { location }) {
        Ok(analysis) => {
            print_location(&analysis);
            Some(analysis.safety_rating)
        }
        Err(LocationError::NotFound(name)) => {
            println!("- No catalog entry for {name}");
            None
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(location_score) = location_score {
        let assessment = assess(&RiskAssessmentRequest {
            purchase_price: asking_price,
            year_built: None,
            location_score,
            monthly_rent: None,
        })?;
        println!("\nRisk and strategy");
        println!(
            "- Market {} | property {} | location {} | financial {}",
            assessment.factors.market.label(),
            assessment.factors.property.label(),
            assessment.factors.location.label(),
            assessment.factors.financial.label()
        );
        println!(
            "- Overall risk {} (score {:.1}/10), strategy {} ({:.1}/10)",
            assessment.overall_risk.label(),
            assessment.risk_score,
            assessment.strategy.label(),
            assessment.investment_score
        );
        for recommendation in &assessment.recommendations {
            println!("  - {recommendation}");
        }
    }

    Ok(())
}

/// Catalog from `catalog`, else the configured path, else the bundled file.
fn location_analyzer(
    catalog: Option<PathBuf>,
) -> Result<LocationAnalyzer<LocationCatalog>, AppError> {
    let catalog_path = match catalog {
        Some(path) => Some(path),
        None => AppConfig::load()?.location.catalog_path,
    };
    Ok(LocationAnalyzer::new(load_location_catalog(
        catalog_path.as_deref(),
    )?))
}

fn print_location(analysis: &LocationAnalysis) {
    println!(
        "- {}: safety {:.1}/10",
        analysis.location, analysis.safety_rating
    );
    println!("  Schools: {}", analysis.schools.join(", "));
    println!("  Transport: {}", analysis.transport.join(", "));
    println!("  {}", analysis.summary);
}

fn impact_marker(impact: FactorImpact) -> &'static str {
    match impact {
        FactorImpact::Positive => "+",
        FactorImpact::Negative => "-",
        FactorImpact::Neutral => "=",
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_ai::valuation::{InputConstraint, ValuationError};
    use std::path::Path;

    fn bundled_catalog_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../crates/estate-ai/data/locations.csv")
    }

    fn estimate_args(bedrooms: u32, area: f64) -> EstimateArgs {
        EstimateArgs {
            property_type: PropertyType::House,
            bedrooms,
            bathrooms: 3.0,
            area,
            location: Some("Austin".to_string()),
        }
    }

    fn risk_args() -> RiskArgs {
        RiskArgs {
            purchase_price: 300_000.0,
            year_built: Some(1995),
            location_score: None,
            location: Some("Austin".to_string()),
            monthly_rent: None,
            catalog: Some(bundled_catalog_path()),
        }
    }

    #[test]
    fn estimate_command_prints_valid_requests() {
        assert!(run_estimate(estimate_args(4, 2500.0)).is_ok());
    }

    #[test]
    fn estimate_command_surfaces_invalid_input() {
        let err = run_estimate(estimate_args(11, 2500.0)).expect_err("too many bedrooms");

        match err {
            AppError::Valuation(err) => assert_eq!(err.field(), "bedrooms"),
            other => panic!("expected valuation error, got {other:?}"),
        }
    }

    #[test]
    fn deal_command_rejects_zero_market_value() {
        let err = run_deal(DealArgs {
            property_price: 350_000.0,
            market_value: 0.0,
            location: None,
        })
        .expect_err("zero market value");

        match err {
            AppError::Valuation(ValuationError::InvalidInput { field, constraint }) => {
                assert_eq!(field, "estimatedMarketValue");
                assert_eq!(constraint, InputConstraint::ZeroDenominator);
            }
            other => panic!("expected valuation error, got {other:?}"),
        }
    }

    #[test]
    fn deal_command_scores_discounts() {
        let result = run_deal(DealArgs {
            property_price: 350_000.0,
            market_value: 400_000.0,
            location: Some("Denver".to_string()),
        });
        assert!(result.is_ok());
    }

    #[test]
    fn invest_command_validates_price() {
        let args = |purchase_price| InvestmentArgs {
            purchase_price,
            monthly_rent: None,
            annual_property_tax: None,
            monthly_hoa_fees: None,
        };

        assert!(run_investment(args(300_000.0)).is_ok());
        assert!(matches!(
            run_investment(args(-5.0)),
            Err(AppError::Valuation(_))
        ));
    }

    #[test]
    fn location_command_reports_unknown_names() {
        let err = run_location(LocationArgs {
            name: "Atlantis".to_string(),
            catalog: Some(bundled_catalog_path()),
        })
        .expect_err("not in catalog");

        assert!(matches!(
            err,
            AppError::Location(LocationError::NotFound(ref name)) if name == "Atlantis"
        ));
    }

    #[test]
    fn location_command_finds_catalog_entries() {
        let result = run_location(LocationArgs {
            name: "austin".to_string(),
            catalog: Some(bundled_catalog_path()),
        });
        assert!(result.is_ok());
    }

    #[test]
    fn location_command_reports_missing_catalog() {
        let err = run_location(LocationArgs {
            name: "Austin".to_string(),
            catalog: Some(PathBuf::from("/nonexistent/locations.csv")),
        })
        .expect_err("missing catalog");

        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[test]
    fn risk_command_uses_catalog_safety_rating() {
        assert!(run_risk(risk_args()).is_ok());

        let mut args = risk_args();
        args.location = Some("Atlantis".to_string());
        assert!(matches!(
            run_risk(args),
            Err(AppError::Location(LocationError::NotFound(_)))
        ));
    }

    #[test]
    fn demo_runs_for_catalog_and_unknown_locations() {
        for location in ["Austin", "Atlantis"] {
            let result = run_demo(DemoArgs {
                location: location.to_string(),
                asking_price: None,
            });
            assert!(result.is_ok(), "demo for {location}: {result:?}");
        }
    }

    #[test]
    fn demo_rejects_invalid_asking_price() {
        let result = run_demo(DemoArgs {
            location: "Austin".to_string(),
            asking_price: Some(-1.0),
        });

        assert!(matches!(result, Err(AppError::Valuation(_))));
    }

    #[test]
    fn risk_command_prefers_explicit_score() {
        let mut args = risk_args();
        args.location = None;
        args.catalog = Some(PathBuf::from("/nonexistent/locations.csv"));
        args.location_score = Some(11.0);

        match run_risk(args).expect_err("score above ten") {
            AppError::Valuation(err) => assert_eq!(err.field(), "locationScore"),
            other => panic!("expected valuation error, got {other:?}"),
        }
    }
}
