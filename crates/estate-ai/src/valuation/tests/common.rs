use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::valuation::location::{
    LocationAnalysis, LocationAnalyzer, LocationCatalog, LocationDataSource, LocationSourceError,
};
use crate::valuation::{
    valuation_router, DealEvaluationRequest, InvestmentRequest, PriceEstimateRequest,
    PropertyType, RiskAssessmentRequest,
};

pub(super) fn price_request(
    property_type: PropertyType,
    bedrooms: u32,
    bathrooms: f64,
    area: f64,
) -> PriceEstimateRequest {
    PriceEstimateRequest {
        property_type,
        bedrooms,
        bathrooms,
        area,
        location: "Austin".to_string(),
    }
}

pub(super) fn family_house() -> PriceEstimateRequest {
    price_request(PropertyType::House, 4, 3.0, 2500.0)
}

pub(super) fn deal_request(property_price: f64, estimated_market_value: f64) -> DealEvaluationRequest {
    DealEvaluationRequest {
        property_price,
        estimated_market_value,
        location: "Denver".to_string(),
    }
}

pub(super) fn investment_request(purchase_price: f64) -> InvestmentRequest {
    InvestmentRequest {
        purchase_price,
        monthly_rent: None,
        annual_property_tax: None,
        monthly_hoa_fees: None,
    }
}

pub(super) fn risk_request(
    purchase_price: f64,
    year_built: Option<u16>,
    location_score: f64,
) -> RiskAssessmentRequest {
    RiskAssessmentRequest {
        purchase_price,
        year_built,
        location_score,
        monthly_rent: None,
    }
}

pub(super) const SAMPLE_CATALOG: &str = "location,safety_rating,schools,transport,summary\n\
Springfield,6.5,Springfield Elementary;West Springfield High,Monorail;Bus 12,\"Quiet town with a stable market.\"\n\
Shelbyville,5.0,,Bus 3,Rival town.\n";

pub(super) fn sample_catalog() -> LocationCatalog {
    LocationCatalog::from_reader(SAMPLE_CATALOG.as_bytes()).expect("sample catalog parses")
}

/// Source that always fails, standing in for an unreachable data service.
pub(super) struct OfflineSource;

impl LocationDataSource for OfflineSource {
    fn lookup(&self, _key: &str) -> Result<Option<LocationAnalysis>, LocationSourceError> {
        Err(LocationSourceError::Unavailable("connection refused".to_string()))
    }
}

pub(super) fn catalog_router() -> axum::Router {
    valuation_router(Arc::new(LocationAnalyzer::new(sample_catalog())))
}

pub(super) fn json_request(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serializable body"),
        ))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
