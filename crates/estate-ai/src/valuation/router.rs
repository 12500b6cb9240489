use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use super::domain::{
    DealEvaluationRequest, InvestmentRequest, PriceEstimatePayload, PriceEstimateRequest,
    RiskAssessmentRequest,
};
use super::error::ValuationError;
use super::location::{
    LocationAnalysisRequest, LocationAnalyzer, LocationDataSource, LocationError,
};
use super::{deal, investment, price, risk};

/// Router builder exposing one POST endpoint per valuation operation.
pub fn valuation_router<S>(analyzer: Arc<LocationAnalyzer<S>>) -> Router
where
    S: LocationDataSource + 'static,
{
    Router::new()
        .route("/api/v1/valuation/estimate", post(estimate_handler))
        .route("/api/v1/valuation/deal", post(deal_handler))
        .route("/api/v1/valuation/investment", post(investment_handler))
        .route("/api/v1/valuation/risk", post(risk_handler))
        .route("/api/v1/valuation/location", post(location_handler::<S>))
        .with_state(analyzer)
}

pub(crate) async fn estimate_handler(
    payload: Result<Json<PriceEstimatePayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    let request = match PriceEstimateRequest::try_from(payload) {
        Ok(request) => request,
        Err(err) => return invalid_input_response(&err),
    };

    match price::estimate(&request) {
        Ok(result) => {
            info!(
                property_type = %request.property_type,
                estimated_price = result.estimated_price,
                "price estimate served"
            );
            ok_json(&result)
        }
        Err(err) => invalid_input_response(&err),
    }
}

pub(crate) async fn deal_handler(
    payload: Result<Json<DealEvaluationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };

    match deal::evaluate(&request) {
        Ok(result) => {
            info!(deal_score = result.deal_score.label(), "deal evaluation served");
            ok_json(&result)
        }
        Err(err) => invalid_input_response(&err),
    }
}

pub(crate) async fn investment_handler(
    payload: Result<Json<InvestmentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };

    match investment::analyze(&request) {
        Ok(metrics) => {
            info!(cap_rate = metrics.cap_rate, "investment metrics served");
            ok_json(&metrics)
        }
        Err(err) => invalid_input_response(&err),
    }
}

pub(crate) async fn risk_handler(
    payload: Result<Json<RiskAssessmentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };

    match risk::assess(&request) {
        Ok(assessment) => {
            info!(
                overall_risk = assessment.overall_risk.label(),
                strategy = assessment.strategy.label(),
                "risk assessment served"
            );
            ok_json(&assessment)
        }
        Err(err) => invalid_input_response(&err),
    }
}

pub(crate) async fn location_handler<S>(
    State(analyzer): State<Arc<LocationAnalyzer<S>>>,
    payload: Result<Json<LocationAnalysisRequest>, JsonRejection>,
) -> Response
where
    S: LocationDataSource + 'static,
{
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };

    match analyzer.analyze(&request) {
        Ok(analysis) => ok_json(&analysis),
        Err(LocationError::Invalid(err)) => invalid_input_response(&err),
        Err(LocationError::NotFound(location)) => {
            let payload = json!({
                "error": format!("no location data for '{location}'"),
                "location": location,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(LocationError::Source(err)) => {
            error!(%err, "location source failed");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn ok_json<T: Serialize>(body: &T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) fn invalid_input_response(err: &ValuationError) -> Response {
    warn!(field = err.field(), %err, "rejected valuation input");
    let payload = json!({
        "error": err.to_string(),
        "field": err.field(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

pub(crate) fn rejection_response(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    warn!(%status, "rejected request body");
    let payload = json!({
        "error": rejection.body_text(),
    });
    (status, Json(payload)).into_response()
}
