//! Applicant rules endpoint.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use shopfront_rules::{Applicant, Evaluation};
use tracing::debug;

use crate::error::ApiError;

/// `POST /rules/evaluate`
pub async fn evaluate(
    body: Result<Json<Applicant>, JsonRejection>,
) -> Result<Json<Evaluation>, ApiError> {
    let Json(applicant) =
        body.map_err(|rejection| ApiError::malformed("bad_request", rejection.body_text()))?;

    let evaluation = shopfront_rules::evaluate(&applicant)?;
    debug!(decision = evaluation.decision.as_str(), age = ?evaluation.age, "applicant evaluated");

    Ok(Json(evaluation))
}
