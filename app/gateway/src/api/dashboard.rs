//! Read-only health record routes.

use super::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use care::health::{Medication, Overview, Vitals};
use chrono::NaiveDate;
use llm::Generator;
use serde::Deserialize;
use serde_json::{Value, json};

/// Query of `GET /dashboard/vitals`. Missing bounds default to the first
/// and last reading.
#[derive(Debug, Default, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub async fn overview<G: Generator>(State(state): State<AppState<G>>) -> Json<Overview> {
    Json(state.record.overview())
}

pub async fn vitals<G: Generator>(
    State(state): State<AppState<G>>,
    Query(range): Query<DateRange>,
) -> Result<Json<Vec<Vitals>>, ApiError> {
    let record = &state.record;
    let (Some(first), Some(last)) = (record.vitals.first(), record.vitals.last()) else {
        return Ok(Json(Vec::new()));
    };
    let from = range.from.unwrap_or(first.date);
    let to = range.to.unwrap_or(last.date);
    let vitals = record.vitals_between(from, to)?.into_iter().cloned().collect();
    Ok(Json(vitals))
}

pub async fn labs<G: Generator>(State(state): State<AppState<G>>) -> Json<Value> {
    let record = &state.record;
    Json(json!({
        "results": record.labs,
        "status_counts": record.lab_status_counts(),
        "cholesterol": record.cholesterol_panel(),
    }))
}

pub async fn history<G: Generator>(State(state): State<AppState<G>>) -> Json<Value> {
    let record = &state.record;
    Json(json!({
        "timeline": record.timeline(),
        "status_counts": record.condition_status_counts(),
        "active": record.active_conditions(),
    }))
}

pub async fn medications<G: Generator>(State(state): State<AppState<G>>) -> Json<Vec<Medication>> {
    Json(state.record.medications.clone())
}
