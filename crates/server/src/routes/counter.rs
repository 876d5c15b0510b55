use axum::{extract::State, Json};
use common::types::CounterValue;

use crate::errors::ApiError;
use crate::observability::{INCREMENTS_TOTAL, INCREMENT_DURATION, INCREMENT_ERRORS_TOTAL};
use crate::state::ServerState;

/// Increment the global counter and return the new value
#[utoipa::path(post, path = "/counter/increment", tag = "counter", responses((status = 200, description = "Committed value after the increment", body = crate::openapi::CounterValueResponse), (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponse)))]
pub async fn increment(State(state): State<ServerState>) -> Result<Json<CounterValue>, ApiError> {
    let timer = INCREMENT_DURATION.start_timer();
    let res = state.counter.increment().await;
    timer.observe_duration();
    match res {
        Ok(value) => {
            INCREMENTS_TOTAL.inc();
            Ok(Json(CounterValue { value }))
        }
        Err(e) => {
            INCREMENT_ERRORS_TOTAL.inc();
            Err(e.into())
        }
    }
}

/// Read the counter without changing it
#[utoipa::path(get, path = "/counter", tag = "counter", responses((status = 200, description = "Current value", body = crate::openapi::CounterValueResponse), (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponse)))]
pub async fn current(State(state): State<ServerState>) -> Result<Json<CounterValue>, ApiError> {
    let value = state.counter.current().await?;
    Ok(Json(CounterValue { value }))
}
