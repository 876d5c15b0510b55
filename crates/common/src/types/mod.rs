use serde::{Deserialize, Serialize};

/// Liveness probe body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}

/// Body returned by the counter endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterValue {
    pub value: i32,
}

/// Error body for failed requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}
