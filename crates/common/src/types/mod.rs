use serde::{Deserialize, Serialize};

/// Liveness payload returned by `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn healthy() -> Self {
        Self { status: "healthy".into() }
    }
}

/// Plain `{"message": ...}` body used by informational endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
