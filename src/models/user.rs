use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the users file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub email: String,
    pub password: String,
    pub timestamp: String,  // ISO-8601, e.g. 2024-05-01T10:20:30.123Z
    // Fields written by other tools are carried through rewrites untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(email: String, password: String) -> Self {
        Self {
            email,
            password,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            extra: Map::new(),
        }
    }
}
