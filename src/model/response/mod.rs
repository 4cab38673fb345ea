use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

pub mod api_responses;
pub mod category_responses;
pub mod resource_responses;
pub mod upload_responses;

/// the uniform failure body: every non-2xx response is `{"error": "..."}`
/// with nothing else in it
#[derive(Responder, Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BasicMessage {
    pub error: String,
}

impl BasicMessage {
    pub fn new(error: &str) -> Json<BasicMessage> {
        Json::from(BasicMessage {
            error: error.to_string(),
        })
    }
}

impl From<&str> for BasicMessage {
    fn from(value: &str) -> Self {
        Self {
            error: value.to_string(),
        }
    }
}

impl From<String> for BasicMessage {
    fn from(value: String) -> Self {
        Self { error: value }
    }
}
