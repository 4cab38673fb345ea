use rocket::serde::{json::Json, Serialize};

use crate::model::error::user_errors::CreateUserError;
use crate::model::request::NewUser;
use crate::model::response::api_responses::CreateUserResponse;
use crate::model::response::BasicMessage;
use crate::service::user_service;

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiVersion {
    version: String,
}

impl ApiVersion {
    fn new() -> ApiVersion {
        ApiVersion {
            version: String::from(env!("CARGO_PKG_VERSION")),
        }
    }
}

#[get("/version")]
pub fn api_version() -> Json<ApiVersion> {
    Json(ApiVersion::new())
}

/// registers a new account. Registration is open to anyone who can reach the
/// server
#[post("/users", data = "<user>")]
pub fn create_user(
    user: Result<Json<NewUser>, rocket::serde::json::Error<'_>>,
) -> CreateUserResponse {
    let user = match user {
        Ok(user) => user,
        Err(_) => return CreateUserResponse::BadRequest(BasicMessage::new("Invalid JSON")),
    };
    match user_service::create_user(user.into_inner()) {
        Ok(()) => CreateUserResponse::Created(()),
        Err(e) if e == CreateUserError::AlreadyExists => {
            CreateUserResponse::AlreadyExists(BasicMessage::new("That username is already taken."))
        }
        Err(e) if e == CreateUserError::MissingFields => CreateUserResponse::MissingFields(
            BasicMessage::new("Both a username and a password are required."),
        ),
        Err(_) => CreateUserResponse::Failure(BasicMessage::new(
            "Failed to register the account. Check server logs for details",
        )),
    }
}
