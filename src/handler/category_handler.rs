use rocket::serde::json::Json;

use crate::guard::{HeaderAuth, ValidateResult};
use crate::model::error::category_errors::{
    GetCategoriesError, ReplaceCategoriesError, ResetCategoriesError,
};
use crate::model::request::category_requests::CategoryDescriptor;
use crate::model::response::category_responses::{
    GetCategoriesResponse, ReplaceCategoriesResponse, ResetCategoriesResponse,
};
use crate::model::response::BasicMessage;
use crate::service::category_service;

/// lists the caller's effective categories: their own set when they've saved
/// one, the defaults otherwise
#[get("/")]
pub fn get_categories(auth: HeaderAuth) -> GetCategoriesResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return GetCategoriesResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return GetCategoriesResponse::CategoryDbError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    match category_service::get_effective_categories(user_id) {
        Ok(categories) => GetCategoriesResponse::Success(Json::from(categories)),
        Err(GetCategoriesError::DbError(message)) => {
            GetCategoriesResponse::CategoryDbError(BasicMessage::new(message.as_str()))
        }
    }
}

/// swaps the caller's whole category set for the submitted array
#[put("/", data = "<body>")]
pub fn replace_categories(
    body: Result<Json<Vec<CategoryDescriptor>>, rocket::serde::json::Error<'_>>,
    auth: HeaderAuth,
) -> ReplaceCategoriesResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return ReplaceCategoriesResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return ReplaceCategoriesResponse::CategoryDbError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    let descriptors = match body {
        Ok(descriptors) => descriptors.into_inner(),
        Err(e) => {
            return ReplaceCategoriesResponse::BadRequest(BasicMessage::new(
                body_error_message(&e).as_str(),
            ))
        }
    };
    match category_service::replace_categories(user_id, descriptors) {
        Ok(created) => ReplaceCategoriesResponse::Success(Json::from(created)),
        Err(ReplaceCategoriesError::DbError(message)) => {
            ReplaceCategoriesResponse::CategoryDbError(BasicMessage::new(message.as_str()))
        }
    }
}

/// drops the caller's custom categories, making the defaults effective again
#[post("/reset")]
pub fn reset_categories(auth: HeaderAuth) -> ResetCategoriesResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return ResetCategoriesResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return ResetCategoriesResponse::CategoryDbError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    match category_service::reset_categories(user_id) {
        Ok(defaults) => ResetCategoriesResponse::Success(Json::from(defaults)),
        Err(ResetCategoriesError::DbError(message)) => {
            ResetCategoriesResponse::CategoryDbError(BasicMessage::new(message.as_str()))
        }
    }
}

/// turns a rejected body into its 400 message: json that won't parse at all
/// is one thing, a top level that isn't an array another, and a broken
/// descriptor inside the array gets serde's own description
fn body_error_message(error: &rocket::serde::json::Error) -> String {
    match error {
        rocket::serde::json::Error::Parse(body, e)
            if e.classify() == serde_json::error::Category::Data =>
        {
            // once the top level is an array, any shape error is element-level
            if body.trim_start().starts_with('[') {
                e.to_string()
            } else {
                String::from("Categories must be an array")
            }
        }
        _ => String::from("Invalid JSON"),
    }
}
