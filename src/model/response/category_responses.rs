use rocket::serde::json::Json;

use crate::model::api::CategoryApi;
use crate::model::response::BasicMessage;

#[derive(Responder)]
pub enum GetCategoriesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<CategoryApi>>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    CategoryDbError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum ReplaceCategoriesResponse {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<CategoryApi>>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    CategoryDbError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum ResetCategoriesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<CategoryApi>>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    CategoryDbError(Json<BasicMessage>),
}
