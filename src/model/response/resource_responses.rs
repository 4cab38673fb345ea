use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::api::{ResourceApi, ResourcePage};
use crate::model::response::BasicMessage;

/// body of a successful `DELETE /resources/{id}`
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct DeleteConfirmation {
    pub success: bool,
}

#[derive(Responder)]
pub enum SearchResourcesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<ResourcePage>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum CreateResourceResponse {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 201, content_type = "json")]
    Success(Json<ResourceApi>),
}

#[derive(Responder)]
pub enum GetResourceResponse {
    #[response(status = 404, content_type = "json")]
    ResourceNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 200, content_type = "json")]
    Success(Json<ResourceApi>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum UpdateResourceResponse {
    #[response(status = 404, content_type = "json")]
    ResourceNotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 200, content_type = "json")]
    Success(Json<ResourceApi>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum DeleteResourceResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ResourceDbError(Json<BasicMessage>),
    #[response(status = 200, content_type = "json")]
    Success(Json<DeleteConfirmation>),
}
