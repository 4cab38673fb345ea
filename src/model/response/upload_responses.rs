use rocket::serde::json::Json;

use crate::model::api::UploadApi;
use crate::model::response::BasicMessage;

#[derive(Responder)]
pub enum UploadFileResponse {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 201, content_type = "json")]
    Success(Json<UploadApi>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    StorageError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum UploadDataUrlResponse {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 201, content_type = "json")]
    Success(Json<UploadApi>),
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    StorageError(Json<BasicMessage>),
}
