use std::path::Path;

use rocket::form::Form;
use rocket::fs::NamedFile;
use rocket::serde::json::Json;

use crate::guard::{HeaderAuth, ValidateResult};
use crate::model::error::upload_errors::{UploadDataUrlError, UploadFileError};
use crate::model::request::upload_requests::{DataUrlUploadRequest, UploadRequest};
use crate::model::response::upload_responses::{UploadDataUrlResponse, UploadFileResponse};
use crate::model::response::BasicMessage;
use crate::service::upload_service;

/// accepts a multipart file and stores it under the caller's own directory
#[post("/", data = "<upload>")]
pub async fn upload_file(upload: Form<UploadRequest<'_>>, auth: HeaderAuth) -> UploadFileResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return UploadFileResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return UploadFileResponse::StorageError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    match upload_service::save_upload(user_id, upload.into_inner()).await {
        Ok(saved) => UploadFileResponse::Success(Json::from(saved)),
        Err(UploadFileError::MissingFile) => {
            UploadFileResponse::BadRequest(BasicMessage::new("A file part is required"))
        }
        Err(UploadFileError::Disk(message)) => {
            UploadFileResponse::StorageError(BasicMessage::new(message.as_str()))
        }
    }
}

/// stores the payload of a base64 data url the same way a multipart upload
/// lands
#[post("/data-url", data = "<body>")]
pub async fn upload_data_url(
    body: Result<Json<DataUrlUploadRequest>, rocket::serde::json::Error<'_>>,
    auth: HeaderAuth,
) -> UploadDataUrlResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return UploadDataUrlResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return UploadDataUrlResponse::StorageError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    let request = match body {
        Ok(request) => request.into_inner(),
        Err(_) => return UploadDataUrlResponse::BadRequest(BasicMessage::new("Invalid JSON")),
    };
    match upload_service::save_data_url(user_id, request).await {
        Ok(saved) => UploadDataUrlResponse::Success(Json::from(saved)),
        Err(UploadDataUrlError::InvalidDataUrl) => {
            UploadDataUrlResponse::BadRequest(BasicMessage::new("Invalid data URL"))
        }
        Err(UploadDataUrlError::Disk(message)) => {
            UploadDataUrlResponse::StorageError(BasicMessage::new(message.as_str()))
        }
    }
}

/// serves a stored upload back. Upload urls get pasted into resources and
/// shared, so this route skips the auth gate
#[get("/<user_id>/<file_name>")]
pub async fn download_upload(user_id: u32, file_name: &str) -> Option<NamedFile> {
    // the route can't match nested segments, but don't trust the name anyway
    if file_name.contains("..") || file_name.contains('/') || file_name.contains('\\') {
        return None;
    }
    NamedFile::open(Path::new(
        format!("{}/{user_id}/{file_name}", upload_service::upload_dir()).as_str(),
    ))
    .await
    .ok()
}
