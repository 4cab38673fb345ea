use rocket::serde::json::Json;

use crate::guard::{HeaderAuth, ValidateResult};
use crate::model::error::resource_errors::{
    CreateResourceError, DeleteResourceError, GetResourceError, ListResourcesError,
    UpdateResourceError,
};
use crate::model::request::resource_requests::{CreateResourceRequest, UpdateResourceRequest};
use crate::model::response::resource_responses::{
    CreateResourceResponse, DeleteConfirmation, DeleteResourceResponse, GetResourceResponse,
    SearchResourcesResponse, UpdateResourceResponse,
};
use crate::model::response::BasicMessage;
use crate::service::resource_service;

#[get("/?<search>&<page>&<limit>&<tags>")]
pub fn search_resources(
    search: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
    tags: Option<String>,
    auth: HeaderAuth,
) -> SearchResourcesResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return SearchResourcesResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return SearchResourcesResponse::ResourceDbError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    match resource_service::search_resources(user_id, search, page, limit, tags) {
        Ok(found) => SearchResourcesResponse::Success(Json::from(found)),
        Err(ListResourcesError::DbError(message)) => {
            SearchResourcesResponse::ResourceDbError(BasicMessage::new(message.as_str()))
        }
    }
}

#[post("/", data = "<body>")]
pub fn create_resource(
    body: Result<Json<CreateResourceRequest>, rocket::serde::json::Error<'_>>,
    auth: HeaderAuth,
) -> CreateResourceResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return CreateResourceResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return CreateResourceResponse::ResourceDbError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    let request = match body {
        Ok(request) => request.into_inner(),
        Err(e) => {
            return CreateResourceResponse::BadRequest(BasicMessage::new(
                body_error_message(&e).as_str(),
            ))
        }
    };
    match resource_service::create_resource(user_id, request) {
        Ok(created) => CreateResourceResponse::Success(Json::from(created)),
        Err(CreateResourceError::MissingTitle) => {
            CreateResourceResponse::BadRequest(BasicMessage::new("Title is required"))
        }
        Err(CreateResourceError::DbError(message)) => {
            CreateResourceResponse::ResourceDbError(BasicMessage::new(message.as_str()))
        }
    }
}

#[get("/<id>")]
pub fn get_resource(id: u32, auth: HeaderAuth) -> GetResourceResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return GetResourceResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return GetResourceResponse::ResourceDbError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    match resource_service::get_resource(id, user_id) {
        Ok(found) => GetResourceResponse::Success(Json::from(found)),
        Err(GetResourceError::NotFound) => {
            GetResourceResponse::ResourceNotFound(BasicMessage::new("Resource not found"))
        }
        Err(GetResourceError::DbError(message)) => {
            GetResourceResponse::ResourceDbError(BasicMessage::new(message.as_str()))
        }
    }
}

#[patch("/<id>", data = "<body>")]
pub fn update_resource(
    id: u32,
    body: Result<Json<UpdateResourceRequest>, rocket::serde::json::Error<'_>>,
    auth: HeaderAuth,
) -> UpdateResourceResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return UpdateResourceResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return UpdateResourceResponse::ResourceDbError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    let request = match body {
        Ok(request) => request.into_inner(),
        Err(e) => {
            return UpdateResourceResponse::BadRequest(BasicMessage::new(
                body_error_message(&e).as_str(),
            ))
        }
    };
    match resource_service::update_resource(id, user_id, request) {
        Ok(updated) => UpdateResourceResponse::Success(Json::from(updated)),
        Err(UpdateResourceError::NoFields) => {
            UpdateResourceResponse::BadRequest(BasicMessage::new("No fields to update"))
        }
        Err(UpdateResourceError::MissingTitle) => {
            UpdateResourceResponse::BadRequest(BasicMessage::new("Title is required"))
        }
        Err(UpdateResourceError::NotFound) => {
            UpdateResourceResponse::ResourceNotFound(BasicMessage::new("Resource not found"))
        }
        Err(UpdateResourceError::DbError(message)) => {
            UpdateResourceResponse::ResourceDbError(BasicMessage::new(message.as_str()))
        }
    }
}

#[delete("/<id>")]
pub fn delete_resource(id: u32, auth: HeaderAuth) -> DeleteResourceResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return DeleteResourceResponse::Unauthorized(BasicMessage::new("Unauthorized"))
        }
        ValidateResult::DbError => {
            return DeleteResourceResponse::ResourceDbError(BasicMessage::new(
                "Failed to check credentials against the database. Check server logs for details",
            ))
        }
    };
    match resource_service::delete_resource(id, user_id) {
        // deleting a row that was never there reports success all the same
        Ok(()) => DeleteResourceResponse::Success(Json::from(DeleteConfirmation { success: true })),
        Err(DeleteResourceError::DbError(message)) => {
            DeleteResourceResponse::ResourceDbError(BasicMessage::new(message.as_str()))
        }
    }
}

/// turns a rejected request body into the message its 400 carries: json that
/// won't parse at all is reported as such, json of the wrong shape gets
/// serde's own description
fn body_error_message(error: &rocket::serde::json::Error) -> String {
    match error {
        rocket::serde::json::Error::Parse(_, e)
            if e.classify() == serde_json::error::Category::Data =>
        {
            e.to_string()
        }
        _ => String::from("Invalid JSON"),
    }
}
