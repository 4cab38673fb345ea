use std::collections::HashMap;

use chrono::NaiveDateTime;
use rocket::serde::{Deserialize, Serialize};

use crate::model::kinds::{CategoryType, EmbedType};
use crate::model::repository::{Category, Resource};

/// a resource as it goes over the wire. Optional columns serialize as explicit
/// nulls so clients can tell "cleared" from "never sent"
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ResourceApi {
    pub id: u32,
    pub user_id: u32,
    pub title: String,
    pub url: Option<String>,
    pub screenshot: Option<String>,
    pub embed_code: Option<String>,
    pub embed_type: Option<EmbedType>,
    pub notes: Option<String>,
    pub tags: HashMap<String, Vec<String>>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Resource> for ResourceApi {
    fn from(value: Resource) -> Self {
        Self {
            // should always have an id when coming from the database
            id: value.id.unwrap(),
            user_id: value.user_id,
            title: value.title,
            url: value.url,
            screenshot: value.screenshot,
            embed_code: value.embed_code,
            embed_type: value.embed_type,
            notes: value.notes,
            tags: value.tags,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct CategoryApi {
    pub id: u32,
    /// `None` for rows in the default set
    pub user_id: Option<u32>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    pub options: Vec<String>,
    pub sort_order: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Category> for CategoryApi {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.unwrap(),
            user_id: value.user_id,
            name: value.name,
            kind: value.kind,
            options: value.options,
            sort_order: value.sort_order,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// one page of search results plus the numbers a client needs to render a pager
#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ResourcePage {
    pub items: Vec<ResourceApi>,
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// where an uploaded file ended up: `path` is `{user_id}/{file_name}` under the
/// storage root, `url` is the public address built from the configured base
#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct UploadApi {
    pub url: String,
    pub path: String,
}
