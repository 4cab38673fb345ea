use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::kinds::{CategoryType, EmbedType};

/// a saved inspiration item as it lives in the resources table
#[derive(Debug, PartialEq, Clone)]
pub struct Resource {
    /// the id, will only be populated when pulled from the database
    pub id: Option<u32>,
    /// the user that owns this resource. Ownership never changes after creation
    pub user_id: u32,
    /// always non-empty after trimming
    pub title: String,
    pub url: Option<String>,
    pub screenshot: Option<String>,
    pub embed_code: Option<String>,
    pub embed_type: Option<EmbedType>,
    pub notes: Option<String>,
    /// category name -> selected option values; stored as a json text column
    pub tags: HashMap<String, Vec<String>>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// a tag category as it lives in the categories table.
/// Rows with no `user_id` make up the default set every user starts with
#[derive(Debug, PartialEq, Clone)]
pub struct Category {
    /// the id, will only be populated when pulled from the database
    pub id: Option<u32>,
    /// `None` marks a row in the default set
    pub user_id: Option<u32>,
    pub name: String,
    pub kind: CategoryType,
    /// ordered list of selectable option strings; stored as a json text column
    pub options: Vec<String>,
    /// 0-based display position within the owning set
    pub sort_order: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// a registered account row. The auth hash itself never leaves the repository layer
#[derive(Debug, PartialEq)]
pub struct User {
    pub id: Option<u32>,
    pub username: String,
}

/// the set of column changes a partial resource update applies.
///
/// The outer `Option` on the nullable columns means "should this column change
/// at all"; the inner one is the new value, with `None` writing NULL. Fields
/// left as `None` are not touched by the update statement
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ResourcePatch {
    /// title can never become NULL, so no inner `Option`
    pub title: Option<String>,
    pub url: Option<Option<String>>,
    pub screenshot: Option<Option<String>>,
    pub embed_code: Option<Option<String>>,
    pub embed_type: Option<Option<EmbedType>>,
    pub notes: Option<Option<String>>,
    pub tags: Option<HashMap<String, Vec<String>>>,
}

impl ResourcePatch {
    /// true if applying this patch would touch no columns
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.screenshot.is_none()
            && self.embed_code.is_none()
            && self.embed_type.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
    }
}
