use std::collections::HashMap;

use rocket::serde::{Deserialize, Deserializer};

use crate::model::kinds::EmbedType;

/// body for `POST /resources`. Everything except the title may be left out,
/// and empty strings are treated the same as absent by the service
#[derive(Deserialize, Debug, Default)]
#[serde(crate = "rocket::serde")]
pub struct CreateResourceRequest {
    /// optional here so a missing title can produce a targeted message
    /// instead of a generic deserialization error
    pub title: Option<String>,
    pub url: Option<String>,
    pub screenshot: Option<String>,
    pub embed_code: Option<String>,
    pub embed_type: Option<EmbedType>,
    pub notes: Option<String>,
    pub tags: Option<HashMap<String, Vec<String>>>,
}

/// body for `PATCH /resources/{id}`.
///
/// The nullable columns are double-wrapped so the three body states stay
/// distinguishable: field absent (skip), field null (write NULL), field set
/// (write the value). Serde collapses `null` into the outer `None` by
/// default, which is why these fields need [`double_option`]
#[derive(Deserialize, Debug, Default)]
#[serde(crate = "rocket::serde")]
pub struct UpdateResourceRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub screenshot: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub embed_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub embed_type: Option<Option<EmbedType>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    /// a null tags field is ignored rather than clearing the map, so no
    /// double wrapping
    pub tags: Option<HashMap<String, Vec<String>>>,
}

impl UpdateResourceRequest {
    /// true if the body carried none of the updatable fields
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

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
