use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// the kind of embedded content a resource carries. Only twitter embeds are
/// recognized; anything else is stored as a plain url/screenshot instead
#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Hash, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum EmbedType {
    Twitter,
}

impl From<&str> for EmbedType {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "twitter" => Self::Twitter,
            _ => {
                log::warn!(
                    "embed type from database {value} does not match any branches in EmbedType#from"
                );
                Self::Twitter
            }
        }
    }
}

impl ToSql for EmbedType {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        match self {
            Self::Twitter => Ok("twitter".into()),
        }
    }
}

impl std::fmt::Display for EmbedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Twitter => write!(f, "twitter"),
        }
    }
}

/// how a category picks its values: `Text` from a fixed option list, `Color`
/// from a free color picker (so its option list stays empty)
#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Hash, Copy, Clone, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    #[default]
    Text,
    Color,
}

impl From<&str> for CategoryType {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "color" => Self::Color,
            _ => {
                log::warn!(
                    "category type from database {value} does not match any branches in CategoryType#from"
                );
                Self::Text
            }
        }
    }
}

impl ToSql for CategoryType {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        match self {
            Self::Text => Ok("text".into()),
            Self::Color => Ok("color".into()),
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Color => write!(f, "color"),
        }
    }
}
