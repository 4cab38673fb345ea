use rocket::serde::{Deserialize, Serialize};

use crate::model::kinds::CategoryType;

/// one entry in the `PUT /categories` body. The position in the submitted
/// array becomes the category's sort position
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(crate = "rocket::serde")]
pub struct CategoryDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: CategoryType,
    #[serde(default)]
    pub options: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::CategoryDescriptor;
    use crate::model::kinds::CategoryType;

    #[test]
    fn kind_and_options_have_defaults() {
        let parsed: CategoryDescriptor = serde_json::from_str(r#"{"name":"Mood"}"#).unwrap();
        assert_eq!("Mood", parsed.name);
        assert_eq!(CategoryType::Text, parsed.kind);
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn kind_comes_from_the_type_field() {
        let parsed: CategoryDescriptor =
            serde_json::from_str(r#"{"name":"Palette","type":"color"}"#).unwrap();
        assert_eq!(CategoryType::Color, parsed.kind);
    }
}
