//! Portfolio categories as returned by `GET /category`.

use serde::{Deserialize, Serialize};

use crate::common::{Displayable, Identifiable};

/// Category a portfolio item can be filed under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "categoryName", default)]
    pub category_name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, category_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category_name: category_name.into(),
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        self.category_name.clone()
    }
}

/// Envelope of the category listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(rename = "allCategories", default)]
    pub all_categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_listing_envelope() {
        let raw = r#"{"allCategories":[{"_id":"c1","categoryName":"Branding"}]}"#;
        let list: CategoryList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.all_categories, vec![Category::new("c1", "Branding")]);
    }

    #[test]
    fn missing_key_is_an_empty_list() {
        let list: CategoryList = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(list.all_categories.is_empty());
    }
}
