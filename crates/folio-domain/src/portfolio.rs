//! Existing portfolio items as returned by `GET /portfolio/portfolioLists`.

use serde::{Deserialize, Serialize};

use crate::common::Identifiable;

/// A portfolio item already stored on the server.
///
/// Every text field is optional on the wire; missing values decode to empty
/// strings so an edit form can be filled from partial records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortfolioItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Remote URL of the stored image. Never copied into a form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PortfolioItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: description.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }
}

impl Identifiable for PortfolioItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Envelope of the portfolio listing endpoint. The key spelling is the one the
/// server emits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioList {
    #[serde(rename = "PorfolioList", default)]
    pub items: Vec<PortfolioItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::find_by_id;

    #[test]
    fn decodes_partial_records() {
        let raw = r#"{"PorfolioList":[{"_id":"p1","name":"Logo"},{"_id":"p2","image":"https://cdn/x.png"}]}"#;
        let list: PortfolioList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].category, "");
        assert_eq!(list.items[1].image.as_deref(), Some("https://cdn/x.png"));
    }

    #[test]
    fn find_by_id_matches_exact_identifier() {
        let items = vec![
            PortfolioItem::new("a", "First", "Web", "one"),
            PortfolioItem::new("b", "Second", "Print", "two"),
        ];
        assert_eq!(find_by_id(&items, "b").map(|item| item.name.as_str()), Some("Second"));
        assert!(find_by_id(&items, "B").is_none());
    }
}
