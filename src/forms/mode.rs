//! Create vs. edit selection from the page's `id` query parameter.

use std::fmt;

use reqwest::Url;

const EDIT_QUERY_KEY: &str = "id";

/// Identifier of the record being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditTarget(String);

impl EditTarget {
    /// Returns `None` for a blank identifier.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Reads `id` from a raw query string such as `?id=abc&tab=2`.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.trim_start_matches('?');
        let url = Url::parse(&format!("http://localhost/?{query}")).ok()?;
        Self::from_url(&url)
    }

    /// Reads `id` from the query of a full page URL.
    pub fn from_url(url: &Url) -> Option<Self> {
        url.query_pairs()
            .find(|(key, _)| key == EDIT_QUERY_KEY)
            .and_then(|(_, value)| Self::new(value.into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a submission creates a new record or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EditTarget),
}

impl FormMode {
    pub fn from_target(target: Option<EditTarget>) -> Self {
        match target {
            Some(target) => FormMode::Edit(target),
            None => FormMode::Create,
        }
    }

    pub fn target(&self) -> Option<&EditTarget> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(target) => Some(target),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}
