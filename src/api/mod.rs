//! The dashboard API as seen by the form controllers.

pub mod http;

use async_trait::async_trait;
use folio_domain::{Category, ImageUpload, PortfolioItem, SignupRequest, SignupResponse};

use crate::errors::RequestError;

pub use http::HttpDashboardApi;

pub const CATEGORY_LIST_PATH: &str = "category";
pub const PORTFOLIO_LIST_PATH: &str = "portfolio/portfolioLists";
pub const PORTFOLIO_CREATE_PATH: &str = "portfolio/addportfolio";
pub const PORTFOLIO_UPDATE_PATH: &str = "portfolio/updatePortfolio";
pub const SIGNUP_PATH: &str = "signup/add";

/// Remote operations used by the forms. Implemented over HTTP by
/// [`HttpDashboardApi`]; tests substitute in-memory fakes.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, RequestError>;
    async fn list_portfolios(&self) -> Result<Vec<PortfolioItem>, RequestError>;
    async fn create_portfolio(&self, payload: PortfolioPayload) -> Result<(), RequestError>;
    async fn update_portfolio(&self, payload: PortfolioPayload) -> Result<(), RequestError>;
    async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, RequestError>;
}

/// Outbound multipart body of a portfolio submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioPayload {
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: Option<ImageUpload>,
    /// Set in edit mode only; sent as `_id`.
    pub id: Option<String>,
}

impl PortfolioPayload {
    /// Text parts in wire order. The image part goes between `description`
    /// and `_id`.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("category", self.category.clone()),
            ("description", self.description.clone()),
        ]
    }

    pub fn id_field(&self) -> Option<(&'static str, String)> {
        self.id.clone().map(|id| ("_id", id))
    }
}
