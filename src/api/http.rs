use async_trait::async_trait;
use folio_config::ApiSettings;
use folio_domain::{
    Category, CategoryList, PortfolioItem, PortfolioList, SignupRequest, SignupResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::api::{
    DashboardApi, PortfolioPayload, CATEGORY_LIST_PATH, PORTFOLIO_CREATE_PATH,
    PORTFOLIO_LIST_PATH, PORTFOLIO_UPDATE_PATH, SIGNUP_PATH,
};
use crate::errors::RequestError;

/// [`DashboardApi`] over HTTP, rooted at the configured base URI.
#[derive(Clone)]
pub struct HttpDashboardApi {
    settings: ApiSettings,
    client: Client,
}

impl HttpDashboardApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, RequestError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|error| {
                RequestError::Transport(format!("failed to build HTTP client: {error}"))
            })?;
        Ok(Self {
            settings: settings.clone(),
            client,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        self.settings.endpoint(path)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RequestError> {
        let (status, body) = send(request).await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        serde_json::from_str(&body).map_err(|error| RequestError::Decode(error.to_string()))
    }

    async fn request_status_only(&self, request: RequestBuilder) -> Result<(), RequestError> {
        let (status, body) = send(request).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(status_error(status, &body))
        }
    }
}

async fn send(request: RequestBuilder) -> Result<(StatusCode, String), RequestError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    debug!(%status, bytes = body.len(), "dashboard API responded");
    Ok((status, body))
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn status_error(status: StatusCode, body: &str) -> RequestError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty());
    RequestError::Status {
        status: status.as_u16(),
        message,
    }
}

/// Builds the multipart body: `name`, `category`, `description`, then
/// `image` when one was chosen, then `_id` in edit mode.
pub fn multipart_form(payload: &PortfolioPayload) -> Result<Form, RequestError> {
    let mut form = Form::new();
    for (key, value) in payload.text_fields() {
        form = form.text(key, value);
    }
    if let Some(image) = &payload.image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|error| RequestError::InvalidUpload(error.to_string()))?;
        form = form.part("image", part);
    }
    if let Some((key, value)) = payload.id_field() {
        form = form.text(key, value);
    }
    Ok(form)
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn list_categories(&self) -> Result<Vec<Category>, RequestError> {
        let request = self.client.get(self.endpoint(CATEGORY_LIST_PATH));
        let list: CategoryList = self.request_json(request).await?;
        Ok(list.all_categories)
    }

    async fn list_portfolios(&self) -> Result<Vec<PortfolioItem>, RequestError> {
        let request = self.client.get(self.endpoint(PORTFOLIO_LIST_PATH));
        let list: PortfolioList = self.request_json(request).await?;
        Ok(list.items)
    }

    async fn create_portfolio(&self, payload: PortfolioPayload) -> Result<(), RequestError> {
        let form = multipart_form(&payload)?;
        let request = self
            .client
            .post(self.endpoint(PORTFOLIO_CREATE_PATH))
            .multipart(form);
        self.request_status_only(request).await
    }

    async fn update_portfolio(&self, payload: PortfolioPayload) -> Result<(), RequestError> {
        let form = multipart_form(&payload)?;
        let request = self
            .client
            .put(self.endpoint(PORTFOLIO_UPDATE_PATH))
            .multipart(form);
        self.request_status_only(request).await
    }

    async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, RequestError> {
        let request = self.client.post(self.endpoint(SIGNUP_PATH)).json(&request);
        let (status, body) = send(request).await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        // A 2xx body that is not a signup envelope reports no success.
        Ok(serde_json::from_str(&body).unwrap_or_else(|error| {
            debug!(%error, "signup answered with an unreadable body");
            SignupResponse::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::ImageUpload;

    fn payload() -> PortfolioPayload {
        PortfolioPayload {
            name: "Logo".into(),
            category: "Branding".into(),
            description: "A logo project".into(),
            image: None,
            id: None,
        }
    }

    #[test]
    fn endpoint_is_rooted_at_base_uri() {
        let api = HttpDashboardApi::new(&ApiSettings::new("http://127.0.0.1:9/api/")).unwrap();
        assert_eq!(api.endpoint(SIGNUP_PATH), "http://127.0.0.1:9/api/signup/add");
    }

    #[test]
    fn status_error_extracts_server_message() {
        let err = status_error(StatusCode::CONFLICT, r#"{"message":"Email already registered"}"#);
        assert_eq!(err.server_message(), Some("Email already registered"));

        let err = status_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(
            err,
            RequestError::Status {
                status: 502,
                message: None
            }
        );
    }

    #[test]
    fn invalid_mime_is_rejected_before_sending() {
        let mut with_image = payload();
        with_image.image = Some(ImageUpload::new("a.png", "not a mime", vec![1]));
        assert!(matches!(
            multipart_form(&with_image),
            Err(RequestError::InvalidUpload(_))
        ));
    }

    #[test]
    fn form_builds_with_and_without_image() {
        assert!(multipart_form(&payload()).is_ok());
        let mut with_image = payload();
        with_image.image = Some(ImageUpload::new("a.png", "image/png", vec![1, 2, 3]));
        with_image.id = Some("X".into());
        assert!(multipart_form(&with_image).is_ok());
    }
}
