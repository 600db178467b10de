#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use folio_admin::api::{DashboardApi, PortfolioPayload};
use folio_admin::config::RouteSettings;
use folio_admin::domain::{Category, PortfolioItem, SignupRequest, SignupResponse};
use folio_admin::errors::RequestError;
use folio_admin::forms::FormContext;
use folio_admin::navigation::Navigator;
use folio_admin::notify::{Notification, Notifier};
use tokio::sync::Notify;

/// Every call the forms made against the fake API, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListCategories,
    ListPortfolios,
    Create(PortfolioPayload),
    Update(PortfolioPayload),
    Signup(SignupRequest),
}

/// In-memory [`DashboardApi`] with scripted answers.
pub struct FakeApi {
    categories: Vec<Category>,
    portfolios: Vec<PortfolioItem>,
    list_error: Option<RequestError>,
    submit_error: Option<RequestError>,
    signup_result: Result<SignupResponse, RequestError>,
    gate: Option<Arc<Notify>>,
    entered: Arc<Notify>,
    interlock: Option<Notify>,
    calls: Mutex<Vec<ApiCall>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            portfolios: Vec::new(),
            list_error: None,
            submit_error: None,
            signup_result: Ok(SignupResponse {
                success: true,
                message: Some("Account created".into()),
            }),
            gate: None,
            entered: Arc::new(Notify::new()),
            interlock: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_portfolios(mut self, portfolios: Vec<PortfolioItem>) -> Self {
        self.portfolios = portfolios;
        self
    }

    /// The portfolio listing fails; categories still succeed.
    pub fn failing_portfolio_list(mut self) -> Self {
        self.list_error = Some(RequestError::Transport("connection refused".into()));
        self
    }

    pub fn failing_submits(mut self, error: RequestError) -> Self {
        self.submit_error = Some(error);
        self
    }

    pub fn with_signup_result(mut self, result: Result<SignupResponse, RequestError>) -> Self {
        self.signup_result = result;
        self
    }

    /// The category read only answers once the portfolio read has started,
    /// so awaiting the two reads one after the other never completes.
    pub fn with_interlocked_lists(mut self) -> Self {
        self.interlock = Some(Notify::new());
        self
    }

    /// Submissions block until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Notified each time a submission reaches the API.
    pub fn entered(&self) -> Arc<Notify> {
        Arc::clone(&self.entered)
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn submissions(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, ApiCall::ListCategories | ApiCall::ListPortfolios))
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().expect("calls lock").push(call);
    }

    async fn hold(&self) {
        self.entered.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }

    fn submit_result(&self) -> Result<(), RequestError> {
        match &self.submit_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn list_categories(&self) -> Result<Vec<Category>, RequestError> {
        self.record(ApiCall::ListCategories);
        if let Some(interlock) = &self.interlock {
            interlock.notified().await;
        }
        Ok(self.categories.clone())
    }

    async fn list_portfolios(&self) -> Result<Vec<PortfolioItem>, RequestError> {
        self.record(ApiCall::ListPortfolios);
        if let Some(interlock) = &self.interlock {
            interlock.notify_one();
        }
        match &self.list_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.portfolios.clone()),
        }
    }

    async fn create_portfolio(&self, payload: PortfolioPayload) -> Result<(), RequestError> {
        self.record(ApiCall::Create(payload));
        self.hold().await;
        self.submit_result()
    }

    async fn update_portfolio(&self, payload: PortfolioPayload) -> Result<(), RequestError> {
        self.record(ApiCall::Update(payload));
        self.hold().await;
        self.submit_result()
    }

    async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, RequestError> {
        self.record(ApiCall::Signup(request));
        self.hold().await;
        self.signup_result.clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().expect("notifier lock").push(notification);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pushed: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.pushed.lock().expect("navigator lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: &str) {
        self.pushed.lock().expect("navigator lock").push(route.to_string());
    }
}

/// Fake collaborators wired into a [`FormContext`].
pub struct Harness {
    pub api: Arc<FakeApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new(api: FakeApi) -> Self {
        Self {
            api: Arc::new(api),
            notifier: Arc::new(RecordingNotifier::default()),
            navigator: Arc::new(RecordingNavigator::default()),
        }
    }

    pub fn context(&self) -> FormContext {
        let api: Arc<dyn DashboardApi> = self.api.clone();
        let notifier: Arc<dyn Notifier> = self.notifier.clone();
        let navigator: Arc<dyn Navigator> = self.navigator.clone();
        FormContext::new(api, notifier, navigator, RouteSettings::default())
    }
}

pub fn sample_categories() -> Vec<Category> {
    vec![Category::new("c1", "Branding"), Category::new("c2", "Web")]
}

pub fn logo_record() -> PortfolioItem {
    PortfolioItem::new("X", "Logo Redesign", "Branding", "A logo project")
        .with_image("https://cdn.example.com/logo.png")
}
