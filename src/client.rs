//! Main RegexSolver client implementation.

use crate::error::{Error, Result};
use crate::term::Term;
use crate::types::*;
use crate::version::build_user_agent;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.regexsolver.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_TOKEN_ENV: &str = "REGEXSOLVER_API_TOKEN";
const BASE_URL_ENV: &str = "REGEXSOLVER_BASE_URL";

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
    api_token: String,
    base_url: String,
    timeout: Duration,
    user_agent_suffix: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder with the given API token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent_suffix: None,
        }
    }

    /// Create a builder from `REGEXSOLVER_API_TOKEN` and, if set,
    /// `REGEXSOLVER_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var(API_TOKEN_ENV)
            .map_err(|_| Error::Config(format!("{} is not set", API_TOKEN_ENV)))?;

        let mut builder = Self::new(api_token);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        Ok(builder)
    }

    /// Set the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent suffix.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        if self.api_token.is_empty() {
            return Err(Error::Config("API token is required".into()));
        }

        if !self.base_url.starts_with("https://") {
            warn!(
                base_url = %self.base_url,
                "API base URL is not using HTTPS. This is insecure."
            );
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_token))
            .map_err(|_| Error::Config("API token is not a valid header value".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let user_agent = build_user_agent(self.user_agent_suffix.as_deref());
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent)
                .map_err(|_| Error::Config("User-Agent suffix is not a valid header value".into()))?,
        );

        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(Error::Http)?;

        Ok(Client {
            base_url: self.base_url,
            http_client,
        })
    }
}

/// The RegexSolver API client.
///
/// Build one at startup and share it; cloning is cheap and reuses the
/// connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use regexsolver::{Client, Term};
///
/// #[tokio::main]
/// async fn main() -> Result<(), regexsolver::Error> {
///     let client = Client::builder("your-api-token").build()?;
///
///     let term = Term::regex("(abc|de){2}");
///     let strings = term.generate_strings(&client, 10).await?;
///
///     println!("{:?}", strings);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new client builder.
    pub fn builder(api_token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_token)
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // === Compute ===

    /// Compute the intersection of the given terms.
    pub async fn compute_intersection(&self, request: &MultiTermsRequest) -> Result<Term> {
        self.post("api/compute/intersection", request).await
    }

    /// Compute the union of the given terms.
    pub async fn compute_union(&self, request: &MultiTermsRequest) -> Result<Term> {
        self.post("api/compute/union", request).await
    }

    /// Compute the first term minus the second.
    pub async fn compute_subtraction(&self, request: &MultiTermsRequest) -> Result<Term> {
        self.post("api/compute/subtraction", request).await
    }

    // === Analyze ===

    /// Fetch the details of a term, bypassing its cache.
    pub async fn get_details(&self, term: &Term) -> Result<Details> {
        self.post("api/analyze/details", term).await
    }

    /// Check whether the first term is equivalent to the second.
    pub async fn equivalence(&self, request: &MultiTermsRequest) -> Result<bool> {
        let result: BooleanResult = self.post("api/analyze/equivalence", request).await?;
        Ok(result.value)
    }

    /// Check whether the first term is a subset of the second.
    pub async fn subset(&self, request: &MultiTermsRequest) -> Result<bool> {
        let result: BooleanResult = self.post("api/analyze/subset", request).await?;
        Ok(result.value)
    }

    // === Generate ===

    /// Generate unique strings matched by a term.
    pub async fn generate_strings(&self, request: &GenerateStringsRequest) -> Result<Vec<String>> {
        let result: StringsResult = self.post("api/generate/strings", request).await?;
        Ok(result.value)
    }

    // === Internal methods ===

    async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let value = self.execute(endpoint, body).await?;
        serde_json::from_value(value).map_err(Error::Json)
    }

    /// POST `body` to `endpoint` and return the decoded JSON body.
    ///
    /// A non-success status becomes [`Error::Api`] carrying the `message`
    /// field of the response.
    pub async fn execute<B: serde::Serialize>(&self, endpoint: &str, body: &B) -> Result<Value> {
        let url = self.request_url(endpoint);
        debug!(url = %url, "Sending request");

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(Error::from_transport)?;

        if !response.status().is_success() {
            let err = Error::from_response(response).await;
            warn!(endpoint = endpoint, error = %err, "Request failed");
            return Err(err);
        }

        let text = response.text().await.map_err(Error::from_transport)?;
        serde_json::from_str(&text).map_err(Error::Json)
    }

    fn request_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}
