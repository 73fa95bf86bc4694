//! Dwolla API client implementation.

use crate::{
    Result,
    environment::Environment,
    error::DwollaError,
    types::{
        AccessToken, ApiErrorBody, CreateExchangeOptions, CreateFundingSourceOptions,
        ExchangeFundingSourceOptions, ExchangePartner, ExchangePartnerList, NewCustomer,
        OnDemandAuthorization, TransferParams,
    },
};
use reqwest::{
    Client, Method, Response, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, LOCATION},
};
use serde::Serialize;
use serde_json::Value;
use std::{
    env, fmt,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Media type of every Dwolla request and response.
const HAL_JSON: &str = "application/vnd.dwolla.v1.hal+json";

/// Tokens are refreshed this long before Dwolla says they expire.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// A successful API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Location` header, set on `201 Created`.
    pub location: Option<String>,
    /// Decoded body; `Null` when the body is empty.
    pub body: Value,
}

#[derive(Debug)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Dwolla API client.
///
/// Cloning is cheap and clones share the cached application token.
#[derive(Clone)]
pub struct DwollaClient {
    client: Client,
    key: String,
    secret: String,
    api_url: String,
    token_url: String,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl fmt::Debug for DwollaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DwollaClient")
            .field("api_url", &self.api_url)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

impl DwollaClient {
    /// Create a new Dwolla client for the given environment.
    #[must_use]
    pub fn new(environment: Environment, key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::with_urls(environment.api_url(), environment.token_url(), key, secret)
    }

    /// Create a client against a custom base URL; the token endpoint is
    /// `{base_url}/token`.
    #[must_use]
    pub fn with_base_url(
        base_url: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/');
        Self::with_urls(base_url, format!("{base_url}/token"), key, secret)
    }

    fn with_urls(
        api_url: impl Into<String>,
        token_url: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            key: key.into(),
            secret: secret.into(),
            api_url: api_url.into(),
            token_url: token_url.into(),
            token: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a new Dwolla client from `DWOLLA_ENV`, `DWOLLA_KEY` and
    /// `DWOLLA_SECRET`.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is not set or `DWOLLA_ENV` is neither
    /// `sandbox` nor `production`.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment: Environment = env::var("DWOLLA_ENV")
            .map_err(|_| DwollaError::MissingEnv("DWOLLA_ENV"))?
            .parse()?;
        let key = env::var("DWOLLA_KEY").map_err(|_| DwollaError::MissingEnv("DWOLLA_KEY"))?;
        let secret =
            env::var("DWOLLA_SECRET").map_err(|_| DwollaError::MissingEnv("DWOLLA_SECRET"))?;

        Ok(Self::new(environment, key, secret))
    }

    /// Resolve a path against the API base URL. Absolute URLs, such as
    /// hrefs returned by Dwolla, pass through unchanged.
    fn url(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else {
            format!("{}/{}", self.api_url, path.trim_start_matches('/'))
        }
    }

    /// Get an application access token, fetching a new one when the cached
    /// token is missing or about to expire.
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.expires_at > Instant::now()
        {
            return Ok(token.access_token.clone());
        }

        debug!(url = %self.token_url, "fetching Dwolla access token");
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.key, Some(&self.secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let token: AccessToken = Self::error_for_status(response).await?.json().await?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    /// Map a non-success response to a [`DwollaError`].
    async fn error_for_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(url = %response.url(), "Dwolla rate limit exceeded");
            return Err(DwollaError::RateLimited);
        }

        let text = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => (body.code, body.message),
            Err(_) => (
                status.canonical_reason().unwrap_or("Unknown").to_string(),
                text,
            ),
        };

        Err(DwollaError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        let token = self.access_token().await?;

        debug!(%method, %url, "Dwolla request");
        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header(ACCEPT, HAL_JSON);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HAL_JSON)
                .body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            // Revoked or expired token; the next call fetches a fresh one.
            self.token.lock().await.take();
        }

        let response = Self::error_for_status(response).await?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ApiResponse {
            status,
            location,
            body,
        })
    }

    /// POST a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Dwolla answers with a
    /// non-success status.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// POST to `path` without a body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Dwolla answers with a
    /// non-success status.
    pub async fn post_empty(&self, path: &str) -> Result<ApiResponse> {
        self.send::<()>(Method::POST, path, None).await
    }

    /// GET `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Dwolla answers with a
    /// non-success status.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send::<()>(Method::GET, path, None).await
    }

    /// POST a body and return the created resource's URL.
    async fn create<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String> {
        self.post(path, body)
            .await?
            .location
            .ok_or_else(|| DwollaError::MissingLocation(path.to_string()))
    }

    /// Create a customer.
    ///
    /// Returns the customer URL from the `Location` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn create_customer(&self, customer: &NewCustomer) -> Result<String> {
        self.create("customers", customer).await
    }

    /// Create a funding source for a customer from a Plaid processor token.
    ///
    /// Returns the funding source URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn create_funding_source(&self, options: &CreateFundingSourceOptions) -> Result<String> {
        let path = format!("customers/{}/funding-sources", options.customer_id);
        self.create(&path, &options.request()).await
    }

    /// Create an on-demand authorization.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response has no
    /// `_links`.
    pub async fn create_on_demand_authorization(&self) -> Result<OnDemandAuthorization> {
        let response = self.post_empty("on-demand-authorizations").await?;
        if response.body.get("_links").is_none() {
            return Err(DwollaError::MissingField("_links"));
        }
        Ok(serde_json::from_value(response.body)?)
    }

    /// Transfer money between two funding sources.
    ///
    /// Returns the transfer URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn create_transfer(&self, params: &TransferParams) -> Result<String> {
        self.create("transfers", &params.request()).await
    }

    /// Create an exchange for a customer from an exchange partner token.
    ///
    /// Returns the exchange URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn create_exchange(&self, options: &CreateExchangeOptions) -> Result<String> {
        let path = format!("customers/{}/exchanges", options.customer_id);
        self.create(&path, &options.request()).await
    }

    /// Create a funding source for a customer from an exchange.
    ///
    /// Returns the funding source URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn create_exchange_funding_source(
        &self,
        options: &ExchangeFundingSourceOptions,
    ) -> Result<String> {
        let path = format!("customers/{}/funding-sources", options.customer_id);
        self.create(&path, &options.request()).await
    }

    /// List exchange partners.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn exchange_partners(&self) -> Result<Vec<ExchangePartner>> {
        let response = self.get("exchange-partners").await?;
        let list: ExchangePartnerList = serde_json::from_value(response.body)?;
        Ok(list.embedded.exchange_partners)
    }

    /// Get the href of the exchange partner called `name`, compared
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no partner matches.
    pub async fn exchange_partner_href(&self, name: &str) -> Result<String> {
        let partner = self
            .exchange_partners()
            .await?
            .into_iter()
            .find(|partner| partner.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DwollaError::PartnerNotFound(name.to_string()))?;

        partner
            .self_href()
            .map(str::to_string)
            .ok_or(DwollaError::MissingField("_links.self"))
    }
}
