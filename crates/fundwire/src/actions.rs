//! Caller-facing Dwolla operations.
//!
//! Each operation is one Dwolla call. Any failure is logged once at `error`
//! level and swallowed, and the operation returns `None`.

use fundwire_dwolla::{
    AddFundingSourceParams, CreateExchangeOptions, CreateFundingSourceOptions, DwollaClient,
    ExchangeFundingSourceOptions, ExchangePartner, Links, NewCustomer, Result, TransferParams,
    UnverifiedCustomer,
};
use tracing::error;

/// Name Dwolla lists Plaid under in its exchange partners.
const PLAID_PARTNER: &str = "plaid";

/// Log a failed operation and discard the error.
fn log_failure<T>(context: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!(error = %err, "{context}");
            None
        }
    }
}

/// Dwolla operations bound to one configured client.
#[derive(Debug, Clone)]
pub struct Payments {
    client: DwollaClient,
}

impl Payments {
    /// Wrap a configured client.
    #[must_use]
    pub const fn new(client: DwollaClient) -> Self {
        Self { client }
    }

    /// Configure from `DWOLLA_ENV`, `DWOLLA_KEY` and `DWOLLA_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is missing or the environment is
    /// neither `sandbox` nor `production`. Callers treat this as fatal.
    pub fn from_env() -> Result<Self> {
        DwollaClient::from_env().map(Self::new)
    }

    /// The underlying client.
    #[must_use]
    pub const fn client(&self) -> &DwollaClient {
        &self.client
    }

    /// Create a funding source from a Plaid processor token.
    ///
    /// Returns the funding source URL.
    pub async fn create_funding_source(&self, options: &CreateFundingSourceOptions) -> Option<String> {
        log_failure(
            "Creating a Funding Source Failed",
            self.client.create_funding_source(options).await,
        )
    }

    /// Create an on-demand authorization and return its links.
    pub async fn create_on_demand_authorization(&self) -> Option<Links> {
        log_failure(
            "Creating an On Demand Authorization Failed",
            self.client
                .create_on_demand_authorization()
                .await
                .map(|auth| auth.links),
        )
    }

    /// Create a customer and return its URL.
    pub async fn create_dwolla_customer(&self, new_customer: &NewCustomer) -> Option<String> {
        log_failure(
            "Creating a Dwolla Customer Failed",
            self.client.create_customer(new_customer).await,
        )
    }

    /// Transfer money between funding sources and return the transfer URL.
    pub async fn create_transfer(&self, params: &TransferParams) -> Option<String> {
        log_failure("Transfer fund failed", self.client.create_transfer(params).await)
    }

    /// Authorize on demand, then attach the bank account to the customer.
    ///
    /// Returns the funding source URL. If the authorization fails the
    /// funding source is not attempted.
    pub async fn add_funding_source(&self, params: &AddFundingSourceParams) -> Option<String> {
        let auth_links = self.create_on_demand_authorization().await?;

        let options = CreateFundingSourceOptions {
            customer_id: params.dwolla_customer_id.clone(),
            funding_source_name: params.bank_name.clone(),
            plaid_token: params.processor_token.clone(),
            on_demand_authorization: Some(auth_links),
        };
        self.create_funding_source(&options).await
    }

    /// Create an exchange from an aggregator token and return its URL.
    pub async fn create_exchange(&self, options: &CreateExchangeOptions) -> Option<String> {
        log_failure(
            "Creating an Exchange Failed",
            self.client.create_exchange(options).await,
        )
    }

    /// Create a funding source from an exchange and return its URL.
    pub async fn create_exchange_funding_source(
        &self,
        options: &ExchangeFundingSourceOptions,
    ) -> Option<String> {
        log_failure(
            "Creating a Funding Source Failed",
            self.client.create_exchange_funding_source(options).await,
        )
    }

    /// Create an unverified customer and return its URL.
    pub async fn create_unverified_customer(&self, customer: UnverifiedCustomer) -> Option<String> {
        log_failure(
            "Creating an Unverified Customer Failed",
            self.client.create_customer(&NewCustomer::from(customer)).await,
        )
    }

    /// List Dwolla's exchange partners.
    pub async fn exchange_partners(&self) -> Option<Vec<ExchangePartner>> {
        log_failure(
            "Listing Exchange Partners Failed",
            self.client.exchange_partners().await,
        )
    }

    /// Href of Plaid in Dwolla's exchange partners.
    pub async fn exchange_href(&self) -> Option<String> {
        log_failure(
            "Looking up the Plaid Exchange Partner Failed",
            self.client.exchange_partner_href(PLAID_PARTNER).await,
        )
    }
}
