//! Request and response types for the Dwolla API.
//!
//! Dwolla speaks HAL+JSON: related resources are referenced through a
//! `_links` object mapping relation names to `{ "href": ... }` records, and
//! embedded collections live under `_embedded`.

use crate::error::DwollaError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, str::FromStr};

/// Currency of every transfer.
pub const CURRENCY: &str = "USD";

/// A HAL link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL.
    pub href: String,
}

impl Link {
    /// Create a link to `href`.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// A HAL `_links` object, keyed by relation name.
pub type Links = BTreeMap<String, Link>;

/// Kind of customer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerType {
    /// Verified personal customer.
    Personal,
    /// Verified business customer.
    Business,
    /// Receive-only user.
    ReceiveOnly,
}

impl FromStr for CustomerType {
    type Err = DwollaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "business" => Ok(Self::Business),
            "receive-only" => Ok(Self::ReceiveOnly),
            other => Err(DwollaError::InvalidValue(format!("unknown customer type `{other}`"))),
        }
    }
}

/// Body of `POST customers`.
///
/// Only the name and email are required. Unverified customers carry nothing
/// else; verified personal customers add address, date of birth and the last
/// four digits of their SSN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address, unique per Dwolla account.
    pub email: String,
    /// Customer type; omitted for unverified customers.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CustomerType>,
    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Two-letter state code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Last four digits of the SSN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
}

impl NewCustomer {
    /// An unverified customer: name and email only.
    #[must_use]
    pub fn unverified(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// A verified personal customer. Address and identity fields are set
    /// directly on the returned value.
    #[must_use]
    pub fn personal(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            kind: Some(CustomerType::Personal),
            ..Self::unverified(first_name, last_name, email)
        }
    }
}

/// Options for creating an unverified customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnverifiedCustomer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
}

impl From<UnverifiedCustomer> for NewCustomer {
    fn from(customer: UnverifiedCustomer) -> Self {
        Self::unverified(customer.first_name, customer.last_name, customer.email)
    }
}

/// Options for creating a funding source from a Plaid processor token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFundingSourceOptions {
    /// Id of the owning customer.
    pub customer_id: String,
    /// Display name of the funding source, usually the bank name.
    pub funding_source_name: String,
    /// Plaid processor token for the bank account.
    pub plaid_token: String,
    /// Links of an on-demand authorization to attach, as returned by
    /// `POST on-demand-authorizations`.
    pub on_demand_authorization: Option<Links>,
}

impl CreateFundingSourceOptions {
    pub(crate) fn request(&self) -> FundingSourceRequest<'_> {
        let links = self
            .on_demand_authorization
            .as_ref()
            .and_then(|links| links.get("self"))
            .map(|auth| Links::from([("on-demand-authorization".to_string(), auth.clone())]));

        FundingSourceRequest {
            name: &self.funding_source_name,
            plaid_token: &self.plaid_token,
            links,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FundingSourceRequest<'a> {
    pub(crate) name: &'a str,
    pub(crate) plaid_token: &'a str,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub(crate) links: Option<Links>,
}

/// Response of `POST on-demand-authorizations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnDemandAuthorization {
    /// Links; `self` identifies the authorization.
    #[serde(rename = "_links")]
    pub links: Links,
    /// Authorization text to show the end user.
    #[serde(default)]
    pub body_text: String,
    /// Label of the consent button.
    #[serde(default)]
    pub button_text: String,
}

/// Parameters of a transfer between two funding sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferParams {
    /// URL of the funding source to debit.
    pub source_funding_source_url: String,
    /// URL of the funding source to credit.
    pub destination_funding_source_url: String,
    /// Amount in dollars as a decimal string, e.g. `"10.00"`.
    pub amount: String,
}

impl TransferParams {
    /// Create transfer parameters.
    #[must_use]
    pub fn new(
        source_funding_source_url: impl Into<String>,
        destination_funding_source_url: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            source_funding_source_url: source_funding_source_url.into(),
            destination_funding_source_url: destination_funding_source_url.into(),
            amount: amount.into(),
        }
    }

    pub(crate) fn request(&self) -> TransferRequest<'_> {
        TransferRequest {
            links: TransferLinks {
                source: Href {
                    href: &self.source_funding_source_url,
                },
                destination: Href {
                    href: &self.destination_funding_source_url,
                },
            },
            amount: Amount {
                currency: CURRENCY,
                value: &self.amount,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Href<'a> {
    pub(crate) href: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TransferRequest<'a> {
    #[serde(rename = "_links")]
    pub(crate) links: TransferLinks<'a>,
    pub(crate) amount: Amount<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TransferLinks<'a> {
    pub(crate) source: Href<'a>,
    pub(crate) destination: Href<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Amount<'a> {
    pub(crate) currency: &'a str,
    pub(crate) value: &'a str,
}

/// Parameters for linking a bank account to a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFundingSourceParams {
    /// Dwolla customer id.
    pub dwolla_customer_id: String,
    /// Plaid processor token for the account.
    pub processor_token: String,
    /// Bank name, used as the funding source name.
    pub bank_name: String,
}

/// Bank account type of an exchange-backed funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    /// Checking account.
    Checking,
    /// Savings account.
    Savings,
}

impl FromStr for BankAccountType {
    type Err = DwollaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            other => Err(DwollaError::InvalidValue(format!(
                "unknown bank account type `{other}`"
            ))),
        }
    }
}

/// Options for creating an exchange from an aggregator token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExchangeOptions {
    /// Id of the owning customer.
    pub customer_id: String,
    /// Href of the exchange partner (see `exchange_partner_href`).
    pub exchange_partner_href: String,
    /// Token issued by the exchange partner.
    pub token: String,
}

impl CreateExchangeOptions {
    pub(crate) fn request(&self) -> ExchangeRequest<'_> {
        ExchangeRequest {
            links: ExchangeLinks {
                exchange_partner: Href {
                    href: &self.exchange_partner_href,
                },
            },
            token: &self.token,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExchangeRequest<'a> {
    #[serde(rename = "_links")]
    pub(crate) links: ExchangeLinks<'a>,
    pub(crate) token: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExchangeLinks<'a> {
    #[serde(rename = "exchange-partner")]
    pub(crate) exchange_partner: Href<'a>,
}

/// Options for creating a funding source from an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeFundingSourceOptions {
    /// Id of the owning customer.
    pub customer_id: String,
    /// URL of the exchange resource.
    pub exchange_url: String,
    /// Display name of the funding source.
    pub name: String,
    /// Checking or savings.
    pub account_type: BankAccountType,
}

impl ExchangeFundingSourceOptions {
    pub(crate) fn request(&self) -> ExchangeFundingSourceRequest<'_> {
        ExchangeFundingSourceRequest {
            links: ExchangeFundingSourceLinks {
                exchange: Href {
                    href: &self.exchange_url,
                },
            },
            bank_account_type: self.account_type,
            name: &self.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExchangeFundingSourceRequest<'a> {
    #[serde(rename = "_links")]
    pub(crate) links: ExchangeFundingSourceLinks<'a>,
    pub(crate) bank_account_type: BankAccountType,
    pub(crate) name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExchangeFundingSourceLinks<'a> {
    pub(crate) exchange: Href<'a>,
}

/// An exchange partner, e.g. Plaid or MX.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangePartner {
    /// Partner id.
    #[serde(default)]
    pub id: Option<String>,
    /// Partner name.
    pub name: String,
    /// Partner status, e.g. `active`.
    #[serde(default)]
    pub status: Option<String>,
    /// Links; `self` is the href used when creating exchanges.
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl ExchangePartner {
    /// Href of the partner resource.
    #[must_use]
    pub fn self_href(&self) -> Option<&str> {
        self.links.get("self").map(|link| link.href.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExchangePartnerList {
    #[serde(rename = "_embedded")]
    pub(crate) embedded: ExchangePartnerEmbedded,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExchangePartnerEmbedded {
    #[serde(rename = "exchange-partners", default)]
    pub(crate) exchange_partners: Vec<ExchangePartner>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccessToken {
    pub(crate) access_token: String,
    #[serde(default = "default_expires_in")]
    pub(crate) expires_in: u64,
}

const fn default_expires_in() -> u64 {
    3600
}

/// Error document returned with non-success responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub(crate) code: String,
    pub(crate) message: String,
}

/// Id of a resource, taken from the last path segment of its URL.
#[must_use]
pub fn resource_id(url: &str) -> Option<&str> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
}
