#![doc(issue_tracker_base_url = "https://github.com/fundwire/fundwire/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # fundwire
//!
//! Server-side Dwolla operations for apps that link bank accounts through
//! Plaid and move money between them.
//!
//! The operations on [`Payments`] are the caller-facing surface. Each makes
//! one call to Dwolla and returns the created resource's URL (or the
//! authorization links). Failures are logged through `tracing` and
//! swallowed: the operation returns `None` and the caller treats that as
//! failure. For typed errors, use the [`dwolla`] client directly.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fundwire::{AddFundingSourceParams, NewCustomer, Payments, TransferParams};
//!
//! # async fn example() -> fundwire::Result<()> {
//! let payments = Payments::from_env()?;
//!
//! let customer_url = payments
//!     .create_dwolla_customer(&NewCustomer::unverified("Jane", "Doe", "jane@example.com"))
//!     .await;
//!
//! let funding_source_url = payments
//!     .add_funding_source(&AddFundingSourceParams {
//!         dwolla_customer_id: "fc451a7a-ae30-4404-aB95-e3553fcd733f".to_string(),
//!         processor_token: "processor-sandbox-...".to_string(),
//!         bank_name: "Chase".to_string(),
//!     })
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Sequencing
//!
//! Operations share no state and may run concurrently. Ordering between
//! them, such as authorizing before creating a funding source, is the
//! caller's responsibility; [`Payments::add_funding_source`] is the one
//! operation that chains two calls itself.

/// Version information for the fundwire crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod actions;

pub use actions::Payments;

// ============================================================================
// Dwolla Client
// ============================================================================

/// Typed Dwolla API client.
///
/// Every method returns a [`Result`] with a [`DwollaError`] describing what
/// went wrong.
///
/// # Example
///
/// ```ignore
/// use fundwire::dwolla::{DwollaClient, Environment};
///
/// # async fn example() -> fundwire::Result<()> {
/// let client = DwollaClient::new(Environment::Sandbox, "key", "secret");
/// let plaid = client.exchange_partner_href("plaid").await?;
/// # Ok(())
/// # }
/// ```
pub mod dwolla {
    pub use fundwire_dwolla::*;
}

// Re-export error types
pub use fundwire_dwolla::{DwollaError, Result};

// Re-export request and response types
pub use fundwire_dwolla::{
    AddFundingSourceParams, BankAccountType, CreateExchangeOptions, CreateFundingSourceOptions,
    CustomerType, DwollaClient, Environment, ExchangeFundingSourceOptions, ExchangePartner, Link,
    Links, NewCustomer, OnDemandAuthorization, TransferParams, UnverifiedCustomer, resource_id,
};
