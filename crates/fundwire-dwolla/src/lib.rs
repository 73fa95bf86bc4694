//! Dwolla API client for Fundwire.
//!
//! This crate provides a client for the [Dwolla](https://www.dwolla.com/) v2
//! REST API: customers, bank funding sources linked through Plaid processor
//! tokens, on-demand authorizations, transfers and exchanges.
//!
//! Every operation is a single outbound HTTP call. Creation endpoints answer
//! `201 Created` with the new resource's URL in the `Location` header, which
//! is what the client hands back.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fundwire_dwolla::{DwollaClient, NewCustomer, TransferParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DwollaClient::from_env()?;
//!
//!     // Create a customer
//!     let customer = NewCustomer::unverified("Jane", "Doe", "jane@example.com");
//!     let customer_url = client.create_customer(&customer).await?;
//!
//!     // Move money between two funding sources
//!     let transfer_url = client
//!         .create_transfer(&TransferParams::new(source_url, destination_url, "10.00"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set these in your environment or `.env` file:
//!
//! ```bash
//! DWOLLA_ENV=sandbox   # or production
//! DWOLLA_KEY=your_key_here
//! DWOLLA_SECRET=your_secret_here
//! ```

mod client;
mod environment;
mod error;
mod types;

pub use client::{ApiResponse, DwollaClient};
pub use environment::Environment;
pub use error::DwollaError;
pub use types::*;

/// Result type for Dwolla operations.
pub type Result<T> = std::result::Result<T, DwollaError>;
