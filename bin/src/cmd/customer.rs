//! Customer command implementations.

use super::{print_created, require};
use anyhow::Result;
use fundwire::{NewCustomer, Payments, UnverifiedCustomer};

/// Create a verified customer.
pub(crate) async fn create_customer(payments: &Payments, customer: &NewCustomer) -> Result<()> {
    let url = require(
        payments.create_dwolla_customer(customer).await,
        "Creating the customer",
    )?;
    print_created("Customer:", &url);
    Ok(())
}

/// Create an unverified customer.
pub(crate) async fn create_unverified_customer(
    payments: &Payments,
    first_name: String,
    last_name: String,
    email: String,
) -> Result<()> {
    let customer = UnverifiedCustomer {
        first_name,
        last_name,
        email,
    };
    let url = require(
        payments.create_unverified_customer(customer).await,
        "Creating the unverified customer",
    )?;
    print_created("Customer:", &url);
    Ok(())
}
