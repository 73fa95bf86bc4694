//! Funding source and authorization command implementations.

use super::{print_created, require};
use anyhow::Result;
use fundwire::{AddFundingSourceParams, CreateFundingSourceOptions, Payments};

/// Create an on-demand authorization and print its links.
pub(crate) async fn authorize(payments: &Payments) -> Result<()> {
    let links = require(
        payments.create_on_demand_authorization().await,
        "Creating the on-demand authorization",
    )?;

    for (rel, link) in &links {
        println!("{rel:<25} {}", link.href);
    }
    Ok(())
}

/// Create a funding source from a Plaid processor token.
pub(crate) async fn create_funding_source(
    payments: &Payments,
    customer_id: String,
    name: String,
    plaid_token: String,
) -> Result<()> {
    let options = CreateFundingSourceOptions {
        customer_id,
        funding_source_name: name,
        plaid_token,
        on_demand_authorization: None,
    };
    let url = require(
        payments.create_funding_source(&options).await,
        "Creating the funding source",
    )?;
    print_created("Funding source:", &url);
    Ok(())
}

/// Authorize on demand, then attach the bank account.
pub(crate) async fn add_bank(
    payments: &Payments,
    customer_id: String,
    bank_name: String,
    processor_token: String,
) -> Result<()> {
    let params = AddFundingSourceParams {
        dwolla_customer_id: customer_id,
        processor_token,
        bank_name,
    };
    let url = require(
        payments.add_funding_source(&params).await,
        "Adding the bank account",
    )?;
    print_created("Funding source:", &url);
    Ok(())
}
