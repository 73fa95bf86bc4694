//! Exchange command implementations.

use super::{print_created, require};
use anyhow::Result;
use fundwire::{BankAccountType, CreateExchangeOptions, ExchangeFundingSourceOptions, Payments};

/// Create an exchange, looking up Plaid's partner href when none is given.
pub(crate) async fn create_exchange(
    payments: &Payments,
    customer_id: String,
    token: String,
    partner_href: Option<String>,
) -> Result<()> {
    let exchange_partner_href = match partner_href {
        Some(href) => href,
        None => require(
            payments.exchange_href().await,
            "Looking up the Plaid exchange partner",
        )?,
    };

    let options = CreateExchangeOptions {
        customer_id,
        exchange_partner_href,
        token,
    };
    let url = require(
        payments.create_exchange(&options).await,
        "Creating the exchange",
    )?;
    print_created("Exchange:", &url);
    Ok(())
}

/// Create a funding source from an exchange.
pub(crate) async fn create_exchange_funding_source(
    payments: &Payments,
    customer_id: String,
    exchange_url: String,
    name: String,
    account_type: BankAccountType,
) -> Result<()> {
    let options = ExchangeFundingSourceOptions {
        customer_id,
        exchange_url,
        name,
        account_type,
    };
    let url = require(
        payments.create_exchange_funding_source(&options).await,
        "Creating the funding source",
    )?;
    print_created("Funding source:", &url);
    Ok(())
}

/// List exchange partners.
pub(crate) async fn list_partners(payments: &Payments) -> Result<()> {
    let partners = require(
        payments.exchange_partners().await,
        "Listing the exchange partners",
    )?;

    println!("{:<20} {:<10} Href", "Name", "Status");
    println!("{}", "-".repeat(60));
    for partner in &partners {
        println!(
            "{:<20} {:<10} {}",
            partner.name,
            partner.status.as_deref().unwrap_or("-"),
            partner.self_href().unwrap_or("-")
        );
    }
    println!("\n{} partner(s)", partners.len());
    Ok(())
}
