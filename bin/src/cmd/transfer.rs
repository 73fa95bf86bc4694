//! Transfer command implementation.

use super::{print_created, require};
use anyhow::Result;
use fundwire::{Payments, TransferParams};

/// Move money from `source` to `destination`.
pub(crate) async fn create_transfer(
    payments: &Payments,
    source: String,
    destination: String,
    amount: String,
) -> Result<()> {
    println!("Transferring {amount} USD");
    println!("  from {source}");
    println!("  to   {destination}");

    let params = TransferParams::new(source, destination, amount);
    let url = require(payments.create_transfer(&params).await, "The transfer")?;
    print_created("Transfer:", &url);
    Ok(())
}
