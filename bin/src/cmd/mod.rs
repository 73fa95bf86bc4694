//! CLI subcommand modules.
//!
//! This module contains the implementations for all fundwire CLI subcommands.

pub(crate) mod customer;
pub(crate) mod exchange;
pub(crate) mod funding;
pub(crate) mod transfer;

use anyhow::{Result, anyhow};
use fundwire::resource_id;

/// Turn a swallowed failure into a CLI error. The cause is already logged.
pub(crate) fn require<T>(result: Option<T>, operation: &str) -> Result<T> {
    result.ok_or_else(|| anyhow!("{operation} returned no result; see the log above"))
}

/// Print a created resource's URL and id.
pub(crate) fn print_created(label: &str, url: &str) {
    println!("{label:<15} {url}");
    if let Some(id) = resource_id(url) {
        println!("{:<15} {id}", "Id:");
    }
}
