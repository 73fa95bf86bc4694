//! Fundwire CLI binary.
//!
//! Provides command-line access to the Fundwire Dwolla operations.

mod cmd;
mod logging;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cmd::{customer, exchange, funding, transfer};
use fundwire::{BankAccountType, CustomerType, DwollaClient, Environment, Payments};
use std::process;

#[derive(Parser)]
#[command(name = "fundwire")]
#[command(about = "Dwolla customers, funding sources and transfers", long_about = None)]
#[command(version)]
struct Cli {
    /// Dwolla environment (sandbox or production)
    #[arg(long = "env", env = "DWOLLA_ENV")]
    environment: Environment,

    /// Dwolla application key
    #[arg(long, env = "DWOLLA_KEY", hide_env_values = true)]
    key: String,

    /// Dwolla application secret
    #[arg(long, env = "DWOLLA_SECRET", hide_env_values = true)]
    secret: String,

    /// Log every request
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a verified customer
    Customer {
        /// Given name
        #[arg(long)]
        first_name: String,

        /// Family name
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Customer type (personal, business, receive-only)
        #[arg(long = "type", default_value = "personal")]
        kind: CustomerType,

        /// Street address
        #[arg(long)]
        address1: Option<String>,

        /// City
        #[arg(long)]
        city: Option<String>,

        /// Two-letter state code
        #[arg(long)]
        state: Option<String>,

        /// Postal code
        #[arg(long)]
        postal_code: Option<String>,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,

        /// Last four digits of the SSN
        #[arg(long)]
        ssn: Option<String>,
    },

    /// Create an unverified customer
    UnverifiedCustomer {
        /// Given name
        #[arg(long)]
        first_name: String,

        /// Family name
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(long)]
        email: String,
    },

    /// Create an on-demand authorization
    Authorize,

    /// Create a funding source from a Plaid processor token
    FundingSource {
        /// Customer id
        #[arg(long)]
        customer_id: String,

        /// Funding source name
        #[arg(long)]
        name: String,

        /// Plaid processor token
        #[arg(long)]
        plaid_token: String,
    },

    /// Authorize on demand and attach a bank account to a customer
    AddBank {
        /// Customer id
        #[arg(long)]
        customer_id: String,

        /// Bank name, used as the funding source name
        #[arg(long)]
        bank_name: String,

        /// Plaid processor token
        #[arg(long)]
        processor_token: String,
    },

    /// Transfer money between two funding sources
    Transfer {
        /// Source funding source URL
        #[arg(long)]
        source: String,

        /// Destination funding source URL
        #[arg(long)]
        destination: String,

        /// Amount in USD, e.g. 10.00
        #[arg(long)]
        amount: String,
    },

    /// Create an exchange from an aggregator token
    Exchange {
        /// Customer id
        #[arg(long)]
        customer_id: String,

        /// Token from the exchange partner
        #[arg(long)]
        token: String,

        /// Exchange partner href (defaults to Plaid)
        #[arg(long)]
        partner_href: Option<String>,
    },

    /// Create a funding source from an exchange
    ExchangeFundingSource {
        /// Customer id
        #[arg(long)]
        customer_id: String,

        /// Exchange URL
        #[arg(long)]
        exchange_url: String,

        /// Funding source name
        #[arg(long)]
        name: String,

        /// Bank account type (checking or savings)
        #[arg(long = "type", default_value = "checking")]
        account_type: BankAccountType,
    },

    /// List exchange partners
    Partners,
}

#[tokio::main]
async fn main() {
    // .env values back the env-based arguments
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let payments = Payments::new(DwollaClient::new(cli.environment, cli.key, cli.secret));

    match cli.command {
        Commands::Customer {
            first_name,
            last_name,
            email,
            kind,
            address1,
            city,
            state,
            postal_code,
            date_of_birth,
            ssn,
        } => {
            let customer = fundwire::NewCustomer {
                first_name,
                last_name,
                email,
                kind: Some(kind),
                address1,
                city,
                state,
                postal_code,
                date_of_birth,
                ssn,
            };
            customer::create_customer(&payments, &customer).await?;
        }
        Commands::UnverifiedCustomer {
            first_name,
            last_name,
            email,
        } => {
            customer::create_unverified_customer(&payments, first_name, last_name, email).await?;
        }
        Commands::Authorize => {
            funding::authorize(&payments).await?;
        }
        Commands::FundingSource {
            customer_id,
            name,
            plaid_token,
        } => {
            funding::create_funding_source(&payments, customer_id, name, plaid_token).await?;
        }
        Commands::AddBank {
            customer_id,
            bank_name,
            processor_token,
        } => {
            funding::add_bank(&payments, customer_id, bank_name, processor_token).await?;
        }
        Commands::Transfer {
            source,
            destination,
            amount,
        } => {
            transfer::create_transfer(&payments, source, destination, amount).await?;
        }
        Commands::Exchange {
            customer_id,
            token,
            partner_href,
        } => {
            exchange::create_exchange(&payments, customer_id, token, partner_href).await?;
        }
        Commands::ExchangeFundingSource {
            customer_id,
            exchange_url,
            name,
            account_type,
        } => {
            exchange::create_exchange_funding_source(
                &payments,
                customer_id,
                exchange_url,
                name,
                account_type,
            )
            .await?;
        }
        Commands::Partners => {
            exchange::list_partners(&payments).await?;
        }
    }

    Ok(())
}
