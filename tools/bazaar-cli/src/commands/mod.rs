//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod customers;
pub mod reviews;

use bazaar_client::ClientError;
use clap::{Args, Subcommand};

use crate::context::Context;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Show a single product.
    #[arg(long, conflicts_with_all = ["category", "subcategory"])]
    pub id: Option<String>,

    /// Category id.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Subcategory id (needs --category).
    #[arg(short, long, requires = "category")]
    pub subcategory: Option<String>,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Username or email.
    pub username: String,

    /// Password.
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Full name.
    #[arg(long)]
    pub name: String,

    /// Email address.
    #[arg(long)]
    pub email: String,

    /// 10-digit mobile number.
    #[arg(long)]
    pub mobile: String,

    /// Password (6 characters or more).
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for the forgot-password command.
#[derive(Args)]
pub struct ForgotPasswordArgs {
    /// Account email address.
    pub email: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product.
    Add {
        /// Product id.
        product_id: String,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Set the quantity of a line; zero or below removes it.
    Set {
        /// Product id.
        product_id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Product id.
        product_id: String,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the reviews command.
#[derive(Args)]
pub struct ReviewsArgs {
    #[command(subcommand)]
    pub command: ReviewsCommand,
}

#[derive(Subcommand)]
pub enum ReviewsCommand {
    /// List reviews for a product.
    List {
        /// Product id.
        product_id: String,
    },
    /// Write a review (requires login).
    Write {
        /// Product id.
        product_id: String,
        /// Rating from 1 to 5.
        #[arg(short, long)]
        rating: u8,
        /// Review text.
        #[arg(short, long)]
        comment: String,
    },
}

/// Arguments for the customers command.
#[derive(Args)]
pub struct CustomersArgs {
    /// Filter by name, email, mobile, city or PIN.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Backend base URL.
        #[arg(long, default_value = "http://localhost:5000/api")]
        api_url: String,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Show a client error the way the storefront does and turn it into a
/// command failure.
pub(crate) fn fail(ctx: &Context, error: ClientError) -> anyhow::Error {
    tracing::debug!(error = %error, kind = ?error.kind(), "command failed");
    match &error {
        ClientError::Registration(errors) if errors.len() > 1 => {
            for e in errors {
                ctx.output.warn(&e.to_string());
            }
            anyhow::anyhow!("Registration form has {} errors", errors.len())
        }
        ClientError::Review(errors) if errors.len() > 1 => {
            for e in errors {
                ctx.output.warn(&e.to_string());
            }
            anyhow::anyhow!("Review has {} errors", errors.len())
        }
        _ => anyhow::anyhow!(error.display_message()),
    }
}
