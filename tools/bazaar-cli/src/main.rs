//! Bazaar CLI - Command line storefront client.
//!
//! Commands:
//! - `bazaar categories` - List categories and subcategories
//! - `bazaar products` - Browse products
//! - `bazaar login` / `register` / `forgot-password` / `logout` - Account
//! - `bazaar cart` - Show and edit the cart
//! - `bazaar reviews` - Read and write product reviews
//! - `bazaar customers` - Admin customer list
//! - `bazaar config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    CartArgs, ConfigArgs, CustomersArgs, ForgotPasswordArgs, LoginArgs, ProductsArgs,
    RegisterArgs, ReviewsArgs,
};

/// Bazaar CLI - Browse the shop, manage your cart and account
#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories and their subcategories
    Categories,

    /// List products, optionally within a category
    Products(ProductsArgs),

    /// Log in and hand the guest cart over to your account
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Request a password reset link
    ForgotPassword(ForgotPasswordArgs),

    /// Log out and forget the stored token
    Logout,

    /// Show or edit the cart
    Cart(CartArgs),

    /// Read or write product reviews
    Reviews(ReviewsArgs),

    /// List customers (admin only)
    Customers(CustomersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Login(args) => commands::account::login(args, &ctx).await,
        Commands::Register(args) => commands::account::register(args, &ctx).await,
        Commands::ForgotPassword(args) => commands::account::forgot_password(args, &ctx).await,
        Commands::Logout => commands::account::logout(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Reviews(args) => commands::reviews::run(args, &ctx).await,
        Commands::Customers(args) => commands::customers::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
