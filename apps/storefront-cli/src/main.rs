//! # Lumière Storefront CLI
//!
//! Command line front end for the storefront: browse the catalog, search
//! it, and walk a scripted order through checkout.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         storefront <command>                            │
//! │                                                                         │
//! │  main.rs ────► init_tracing (RUST_LOG, default info,lumiere=debug)     │
//! │          ────► StorefrontConfig::load_or_default(--config)             │
//! │          ────► Catalog::builtin()                                      │
//! │          ────► run the subcommand                                      │
//! │                                                                         │
//! │  checkout ──► CartStore ──► CheckoutFlow ──► SimulatedGateway (2s)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lumiere_core::catalog::sorted;
use lumiere_core::checkout::{PaymentInfo, ShippingInfo};
use lumiere_core::{Catalog, Category, Product, SortOrder};
use lumiere_store::{
    CartStore, CheckoutFlow, PaymentOutcome, SimulatedGateway, StorefrontConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Lumière fine jewelry storefront.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
struct Cli {
    /// Path to storefront.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List products
    Catalog {
        /// Only show one category (rings, necklaces, earrings, bracelets)
        #[arg(long)]
        category: Option<Category>,

        /// featured, price-asc, price-desc, newest or name
        #[arg(long, default_value_t = SortOrder::Featured)]
        sort: SortOrder,

        /// Only show the new-arrivals selection
        #[arg(long)]
        new_arrivals: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search by name, category or material
    Search {
        query: String,
    },

    /// Place a demo order with the simulated payment gateway
    Checkout {
        /// Product id to order
        #[arg(long, default_value = "1")]
        product: String,

        /// How many to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = StorefrontConfig::load_or_default(cli.config);
    let catalog = Catalog::builtin();

    match cli.command {
        Command::Catalog {
            category,
            sort,
            new_arrivals,
            json,
        } => {
            let products = if new_arrivals {
                catalog.new_arrivals(config.catalog.new_arrivals_limit)
            } else {
                catalog.by_category(category)
            };
            let products = sorted(products, sort);

            if json {
                println!("{}", serde_json::to_string_pretty(&products)?);
            } else {
                print_categories(&catalog);
                print_products(&products);
            }
        }

        Command::Search { query } => {
            let results = catalog.search(&query)?;
            if results.is_empty() {
                println!("No results for \"{}\". Try:", query.trim());
                for suggestion in catalog.suggested_searches() {
                    println!("  {suggestion}");
                }
            } else {
                println!("{} result(s) for \"{}\"", results.len(), query.trim());
                print_products(&results);
            }
        }

        Command::Checkout { product, quantity } => {
            checkout_demo(&catalog, &config, &product, quantity).await?;
        }
    }

    Ok(())
}

/// Walks one order through cart, shipping, payment and confirmation.
async fn checkout_demo(
    catalog: &Catalog,
    config: &StorefrontConfig,
    product_id: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let cart = CartStore::new();
    let gateway = Arc::new(SimulatedGateway::new(config.checkout.payment_delay()));
    let checkout = CheckoutFlow::new(cart.clone(), gateway, config.checkout.clone());

    cart.add_product(catalog, product_id, quantity)?;
    let totals = cart.totals();
    for line in cart.snapshot().lines() {
        println!(
            "{:>3} × {:<28} {:>12}",
            line.quantity,
            line.name,
            line.line_total().to_string()
        );
    }
    println!("Subtotal ({} items): {}", totals.item_count, totals.subtotal);
    println!("Shipping: Free");

    checkout.open();
    checkout.submit_shipping(ShippingInfo {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        phone: "+44 20 7946 0000".into(),
        address: "12 St James's Square".into(),
        city: "London".into(),
        country: "United Kingdom".into(),
        zip: "SW1Y 4JH".into(),
    })?;

    println!("Processing payment of {}...", totals.total);
    let outcome = checkout
        .submit_payment(PaymentInfo {
            card_number: "4242 4242 4242 4242".into(),
            card_name: "Ada Lovelace".into(),
            expiry: "12/29".into(),
            cvv: "123".into(),
        })
        .await?;

    if let PaymentOutcome::Confirmed(confirmation) = outcome {
        println!();
        println!("Order Confirmed!");
        println!("Order number: {}", confirmation.order_id);
        println!("Shipping to: {}", confirmation.shipping_to);
        println!("Estimated delivery: {}", confirmation.estimated_delivery);
        info!(cart_lines = cart.snapshot().line_count(), "Checkout demo finished");
    }

    checkout.close()?;
    Ok(())
}

fn print_categories(catalog: &Catalog) {
    let chips: Vec<String> = catalog
        .category_counts()
        .iter()
        .map(|c| format!("{} ({})", c.name, c.count))
        .collect();
    println!("{}", chips.join("  "));
    println!();
}

fn print_products(products: &[&Product]) {
    for product in products {
        let mut badges = Vec::new();
        if product.is_new {
            badges.push("NEW".to_string());
        }
        if product.is_bestseller {
            badges.push("BESTSELLER".to_string());
        }
        if let Some(off) = product.discount_percent() {
            badges.push(format!("{off}% OFF"));
        }

        println!(
            "{:>2}  {:<28} {:<10} {:>10}  {}",
            product.id,
            product.name,
            product.category.name(),
            product.price.to_string(),
            badges.join(" ")
        );
    }
}

/// Initializes the tracing subscriber for logging.
///
/// ## Environment Variables
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lumiere=trace` - Show trace for lumiere crates only
/// - Default: INFO, with DEBUG for lumiere crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lumiere=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
