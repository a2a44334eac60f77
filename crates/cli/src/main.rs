//! Tiendita CLI - browse the catalog, fill the cart, send the order.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered and sorted
//! tiendita catalog --search mochila --sort price-asc
//!
//! # Change the cart (the cart is printed after every change)
//! tiendita add 1
//! tiendita inc 1
//! tiendita dec 1
//! tiendita remove 1
//! tiendita clear
//!
//! # Show the cart, render the shop page, check out
//! tiendita show
//! tiendita render --out shop.html
//! tiendita checkout
//! ```
//!
//! The cart is stored in `$TIENDITA_DATA_DIR/storage.json` and survives
//! between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiendita_core::{ProductId, SortOrder};

mod commands;

#[derive(Parser)]
#[command(name = "tiendita")]
#[command(author, version, about = "Tiendita shop front")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Only show products whose name or description contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order
        #[arg(long, value_enum, default_value_t = SortArg::Catalog)]
        sort: SortArg,
    },
    /// Add one unit of a product to the cart
    Add { id: ProductId },
    /// Add one more unit of a product already in the cart
    Inc { id: ProductId },
    /// Take one unit off a product in the cart
    Dec { id: ProductId },
    /// Remove a product from the cart
    Remove { id: ProductId },
    /// Empty the cart
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the cart
    Show,
    /// Render the shop page as HTML
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Filter the product list
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order of the product list
        #[arg(long, value_enum, default_value_t = SortArg::Catalog)]
        sort: SortArg,
    },
    /// Produce the order summary and messaging link
    Checkout,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Catalog,
    Name,
    PriceAsc,
    PriceDesc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Catalog => Self::Catalog,
            SortArg::Name => Self::NameAsc,
            SortArg::PriceAsc => Self::PriceAsc,
            SortArg::PriceDesc => Self::PriceDesc,
        }
    }
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tiendita_cli=info,tiendita_storefront=info,tiendita_core=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = commands::Shop::open()?;

    match cli.command {
        Commands::Catalog { search, sort } => {
            commands::catalog::list(&shop, &search, sort.into())?;
        }
        Commands::Add { id } => commands::cart::add(&mut shop, id)?,
        Commands::Inc { id } => commands::cart::increment(&mut shop, id)?,
        Commands::Dec { id } => commands::cart::decrement(&mut shop, id)?,
        Commands::Remove { id } => commands::cart::remove(&mut shop, id)?,
        Commands::Clear { yes } => commands::cart::clear(&mut shop, yes)?,
        Commands::Show => commands::cart::show(&shop)?,
        Commands::Render { out, search, sort } => {
            commands::render::page(&shop, out.as_deref(), &search, sort.into())?;
        }
        Commands::Checkout => commands::checkout::run(&shop)?,
    }
    Ok(())
}
