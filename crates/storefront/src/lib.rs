//! Tiendita Storefront - everything around the cart engine.
//!
//! The cart engine in `tiendita-core` owns the state. This crate supplies
//! the collaborators it talks to:
//!
//! - [`config`] - environment configuration
//! - [`store`] - file-backed [`CartStore`](tiendita_core::CartStore)
//! - [`catalog`] - catalog loading from YAML
//! - [`views`], [`render`] - askama rendering of the product and cart lists
//! - [`summary`] - order summary document and messaging link
//! - [`checkout`] - the checkout flow with its display-surface fallback

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
mod filters;
pub mod render;
pub mod store;
pub mod summary;
pub mod views;

pub use catalog::load_catalog;
pub use checkout::{
    CheckoutError, CheckoutOutcome, DirectorySurface, SummarySurface, SurfaceError, checkout,
};
pub use config::{ConfigError, MessagingConfig, StorefrontConfig};
pub use error::{Result, StorefrontError};
pub use store::FileStore;
pub use summary::OrderSummary;
