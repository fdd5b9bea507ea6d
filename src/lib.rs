//! Storefront
//!
//! Cart and checkout core for a home-services storefront: an owned cart with
//! derived totals, a four-step checkout wizard, and order placement.

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod random;
pub mod receipt;
pub mod storefront;
