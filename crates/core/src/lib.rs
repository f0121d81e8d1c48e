//! Bazaar Core - Shared types library.
//!
//! This crate provides the domain types used by the Bazaar components:
//! - `storefront` - Single-page storefront (catalog, cart, sections)
//! - `integration-tests` - Router-level tests for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no templates.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
