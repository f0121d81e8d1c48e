//! Bazaar storefront library.
//!
//! The storefront logic is a synchronous core (catalog, cart, rendering,
//! section navigation and event dispatch over a document model) wrapped by
//! an axum adapter that keeps one live page per page load. It is exposed as
//! a library so the router can be tested end to end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod document;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod navigator;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;
pub mod timers;
