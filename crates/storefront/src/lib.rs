//! SpeedParts storefront engine library.
//!
//! The client-resident core of the parts storefront: it holds the session
//! catalog, answers filter/search queries, maintains a persistent
//! stock-aware cart, and assembles finalized orders for multi-channel
//! dispatch. The rendering surface and UI chrome live outside this crate
//! and consume the state exposed here.
//!
//! # Architecture
//!
//! - [`catalog`] - immutable per-session product index, facets, and queries
//! - [`stock`] - available-to-sell arithmetic over catalog stock and cart
//!   reservations
//! - [`cart`] - the cart state machine and its durable storage slot
//! - [`checkout`] - order validation and assembly
//! - [`dispatch`] - channel renderings and the send-with-fallback pipeline
//! - [`state`] - the session context owning catalog and cart
//! - [`config`] - environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod dispatch;
pub mod state;
pub mod stock;
