//! Monitors a live AIS feed for watchlisted and flagged vessels and
//! relays their position updates to a downstream alerting endpoint.

pub mod classify;
pub mod config;
pub mod errors;
pub mod forward;
pub mod models;
pub mod state;
pub mod stream;
pub mod token;
pub mod watchlist;
