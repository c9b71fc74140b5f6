//! HTTP façade over the YouTube Music catalog: search and playlist lookups
//! reshaped into a small, stable JSON contract.

pub mod catalog;
pub mod controllers;
pub mod error;
pub mod models;
pub mod normalize;
pub mod routers;
pub mod secrets;
pub mod state;
