//! Client-side state core for the AgriSync farm management app.
//!
//! - [`store`]: typed slices, one REST call per operation, persisted session
//! - [`filter`]: pure list filtering and search
//! - [`validation`]: pure form validation

pub mod api;
pub mod cli;
pub mod config;
pub mod filter;
pub mod mvi;
pub mod resource;
pub mod session;
pub mod slice;
pub mod storage;
pub mod store;
pub mod telemetry;
pub mod validation;
