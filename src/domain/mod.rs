//! Canonical records exposed by the billing admin service layer.

pub mod catalog;
pub mod client;
pub mod fields;
pub mod status;
pub mod types;
pub mod user;
