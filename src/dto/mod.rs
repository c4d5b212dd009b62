//! View data and query-parameter structs shaped for the templates.

pub mod clients;
pub mod users;
