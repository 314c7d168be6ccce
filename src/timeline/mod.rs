//! Timeline domain — post model, history fetch, retention trim.

pub mod fetch;
pub mod models;
pub mod trim;
