//! Credentials and the authorization strategies derived from them.

pub mod credential;
pub mod strategy;

pub use credential::*;
pub use strategy::*;
