//! Headless controller for a user registration form with postal code
//! (CEP) address lookup.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod functional;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

pub use api::{FormController, FormEvent};
pub use config::FormConfig;
pub use error::{FormError, ServiceResult};
