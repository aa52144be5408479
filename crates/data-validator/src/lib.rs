//! Data Validation and Clamping
//!
//! Provides the input domains of every numeric patient field, range checking,
//! and the clamping used to keep assembled records inside those domains.

pub mod domain;
mod error;
mod validator;

pub use domain::FieldDomain;
pub use error::ValidationError;
pub use validator::{Clamped, Validator};
