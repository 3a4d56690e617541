//! Core types for Orchard Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use status::{OrderStatus, PaymentMethod, PaymentStatus, StatusParseError};
