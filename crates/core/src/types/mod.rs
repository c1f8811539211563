//! Core types for Orderdesk.
//!
//! This module provides the canonical order model and type-safe wrappers
//! for common domain concepts.

pub mod email;
pub mod order;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError};
pub use order::{Address, Order, OrderItem, PickupLocation, TrackingInfo};
pub use phone::{Phone, PhoneError};
pub use status::OrderStatus;
