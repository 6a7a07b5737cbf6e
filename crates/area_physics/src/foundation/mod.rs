//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and transform composition
//! - Handle types for the object and pair tables
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
