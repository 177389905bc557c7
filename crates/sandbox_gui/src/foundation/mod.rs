//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the toolkit:
//! - Math types (vectors, rectangles, 2D transforms)
//! - UTF-8 decoding and cursor stepping
//! - Logging utilities

pub mod math;
pub mod utf8;
pub mod logging;
