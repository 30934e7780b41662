//! Utility modules for the portfolio renderer.

pub mod collate;
pub mod date;
pub mod minify;
