//! Infrastructure adapters
//!
//! Object storage for profile images, portfolios and brand logos.

pub mod storage;
