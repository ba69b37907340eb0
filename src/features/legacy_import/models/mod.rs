pub mod legacy_row;

pub use legacy_row::*;
