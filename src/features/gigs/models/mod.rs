pub mod gig;

pub use gig::*;
