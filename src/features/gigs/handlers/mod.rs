pub mod gig_handler;

pub use gig_handler::*;
