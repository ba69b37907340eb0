pub mod gig_dto;

pub use gig_dto::*;
