pub mod gig_service;

pub use gig_service::GigService;
