pub mod school_service;

pub use school_service::SchoolService;
