pub mod capture;
pub mod domain;
pub mod error;
pub mod expiration;
pub mod summary;
