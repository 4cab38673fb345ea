pub mod api;
pub mod error;
pub mod kinds;
pub mod repository;
pub mod request;
pub mod response;
pub mod service;
