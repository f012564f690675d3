pub mod errors;
pub mod models;
pub mod photos;
pub mod ports;
pub mod service;
