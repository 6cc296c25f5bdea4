//! Application layer: business logic orchestrating domain and persistence.

pub mod services;
