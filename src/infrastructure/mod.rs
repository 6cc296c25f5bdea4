//! Infrastructure layer: database-backed and in-memory storage.

pub mod persistence;
