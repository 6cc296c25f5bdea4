//! Domain layer: business entities and repository traits.
//!
//! This layer has no knowledge of HTTP or SQL. Entities carry the pure
//! predicates of the link lifecycle (notably expiry evaluation); repository
//! traits define the contract the store must uphold, including atomic
//! uniqueness on insert.

pub mod entities;
pub mod repositories;
