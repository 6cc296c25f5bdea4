//! Core business entities.

pub mod link;
pub mod user;

pub use link::{Link, LinkUpdate, NewLink};
pub use user::{NewUser, User};
