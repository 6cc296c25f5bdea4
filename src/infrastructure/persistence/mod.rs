//! Persistence implementations of the repository traits.

pub mod memory_link_repository;
pub mod memory_user_repository;
pub mod pg_link_repository;
pub mod pg_user_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use memory_user_repository::MemoryUserRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
