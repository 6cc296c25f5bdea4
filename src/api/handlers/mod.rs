//! HTTP request handlers.

pub mod delete_link;
pub mod health;
pub mod redirect;
pub mod search;
pub mod shorten;
pub mod stats;
pub mod update_link;

pub use delete_link::delete_link_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use search::search_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
pub use update_link::update_link_handler;
