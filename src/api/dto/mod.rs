//! Request/response DTOs for the REST API.

pub mod search;
pub mod shorten;
pub mod stats;
pub mod update_link;

pub use search::SearchQuery;
pub use shorten::{LinkResponse, ShortenRequest};
pub use stats::StatsResponse;
pub use update_link::UpdateLinkRequest;
