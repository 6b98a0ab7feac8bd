pub mod types;
pub mod traits;
pub mod config;
pub mod normalize;
pub mod relevance;
pub mod similarity;
pub mod dedup;
pub mod selector;
pub mod composer;
pub mod parser;
pub mod fetcher;
pub mod oauth;
pub mod publisher;
pub mod state;
pub mod pipeline;

pub use types::*;
pub use traits::{FeedFetcher, Publisher};
pub use config::{AppConfig, Credentials};
pub use normalize::normalize_title;
pub use relevance::KeywordFilter;
pub use similarity::similarity_ratio;
pub use dedup::History;
pub use selector::FeedSelector;
pub use composer::compose_post;
pub use parser::FeedParser;
pub use fetcher::Fetcher;
pub use publisher::XPublisher;
pub use state::StateStore;
pub use pipeline::PostingPipeline;
