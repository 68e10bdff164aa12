pub mod config;
pub mod error;
pub mod export;
pub mod feed_reader;
pub mod filter;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod sort;
pub mod stats;
pub mod time_adjust;
pub mod types;
pub mod web;
