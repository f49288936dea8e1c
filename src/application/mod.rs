//! Application services layer.

pub mod audit;
pub mod compose;
pub mod error;
pub mod feed;
pub mod inflight;
pub mod latency;
pub mod repos;
pub mod review;
pub mod session;
