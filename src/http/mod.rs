//! HTTP module
//!
//! Provides the per-run HTTP session, the header set the legacy frontend
//! expects, and optional client-side pacing.
//!
//! # Features
//!
//! - **Per-run Sessions**: one `HttpClient` per pagination run, never shared
//! - **Page Fetching**: the `PageFetcher` seam the timeline paginates through
//! - **Proxy Routing**: per-scheme proxies from the scraper config
//! - **Rate Limiting**: token bucket pacing using governor

mod client;
mod headers;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, PageFetcher, RequestConfig,
    MAX_POSITION_PARAM,
};
pub use headers::{get_headers, get_headers_with_agent, REFERER_BASE, USER_AGENT};
pub use rate_limit::RateLimiter;
