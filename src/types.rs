//! Common types used throughout the timeline scraper
//!
//! Shared type aliases used across multiple modules.

use std::collections::HashMap;

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;
