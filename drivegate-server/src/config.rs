// Copyright 2026 Drivegate Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration management for the drivegate server.
//!
//! Everything comes from environment variables:
//! - `DRIVEGATE_ROOT` — backend root directory (required)
//! - `DRIVEGATE_BIND` — bind address (default `127.0.0.1:8002`)
//! - `DRIVEGATE_CORS` — comma-separated allowed origins, or `*` (default `*`)
//! - `DRIVEGATE_CAPACITY` — capacity quota, e.g. `10GB` (default 10GB)
//! - `DRIVEGATE_ASSETS` — static asset directory (default `.`)

use anyhow::{Context, Result};
use drivegate_core::backend::DEFAULT_CAPACITY;
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (e.g. "127.0.0.1:8002").
    pub bind: String,
    /// Backend root directory.
    pub root: PathBuf,
    /// Static asset/icons directory.
    pub assets_dir: PathBuf,
    /// Allowed CORS origins; `Any` permits every origin.
    pub cors: CorsOrigins,
    /// Capacity quota reported through `/info`.
    pub capacity: u64,
}

/// Allowed CORS origins.
#[derive(Debug, Clone)]
pub enum CorsOrigins {
    /// Any origin.
    Any,
    /// An explicit origin list.
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == "*" {
            return Self::Any;
        }
        Self::List(
            s.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Parses a size string like "10GB", "100MB", "1024KB", "5000" into bytes.
///
/// Supported suffixes (case-insensitive):
/// - GB, G: Gigabytes
/// - MB, M: Megabytes
/// - KB, K: Kilobytes
/// - B or no suffix: Bytes
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();

    if s.is_empty() {
        return Err("Empty size string".to_string());
    }

    let num_end = s.chars().position(|c| !c.is_ascii_digit() && c != '.').unwrap_or(s.len());

    let (num_str, suffix) = s.split_at(num_end);
    let suffix = suffix.trim();

    let num: f64 = num_str.parse().map_err(|_| format!("Invalid number: {}", num_str))?;

    let multiplier: u64 = match suffix {
        "GB" | "G" => 1024 * 1024 * 1024,
        "MB" | "M" => 1024 * 1024,
        "KB" | "K" => 1024,
        "B" | "" => 1,
        _ => return Err(format!("Unknown size suffix: {}", suffix)),
    };

    Ok((num * multiplier as f64) as u64)
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self> {
        let root = std::env::var("DRIVEGATE_ROOT")
            .map(PathBuf::from)
            .context("DRIVEGATE_ROOT is not set")?;

        let bind =
            std::env::var("DRIVEGATE_BIND").unwrap_or_else(|_| "127.0.0.1:8002".to_string());

        let assets_dir = std::env::var("DRIVEGATE_ASSETS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let cors = std::env::var("DRIVEGATE_CORS")
            .map(|s| CorsOrigins::parse(&s))
            .unwrap_or(CorsOrigins::Any);

        let capacity = match std::env::var("DRIVEGATE_CAPACITY") {
            Ok(s) => parse_size(&s)
                .map_err(|e| anyhow::anyhow!("invalid DRIVEGATE_CAPACITY: {}", e))?,
            Err(_) => DEFAULT_CAPACITY,
        };

        Ok(Self {
            bind,
            root,
            assets_dir,
            cors,
            capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_bytes() {
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert_eq!(parse_size("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_size_kb() {
        assert_eq!(parse_size("1KB").unwrap(), 1024);
        assert_eq!(parse_size("1K").unwrap(), 1024);
        assert_eq!(parse_size("10kb").unwrap(), 10 * 1024);
    }

    #[test]
    fn test_parse_size_mb() {
        assert_eq!(parse_size("1MB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("100mb").unwrap(), 100 * 1024 * 1024);
    }

    #[test]
    fn test_parse_size_gb() {
        assert_eq!(parse_size("1GB").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("10gb").unwrap(), 10 * 1024 * 1024 * 1024);
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("1TB").is_err()); // TB not supported
    }

    #[test]
    fn test_cors_any() {
        assert!(matches!(CorsOrigins::parse("*"), CorsOrigins::Any));
        assert!(matches!(CorsOrigins::parse(""), CorsOrigins::Any));
    }

    #[test]
    fn test_cors_list() {
        let cors = CorsOrigins::parse("http://localhost:3000, https://app.example.com");
        match cors {
            CorsOrigins::List(origins) => {
                assert_eq!(
                    origins,
                    vec!["http://localhost:3000", "https://app.example.com"]
                );
            }
            CorsOrigins::Any => panic!("expected explicit origin list"),
        }
    }
}
