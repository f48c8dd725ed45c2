// src/config.rs
use std::{str::FromStr, time::Duration};

use anyhow::Context;

use crate::challenge::DEFAULT_TTL_SECS;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub challenge_ttl_secs: u64,
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            challenge_ttl_secs: DEFAULT_TTL_SECS,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read `PORT`, `CHALLENGE_TTL_SECS`, `BODY_LIMIT_BYTES` and
    /// `REQUEST_TIMEOUT_SECS`; unset variables keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let d = Self::default();
        Ok(Self {
            port: parse_or(&get, "PORT", d.port)?,
            challenge_ttl_secs: parse_or(&get, "CHALLENGE_TTL_SECS", d.challenge_ttl_secs)?,
            body_limit_bytes: parse_or(&get, "BODY_LIMIT_BYTES", d.body_limit_bytes)?,
            request_timeout: Duration::from_secs(parse_or(
                &get,
                "REQUEST_TIMEOUT_SECS",
                d.request_timeout.as_secs(),
            )?),
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {raw:?}")),
        _ => Ok(default),
    }
}
