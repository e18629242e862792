//! Service configuration, read once from the environment at start-up

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use pastelink_domain::document::{DocumentConfig, DEFAULT_KEY_LENGTH};
use pastelink_domain::keys::DEFAULT_MAX_KEY_ATTEMPTS;

/// Which store adapter backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    S3,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "s3" => Ok(Self::S3),
            other => bail!("unknown store '{}', expected 'memory' or 's3'", other),
        }
    }
}

/// Which key generator draws candidate keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyGeneratorKind {
    Random,
    Phonetic,
}

impl FromStr for KeyGeneratorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "phonetic" => Ok(Self::Phonetic),
            other => bail!("unknown key generator '{}', expected 'random' or 'phonetic'", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format '{}', expected 'text' or 'json'", other),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub key_length: usize,
    /// Maximum payload length in bytes, `None` for unlimited
    pub max_length: Option<usize>,
    pub max_key_attempts: usize,
    pub key_generator: KeyGeneratorKind,
    /// Characters the random generator draws from, `None` for alphanumerics
    pub key_alphabet: Option<String>,
    pub store: StoreKind,
    pub bucket: String,
    /// Store entry lifetime in seconds, `None` for no expiry
    pub expire_seconds: Option<i64>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7777,
            key_length: DEFAULT_KEY_LENGTH,
            max_length: None,
            max_key_attempts: DEFAULT_MAX_KEY_ATTEMPTS,
            key_generator: KeyGeneratorKind::Random,
            key_alphabet: None,
            store: StoreKind::Memory,
            bucket: "pastelink".to_string(),
            expire_seconds: None,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Build the configuration from `PASTE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            host: lookup("PASTE_HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "PASTE_PORT")?.unwrap_or(defaults.port),
            key_length: parse(&lookup, "PASTE_KEY_LENGTH")?.unwrap_or(defaults.key_length),
            // 0 means unlimited, like an unset limit.
            max_length: parse(&lookup, "PASTE_MAX_LENGTH")?.filter(|&max: &usize| max > 0),
            max_key_attempts: parse(&lookup, "PASTE_MAX_KEY_ATTEMPTS")?
                .unwrap_or(defaults.max_key_attempts),
            key_generator: parse(&lookup, "PASTE_KEY_GENERATOR")?
                .unwrap_or(defaults.key_generator),
            key_alphabet: parse(&lookup, "PASTE_KEY_ALPHABET")?,
            store: parse(&lookup, "PASTE_STORE")?.unwrap_or(defaults.store),
            bucket: lookup("PASTE_BUCKET").unwrap_or(defaults.bucket),
            expire_seconds: parse(&lookup, "PASTE_EXPIRE_SECONDS")?,
            log_format: parse(&lookup, "PASTE_LOG_FORMAT")?.unwrap_or(defaults.log_format),
        };

        if config.key_length == 0 {
            bail!("PASTE_KEY_LENGTH must be at least 1");
        }
        if config.max_key_attempts == 0 {
            bail!("PASTE_MAX_KEY_ATTEMPTS must be at least 1");
        }
        if config.key_alphabet.is_some() && config.key_generator != KeyGeneratorKind::Random {
            bail!("PASTE_KEY_ALPHABET only applies to the random key generator");
        }
        if config.expire_seconds.is_some_and(|secs| secs <= 0) {
            bail!("PASTE_EXPIRE_SECONDS must be positive");
        }

        Ok(config)
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Store entry lifetime, if any
    pub fn expiry(&self) -> Option<chrono::Duration> {
        self.expire_seconds.map(chrono::Duration::seconds)
    }

    /// The subset of settings the document service needs
    pub fn document_config(&self) -> DocumentConfig {
        DocumentConfig {
            key_length: self.key_length,
            max_length: self.max_length,
            max_key_attempts: self.max_key_attempts,
        }
    }
}

fn parse<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| anyhow::anyhow!("{}", e))
            .with_context(|| format!("invalid value '{}' for {}", raw, name)),
    }
}
