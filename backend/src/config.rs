use log::warn;
use std::env;
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "valuation.sqlite";
const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    /// Largest accepted JSON body; table-heavy reports get big.
    pub json_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: DEFAULT_DB_PATH.to_string(),
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("VALUATION_HOST").unwrap_or(defaults.host),
            port: parse_or("VALUATION_PORT", lookup("VALUATION_PORT"), defaults.port),
            db_path: lookup("VALUATION_DB_PATH").unwrap_or(defaults.db_path),
            json_limit: parse_or(
                "VALUATION_JSON_LIMIT",
                lookup("VALUATION_JSON_LIMIT"),
                defaults.json_limit,
            ),
        }
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring invalid {}='{}', using default", key, raw);
                default
            }
        },
    }
}
