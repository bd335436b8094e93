use std::env;
use std::time::Duration;

/// Load a `.env` file into the process environment (silently ignored if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Parse a Go-style duration string (`"120s"`, `"24h"`, `"500ms"`, `"5m"`).
/// Falls back to `default` on anything unparseable.
pub fn parse_duration(raw: &str, default: Duration) -> Duration {
    let raw = raw.trim();
    let split_at = raw
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(raw.len());
    let (num, unit) = raw.split_at(split_at);
    let num: f64 = match num.parse() {
        Ok(n) => n,
        Err(_) => return default,
    };
    let millis = match unit {
        "ms" => num,
        "s" | "" => num * 1000.0,
        "m" => num * 60_000.0,
        "h" => num * 3_600_000.0,
        _ => return default,
    };
    if millis < 0.0 {
        return default;
    }
    Duration::from_millis(millis as u64)
}

fn env_duration(key: &str, default: Duration) -> Duration {
    match env_opt(key) {
        Some(v) => parse_duration(&v, default),
        None => default,
    }
}

/// `LOG_LEVEL ∈ {DEBUG, INFO, ERROR}`, defaulting to `DEBUG` like the upstream services.
pub fn log_level() -> String {
    env_or("LOG_LEVEL", "DEBUG").to_uppercase()
}

/// Addresses the Gateway dials to reach the internal RPC workers, plus its own
/// listen address and the Store's connection string.
#[derive(Debug, Clone)]
pub struct ServiceAddresses {
    pub api_address: String,
    pub words_address: String,
    pub update_address: String,
    pub search_address: String,
    pub db_address: String,
}

impl ServiceAddresses {
    pub fn from_env() -> Self {
        Self {
            api_address: env_or("API_ADDRESS", "0.0.0.0:80"),
            words_address: env_or("WORDS_ADDRESS", "words:81"),
            update_address: env_or("UPDATE_ADDRESS", "update:82"),
            search_address: env_or("SEARCH_ADDRESS", "search:83"),
            db_address: env_or("DB_ADDRESS", "postgres://postgres@localhost:5432/comics"),
        }
    }
}

/// Ingestor tuning: how hard it hammers the upstream feed.
#[derive(Debug, Clone)]
pub struct IngestTuning {
    pub xkcd_concurrency: u32,
    pub xkcd_timeout: Duration,
    pub xkcd_base_url: String,
}

impl IngestTuning {
    pub fn from_env() -> Self {
        Self {
            xkcd_concurrency: env_u32("XKCD_CONCURRENCY", 4),
            xkcd_timeout: env_duration("XKCD_TIMEOUT", Duration::from_secs(10)),
            xkcd_base_url: env_or("XKCD_BASE_URL", "https://xkcd.com"),
        }
    }
}

/// Search tuning: index refresh cadence plus the admission controls the Gateway
/// applies in front of `/api/search`.
#[derive(Debug, Clone, Copy)]
pub struct SearchTuning {
    pub index_ttl: Duration,
    pub search_concurrency: u32,
    pub search_rate: u32,
}

impl SearchTuning {
    pub fn from_env() -> Self {
        Self {
            index_ttl: env_duration("INDEX_TTL", Duration::from_secs(300)),
            search_concurrency: env_u32("SEARCH_CONCURRENCY", 1),
            search_rate: env_u32("SEARCH_RATE", 1),
        }
    }
}

/// Gateway authentication: admin credentials and session token lifetime.
///
/// `ADMIN_USER`/`ADMIN_PASSWORD` have no default, construction fails fast if
/// either is missing, matching the upstream Gateway's startup check.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_user: String,
    pub admin_password: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, String> {
        let admin_user = env_opt("ADMIN_USER").ok_or("ADMIN_USER is required")?;
        let admin_password = env_opt("ADMIN_PASSWORD").ok_or("ADMIN_PASSWORD is required")?;
        Ok(Self {
            admin_user,
            admin_password,
            token_ttl: env_duration("TOKEN_TTL", Duration::from_secs(24 * 3600)),
        })
    }
}

/// FrontendUI's own listen address plus the Gateway base URL it calls.
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub frontend_address: String,
    pub api_address: String,
    pub template_path: String,
}

impl FrontendConfig {
    pub fn from_env() -> Self {
        Self {
            frontend_address: env_or("FRONTEND_ADDRESS", "0.0.0.0:84"),
            api_address: env_or("API_ADDRESS", "api:8080"),
            template_path: env_or("TEMPLATE_PATH", "templates"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds_minutes_hours_and_millis() {
        assert_eq!(parse_duration("120s", Duration::ZERO), Duration::from_secs(120));
        assert_eq!(parse_duration("24h", Duration::ZERO), Duration::from_secs(24 * 3600));
        assert_eq!(parse_duration("5m", Duration::ZERO), Duration::from_secs(300));
        assert_eq!(parse_duration("500ms", Duration::ZERO), Duration::from_millis(500));
    }

    #[test]
    fn falls_back_to_default_on_garbage() {
        let default = Duration::from_secs(7);
        assert_eq!(parse_duration("banana", default), default);
        assert_eq!(parse_duration("", default), default);
    }

    #[test]
    fn service_addresses_have_sane_defaults() {
        env::remove_var("WORDS_ADDRESS");
        let addrs = ServiceAddresses::from_env();
        assert_eq!(addrs.words_address, "words:81");
    }
}
