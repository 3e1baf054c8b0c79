use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use dotenvy::dotenv;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub excel_file_path: PathBuf,

    // Cache settings
    pub cache_timeout: Duration,

    /// Recognised tool names, in display order. Used for grouping only, data is not
    /// validated against it.
    pub tools: Vec<String>,

    pub api_prefix: String,

    // Rate limiting
    pub rate_reload_per_min: u32,

    pub log_dir: String,
}

const DEFAULT_TOOLS: &str = "CAP360,BREAD,DCC";

/// Parse an env var, falling back to `default` when it is unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn parse_tools(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let tools = parse_tools(&env::var("TOOLS").unwrap_or_else(|_| DEFAULT_TOOLS.to_string()));

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string()),
            excel_file_path: env::var("EXCEL_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data").join("billability_data.xlsx")),
            cache_timeout: Duration::from_secs(env_or("CACHE_TIMEOUT", 300)), // 5 minutes
            tools: if tools.is_empty() { parse_tools(DEFAULT_TOOLS) } else { tools },
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            rate_reload_per_min: env_or("RATE_RELOAD_PER_MIN", 10),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_are_trimmed_and_blanks_dropped() {
        assert_eq!(parse_tools(" CAP360, BREAD,,DCC "), vec!["CAP360", "BREAD", "DCC"]);
    }

    #[test]
    fn unset_var_uses_default() {
        assert_eq!(env_or("BILLABILITY_TEST_SURELY_UNSET", 42u64), 42);
    }
}
