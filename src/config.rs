use std::time::Duration;

use crate::theme::Theme;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_TREE_ROWS: usize = 10;

/// Runtime configuration, read from the environment. CLI flags override
/// these after loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completions endpoint for commit drafting (`DIFFWATCH_API_URL`).
    pub api_url: String,
    /// Model name sent with the request (`DIFFWATCH_MODEL`).
    pub model: String,
    /// `OPENAI_API_KEY`; commit drafting reports an error when unset.
    pub api_key: Option<String>,
    /// Quiet period before reacting to a burst of file changes
    /// (`DIFFWATCH_DEBOUNCE_MS`).
    pub debounce: Duration,
    /// Height cap for the file-tree panel (`DIFFWATCH_TREE_ROWS`).
    pub tree_rows: usize,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            tree_rows: DEFAULT_TREE_ROWS,
            theme: Theme::from_name("one-dark"),
        }
    }
}

pub fn load_config() -> Config {
    let defaults = Config::default();
    Config {
        api_url: env_string("DIFFWATCH_API_URL").unwrap_or(defaults.api_url),
        model: env_string("DIFFWATCH_MODEL").unwrap_or(defaults.model),
        api_key: env_string("OPENAI_API_KEY"),
        debounce: Duration::from_millis(
            parse_number(env_string("DIFFWATCH_DEBOUNCE_MS")).unwrap_or(DEFAULT_DEBOUNCE_MS),
        ),
        tree_rows: parse_number(env_string("DIFFWATCH_TREE_ROWS")).unwrap_or(DEFAULT_TREE_ROWS),
        theme: match env_string("DIFFWATCH_THEME") {
            Some(name) => Theme::from_name(&name),
            None => defaults.theme,
        },
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u64>(Some("250".to_string())), Some(250));
        assert_eq!(parse_number::<u64>(Some(" 250 ".to_string())), Some(250));
        assert_eq!(parse_number::<u64>(Some("abc".to_string())), None);
        assert_eq!(parse_number::<u64>(None), None);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.tree_rows, 10);
        assert!(config.api_key.is_none());
    }
}
