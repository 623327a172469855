//! Journal configuration from the environment.

use std::path::PathBuf;

/// Where (and whether) to write the event journal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalConfig {
    /// `MATCH3_LOG_PATH`; no path means no journal.
    pub path: Option<PathBuf>,
    /// `MATCH3_LOG_DISABLED=1|true` wins over a configured path.
    pub disabled: bool,
}

impl JournalConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup("MATCH3_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });
        let disabled = lookup("MATCH3_LOG_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        Self { path, disabled }
    }

    /// The path to write to, if journaling is on.
    pub fn enabled_path(&self) -> Option<&PathBuf> {
        if self.disabled {
            return None;
        }
        self.path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_means_disabled() {
        let cfg = JournalConfig::from_lookup(|_| None);
        assert_eq!(cfg.enabled_path(), None);
    }

    #[test]
    fn blank_path_is_ignored() {
        let cfg = JournalConfig::from_lookup(|k| (k == "MATCH3_LOG_PATH").then(|| "   ".to_string()));
        assert_eq!(cfg.path, None);
    }

    #[test]
    fn disabled_flag_wins() {
        let cfg = JournalConfig::from_lookup(|k| match k {
            "MATCH3_LOG_PATH" => Some("/tmp/match3.jsonl".to_string()),
            "MATCH3_LOG_DISABLED" => Some("TRUE".to_string()),
            _ => None,
        });
        assert!(cfg.path.is_some());
        assert_eq!(cfg.enabled_path(), None);
    }
}
