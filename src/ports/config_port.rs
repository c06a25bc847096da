//! Sectioned configuration access (screener and strategy files).

use std::path::PathBuf;

pub trait ConfigPort {
    fn has_section(&self, section: &str) -> bool;
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Non-empty, trimmed string value.
    fn get_trimmed(&self, section: &str, key: &str) -> Option<String> {
        self.get_string(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_trimmed(section, key).map(PathBuf::from)
    }
}
