use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use storage_capabilities::DEFAULT_HOME_VAR;
type Result<T> = anyhow::Result<T>;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_home_var")]
    pub home_var: String,
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize server config")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            home_var: default_home_var(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_home_var() -> String {
    DEFAULT_HOME_VAR.to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::ServerConfig;

    #[test]
    fn test_parse_config() {
        let raw = r#"
listen_addr = "0.0.0.0:8080"
home_var = "%USERPROFILE%"
"#;

        let config = ServerConfig::from_str(raw).expect("config should parse");
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.home_var, "%USERPROFILE%");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ServerConfig::from_str("").expect("empty config should parse");
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.home_var, "%HOME%");
    }

    #[test]
    fn test_default_matches_empty_config() {
        let parsed = ServerConfig::from_str("").expect("empty config should parse");
        let default = ServerConfig::default();
        assert_eq!(default.listen_addr, parsed.listen_addr);
        assert_eq!(default.home_var, parsed.home_var);
    }

    #[test]
    fn test_from_file_reads_config() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        writeln!(file, "listen_addr = \"127.0.0.1:9000\"").expect("temp file should be writable");

        let config = ServerConfig::from_file(file.path()).expect("config file should load");
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.home_var, "%HOME%");
    }

    #[test]
    fn test_from_file_missing_file_fails() {
        let err = ServerConfig::from_file("/definitely/not/a/real/server.toml")
            .expect_err("missing file should fail");

        assert!(err.to_string().contains("failed to read config file"));
    }
}
