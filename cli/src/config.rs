use eyre::WrapErr;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_ENVIRONMENT: &str = "dev";

/// Structure of messaging.toml
///
/// The file is optional. It only pins a default environment so day-to-day
/// commands can drop the --environment flag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfraConfig {
    /// [stack]
    /// environment = "staging"
    #[serde(default)]
    stack: StackSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StackSection {
    environment: Option<String>,
}

impl InfraConfig {
    /// Read the config from messaging.toml in a given directory
    ///
    /// A missing file yields the default config, a malformed one is an error.
    pub fn from_path(path: &Path) -> eyre::Result<Self> {
        let config_toml_path = path.join("messaging.toml");

        let Ok(toml_string) = std::fs::read_to_string(&config_toml_path) else {
            return Ok(InfraConfig::default());
        };

        Self::from_toml(&toml_string)
    }

    pub fn from_current_dir() -> eyre::Result<Self> {
        Self::from_path(&std::env::current_dir().wrap_err("Failed to get current dir")?)
    }

    fn from_toml(toml_string: &str) -> eyre::Result<Self> {
        toml::from_str(toml_string).wrap_err("Failed to parse messaging.toml")
    }

    /// Resolve the stack environment
    ///
    /// The command line flag wins over the config file, the config file over
    /// the built-in default.
    pub fn environment(&self, flag: Option<&str>) -> String {
        flag.map(|f| f.to_string())
            .or_else(|| self.stack.environment.clone())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_environment() {
        let config = InfraConfig::from_toml("[stack]\nenvironment = \"staging\"").unwrap();

        assert_eq!(config.environment(None), "staging");
    }

    #[test]
    fn flag_wins_over_config() {
        let config = InfraConfig::from_toml("[stack]\nenvironment = \"staging\"").unwrap();

        assert_eq!(config.environment(Some("prod")), "prod");
    }

    #[test]
    fn empty_config_falls_back_to_default() {
        let config = InfraConfig::from_toml("").unwrap();

        assert_eq!(config.environment(None), "dev");
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(InfraConfig::from_toml("[stack\nenvironment=").is_err());
    }
}
