use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use pagesmith_utils::error::ConfigError;

/// Name of the config file searched for upward from the working directory
const CONFIG_FILE_NAME: &str = "pagesmith.toml";

/// Environment variable that overrides config discovery with an explicit path
const CONFIG_ENV_VAR: &str = "PAGESMITH_CONFIG";

/// Filesystem layout section from `[paths]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root directory for generated output (`{output_root}/{tag}_{app_id}`)
    pub output_root: Utf8PathBuf,
    /// Root directory for deployed copies (`{deploy_root}/{deploy_key}`)
    pub deploy_root: Utf8PathBuf,
    /// JSON file backing the application record store
    pub records_file: Utf8PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_root: Utf8PathBuf::from("tmp/code_output"),
            deploy_root: Utf8PathBuf::from("tmp/code_deploy"),
            records_file: Utf8PathBuf::from("tmp/apps.json"),
        }
    }
}

/// Deployment section from `[deploy]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Host prefix for public URLs; promotion returns `{host}/{deploy_key}/`
    pub host: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".to_string(),
        }
    }
}

/// Generation backend section from `[generator]`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Provider tag (currently only "anthropic")
    pub provider: Option<String>,
    /// Model identifier passed to the provider
    pub model: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Custom API endpoint; provider default when unset
    pub base_url: Option<String>,
    /// Maximum tokens per generation
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

/// Configuration for pagesmith operations.
///
/// # Discovery
///
/// Use [`Config::discover()`] for CLI-like behavior that:
/// - Respects the `PAGESMITH_CONFIG` environment variable
/// - Searches for `pagesmith.toml` upward from the current directory
/// - Falls back to built-in defaults when no file is found
///
/// For embedding scenarios where behavior must not depend on the user's
/// environment, construct a `Config` directly or use [`Config::load()`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub deploy: DeployConfig,
    pub generator: GeneratorConfig,
}

impl Config {
    /// Load configuration from an explicit TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist,
    /// `ConfigError::Unreadable` if it cannot be read, and
    /// `ConfigError::Invalid` if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Discover configuration from the environment.
    ///
    /// Precedence: `PAGESMITH_CONFIG` env var > upward search for
    /// `pagesmith.toml` > built-in defaults. A path named by the env var
    /// must exist; a missing searched file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a discovered file cannot be read or parsed.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV_VAR) {
            return Self::load(Path::new(&path));
        }

        if let Some(found) = Self::find_upward(&env::current_dir().unwrap_or_default()) {
            return Self::load(&found);
        }

        Ok(Self::default())
    }

    /// Search for the config file in `start` and each ancestor directory.
    fn find_upward(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Minimal configuration for tests: defaults with all paths rooted in
    /// the given directory so tests never touch the real working tree.
    #[must_use]
    pub fn rooted_at(root: &camino::Utf8Path) -> Self {
        Self {
            paths: PathsConfig {
                output_root: root.join("code_output"),
                deploy_root: root.join("code_deploy"),
                records_file: root.join("apps.json"),
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_layout() {
        let config = Config::default();
        assert_eq!(config.paths.output_root, "tmp/code_output");
        assert_eq!(config.paths.deploy_root, "tmp/code_deploy");
        assert_eq!(config.deploy.host, "http://localhost");
        assert!(config.generator.provider.is_none());
    }

    #[test]
    fn load_parses_partial_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagesmith.toml");
        std::fs::write(
            &path,
            r#"
[deploy]
host = "https://apps.example.com"

[generator]
provider = "anthropic"
model = "claude-sonnet-4-5"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.deploy.host, "https://apps.example.com");
        assert_eq!(config.generator.provider.as_deref(), Some("anthropic"));
        // Unspecified sections keep their defaults
        assert_eq!(config.paths.output_root, "tmp/code_output");
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        match Config::load(&path) {
            Err(ConfigError::NotFound { .. }) => {}
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagesmith.toml");
        std::fs::write(&path, "[deploy\nhost = ").unwrap();
        match Config::load(&path) {
            Err(ConfigError::Invalid { .. }) => {}
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn find_upward_walks_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();

        let found = Config::find_upward(&nested).expect("config not found");
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    }
}
