use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RegoError, Result};

/// Name of the optional configuration file
pub const CONFIG_FILE_NAME: &str = "rego.toml";

/// Contents of a `rego.toml` file.
///
/// Every field is optional; missing values fall back to built-in defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_branch() -> String {
    "develop".to_string()
}

fn default_package() -> String {
    "main".to_string()
}

fn default_git() -> String {
    "git".to_string()
}

fn default_go() -> String {
    "go".to_string()
}

/// Defaults applied when the command line leaves a value unset.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DefaultsConfig {
    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_package")]
    pub package: String,

    #[serde(default)]
    pub ignore_tag_prefix: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            branch: default_branch(),
            package: default_package(),
            ignore_tag_prefix: String::new(),
        }
    }
}

/// External programs a run drives
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_git")]
    pub git: String,

    #[serde(default = "default_go")]
    pub go: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            git: default_git(),
            go: default_go(),
        }
    }
}

/// Values supplied on the command line or through `REGO_*` variables.
///
/// Decoupled from clap so a run can be configured programmatically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub tag: Option<String>,
    pub commit: Option<String>,
    pub branch: Option<String>,
    pub release: Option<String>,
    pub ignore_tag_prefix: Option<String>,
    pub package: Option<String>,
    pub verbose: bool,
}

/// Configuration of one release run, read-only for the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Repository root the run operates on
    pub work_dir: PathBuf,
    pub tag: String,
    pub commit: String,
    pub branch: String,
    /// Explicit release label; empty means derive it
    pub release: String,
    /// Prefix stripped from a tag name when deriving the release label
    pub ignore_tag_prefix: String,
    /// Package whose variables receive the release metadata
    pub package: String,
    /// Diagnostic narration only, never changes what a run does
    pub verbose: bool,
    pub tools: ToolsConfig,
}

impl Config {
    /// Built-in defaults for a repository at `work_dir`
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self::merge(ConfigOverrides::default(), FileConfig::default(), work_dir.into())
    }

    /// Layer command-line values over file values over defaults.
    ///
    /// All strings are trimmed of surrounding whitespace.
    pub fn merge(overrides: ConfigOverrides, file: FileConfig, work_dir: PathBuf) -> Self {
        fn pick(value: Option<String>, fallback: String) -> String {
            value
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| fallback.trim().to_string())
        }

        Config {
            work_dir,
            tag: pick(overrides.tag, String::new()),
            commit: pick(overrides.commit, String::new()),
            branch: pick(overrides.branch, file.defaults.branch),
            release: pick(overrides.release, String::new()),
            ignore_tag_prefix: pick(overrides.ignore_tag_prefix, file.defaults.ignore_tag_prefix),
            package: pick(overrides.package, file.defaults.package),
            verbose: overrides.verbose,
            tools: ToolsConfig {
                git: file.tools.git.trim().to_string(),
                go: file.tools.go.trim().to_string(),
            },
        }
    }

    /// Resolve the work directory, load the configuration file and validate.
    ///
    /// The work directory defaults to the current directory.
    pub fn from_overrides(overrides: ConfigOverrides) -> Result<Self> {
        let work_dir = match &overrides.work_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let file = load_config(overrides.config_path.as_deref(), &work_dir)?;
        Self::merge(overrides, file, work_dir).validate()
    }

    /// Check the run can start and make the work directory absolute
    pub fn validate(mut self) -> Result<Self> {
        if !self.work_dir.is_dir() {
            return Err(RegoError::config(format!(
                "work directory '{}' does not exist or is not a directory",
                self.work_dir.display()
            )));
        }
        if self.package.is_empty() {
            return Err(RegoError::config("package must not be empty"));
        }
        if self.tools.git.is_empty() || self.tools.go.is_empty() {
            return Err(RegoError::config("tool program names must not be empty"));
        }

        self.work_dir = self.work_dir.canonicalize()?;
        Ok(self)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `rego.toml` in the work directory
/// 3. `rego.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(FileConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or the custom path is missing
pub fn load_config(config_path: Option<&Path>, work_dir: &Path) -> Result<FileConfig> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if work_dir.join(CONFIG_FILE_NAME).is_file() {
        work_dir.join(CONFIG_FILE_NAME)
    } else if let Some(path) = dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
    {
        path
    } else {
        return Ok(FileConfig::default());
    };

    log::debug!("loading configuration from {}", path.display());
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map_err(|e| RegoError::config(format!("cannot parse '{}': {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("/repo");
        assert_eq!(config.branch, "develop");
        assert_eq!(config.package, "main");
        assert_eq!(config.release, "");
        assert_eq!(config.ignore_tag_prefix, "");
        assert_eq!(config.tools, ToolsConfig::default());
        assert!(!config.verbose);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file: FileConfig = toml::from_str(
            r#"
[defaults]
branch = "master"
package = "github.com/acme/tool"
"#,
        )
        .unwrap();
        let overrides = ConfigOverrides {
            branch: Some("release".to_string()),
            ..Default::default()
        };

        let config = Config::merge(overrides, file, PathBuf::from("/repo"));
        assert_eq!(config.branch, "release");
        assert_eq!(config.package, "github.com/acme/tool");
    }

    #[test]
    fn test_values_are_trimmed() {
        let overrides = ConfigOverrides {
            tag: Some("  v1.0 \n".to_string()),
            package: Some(" main ".to_string()),
            ..Default::default()
        };

        let config = Config::merge(overrides, FileConfig::default(), PathBuf::from("/repo"));
        assert_eq!(config.tag, "v1.0");
        assert_eq!(config.package, "main");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file: FileConfig = toml::from_str("[tools]\ngo = \"/usr/local/go/bin/go\"\n").unwrap();
        assert_eq!(file.tools.go, "/usr/local/go/bin/go");
        assert_eq!(file.tools.git, "git");
        assert_eq!(file.defaults, DefaultsConfig::default());
    }

    #[test]
    fn test_validate_rejects_missing_work_dir() {
        let err = Config::new("/some-nonexistent-path/").validate().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_rejects_empty_package() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::new(dir.path());
        config.package = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_makes_work_dir_absolute() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::new(dir.path().join(".")).validate().unwrap();
        assert!(config.work_dir.is_absolute());
        assert_eq!(config.work_dir, dir.path().canonicalize().unwrap());
    }
}
