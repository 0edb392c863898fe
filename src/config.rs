use crate::copy::{compile_pattern, DEFAULT_FILE_PATTERN};
use crate::domain::{CommitTemplate, VersionTag};
use crate::error::{MirrorError, Result};
use crate::git::Backend;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "protomirror.toml";

/// Represents the complete configuration for proto-mirror.
///
/// Every field has a default, so an empty file (or no file) reproduces the
/// stock behavior: `./v2ray-core` mirrored into `./v2ray-proto`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub sync: SyncConfig,
}

fn default_upstream_dir() -> PathBuf {
    PathBuf::from("v2ray-core")
}

fn default_mirror_dir() -> PathBuf {
    PathBuf::from("v2ray-proto")
}

/// Working tree locations. Relative paths resolve against the directory the
/// tool was started in.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_upstream_dir")]
    pub upstream: PathBuf,

    #[serde(default = "default_mirror_dir")]
    pub mirror: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            upstream: default_upstream_dir(),
            mirror: default_mirror_dir(),
        }
    }
}

fn default_tag_limit() -> usize {
    20
}

fn default_file_pattern() -> String {
    DEFAULT_FILE_PATTERN.to_string()
}

fn default_commit_message() -> String {
    "sync v2ray version {tag} proto files".to_string()
}

fn default_zero_version() -> String {
    "v0.0.0".to_string()
}

/// Knobs for the sync workflow itself
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SyncConfig {
    /// How many of the newest upstream tags are considered per run
    #[serde(default = "default_tag_limit")]
    pub tag_limit: usize,

    /// Regular expression matched against each file's relative path
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    /// Commit message, `{tag}` is replaced by the version tag
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Baseline used when the mirror has no tags
    #[serde(default = "default_zero_version")]
    pub zero_version: String,

    #[serde(default)]
    pub backend: Backend,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            tag_limit: default_tag_limit(),
            file_pattern: default_file_pattern(),
            commit_message: default_commit_message(),
            zero_version: default_zero_version(),
            backend: Backend::default(),
        }
    }
}

/// Absolute locations of the two working trees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub upstream_dir: PathBuf,
    pub mirror_dir: PathBuf,
}

impl Workspace {
    /// Resolve configured paths against `base_dir`
    pub fn resolve(base_dir: &Path, paths: &PathsConfig) -> Self {
        Workspace {
            upstream_dir: base_dir.join(&paths.upstream),
            mirror_dir: base_dir.join(&paths.mirror),
        }
    }

    /// Resolve configured paths against the process working directory
    pub fn from_current_dir(paths: &PathsConfig) -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        Ok(Self::resolve(&base_dir, paths))
    }
}

/// Validated runtime settings, built once at startup and passed down
#[derive(Debug, Clone)]
pub struct Settings {
    pub workspace: Workspace,
    pub tag_limit: usize,
    pub file_pattern: Regex,
    pub commit_template: CommitTemplate,
    pub zero_version: String,
    pub backend: Backend,
}

impl Config {
    /// Validate the configuration and resolve its paths against `base_dir`
    pub fn into_settings(self, base_dir: &Path) -> Result<Settings> {
        let workspace = Workspace::resolve(base_dir, &self.paths);
        self.with_workspace(workspace)
    }

    /// Validate the configuration and pair it with an already resolved workspace
    ///
    /// # Returns
    /// * `Ok(Settings)` - Every value is usable
    /// * `Err` - If the limit is zero, the pattern does not compile, the commit
    ///   template lacks `{tag}` or the zero version is not semver
    pub fn with_workspace(self, workspace: Workspace) -> Result<Settings> {
        if self.sync.tag_limit == 0 {
            return Err(MirrorError::config("tag_limit must be at least 1"));
        }

        let file_pattern = compile_pattern(&self.sync.file_pattern)?;
        let commit_template = CommitTemplate::new(self.sync.commit_message)?;
        VersionTag::parse(&self.sync.zero_version)?;

        Ok(Settings {
            workspace,
            tag_limit: self.sync.tag_limit,
            file_pattern,
            commit_template,
            zero_version: self.sync.zero_version,
            backend: self.sync.backend,
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `protomirror.toml` in current directory
/// 3. `.protomirror.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if path.exists() {
            path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        MirrorError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    toml::from_str(&contents)
        .map_err(|e| MirrorError::config(format!("Cannot parse '{}': {}", path.display(), e)))
}
