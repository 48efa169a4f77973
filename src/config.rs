//! Optional TOML configuration.
//!
//! Lookup order: `$GOTESTX_CONFIG`, then `./gotestx.toml`, then
//! `<config dir>/gotestx/config.toml`. A missing file means defaults; a file
//! that exists but does not parse is an error.

use std::fmt;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde::Deserialize;

use crate::constants;

/// Tool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Program used for `test` and `tool cover`.
    pub go: String,
    /// Flags switched on for every invocation.
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            go: constants::DEFAULT_GO_BIN.to_string(),
            defaults: Defaults::default(),
        }
    }
}

/// Flags that are OR-ed into the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub with_coverage: bool,
    pub quiet: bool,
    pub clean: bool,
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path taken from the environment variable.
    Env(PathBuf),
    /// Project-local file in the working directory.
    Local(PathBuf),
    /// File in the user configuration directory.
    User(PathBuf),
    /// No file; built-in defaults.
    Builtin,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(p) => write!(f, "{} (from ${})", p.display(), constants::CONFIG_ENV),
            Self::Local(p) | Self::User(p) => write!(f, "{}", p.display()),
            Self::Builtin => write!(f, "built-in defaults"),
        }
    }
}

/// Locate and load the configuration.
///
/// # Errors
///
/// Returns an error if `$GOTESTX_CONFIG` names a missing file, or if the
/// located file cannot be read or parsed.
pub fn load() -> Result<(Config, ConfigSource)> {
    let source = locate(
        std::env::var_os(constants::CONFIG_ENV).map(PathBuf::from),
        dirs::config_dir(),
    )?;

    let config = match &source {
        ConfigSource::Env(p) | ConfigSource::Local(p) | ConfigSource::User(p) => load_from(p)?,
        ConfigSource::Builtin => Config::default(),
    };

    Ok((config, source))
}

/// Load the configuration from a specific file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid configuration.
pub fn load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
    parse(&content).wrap_err_with(|| format!("Invalid config file {}", path.display()))
}

fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    if config.go.trim().is_empty() {
        return Err(eyre!("`go` must name a program"));
    }
    Ok(config)
}

fn locate(env_path: Option<PathBuf>, user_dir: Option<PathBuf>) -> Result<ConfigSource> {
    if let Some(path) = env_path {
        if !path.is_file() {
            return Err(eyre!(
                "{} points to {}, which is not a file",
                constants::CONFIG_ENV,
                path.display()
            ));
        }
        return Ok(ConfigSource::Env(path));
    }

    let local = PathBuf::from(constants::LOCAL_CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(ConfigSource::Local(local));
    }

    if let Some(dir) = user_dir {
        let user = dir
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME);
        if user.is_file() {
            return Ok(ConfigSource::User(user));
        }
    }

    Ok(ConfigSource::Builtin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_file() {
        let config = parse(
            r#"
go = "/usr/local/go/bin/go"

[defaults]
with_coverage = true
clean = true
"#,
        )
        .unwrap();
        assert_eq!(config.go, "/usr/local/go/bin/go");
        assert!(config.defaults.with_coverage);
        assert!(config.defaults.clean);
        assert!(!config.defaults.quiet);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse("verbose = true").is_err());
        assert!(parse("[defaults]\nopen_coverage = true").is_err());
    }

    #[test]
    fn test_blank_go_rejected() {
        assert!(parse("go = \"  \"").is_err());
    }

    #[test]
    fn test_locate_env_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(locate(Some(missing), None).is_err());
    }

    #[test]
    fn test_locate_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "go = \"go1.22\"").unwrap();

        let source = locate(Some(path.clone()), None).unwrap();
        assert_eq!(source, ConfigSource::Env(path.clone()));
        assert_eq!(load_from(&path).unwrap().go, "go1.22");
    }

    #[test]
    fn test_locate_user_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("gotestx");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("config.toml"), "[defaults]\nquiet = true").unwrap();

        // Only meaningful when the test's working directory has no local file.
        if !Path::new(constants::LOCAL_CONFIG_FILE_NAME).exists() {
            let source = locate(None, Some(dir.path().to_path_buf())).unwrap();
            assert_eq!(source, ConfigSource::User(nested.join("config.toml")));
        }
    }

    #[test]
    fn test_load_from_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "go = ").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(format!("{err:?}").contains("bad.toml"));
    }
}
