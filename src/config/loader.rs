//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RigConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RigConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&content)?;

    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RigConfig, ConfigError> {
    let config: RigConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.bind_address, "[::]:4711");
        assert!(config.server.trace_requests);
        assert_eq!(config.build.program, "make");
        assert!(config.build.args.is_empty());
        assert_eq!(config.runner.executable, PathBuf::from("test"));
        assert_eq!(config.observability.log_level, "info");
        assert!(config.working_dir.is_none());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            working_dir = "/tmp/naett"

            [server]
            bind_address = "127.0.0.1:5000"

            [build]
            program = "cmake"
            args = ["--build", "build"]
            "#,
        )
        .unwrap();

        assert_eq!(config.working_dir, Some(PathBuf::from("/tmp/naett")));
        assert_eq!(config.server.bind_address, "127.0.0.1:5000");
        assert!(config.server.trace_requests);
        assert_eq!(config.build.program, "cmake");
        assert_eq!(config.build.args, vec!["--build", "build"]);
        assert_eq!(config.runner.executable, PathBuf::from("test"));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = parse_config("[server\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_semantic_errors_are_reported() {
        let err = parse_config(
            r#"
            [server]
            bind_address = "localhost"

            [observability]
            log_level = "loud"
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[runner]\nexecutable = \"bin/run-tests\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.runner.executable, PathBuf::from("bin/run-tests"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/testrig.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
