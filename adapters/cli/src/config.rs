//! Loading session configuration from disk.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use lane_defence_session::SessionConfig;

/// Reads a TOML session configuration, falling back to defaults when `path` is `None`.
pub(crate) fn load(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read session config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid session config at {}", path.display()))
}

fn parse(contents: &str) -> Result<SessionConfig> {
    toml::from_str(contents).context("failed to parse session config toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_uses_defaults() {
        let config = load(None).expect("defaults");
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn parse_reports_bad_types() {
        let error = parse("seed = \"abc\"").expect_err("seed must be an integer");
        assert!(format!("{error:#}").contains("toml"));
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let error = load(Some(Path::new("/definitely/not/here.toml")))
            .expect_err("missing file");
        assert!(format!("{error}").contains("/definitely/not/here.toml"));
    }
}
