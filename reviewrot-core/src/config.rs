//! Configuration for the review platform clients
//!
//! Configuration is loaded from `~/.config/reviewrot/config.toml`. Each
//! platform gets its own optional table; a platform with no table is simply
//! not polled.
//!
//! ```toml
//! [github]
//! token = "ghp_..."
//! repos = ["org/repo", "org/other"]
//!
//! [gitlab]
//! host = "https://gitlab.example.com"
//! token = "glpat-..."
//! repos = ["group/project"]
//!
//! [gerrit]
//! host = "https://review.example.org"
//! repos = ["project"]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// GitHub client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Personal access token sent as `Authorization: token ...`
    pub token: String,
    /// Repositories to poll, as `owner/repo`
    pub repos: Vec<String>,
}

/// GitLab client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitlabConfig {
    /// Base URL of the GitLab instance
    #[serde(default = "default_gitlab_host")]
    pub host: String,
    /// Personal access token sent as `PRIVATE-TOKEN`
    pub token: String,
    /// Projects to poll, as full `group/project` paths
    pub repos: Vec<String>,
}

fn default_gitlab_host() -> String {
    "https://gitlab.com".to_string()
}

/// Gerrit client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GerritConfig {
    /// Base URL of the Gerrit instance
    pub host: String,
    /// Project names to poll
    pub repos: Vec<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub github: Option<GithubConfig>,
    pub gitlab: Option<GitlabConfig>,
    pub gerrit: Option<GerritConfig>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default (empty) config if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/reviewrot/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reviewrot").join("config.toml"))
    }

    /// Whether any platform is configured
    pub fn is_empty(&self) -> bool {
        self.github.is_none() && self.gitlab.is_none() && self.gerrit.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [github]
            token = "ghp_abc"
            repos = ["org/repo"]

            [gitlab]
            host = "https://gitlab.example.com"
            token = "glpat-xyz"
            repos = ["group/project"]

            [gerrit]
            host = "https://review.example.org"
            repos = ["project"]
            "#,
        )
        .unwrap();

        assert_eq!(config.github.as_ref().unwrap().token, "ghp_abc");
        assert_eq!(config.gitlab.as_ref().unwrap().repos, vec!["group/project"]);
        assert_eq!(
            config.gerrit.as_ref().unwrap().host,
            "https://review.example.org"
        );
        assert!(!config.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [github]
            token = "ghp_abc"
            repos = []
            "#,
        )
        .unwrap();

        assert!(config.github.is_some());
        assert!(config.gitlab.is_none());
        assert!(config.gerrit.is_none());
    }

    #[test]
    fn test_gitlab_host_defaults() {
        let config: Config = toml::from_str(
            r#"
            [gitlab]
            token = "glpat-xyz"
            repos = ["group/project"]
            "#,
        )
        .unwrap();

        assert_eq!(config.gitlab.unwrap().host, "https://gitlab.com");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.is_empty());
    }
}
