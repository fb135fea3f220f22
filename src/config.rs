use thiserror::Error;

/// Process-wide settings, loaded once at startup and passed by reference to
/// the tracker clients and the sync run.
#[derive(Debug)]
pub struct Config {
    pub github_token: String,
    pub github_owner: String,
    pub github_repo: String,
    pub shortcut_token: String,
    /// Public id of the Shortcut label that marks synced stories.
    pub sync_label_id: u64,
    /// Prepended to every story name, e.g. "[gh]".
    pub story_prefix: String,
    /// Workflow state assigned to freshly created stories.
    pub workflow_state_new: u64,
    /// Workflow state for stories whose issue is no longer open.
    pub workflow_state_done: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("setting {key} must be numeric, got {value:?}")]
    NotNumeric { key: &'static str, value: String },
}

/// Load settings from the environment, honoring a `.env` file when present.
pub fn load() -> Result<Config, ConfigError> {
    // A missing .env file is fine; plain environment variables still apply.
    let _ = dotenvy::dotenv();
    Config::from_lookup(|key| std::env::var(key).ok())
}

impl Config {
    /// Build a config from any key/value lookup. Tests inject a map here
    /// instead of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let numeric = |key: &'static str| {
            let value = required(key)?;
            value
                .parse::<u64>()
                .map_err(|_| ConfigError::NotNumeric { key, value })
        };

        Ok(Self {
            github_token: required("GITHUB_AUTH")?,
            github_owner: required("GITHUB_REPO_OWNER")?,
            github_repo: required("GITHUB_REPO")?,
            shortcut_token: required("SHORTCUT_AUTH")?,
            sync_label_id: numeric("SHORTCUT_LABEL")?,
            story_prefix: required("SHORTCUT_STORY_PREFIX")?,
            workflow_state_new: numeric("SHORTCUT_WORKFLOW_ID_NEW")?,
            workflow_state_done: numeric("SHORTCUT_WORKFLOW_ID_DONE")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("GITHUB_AUTH", "gh-token"),
            ("GITHUB_REPO_OWNER", "acme"),
            ("GITHUB_REPO", "widgets"),
            ("SHORTCUT_AUTH", "sc-token"),
            ("SHORTCUT_LABEL", "42"),
            ("SHORTCUT_STORY_PREFIX", "[gh]"),
            ("SHORTCUT_WORKFLOW_ID_NEW", "500000001"),
            ("SHORTCUT_WORKFLOW_ID_DONE", "500000002"),
        ])
    }

    fn load_from(env: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env.get(key).map(|v| (*v).to_string()))
    }

    #[test]
    fn loads_all_settings() {
        let config = load_from(&full_env()).unwrap();
        assert_eq!(config.github_owner, "acme");
        assert_eq!(config.github_repo, "widgets");
        assert_eq!(config.sync_label_id, 42);
        assert_eq!(config.story_prefix, "[gh]");
        assert_eq!(config.workflow_state_new, 500000001);
        assert_eq!(config.workflow_state_done, 500000002);
    }

    #[test]
    fn missing_key_error_names_the_key() {
        let mut env = full_env();
        env.remove("SHORTCUT_AUTH");
        let err = load_from(&env).unwrap_err();
        assert!(err.to_string().contains("SHORTCUT_AUTH"), "{err}");
    }

    #[test]
    fn each_required_key_is_checked() {
        for key in [
            "GITHUB_AUTH",
            "GITHUB_REPO_OWNER",
            "GITHUB_REPO",
            "SHORTCUT_AUTH",
            "SHORTCUT_LABEL",
            "SHORTCUT_STORY_PREFIX",
            "SHORTCUT_WORKFLOW_ID_NEW",
            "SHORTCUT_WORKFLOW_ID_DONE",
        ] {
            let mut env = full_env();
            env.remove(key);
            let err = load_from(&env).unwrap_err();
            assert!(err.to_string().contains(key), "expected error naming {key}");
        }
    }

    #[test]
    fn non_numeric_workflow_id_is_rejected() {
        let mut env = full_env();
        env.insert("SHORTCUT_WORKFLOW_ID_DONE", "done");
        let err = load_from(&env).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("SHORTCUT_WORKFLOW_ID_DONE"), "{message}");
        assert!(message.contains("done"), "{message}");
    }
}
