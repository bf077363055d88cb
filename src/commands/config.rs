use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::{
    http::{DEFAULT_API_URL, RetryPolicy, normalize_base_url},
    runtime::Runtime,
};

/// Overrides the API root when `--api-url` is not given.
pub const API_URL_ENV: &str = "BOOKSTORE_API_URL";

/// Overrides the session file when `--session-file` is not given.
pub const SESSION_FILE_ENV: &str = "BOOKSTORE_SESSION_FILE";

const APP_DIR: &str = "bookstore-admin";
const SESSION_FILE_NAME: &str = "session";

/// Resolved settings for one invocation.
///
/// Each value comes from the command line if given, then the environment,
/// then a built-in default.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub refresh_policy: RetryPolicy,
}

impl Config {
    pub fn load<R: Runtime>(
        runtime: &R,
        api_url: Option<String>,
        session_file: Option<PathBuf>,
    ) -> Result<Self> {
        let api_url = api_url
            .or_else(|| runtime.env_var(API_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_base_url(&api_url)?.to_string();

        let session_file = match session_file
            .or_else(|| runtime.env_var(SESSION_FILE_ENV).ok().map(PathBuf::from))
            .filter(|path| !path.as_os_str().is_empty())
        {
            Some(path) => path,
            None => default_session_file(runtime)?,
        };

        debug!("Using API {} and session file {:?}", api_url, session_file);

        Ok(Self {
            api_url,
            session_file,
            refresh_policy: RetryPolicy::default(),
        })
    }
}

/// `<config dir>/bookstore-admin/session`, falling back to `~/.config`.
pub fn default_session_file<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let base = match runtime.config_dir() {
        Some(dir) => dir,
        None => runtime
            .home_dir()
            .map(|home| home.join(".config"))
            .context("Could not find a configuration or home directory")?,
    };
    Ok(base.join(APP_DIR).join(SESSION_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{test_config_dir, test_home};
    use mockall::predicate::eq;
    use std::env::VarError;

    fn runtime_with_env(api_url: Option<&str>, session_file: Option<&str>) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        let api_url = api_url.map(str::to_string);
        let session_file = session_file.map(str::to_string);
        runtime
            .expect_env_var()
            .with(eq(API_URL_ENV))
            .returning(move |_| api_url.clone().ok_or(VarError::NotPresent));
        runtime
            .expect_env_var()
            .with(eq(SESSION_FILE_ENV))
            .returning(move |_| session_file.clone().ok_or(VarError::NotPresent));
        runtime.expect_config_dir().returning(|| Some(test_config_dir()));
        runtime.expect_home_dir().returning(|| Some(test_home()));
        runtime
    }

    #[test]
    fn test_defaults() {
        let runtime = runtime_with_env(None, None);
        let config = Config::load(&runtime, None, None).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(
            config.session_file,
            test_config_dir().join("bookstore-admin").join("session")
        );
        assert_eq!(config.refresh_policy, RetryPolicy::default());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let runtime = runtime_with_env(Some("https://shop.example/api/v2"), Some("/tmp/admin-session"));
        let config = Config::load(&runtime, None, None).unwrap();

        assert_eq!(config.api_url, "https://shop.example/api/v2/");
        assert_eq!(config.session_file, PathBuf::from("/tmp/admin-session"));
    }

    #[test]
    fn test_arguments_override_environment() {
        let runtime = runtime_with_env(Some("https://shop.example/api/v2"), Some("/tmp/admin-session"));
        let config = Config::load(
            &runtime,
            Some("http://127.0.0.1:8080/api/v1/".to_string()),
            Some(PathBuf::from("/var/lib/admin/session")),
        )
        .unwrap();

        assert_eq!(config.api_url, "http://127.0.0.1:8080/api/v1/");
        assert_eq!(config.session_file, PathBuf::from("/var/lib/admin/session"));
    }

    #[test]
    fn test_blank_environment_values_are_ignored() {
        let runtime = runtime_with_env(Some("  "), Some(""));
        let config = Config::load(&runtime, None, None).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.session_file.ends_with("bookstore-admin/session"));
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        let runtime = runtime_with_env(None, None);
        let result = Config::load(&runtime, Some("localhost without scheme".to_string()), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_file_falls_back_to_home() {
        let mut runtime = MockRuntime::new();
        runtime.expect_config_dir().returning(|| None);
        runtime.expect_home_dir().returning(|| Some(test_home()));

        assert_eq!(
            default_session_file(&runtime).unwrap(),
            test_home().join(".config").join("bookstore-admin").join("session")
        );
    }

    #[test]
    fn test_no_directories_is_an_error() {
        let mut runtime = MockRuntime::new();
        runtime.expect_config_dir().returning(|| None);
        runtime.expect_home_dir().returning(|| None);

        let err = default_session_file(&runtime).unwrap_err();
        assert!(err.to_string().contains("configuration or home directory"));
    }
}
