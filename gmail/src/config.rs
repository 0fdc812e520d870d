//! # Config
//!
//! Module dedicated to the Gmail account configuration. The
//! configuration gathers the OAuth 2.0 client keys and the stored
//! tokens the [`Client`](crate::Client) authenticates with.
//!
//! Both are loaded from JSON files living in a configuration
//! directory, which resolves to `.gmail-mcp` relative to the current
//! working directory unless overridden by environment variables.

use std::{
    env, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// The environment variable to override the configuration directory.
pub const CONFIG_DIR_ENV_VAR: &str = "GMAIL_CONFIG_DIR";

/// The environment variable to override the OAuth tokens file path.
pub const TOKENS_PATH_ENV_VAR: &str = "GMAIL_OAUTH_PATH";

/// The environment variable to override the credentials file path.
pub const CREDENTIALS_PATH_ENV_VAR: &str = "GMAIL_CREDENTIALS_PATH";

const DEFAULT_CONFIG_DIR: &str = ".gmail-mcp";
const DEFAULT_TOKENS_FILE: &str = "gcp-oauth.keys.json";
const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";

/// The Gmail account configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// The OAuth 2.0 client id.
    pub client_id: String,

    /// The OAuth 2.0 client secret.
    pub client_secret: String,

    /// The access token stored from a previous authorization flow,
    /// if any.
    pub access_token: Option<String>,

    /// The refresh token stored from a previous authorization flow,
    /// if any.
    pub refresh_token: Option<String>,
}

impl Config {
    /// Resolves the configuration directory.
    pub fn dir() -> PathBuf {
        match env::var(CONFIG_DIR_ENV_VAR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from(DEFAULT_CONFIG_DIR),
        }
    }

    /// Resolves the path to the credentials file, which contains the
    /// OAuth 2.0 client keys.
    pub fn credentials_path() -> PathBuf {
        match env::var(CREDENTIALS_PATH_ENV_VAR) {
            Ok(path) => PathBuf::from(path),
            Err(_) => Self::dir().join(DEFAULT_CREDENTIALS_FILE),
        }
    }

    /// Resolves the path to the OAuth tokens file.
    pub fn tokens_path() -> PathBuf {
        match env::var(TOKENS_PATH_ENV_VAR) {
            Ok(path) => PathBuf::from(path),
            Err(_) => Self::dir().join(DEFAULT_TOKENS_FILE),
        }
    }

    /// Loads the configuration from the resolved credentials and
    /// tokens files.
    pub async fn from_config_dir() -> Result<Self> {
        let credentials_path = Self::credentials_path();
        let tokens_path = Self::tokens_path();

        debug!("reading credentials from {}", credentials_path.display());
        let credentials = read_to_string(&credentials_path)
            .await
            .map_err(|err| Error::ReadCredentialsFileError(err, credentials_path.clone()))?;

        debug!("reading OAuth tokens from {}", tokens_path.display());
        let tokens = read_to_string(&tokens_path)
            .await
            .map_err(|err| Error::ReadTokensFileError(err, tokens_path.clone()))?;

        Self::from_files_content(&credentials, &credentials_path, &tokens, &tokens_path)
    }

    /// Builds the configuration from raw file contents.
    ///
    /// The credentials file accepts both the `installed` and the
    /// `web` application shapes produced by the Google Cloud console.
    pub fn from_files_content(
        credentials: &str,
        credentials_path: &Path,
        tokens: &str,
        tokens_path: &Path,
    ) -> Result<Self> {
        let credentials: CredentialsFile = serde_json::from_str(credentials)
            .map_err(|err| Error::ParseCredentialsFileError(err, credentials_path.to_owned()))?;

        let keys = credentials
            .installed
            .or(credentials.web)
            .ok_or(Error::GetAppKeysError)?;

        let tokens: TokensFile = serde_json::from_str(tokens)
            .map_err(|err| Error::ParseTokensFileError(err, tokens_path.to_owned()))?;

        Ok(Self {
            client_id: keys.client_id,
            client_secret: keys.client_secret,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}

/// The credentials file, as downloaded from the Google Cloud console.
#[derive(Debug, Default, Deserialize)]
struct CredentialsFile {
    installed: Option<AppKeys>,
    web: Option<AppKeys>,
}

/// The OAuth 2.0 client keys of a credentials file section.
#[derive(Debug, Deserialize)]
struct AppKeys {
    client_id: String,
    client_secret: String,
}

/// The stored OAuth tokens file.
#[derive(Debug, Default, Deserialize)]
struct TokensFile {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Reads a file to string using [`tokio`].
#[cfg(feature = "tokio")]
async fn read_to_string(path: &Path) -> io::Result<String> {
    tokio::fs::read_to_string(path).await
}

/// Reads a file to string using [`async_std`].
#[cfg(feature = "async-std")]
async fn read_to_string(path: &Path) -> io::Result<String> {
    async_std::fs::read_to_string(path).await
}
