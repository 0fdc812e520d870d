#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod delete;
mod error;

use serde::Deserialize;
use tracing::{debug, trace};
use ureq::{
    config::Config as AgentConfig,
    tls::{RootCerts, TlsConfig, TlsProvider},
    Agent,
};

#[doc(inline)]
pub use crate::{
    config::Config,
    delete::DeleteMessage,
    error::{Error, Result},
};

#[cfg(any(
    all(feature = "tokio", feature = "async-std"),
    not(any(feature = "tokio", feature = "async-std"))
))]
compile_error!("Either feature `tokio` or `async-std` must be enabled for this crate.");

#[cfg(any(
    all(feature = "rustls", feature = "native-tls"),
    not(any(feature = "rustls", feature = "native-tls"))
))]
compile_error!("Either feature `rustls` or `native-tls` must be enabled for this crate.");

/// The base URI of the Gmail v1 REST API.
const GMAIL_API_BASE_URI: &str = "https://gmail.googleapis.com/gmail/v1";

/// The Google OAuth 2.0 token endpoint.
const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The Gmail client structure.
///
/// This structure wraps a HTTP agent and the access token all calls
/// are authenticated with.
#[derive(Clone, Debug)]
pub struct Client {
    /// The HTTP agent used to perform calls.
    agent: Agent,

    /// The access token sent as Bearer authorization.
    access_token: String,
}

impl Client {
    /// Builds a client from the given account configuration.
    ///
    /// When the configuration holds a refresh token, the access token
    /// is refreshed first. Otherwise the stored access token is used
    /// as is. A configuration holding neither is an error.
    pub async fn build(config: &Config) -> Result<Self> {
        let agent = agent();

        let access_token = match (&config.access_token, &config.refresh_token) {
            (_, Some(refresh_token)) => {
                refresh_access_token(&agent, config, refresh_token).await?
            }
            (Some(access_token), None) => access_token.clone(),
            (None, None) => return Err(Error::GetAccessTokenMissingError),
        };

        Ok(Self {
            agent,
            access_token,
        })
    }

    /// Permanently deletes the message matching the given id.
    pub async fn delete_message(&self, id: &str) -> Result<()> {
        debug!("deleting message {id}");

        let agent = self.agent.clone();
        let uri = format!("{GMAIL_API_BASE_URI}/users/me/messages/{id}");
        let authorization = format!("Bearer {}", self.access_token);

        let response = spawn_blocking(move || {
            agent
                .delete(&uri)
                .header("Authorization", authorization.as_str())
                .call()
        })
        .await?
        .map_err(|err| Error::DeleteMessageError(err, id.to_owned()))?;

        trace!("delete message {id}: status {}", response.status());

        Ok(())
    }
}

/// Creates a HTTP agent with sane defaults.
fn agent() -> Agent {
    let tls = TlsConfig::builder()
        .root_certs(RootCerts::PlatformVerifier)
        .provider(
            #[cfg(feature = "native-tls")]
            TlsProvider::NativeTls,
            #[cfg(feature = "rustls")]
            TlsProvider::Rustls,
        );

    let config = AgentConfig::builder().tls_config(tls.build()).build();

    config.new_agent()
}

/// Exchanges the given refresh token for a fresh access token.
async fn refresh_access_token(
    agent: &Agent,
    config: &Config,
    refresh_token: &str,
) -> Result<String> {
    debug!("refreshing access token");

    let agent = agent.clone();
    let client_id = config.client_id.clone();
    let client_secret = config.client_secret.clone();
    let refresh_token = refresh_token.to_owned();

    let response = spawn_blocking(move || {
        agent.post(GOOGLE_TOKEN_URI).send_form([
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("refresh_token", refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ])
    })
    .await?
    .map_err(Error::RefreshAccessTokenError)?;

    let body = response
        .into_body()
        .read_to_string()
        .map_err(Error::ReadAccessTokenResponseError)?;

    let response: AccessTokenResponse =
        serde_json::from_str(&body).map_err(Error::ParseAccessTokenResponseError)?;

    Ok(response.access_token)
}

/// The token endpoint response, reduced to the field the client needs.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

/// Spawns a blocking task using [`async_std`].
#[cfg(feature = "async-std")]
async fn spawn_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(async_std::task::spawn_blocking(f).await)
}

/// Spawns a blocking task using [`tokio`].
#[cfg(feature = "tokio")]
async fn spawn_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}
