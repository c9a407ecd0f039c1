//! Payment processor gateway.

use common::Handler;
use derive_more::{AsRef, Debug, Display, Error as StdError, From};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

/// [Stripe Connect] gateway.
///
/// [Stripe Connect]: https://stripe.com/connect
#[derive(Clone, Debug)]
pub struct Stripe {
    /// HTTP client to perform requests with.
    http: reqwest::Client,

    /// Configuration of this gateway.
    config: Config,
}

impl Stripe {
    /// Creates a new [`Stripe`] gateway with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

/// [`Stripe`] gateway configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// URL of the OAuth token exchange endpoint.
    #[default("https://connect.stripe.com/oauth/token".to_owned())]
    pub token_url: String,

    /// URL of the OAuth deauthorization endpoint.
    #[default("https://connect.stripe.com/oauth/deauthorize".to_owned())]
    pub deauth_url: String,

    /// Client ID of this platform.
    pub client_id: String,

    /// Secret API key of this platform.
    #[debug(skip)]
    #[default(SecretString::from(String::new()))]
    pub secret_key: SecretString,
}

/// Authorization code produced by the processor's hosted OAuth flow.
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Code(String);

/// Operation exchanging an authorization [`Code`] for processor
/// credentials.
#[derive(Clone, Debug)]
pub struct ExchangeCode(pub Code);

/// Processor's response to an [`ExchangeCode`] operation.
///
/// Returned to callers as-is; no field of it is interpreted here beyond
/// deserialization.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    /// Access token for the connected account.
    pub access_token: Option<String>,

    /// Indicator whether the credentials are live-mode.
    pub livemode: Option<bool>,

    /// Refresh token for the connected account.
    pub refresh_token: Option<String>,

    /// Granted scope.
    pub scope: Option<String>,

    /// Publishable key of the connected account.
    pub stripe_publishable_key: Option<String>,

    /// ID of the connected account.
    pub stripe_user_id: Option<String>,

    /// Type of the returned token.
    pub token_type: Option<String>,
}

impl Handler<ExchangeCode> for Stripe {
    type Ok = TokenResponse;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        ExchangeCode(code): ExchangeCode,
    ) -> Result<Self::Ok, Self::Err> {
        log::debug!(url = self.config.token_url, "exchanging OAuth code");

        self.http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code.as_ref()),
                ("client_secret", self.config.secret_key.expose_secret()),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!())?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!())
    }
}

/// Operation revoking access to a previously connected account.
#[derive(Clone, Debug)]
pub struct Deauthorize {
    /// ID of the connected account to revoke.
    pub stripe_user_id: String,
}

impl Handler<Deauthorize> for Stripe {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(&self, op: Deauthorize) -> Result<Self::Ok, Self::Err> {
        log::debug!(url = self.config.deauth_url, "revoking connected account");

        self.http
            .post(&self.config.deauth_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("stripe_user_id", op.stripe_user_id.as_str()),
            ])
            .bearer_auth(self.config.secret_key.expose_secret())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!())
            .map(drop)
    }
}

/// [`Stripe`] gateway error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP request failed.
    #[display("HTTP request to processor failed: {_0}")]
    Http(reqwest::Error),
}
