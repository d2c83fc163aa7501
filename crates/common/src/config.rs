use std::net::SocketAddr;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[cfg(feature = "logging")]
use tracing_subscriber::filter::LevelFilter;

/// Database configuration.
#[derive(Deserialize)]
pub struct Database {
    /// Database URL string.
    pub url: String,
}

/// HTTP server configuration.
#[derive(Deserialize)]
pub struct Server {
    /// Address, that HTTP server will listen on.
    pub address: SocketAddr,
}

/// Implementation of [`serde`]'s deserializer for [`FromStr`] types.
#[cfg(feature = "logging")]
fn deserialize_from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error,
    D: serde::de::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    std::str::FromStr::from_str(&s).map_err(serde::de::Error::custom)
}

/// Logging configuration.
#[cfg(feature = "logging")]
#[derive(Deserialize)]
pub struct Logging {
    /// Log level.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub level: LevelFilter,
}

#[cfg(feature = "logging")]
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
        }
    }
}

/// Hosted checkout provider configuration.
#[derive(Deserialize)]
pub struct Checkout {
    /// Secret API key used to authenticate against the provider.
    pub secret: String,

    /// Base URL of the provider API.
    #[serde(default = "default_checkout_endpoint")]
    pub endpoint: String,

    /// Public site origin, used to build success and cancel redirect URLs.
    pub domain: String,

    /// Currency that parcel costs are charged in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_checkout_endpoint() -> String {
    String::from("https://api.stripe.com")
}

fn default_currency() -> String {
    String::from("usd")
}

/// Bearer token verification provider configuration.
///
/// When this section is missing, protected routes are served without
/// token verification.
#[derive(Deserialize)]
pub struct Identity {
    /// Web API key of the identity project.
    pub key: String,

    /// Base URL of the identity provider API.
    #[serde(default = "default_identity_endpoint")]
    pub endpoint: String,
}

fn default_identity_endpoint() -> String {
    String::from("https://identitytoolkit.googleapis.com")
}

/// General configuration.
#[derive(Deserialize)]
pub struct Config {
    /// General database configuration.
    pub database: Database,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: Option<Server>,

    /// Logging configuration.
    #[cfg(feature = "logging")]
    #[serde(default)]
    pub logging: Logging,

    /// Checkout provider configuration.
    #[serde(default)]
    pub checkout: Option<Checkout>,

    /// Token verification configuration.
    #[serde(default)]
    pub identity: Option<Identity>,
}

impl Config {
    /// Create new config using default configuration file or environment variables.
    ///
    /// See [`Env`] for more details on how to use environment variables configuration.
    ///
    /// [`Env`]: figment::providers::Env
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("Config.toml"))
            .merge(Env::prefixed("CONFIG_").split("_"))
            .extract()
    }
}
