//! Hosted checkout provider client.
//!
//! Parcels are paid through provider-hosted checkout sessions. A session is
//! created with the parcel identifier stored in its metadata, the customer is
//! redirected to the provider, and after returning to the site the session is
//! retrieved again to confirm the payment.

use std::collections::HashMap;

use async_trait::async_trait;
use derive_more::{Display, Error, From};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config;

/// Payment status reported for a completed checkout session.
pub const PAID: &str = "paid";

/// Metadata key holding the parcel identifier.
pub const PARCEL_ID_KEY: &str = "parcelId";

/// Metadata key holding the parcel name.
pub const PARCEL_NAME_KEY: &str = "parcelName";

/// Errors returned by a [`CheckoutProvider`].
#[derive(Debug, Display, From, Error)]
pub enum CheckoutError {
    /// Transport-level or response decoding failure.
    Http(reqwest::Error),

    /// Provider responded with a non-successful status code.
    #[display(fmt = "checkout provider error ({}): {}", status, message)]
    Provider { status: u16, message: String },
}

/// Checkout session as returned by the provider.
///
/// Only the fields used by this service are decoded; the record is never
/// modified after retrieval.
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutSession {
    /// Session identifier.
    pub id: String,

    /// Payment status, `paid` once the customer has been charged.
    pub payment_status: String,

    /// Total amount in minor currency units.
    pub amount_total: Option<i64>,

    /// Lowercase ISO currency code.
    pub currency: Option<String>,

    /// Email address the customer paid with.
    pub customer_email: Option<String>,

    /// Metadata attached when the session was created.
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Payment intent reference, used as the transaction identifier.
    pub payment_intent: Option<String>,

    /// Hosted checkout page URL, present for open sessions.
    pub url: Option<String>,
}

impl CheckoutSession {
    /// Check if the provider reports this session as paid.
    pub fn is_paid(&self) -> bool {
        self.payment_status == PAID
    }

    /// Get a metadata value by its key.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// Parameters of a checkout session for a single parcel.
#[derive(Clone, Debug)]
pub struct NewCheckoutSession {
    /// Parcel identifier, stored in session metadata.
    pub parcel_id: i64,

    /// Parcel name, shown on the hosted page and stored in metadata.
    pub parcel_name: String,

    /// Email address to prefill for the customer.
    pub sender_email: String,

    /// Parcel cost in major currency units.
    pub cost: f64,
}

/// Checkout session capability consumed by the payment routes.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Retrieve an existing checkout session by its identifier.
    async fn retrieve_session(&self, id: &str) -> Result<CheckoutSession, CheckoutError>;

    /// Create a new checkout session for a parcel payment.
    async fn create_session(
        &self,
        session: NewCheckoutSession,
    ) -> Result<CheckoutSession, CheckoutError>;
}

/// Error body returned by the provider.
#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetails,
}

#[derive(Deserialize)]
struct ProviderErrorDetails {
    message: String,
}

/// Stripe-compatible [`CheckoutProvider`] implementation.
pub struct StripeCheckout {
    client: Client,
    secret: String,
    endpoint: String,
    domain: String,
    currency: String,
}

impl StripeCheckout {
    /// Create new [`StripeCheckout`] from the provided [`Checkout`] configuration.
    ///
    /// [`Checkout`]: config::Checkout
    pub fn new(config: &config::Checkout) -> Self {
        Self {
            client: Client::new(),
            secret: config.secret.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            domain: config.domain.trim_end_matches('/').to_owned(),
            currency: config.currency.clone(),
        }
    }

    async fn decode(response: reqwest::Response) -> Result<CheckoutSession, CheckoutError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ProviderErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => String::from("unknown error"),
        };

        Err(CheckoutError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

/// Build form-encoded parameters for a single-item payment session.
pub fn session_form(
    session: &NewCheckoutSession,
    currency: &str,
    domain: &str,
) -> Vec<(&'static str, String)> {
    let unit_amount = (session.cost * 100.0).round() as i64;

    vec![
        ("mode", String::from("payment")),
        ("line_items[0][quantity]", String::from("1")),
        ("line_items[0][price_data][currency]", currency.to_owned()),
        ("line_items[0][price_data][unit_amount]", unit_amount.to_string()),
        (
            "line_items[0][price_data][product_data][name]",
            format!("Please pay for: {}", session.parcel_name),
        ),
        ("customer_email", session.sender_email.clone()),
        ("metadata[parcelId]", session.parcel_id.to_string()),
        ("metadata[parcelName]", session.parcel_name.clone()),
        (
            "success_url",
            format!("{domain}/dashboard/payment-success?session_id={{CHECKOUT_SESSION_ID}}"),
        ),
        ("cancel_url", format!("{domain}/dashboard/payment-cancelled")),
    ]
}

#[async_trait]
impl CheckoutProvider for StripeCheckout {
    async fn retrieve_session(&self, id: &str) -> Result<CheckoutSession, CheckoutError> {
        debug!(session_id = id, "retrieving checkout session");

        let response = self
            .client
            .get(format!("{}/v1/checkout/sessions/{id}", self.endpoint))
            .bearer_auth(&self.secret)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn create_session(
        &self,
        session: NewCheckoutSession,
    ) -> Result<CheckoutSession, CheckoutError> {
        debug!(parcel_id = session.parcel_id, "creating checkout session");

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.endpoint))
            .bearer_auth(&self.secret)
            .form(&session_form(&session, &self.currency, &self.domain))
            .send()
            .await?;

        Self::decode(response).await
    }
}
