//! Checkout session verification.
//!
//! After a customer returns from the hosted checkout page, the session is
//! retrieved from the provider. A paid session marks its parcel as paid with a
//! freshly generated tracking identifier and stores a payment record. A parcel
//! that was already paid keeps its tracking identifier, and the payment record
//! carries that stored one.
//!
//! The two writes are independent: when the payment insert fails after the
//! parcel update succeeded, the parcel stays paid without a payment record.
//! Nothing prevents the same session from being verified more than once either,
//! every paid verification inserts its own payment record.

use aide::OperationIo;
use axum::http::StatusCode;
use common::{
    checkout::{CheckoutError, CheckoutProvider, PAID, PARCEL_ID_KEY, PARCEL_NAME_KEY},
    tracking::generate_tracking_id,
};
use db::{
    now,
    store::{InsertOutcome, NewPayment, ParcelStore, PaymentStore, UpdateOutcome},
    DbErr,
};
use derive_more::{Display, Error, From};
use tracing::{info, warn};

use crate::error::json_error;

/// Errors that may occur during checkout session verification.
#[derive(Debug, Display, From, Error, OperationIo)]
#[aide(output)]
pub(crate) enum VerificationError {
    /// Session identifier was not provided.
    #[display(fmt = "session_id missing")]
    MissingParameter,

    /// Checkout provider call failed.
    Upstream(CheckoutError),

    /// Database-related error.
    Store(DbErr),

    /// Paid session lacks data required to record the payment.
    #[display(fmt = "checkout session is missing {}", field)]
    #[from(ignore)]
    MalformedSession { field: &'static str },
}

json_error!(VerificationError {
    VerificationError::MissingParameter => StatusCode::BAD_REQUEST,
});

/// Outcome of a checkout session verification.
#[derive(Debug, PartialEq)]
pub(crate) enum Verification {
    /// Session is not paid, nothing was written.
    Unpaid,

    /// Session is paid and its parcel was processed.
    Paid {
        modify_parcel: UpdateOutcome,
        transaction_id: String,
        payment_info: Option<InsertOutcome>,
        tracking_id: String,
    },
}

/// Verify a checkout session and record its payment.
pub(crate) async fn verify_payment(
    checkout: &dyn CheckoutProvider,
    parcels: &dyn ParcelStore,
    payments: &dyn PaymentStore,
    session_id: Option<&str>,
) -> Result<Verification, VerificationError> {
    let session_id = session_id
        .filter(|id| !id.is_empty())
        .ok_or(VerificationError::MissingParameter)?;

    let session = checkout.retrieve_session(session_id).await?;

    if !session.is_paid() {
        info!(
            session_id,
            payment_status = %session.payment_status,
            "checkout session is not paid"
        );
        return Ok(Verification::Unpaid);
    }

    let missing = |field| VerificationError::MalformedSession { field };

    let parcel_id = session
        .metadata_value(PARCEL_ID_KEY)
        .and_then(|value| value.parse::<i64>().ok())
        .ok_or(missing(PARCEL_ID_KEY))?;
    let parcel_name = session
        .metadata_value(PARCEL_NAME_KEY)
        .unwrap_or_default()
        .to_owned();
    let amount_total = session.amount_total.ok_or(missing("amount_total"))?;
    let currency = session.currency.clone().ok_or(missing("currency"))?;
    let customer_email = session
        .customer_email
        .clone()
        .ok_or(missing("customer_email"))?;
    let transaction_id = session
        .payment_intent
        .clone()
        .ok_or(missing("payment_intent"))?;

    let generated = generate_tracking_id();

    let modify_parcel = parcels.mark_paid(parcel_id, &generated).await?;

    // An already paid parcel keeps the identifier it received first
    let tracking_id = if modify_parcel.modified_count == 0 {
        parcels
            .find_parcel(parcel_id)
            .await?
            .and_then(|model| model.tracking_id)
            .unwrap_or(generated)
    } else {
        generated
    };

    info!(
        session_id,
        parcel_id,
        tracking_id = %tracking_id,
        modified = modify_parcel.modified_count,
        "parcel payment confirmed"
    );

    let payment = NewPayment {
        amount: amount_total as f64 / 100.0,
        currency,
        customer_email,
        parcel_id,
        parcel_name,
        transaction_id: transaction_id.clone(),
        payment_status: session.payment_status.clone(),
        tracking_id: tracking_id.clone(),
        paid_at: now(),
    };

    let payment_info = if payment.payment_status == PAID {
        match payments.insert_payment(payment).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(
                    session_id,
                    parcel_id,
                    error = %err,
                    "parcel was marked as paid, but its payment record was not stored"
                );
                return Err(err.into());
            }
        }
    } else {
        None
    };

    Ok(Verification::Paid {
        modify_parcel,
        transaction_id,
        payment_info,
        tracking_id,
    })
}
