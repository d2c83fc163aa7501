use std::{
    collections::HashMap,
    error::Error,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::async_trait;
use common::{
    checkout::{CheckoutError, CheckoutProvider, CheckoutSession, NewCheckoutSession},
    identity::{IdentityError, TokenVerifier, VerifiedIdentity},
};
use db::{
    now, parcel, rider,
    store::{InsertOutcome, NewPayment, ParcelStore, PaymentStore, UpdateOutcome},
    user, ActiveValue, Database, DatabaseConnection, DbErr, EntityTrait,
};
use hyper::body::{self, Bytes, HttpBody};
use migration::MigratorTrait;
use serde::Serialize;

use crate::Services;

pub(crate) async fn create_database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("unable to create test database");

    migration::Migrator::up(&db, None)
        .await
        .expect("unable to run migrations");

    db
}

pub(crate) fn services(checkout: Arc<StaticCheckout>) -> Services {
    Services {
        checkout,
        identity: None,
    }
}

pub(crate) async fn create_parcel(db: &DatabaseConnection, sender_email: &str, cost: f64) -> i64 {
    parcel::Entity::insert(parcel::ActiveModel {
        parcel_name: ActiveValue::Set(String::from("Books")),
        parcel_type: ActiveValue::Set(String::from("non-document")),
        parcel_weight: ActiveValue::Set(Some(2.0)),
        sender_name: ActiveValue::Set(String::from("Sender")),
        sender_email: ActiveValue::Set(String::from(sender_email)),
        sender_address: ActiveValue::Set(String::from("Dhaka")),
        receiver_name: ActiveValue::Set(String::from("Receiver")),
        receiver_address: ActiveValue::Set(String::from("Chattogram")),
        cost: ActiveValue::Set(cost),
        status: ActiveValue::Set(parcel::Status::Pending),
        tracking_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now()),
        ..Default::default()
    })
    .exec(db)
    .await
    .expect("unable to create parcel")
    .last_insert_id
}

pub(crate) async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    display_name: Option<&str>,
) -> i64 {
    user::Entity::insert(user::ActiveModel {
        email: ActiveValue::Set(String::from(email)),
        display_name: ActiveValue::Set(display_name.map(String::from)),
        photo_url: ActiveValue::Set(None),
        role: ActiveValue::Set(user::Role::User),
        created_at: ActiveValue::Set(now()),
        ..Default::default()
    })
    .exec(db)
    .await
    .expect("unable to create user")
    .last_insert_id
}

pub(crate) async fn create_rider(db: &DatabaseConnection, email: &str, status: &str) -> i64 {
    rider::Entity::insert(rider::ActiveModel {
        name: ActiveValue::Set(String::from("Rider")),
        email: ActiveValue::Set(String::from(email)),
        phone: ActiveValue::Set(String::from("+8801700000000")),
        region: ActiveValue::Set(String::from("Dhaka")),
        district: ActiveValue::Set(String::from("Gazipur")),
        status: ActiveValue::Set(String::from(status)),
        created_at: ActiveValue::Set(now()),
        ..Default::default()
    })
    .exec(db)
    .await
    .expect("unable to create rider")
    .last_insert_id
}

/// Checkout session reported as paid for the provided parcel.
pub(crate) fn paid_session(id: &str, parcel_id: i64, amount_total: i64) -> CheckoutSession {
    CheckoutSession {
        id: String::from(id),
        payment_status: String::from("paid"),
        amount_total: Some(amount_total),
        currency: Some(String::from("usd")),
        customer_email: Some(String::from("sender@example.com")),
        metadata: HashMap::from([
            (String::from("parcelId"), parcel_id.to_string()),
            (String::from("parcelName"), String::from("Books")),
        ]),
        payment_intent: Some(format!("pi_{id}")),
        url: None,
    }
}

/// Checkout provider serving a fixed set of sessions.
#[derive(Default)]
pub(crate) struct StaticCheckout {
    sessions: HashMap<String, CheckoutSession>,
    created: Mutex<Vec<NewCheckoutSession>>,
    lookups: AtomicUsize,
}

impl StaticCheckout {
    pub(crate) fn with_session(mut self, session: CheckoutSession) -> Self {
        self.sessions.insert(session.id.clone(), session);
        self
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub(crate) fn created(&self) -> Vec<NewCheckoutSession> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckoutProvider for StaticCheckout {
    async fn retrieve_session(&self, id: &str) -> Result<CheckoutSession, CheckoutError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        self.sessions
            .get(id)
            .cloned()
            .ok_or_else(|| CheckoutError::Provider {
                status: 404,
                message: format!("No such checkout.session: '{id}'"),
            })
    }

    async fn create_session(
        &self,
        session: NewCheckoutSession,
    ) -> Result<CheckoutSession, CheckoutError> {
        let id = format!("cs_test_{}", session.parcel_id);

        self.created.lock().unwrap().push(session);

        Ok(CheckoutSession {
            url: Some(format!("https://checkout.example/pay/{id}")),
            id,
            payment_status: String::from("unpaid"),
            amount_total: None,
            currency: None,
            customer_email: None,
            metadata: HashMap::new(),
            payment_intent: None,
        })
    }
}

/// Token verifier accepting a single token.
pub(crate) struct StaticVerifier {
    token: String,
    email: String,
}

impl StaticVerifier {
    pub(crate) fn new(token: &str, email: &str) -> Self {
        Self {
            token: String::from(token),
            email: String::from(email),
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        if token == self.token {
            Ok(VerifiedIdentity {
                uid: String::from("uid"),
                email: Some(self.email.clone()),
            })
        } else {
            Err(IdentityError::InvalidToken)
        }
    }
}

/// In-memory parcel store tracking status transitions.
#[derive(Default)]
pub(crate) struct MemoryParcels {
    parcels: Mutex<HashMap<i64, (parcel::Status, Option<String>)>>,
    writes: AtomicUsize,
}

impl MemoryParcels {
    pub(crate) fn with_pending(id: i64) -> Self {
        let parcels = Self::default();
        parcels
            .parcels
            .lock()
            .unwrap()
            .insert(id, (parcel::Status::Pending, None));
        parcels
    }

    pub(crate) fn state(&self, id: i64) -> Option<(parcel::Status, Option<String>)> {
        self.parcels.lock().unwrap().get(&id).cloned()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParcelStore for MemoryParcels {
    async fn find_parcel(&self, id: i64) -> Result<Option<parcel::Model>, DbErr> {
        Ok(self.state(id).map(|(status, tracking_id)| parcel::Model {
            id,
            parcel_name: String::from("Books"),
            parcel_type: String::from("non-document"),
            parcel_weight: Some(2.0),
            sender_name: String::from("Sender"),
            sender_email: String::from("sender@example.com"),
            sender_address: String::from("Dhaka"),
            receiver_name: String::from("Receiver"),
            receiver_address: String::from("Chattogram"),
            cost: 50.0,
            status,
            tracking_id,
            created_at: now(),
        }))
    }

    async fn mark_paid(&self, id: i64, tracking_id: &str) -> Result<UpdateOutcome, DbErr> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        let mut parcels = self.parcels.lock().unwrap();

        let modified_count = match parcels.get_mut(&id) {
            Some(state) if state.0 == parcel::Status::Pending => {
                *state = (parcel::Status::Paid, Some(String::from(tracking_id)));
                1
            }
            _ => 0,
        };

        Ok(UpdateOutcome { modified_count })
    }
}

/// In-memory payment store, optionally failing every insert.
#[derive(Default)]
pub(crate) struct MemoryPayments {
    records: Mutex<Vec<NewPayment>>,
    attempts: AtomicUsize,
    failing: bool,
}

impl MemoryPayments {
    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(crate) fn records(&self) -> Vec<NewPayment> {
        self.records.lock().unwrap().clone()
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentStore for MemoryPayments {
    async fn insert_payment(&self, payment: NewPayment) -> Result<InsertOutcome, DbErr> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.failing {
            return Err(DbErr::Custom(String::from("payment store unavailable")));
        }

        let mut records = self.records.lock().unwrap();
        records.push(payment);

        Ok(InsertOutcome {
            inserted_id: records.len() as i64,
        })
    }
}

pub(crate) trait RequestBodyExt: Sized {
    fn from_json<B: Serialize>(val: B) -> Self;
}

impl<T> RequestBodyExt for T
where
    T: HttpBody + From<Vec<u8>>,
{
    fn from_json<B: Serialize>(val: B) -> Self {
        T::from(serde_json::to_vec(&val).expect("unable to serialize"))
    }
}

#[async_trait(?Send)]
pub(crate) trait ResponseBodyExt {
    async fn bytes(self) -> Bytes;

    async fn text(self) -> String;

    async fn json(self) -> serde_json::Value;
}

#[async_trait(?Send)]
impl<T> ResponseBodyExt for T
where
    T: HttpBody,
    T::Error: Error,
{
    async fn bytes(self) -> Bytes {
        body::to_bytes(self)
            .await
            .expect("unable to convert to bytes")
    }

    async fn text(self) -> String {
        String::from_utf8(self.bytes().await.to_vec()).expect("unable to convert to text")
    }

    async fn json(self) -> serde_json::Value {
        serde_json::from_slice(&self.bytes().await).expect("unable to convert to json")
    }
}
