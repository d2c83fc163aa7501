use std::fmt::Display;

use axum::response::IntoResponse;
use db::{parcel, user};
use serde_json::{json, Value};

/// Generate example values for OAPI documentation.
macro_rules! generate_examples {
    ($name:ident, $type:ty, $expr:expr) => {
        ::paste::paste! {
            #[doc = concat!("Generate example [`", stringify!($type), "`] value for OAPI documentation.")]
            pub(crate) fn [<example_ $name>]() -> $type {
                $expr
            }
        }
    };

    ($name:ident, $type:ty, $expr:expr; $($name_repeat:ident, $type_repeat:ty, $expr_repeat:expr);+) => {
        generate_examples!($name, $type, $expr);
        generate_examples!($($name_repeat, $type_repeat, $expr_repeat);+);
    }
}

/// Convert an error into a JSON value suitable for OAPI documentation.
pub(crate) fn example_error<E: Display + IntoResponse>(err: E) -> Value {
    json! {{
        "error": err.to_string(),
    }}
}

generate_examples!(
    database_identifier, i64, 1;
    email, String, String::from("sender@example.com");
    display_name, Option<String>, Some(String::from("Nadia Rahman"));
    parcel_name, String, String::from("Books");
    parcel_type, String, String::from("non-document");
    parcel_weight, Option<f64>, Some(2.5);
    address, String, String::from("House 12, Road 5, Dhanmondi, Dhaka");
    cost, f64, 150.0;
    parcel_status, parcel::Status, parcel::Status::Paid;
    tracking_id, String, String::from("PCL-1718020000000-A1B2C3");
    timestamp, i64, 1718020000;
    session_id, String, String::from("cs_test_a1b2c3d4e5f6");
    transaction_id, String, String::from("pi_3PQ1a2b3c4d5e6f7");
    checkout_url, String, String::from("https://checkout.stripe.com/c/pay/cs_test_a1b2c3d4e5f6");
    amount, f64, 150.0;
    currency, String, String::from("usd");
    role, user::Role, user::Role::Rider;
    phone, String, String::from("+8801700000000");
    region, String, String::from("Dhaka");
    district, String, String::from("Gazipur");
    rider_status, String, String::from("approved")
);
