pub mod config;
pub mod tracking;

#[cfg(feature = "logging")]
pub mod logging;

#[cfg(feature = "checkout")]
pub mod checkout;

#[cfg(feature = "identity")]
pub mod identity;
