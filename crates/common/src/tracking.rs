//! Parcel tracking identifiers.
//!
//! A tracking identifier is assigned to a parcel once its payment is confirmed.
//! It combines a fixed [`TRACKING_PREFIX`], the current unix time in milliseconds
//! and [`SUFFIX_BYTES`] bytes of OS randomness rendered as uppercase hex,
//! e.g. `PCL-1718020000000-AF3C1B`.
//!
//! Identifiers are collision-resistant in practice, but no uniqueness check
//! against previously issued identifiers is performed.

use rand::{rngs::OsRng, RngCore};
use time::OffsetDateTime;

pub const TRACKING_PREFIX: &str = "PCL";
pub const SUFFIX_BYTES: usize = 3;

/// Generate a new tracking identifier using the current time.
///
/// ## Example
///
/// ```
/// use common::tracking::generate_tracking_id;
///
/// let id = generate_tracking_id();
/// assert!(id.starts_with("PCL-"));
/// ```
pub fn generate_tracking_id() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

    tracking_id_with(millis, &mut OsRng)
}

/// Generate a tracking identifier for the provided millisecond timestamp.
pub fn tracking_id_with<R: RngCore>(millis: i128, rng: &mut R) -> String {
    let mut suffix = [0u8; SUFFIX_BYTES];
    rng.fill_bytes(&mut suffix);

    format!("{TRACKING_PREFIX}-{millis}-{}", hex::encode_upper(suffix))
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;
    use rand::{rngs::mock::StepRng, rngs::OsRng};
    use regex::Regex;

    use super::{generate_tracking_id, tracking_id_with};

    static TRACKING_REGEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^PCL-\d+-[0-9A-F]{6}$").expect("invalid regex string"));

    #[test]
    fn format() {
        for _ in 0..256 {
            let id = generate_tracking_id();

            assert!(TRACKING_REGEX.is_match(&id), "unexpected format: {id}");
        }
    }

    #[test]
    fn deterministic_parts() {
        let id = tracking_id_with(1718020000000, &mut StepRng::new(0, 0));

        assert_eq!(id, "PCL-1718020000000-000000");
    }

    #[test]
    fn suffix_is_random() {
        let first = tracking_id_with(0, &mut OsRng);
        let second = tracking_id_with(0, &mut OsRng);
        let third = tracking_id_with(0, &mut OsRng);

        // 24 bits of entropy, three equal draws in a row would be a broken source
        assert!(first != second || second != third);
    }
}
