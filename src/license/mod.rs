//! License text classification.
//!
//! - [`phrases`] — fixed table of match phrases per [`LicenseType`](crate::models::LicenseType).
//! - [`classifier`] — normalizes raw license text and picks the first matching family.

pub mod classifier;
pub mod phrases;
