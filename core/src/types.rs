//! Wire types for the CountriesDB validation API.
//!
//! # Design
//! `ValidationResult` and the option structs are public. The request payloads
//! and response envelopes stay crate-private because callers only ever see
//! them through `Validator` methods; `ApiClient` is generic over any
//! `Serialize` payload, so custom callers can bring their own.

use serde::{Deserialize, Serialize};

/// Message returned for a single-code call whose country code is not two
/// characters long. Matches the server's wording.
pub const INVALID_COUNTRY_CODE: &str = "Invalid country code.";

/// Outcome of validating one code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    #[serde(default)]
    pub valid: bool,
    /// Reason the code was rejected, when the server gives one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The validated code, echoed back in batch responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidationResult {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            code: None,
        }
    }
}

/// Options for country validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountryOptions {
    /// Also match the code against its parent jurisdiction. Ignored by
    /// `Validator::validate_countries`.
    pub follow_upward: bool,
}

/// Options for subdivision validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubdivisionOptions {
    /// Also match against related or aliased subdivision codes. Ignored by
    /// `Validator::validate_subdivisions`.
    pub follow_related: bool,
    /// Let a country-only selection (empty code) satisfy the check.
    pub allow_parent_selection: bool,
}

/// Body of `POST /api/validate/country`. `C` is a `String` for a single code
/// or a `Vec<String>` for a batch.
#[derive(Debug, Serialize)]
pub(crate) struct CountryPayload<C> {
    pub code: C,
    pub follow_upward: bool,
}

/// Body of `POST /api/validate/subdivision`.
#[derive(Debug, Serialize)]
pub(crate) struct SubdivisionPayload<'a, C> {
    pub code: C,
    pub country: &'a str,
    pub follow_related: bool,
    pub allow_parent_selection: bool,
}

/// Response envelope for batch validation.
#[derive(Debug, Deserialize)]
pub(crate) struct MultiResult {
    #[serde(default)]
    pub results: Vec<ValidationResult>,
}

/// Body of an error response (status >= 400).
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}
