//! The public entry point: validate country and subdivision codes.
//!
//! # Design
//! `Validator` pairs an `ApiClient` (request building, response parsing) with
//! a shared `Transport` (I/O). It is immutable after construction, so one
//! instance can serve any number of concurrent calls.
//!
//! Shape checks differ between single and batch calls. A single call with a
//! country code that is not two bytes long returns an invalid
//! `ValidationResult` without contacting the server. The same mistake in a
//! batch call is a `ValidatorError::Format`. Existing callers rely on both
//! behaviours, so they are kept as they are.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::{ApiClient, COUNTRY_PATH, SUBDIVISION_PATH};
use crate::config::{ValidatorConfig, DEFAULT_TIMEOUT};
use crate::error::ValidatorError;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    CountryOptions, CountryPayload, MultiResult, SubdivisionOptions, SubdivisionPayload,
    ValidationResult, INVALID_COUNTRY_CODE,
};

/// Validates ISO 3166 country and subdivision codes against the CountriesDB API.
///
/// Every method takes a `CancellationToken`; cancelling it aborts the
/// in-flight request and the call returns `ValidatorError::Cancelled`.
/// Dropping the returned future has the same effect.
#[derive(Clone)]
pub struct Validator {
    client: ApiClient,
    transport: Arc<dyn Transport>,
}

impl Validator {
    /// Create a validator with the default base URL and a 10 second timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ValidatorError> {
        Self::with_config(api_key, ValidatorConfig::default())
    }

    /// Create a validator with overrides. No network call is made.
    pub fn with_config(
        api_key: impl Into<String>,
        config: ValidatorConfig,
    ) -> Result<Self, ValidatorError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ValidatorError::Configuration("api key is required".to_string()));
        }

        let client = ApiClient::new(config.resolved_base_url(), &api_key);
        let transport = match config.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(config.timeout.unwrap_or(DEFAULT_TIMEOUT))?),
        };

        Ok(Self { client, transport })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Request timeout of the underlying transport, when it has a fixed one.
    pub fn timeout(&self) -> Option<Duration> {
        self.transport.timeout()
    }

    /// Validate a single country code.
    ///
    /// A code that is not exactly two bytes long yields
    /// `valid: false, message: "Invalid country code."` without a request.
    pub async fn validate_country(
        &self,
        cancel: &CancellationToken,
        code: &str,
        opts: CountryOptions,
    ) -> Result<ValidationResult, ValidatorError> {
        if !is_code_length(code) {
            return Ok(ValidationResult::invalid(INVALID_COUNTRY_CODE));
        }

        let payload = CountryPayload {
            code: code.to_uppercase(),
            follow_upward: opts.follow_upward,
        };
        self.post(cancel, COUNTRY_PATH, &payload).await
    }

    /// Validate several country codes in one request.
    ///
    /// Every code must be exactly two bytes long, otherwise the call fails
    /// with `ValidatorError::Format` before anything is sent.
    /// `opts.follow_upward` is not supported for batches and is always sent
    /// as `false`. Results come back in the order the server returns them.
    pub async fn validate_countries<S: AsRef<str>>(
        &self,
        cancel: &CancellationToken,
        codes: &[S],
        _opts: CountryOptions,
    ) -> Result<Vec<ValidationResult>, ValidatorError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut upper = Vec::with_capacity(codes.len());
        for code in codes {
            let code = code.as_ref();
            if !is_code_length(code) {
                return Err(ValidatorError::Format(
                    "invalid country code format. All codes must be 2-character strings"
                        .to_string(),
                ));
            }
            upper.push(code.to_uppercase());
        }

        let payload = CountryPayload {
            code: upper,
            follow_upward: false,
        };
        let response: MultiResult = self.post(cancel, COUNTRY_PATH, &payload).await?;
        Ok(response.results)
    }

    /// Validate a subdivision code within `country`.
    ///
    /// Only `country` is shape-checked; a malformed one yields
    /// `valid: false, message: "Invalid country code."` without a request.
    /// `code` is sent as given, and an empty code means "country only".
    pub async fn validate_subdivision(
        &self,
        cancel: &CancellationToken,
        code: &str,
        country: &str,
        opts: SubdivisionOptions,
    ) -> Result<ValidationResult, ValidatorError> {
        if !is_code_length(country) {
            return Ok(ValidationResult::invalid(INVALID_COUNTRY_CODE));
        }

        let country = country.to_uppercase();
        let payload = SubdivisionPayload {
            code,
            country: &country,
            follow_related: opts.follow_related,
            allow_parent_selection: opts.allow_parent_selection,
        };
        self.post(cancel, SUBDIVISION_PATH, &payload).await
    }

    /// Validate several subdivision codes of the same country in one request.
    ///
    /// A malformed `country` fails with `ValidatorError::Format`. Codes are
    /// passed through unchanged, empty strings included.
    /// `opts.follow_related` is always sent as `false`.
    pub async fn validate_subdivisions<S: AsRef<str>>(
        &self,
        cancel: &CancellationToken,
        codes: &[S],
        country: &str,
        opts: SubdivisionOptions,
    ) -> Result<Vec<ValidationResult>, ValidatorError> {
        if !is_code_length(country) {
            return Err(ValidatorError::Format("invalid country code".to_string()));
        }
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let country = country.to_uppercase();
        let payload = SubdivisionPayload {
            code: codes.iter().map(|code| code.as_ref()).collect::<Vec<&str>>(),
            country: &country,
            follow_related: false,
            allow_parent_selection: opts.allow_parent_selection,
        };
        let response: MultiResult = self.post(cancel, SUBDIVISION_PATH, &payload).await?;
        Ok(response.results)
    }

    async fn post<P, T>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        payload: &P,
    ) -> Result<T, ValidatorError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let request = self.client.build_post(path, payload)?;
        debug!(url = %request.url, "sending validation request");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(path, "validation request cancelled");
                return Err(ValidatorError::Cancelled);
            }
            response = self.transport.execute(request) => response?,
        };

        debug!(path, status = response.status, "received validation response");
        if response.status >= 400 {
            warn!(path, status = response.status, "validation API returned an error status");
        }
        self.client.parse_json(response)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("client", &self.client)
            .field("timeout", &self.transport.timeout())
            .finish()
    }
}

/// Codes are measured in bytes, so a non-ASCII letter counts as two or more.
fn is_code_length(code: &str) -> bool {
    code.len() == 2
}
