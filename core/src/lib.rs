//! Async client for the CountriesDB validation API.
//!
//! # Overview
//! Checks ISO 3166-1 country codes and ISO 3166-2 subdivision codes by asking
//! the CountriesDB backend. All validation rules live on the server; this
//! crate builds the requests, sends them and maps the answers into
//! `ValidationResult` values or `ValidatorError`s.
//!
//! ```no_run
//! use countriesdb_validator::{CancellationToken, CountryOptions, Validator};
//!
//! # async fn run() -> Result<(), countriesdb_validator::ValidatorError> {
//! let validator = Validator::new(std::env::var("COUNTRIESDB_API_KEY").unwrap_or_default())?;
//! let result = validator
//!     .validate_country(&CancellationToken::new(), "us", CountryOptions::default())
//!     .await?;
//! println!("valid: {}", result.valid);
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `ApiClient` is sans-IO: it builds `HttpRequest` values and parses
//!   `HttpResponse` values, so request shapes and error mapping are testable
//!   without a network.
//! - `Transport` is the I/O seam. `ReqwestTransport` is the default.
//! - `Validator` is immutable and cheap to clone; concurrent calls share the
//!   transport's connection pool.
//! - No retries and no caching. Callers own that policy.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod validator;

pub use client::ApiClient;
pub use config::{ValidatorConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ValidatorError;
pub use http::{HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CountryOptions, SubdivisionOptions, ValidationResult, INVALID_COUNTRY_CODE};
pub use validator::Validator;

pub use tokio_util::sync::CancellationToken;
