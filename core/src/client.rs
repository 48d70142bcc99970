//! Stateless request builder and response parser for the CountriesDB API.
//!
//! # Design
//! `ApiClient` holds the base URL and API key and nothing else. `build_post`
//! turns a payload into an `HttpRequest`; `check_status` and `parse_json`
//! interpret an `HttpResponse`. Nothing here touches the network, so the
//! same client can be driven by `Validator` over reqwest or by any other
//! HTTP stack.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ValidatorError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::ApiErrorBody;

pub const COUNTRY_PATH: &str = "/api/validate/country";
pub const SUBDIVISION_PATH: &str = "/api/validate/subdivision";

/// Synchronous, stateless client for the CountriesDB validation endpoints.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an authenticated JSON `POST` to `path`.
    pub fn build_post<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<HttpRequest, ValidatorError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ValidatorError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            url: format!("{}{path}", self.base_url),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), format!("Bearer {}", self.api_key)),
            ],
            body,
        })
    }

    /// Map a status >= 400 to an error, otherwise hand the response back.
    ///
    /// Use this directly when the response body is not needed.
    pub fn check_status(&self, response: HttpResponse) -> Result<HttpResponse, ValidatorError> {
        if response.status < 400 {
            return Ok(response);
        }
        let status = response.status;
        match serde_json::from_str::<ApiErrorBody>(&response.body) {
            Ok(body) if !body.message.is_empty() => Err(ValidatorError::Api {
                status,
                message: body.message,
            }),
            _ => Err(ValidatorError::Http { status }),
        }
    }

    /// Check the status, then decode the body as `T`.
    pub fn parse_json<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ValidatorError> {
        let response = self.check_status(response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ValidatorError::DeserializationError(e.to_string()))
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
