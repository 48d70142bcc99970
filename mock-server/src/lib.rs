//! In-memory stand-in for the CountriesDB validation API.
//!
//! Serves `POST /api/validate/country` and `POST /api/validate/subdivision`
//! with the same request and response shapes as the real service, backed by
//! a small hard-coded slice of ISO 3166. Requests must carry
//! `Authorization: Bearer <api_key>`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

const COUNTRIES: &[&str] = &[
    "AU", "BR", "CA", "CN", "DE", "ES", "FR", "GB", "IN", "IT", "JP", "MX", "SG", "US", "VA",
];

/// Dependent territories, only accepted as countries with `follow_upward`.
const TERRITORIES: &[(&str, &str)] = &[("GU", "US"), ("PR", "US"), ("VI", "US")];

const SUBDIVISIONS: &[(&str, &[&str])] = &[
    ("CA", &["CA-BC", "CA-ON", "CA-QC"]),
    ("DE", &["DE-BE", "DE-BY", "DE-HH"]),
    ("FR", &["FR-ARA", "FR-IDF", "FR-PAC"]),
    ("GB", &["GB-ENG", "GB-NIR", "GB-SCT", "GB-WLS"]),
    ("US", &["US-CA", "US-DC", "US-NY", "US-PR", "US-TX", "US-WA"]),
];

/// Retired or aliased codes and the current code they resolve to with
/// `follow_related`.
const RELATED: &[(&str, &str)] = &[("FR-J", "FR-IDF"), ("FR-V", "FR-ARA"), ("FR-U", "FR-PAC")];

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    fn invalid(message: &str) -> Self {
        Self {
            valid: false,
            message: Some(message.to_string()),
            code: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MultiResult {
    pub results: Vec<ValidationResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

/// `code` is either one code or a batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Codes {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub struct CountryRequest {
    pub code: Codes,
    #[serde(default)]
    pub follow_upward: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubdivisionRequest {
    pub code: Codes,
    pub country: String,
    #[serde(default)]
    pub follow_related: bool,
    #[serde(default)]
    pub allow_parent_selection: bool,
}

struct AppState {
    api_key: String,
}

type SharedState = Arc<AppState>;

pub fn app(api_key: &str) -> Router {
    let state: SharedState = Arc::new(AppState {
        api_key: api_key.to_string(),
    });
    Router::new()
        .route("/api/validate/country", post(validate_country))
        .route("/api/validate/subdivision", post(validate_subdivision))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn validate_country(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Json<CountryRequest>, JsonRejection>,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Invalid API key.");
    }
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return error(rejection.status(), &rejection.body_text()),
    };
    tracing::debug!(?input, "validate country");
    respond(input.code, |code| check_country(code, input.follow_upward))
}

async fn validate_subdivision(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Json<SubdivisionRequest>, JsonRejection>,
) -> Response {
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, "Invalid API key.");
    }
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return error(rejection.status(), &rejection.body_text()),
    };
    tracing::debug!(?input, "validate subdivision");
    let country = input.country.to_uppercase();
    respond(input.code, |code| {
        check_subdivision(
            code,
            &country,
            input.follow_related,
            input.allow_parent_selection,
        )
    })
}

fn authorized(state: &AppState, headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|key| key == state.api_key)
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiError {
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// Single codes get a bare result; batches get a `results` envelope with each
/// result echoing its code, in request order.
fn respond(codes: Codes, check: impl Fn(&str) -> ValidationResult) -> Response {
    match codes {
        Codes::One(code) => Json(check(&code)).into_response(),
        Codes::Many(codes) if codes.is_empty() => {
            error(StatusCode::UNPROCESSABLE_ENTITY, "At least one code is required.")
        }
        Codes::Many(codes) => {
            let results = codes
                .into_iter()
                .map(|code| ValidationResult {
                    code: Some(code.clone()),
                    ..check(&code)
                })
                .collect();
            Json(MultiResult { results }).into_response()
        }
    }
}

pub fn check_country(code: &str, follow_upward: bool) -> ValidationResult {
    let code = code.to_uppercase();
    if COUNTRIES.contains(&code.as_str()) {
        return ValidationResult::ok();
    }
    if follow_upward && TERRITORIES.iter().any(|(territory, _)| *territory == code) {
        return ValidationResult::ok();
    }
    ValidationResult::invalid("Invalid country code.")
}

pub fn check_subdivision(
    code: &str,
    country: &str,
    follow_related: bool,
    allow_parent_selection: bool,
) -> ValidationResult {
    if !COUNTRIES.contains(&country) {
        return ValidationResult::invalid("Invalid country code.");
    }
    let known = subdivisions_of(country);

    if code.is_empty() {
        if known.is_empty() || allow_parent_selection {
            return ValidationResult::ok();
        }
        return ValidationResult::invalid("Subdivision code is required.");
    }

    let code = code.to_uppercase();
    if known.contains(&code.as_str()) {
        return ValidationResult::ok();
    }
    if follow_related {
        let resolved = RELATED
            .iter()
            .find(|(alias, _)| *alias == code)
            .map(|(_, current)| *current);
        if resolved.is_some_and(|current| known.contains(&current)) {
            return ValidationResult::ok();
        }
    }
    ValidationResult::invalid("Invalid subdivision code.")
}

fn subdivisions_of(country: &str) -> &'static [&'static str] {
    SUBDIVISIONS
        .iter()
        .find(|(c, _)| *c == country)
        .map(|(_, codes)| *codes)
        .unwrap_or(&[])
}
