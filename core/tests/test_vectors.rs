//! Verify `ApiClient` build/parse against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes a payload, the expected request, a simulated
//! response and the expected parse result. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use countriesdb_validator::{ApiClient, HttpResponse, ValidationResult, ValidatorError};
use serde::Deserialize;

const BASE_URL: &str = "http://localhost:3000";
const API_KEY: &str = "test-key";

fn client() -> ApiClient {
    ApiClient::new(BASE_URL, API_KEY)
}

#[derive(Debug, Deserialize)]
struct Batch {
    results: Vec<ValidationResult>,
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn run_request_vectors(raw: &str) {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];
        let path = expected_req["path"].as_str().unwrap();

        // Verify build
        let req = c.build_post(path, &case["payload"]).unwrap();
        assert_eq!(req.url, format!("{BASE_URL}{path}"), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let response = simulated_response(case);
        if case["batch"].as_bool().unwrap_or(false) {
            let batch: Batch = c.parse_json(response).unwrap();
            let expected: Vec<ValidationResult> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(batch.results, expected, "{name}: parsed results");
        } else {
            let result: ValidationResult = c.parse_json(response).unwrap();
            let expected: ValidationResult =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Country
// ---------------------------------------------------------------------------

#[test]
fn country_test_vectors() {
    run_request_vectors(include_str!("../../test-vectors/country.json"));
}

// ---------------------------------------------------------------------------
// Subdivision
// ---------------------------------------------------------------------------

#[test]
fn subdivision_test_vectors() {
    run_request_vectors(include_str!("../../test-vectors/subdivision.json"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_error"];

        let err = c.parse_json::<ValidationResult>(simulated_response(case)).unwrap_err();

        match expected["kind"].as_str().unwrap() {
            "Api" => assert!(matches!(err, ValidatorError::Api { .. }), "{name}: expected Api, got {err:?}"),
            "Http" => assert!(matches!(err, ValidatorError::Http { .. }), "{name}: expected Http, got {err:?}"),
            "Deserialization" => assert!(
                matches!(err, ValidatorError::DeserializationError(_)),
                "{name}: expected DeserializationError, got {err:?}"
            ),
            other => panic!("{name}: unknown expected_error kind: {other}"),
        }
        if let Some(status) = expected["status"].as_u64() {
            assert_eq!(err.status(), Some(status as u16), "{name}: status");
        }
        if let Some(display) = expected["display"].as_str() {
            assert_eq!(err.to_string(), display, "{name}: display");
        }
    }
}
