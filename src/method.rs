//! Transport-agnostic request descriptors.
//!
//! Every remote operation is a type implementing [`ApiMethod`]. Its builder
//! validates parameters, `build_request` turns it into a [`Request`] without
//! any I/O, and `parse_response` maps the transport's [`Payload`] into the
//! operation's output record.

use std::collections::BTreeMap;

use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde_json::Value;

use crate::error::QiwiError;
use crate::mapper::{shape_of, strip_nulls};

/// Everything except RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Which API host and credential a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Wallet API (`edge.qiwi.com`), authorized with the wallet access token.
    Wallet,
    /// P2P billing API (`api.qiwi.com`), authorized with the P2P secret key.
    P2P,
}

/// One fully-formed HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Path with every placeholder substituted, relative to the service base URL.
    pub endpoint: String,
    pub http_method: HttpMethod,
    pub service: Service,
    pub params: BTreeMap<String, String>,
    pub body: Option<Value>,
    pub headers: BTreeMap<String, String>,
}

impl Request {
    /// Merge headers into the request. Headers already on the request win.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        for (name, value) in headers {
            self.headers.entry(name).or_insert(value);
        }
        self
    }
}

/// Values for `{placeholder}`s in endpoint templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Response body as handed back by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Bytes(Bytes),
}

impl Payload {
    pub fn into_json(self) -> Result<Value, QiwiError> {
        match self {
            Self::Json(v) => Ok(v),
            Self::Bytes(b) => serde_json::from_slice(&b).map_err(|e| QiwiError::Mapping {
                expected: "JSON payload",
                shape: format!("binary payload of {} bytes", b.len()),
                reason: e.to_string(),
            }),
        }
    }

    pub fn into_bytes(self) -> Result<Bytes, QiwiError> {
        match self {
            Self::Bytes(b) => Ok(b),
            Self::Json(v) => Err(QiwiError::Mapping {
                expected: "binary payload",
                shape: shape_of(&v),
                reason: "the API answered with JSON instead of a file".into(),
            }),
        }
    }
}

pub trait ApiMethod {
    type Output;

    /// Endpoint template, e.g. `/payment-history/v2/persons/{phone_number}/payments`.
    const PATH: &'static str;
    const HTTP_METHOD: HttpMethod;
    const SERVICE: Service = Service::Wallet;

    /// Placeholders this method fills itself, on top of the caller's.
    fn path_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn params(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn body(&self) -> Result<Option<Value>, QiwiError> {
        Ok(None)
    }

    /// Headers specific to this method; they take precedence over auth defaults.
    fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn parse_response(&self, payload: Payload) -> Result<Self::Output, QiwiError>;

    fn build_request(&self, path_params: &PathParams) -> Result<Request, QiwiError> {
        let mut values = path_params.clone();
        for (name, value) in self.path_params() {
            values.insert(name, value);
        }
        Ok(Request {
            endpoint: substitute_path(Self::PATH, &values)?,
            http_method: Self::HTTP_METHOD,
            service: Self::SERVICE,
            params: self.params(),
            body: self.body()?.map(strip_nulls),
            headers: self.headers(),
        })
    }
}

/// Serialize a request body, dropping any field that ended up `null`.
pub(crate) fn to_body<T: Serialize>(body: &T) -> Result<Option<Value>, QiwiError> {
    Ok(Some(strip_nulls(serde_json::to_value(body)?)))
}

/// Replace every `{name}` in `template` with its percent-encoded value.
pub fn substitute_path(template: &str, values: &PathParams) -> Result<String, QiwiError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            QiwiError::Validation(format!("unclosed placeholder in endpoint template {template}"))
        })?;
        let name = &after[..close];
        let value = values.get(name).ok_or_else(|| {
            QiwiError::Validation(format!("missing path parameter `{name}` for {template}"))
        })?;
        out.push_str(&encode_path_segment(value));
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Percent-encode a string so it is safe to use in a URL path segment or query value.
pub(crate) fn encode_path_segment(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_substitute_path() {
        let params = PathParams::new().with("phone_number", "79001234567");
        let path = substitute_path("/funding-sources/v2/persons/{phone_number}/accounts", &params)
            .unwrap();
        assert_eq!(path, "/funding-sources/v2/persons/79001234567/accounts");
    }

    #[test]
    fn test_substitute_path_encodes_values() {
        let params = PathParams::new().with("bill_id", "a/b c");
        let path = substitute_path("/partner/bill/v1/bills/{bill_id}", &params).unwrap();
        assert_eq!(path, "/partner/bill/v1/bills/a%2Fb%20c");
    }

    #[test]
    fn test_substitute_path_missing_value() {
        let err = substitute_path("/cards/{phone_number}/orders/{order_id}", &PathParams::new())
            .unwrap_err();
        assert!(matches!(err, QiwiError::Validation(ref m) if m.contains("phone_number")));
    }

    #[test]
    fn test_substitute_path_unclosed() {
        let err = substitute_path("/bills/{bill_id", &PathParams::new()).unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn test_substitute_path_without_placeholders() {
        let path = substitute_path("/person-profile/v1/profile/current", &PathParams::new()).unwrap();
        assert_eq!(path, "/person-profile/v1/profile/current");
    }

    #[test]
    fn test_strip_nulls_is_recursive() {
        let v = strip_nulls(json!({"a": null, "b": {"c": null, "d": 1}, "e": [{"f": null}]}));
        assert_eq!(v, json!({"b": {"d": 1}, "e": [{}]}));
    }

    #[test]
    fn test_with_headers_keeps_existing() {
        let mut req = Request {
            endpoint: "/x".into(),
            http_method: HttpMethod::Get,
            service: Service::Wallet,
            params: BTreeMap::new(),
            body: None,
            headers: BTreeMap::new(),
        };
        req.headers.insert("Accept".into(), "application/pdf".into());
        let merged = req.with_headers(BTreeMap::from([
            ("Accept".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), "Bearer t".to_string()),
        ]));
        assert_eq!(merged.headers["Accept"], "application/pdf");
        assert_eq!(merged.headers["Authorization"], "Bearer t");
    }

    #[test]
    fn test_payload_conversions() {
        let json = Payload::Bytes(Bytes::from_static(br#"{"a":1}"#)).into_json().unwrap();
        assert_eq!(json, json!({"a": 1}));
        assert!(Payload::Bytes(Bytes::from_static(b"%PDF")).into_json().is_err());
        assert!(Payload::Json(json!({})).into_bytes().is_err());
    }

    #[test]
    fn test_encode_path_segment_plain() {
        assert_eq!(encode_path_segment("hello"), "hello");
    }

    #[test]
    fn test_encode_path_segment_keeps_unreserved() {
        let id = "cc961e8d-d4d6-4f02-b737-2297e51fb48e";
        assert_eq!(encode_path_segment(id), id);
        assert_eq!(encode_path_segment("a_b.c~d"), "a_b.c~d");
    }

    #[test]
    fn test_encode_path_segment_special_chars() {
        let encoded = encode_path_segment("a/b&c=d");
        assert!(encoded.contains("%2F"));
        assert!(encoded.contains("%26"));
        assert!(encoded.contains("%3D"));
    }

    #[test]
    fn test_encode_path_segment_unicode() {
        let encoded = encode_path_segment("счёт");
        // four Cyrillic chars, two UTF-8 bytes each
        assert_eq!(encoded.matches('%').count(), 8);
    }
}
