use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::auth::default_headers;
use crate::config::ClientConfig;
use crate::error::{ApiErrorResponse, QiwiError};
use crate::method::{ApiMethod, PathParams, Payload, Request, Service};

pub struct QiwiClient {
    pub(crate) config: ClientConfig,
    pub(crate) http: reqwest::Client,
}

impl QiwiClient {
    /// Create a client from a validated configuration.
    ///
    /// No request is made here; credentials are checked lazily, per service.
    pub fn new(config: ClientConfig) -> Self {
        let http = config.http_client.clone().unwrap_or_default();
        Self { config, http }
    }

    /// Wallet phone number, digits only.
    pub fn phone_number(&self) -> Option<&str> {
        self.config.phone_number.as_deref()
    }

    /// Path values every request may refer to.
    pub(crate) fn path_params(&self) -> PathParams {
        let mut params = PathParams::new();
        if let Some(phone) = &self.config.phone_number {
            params.insert("phone_number", phone.clone());
        }
        params
    }

    /// Build the request for `method` and attach auth headers for its service.
    pub fn prepare<M: ApiMethod>(&self, method: &M) -> Result<Request, QiwiError> {
        let request = method.build_request(&self.path_params())?;
        let token = self.token_for(request.service)?;
        Ok(request.with_headers(default_headers(token)))
    }

    /// Build, send and map one API call.
    pub async fn execute<M: ApiMethod>(&self, method: &M) -> Result<M::Output, QiwiError> {
        let request = self.prepare(method)?;
        let payload = self.send(&request).await?;
        method.parse_response(payload)
    }

    /// Send a prepared request and hand back the raw payload.
    pub async fn send(&self, request: &Request) -> Result<Payload, QiwiError> {
        let url = format!("{}{}", self.base_url(request.service), request.endpoint);
        debug!(
            method = request.http_method.as_str(),
            endpoint = %request.endpoint,
            "sending request"
        );

        let mut req = self
            .http
            .request(request.http_method.into(), &url)
            .header("User-Agent", concat!("qiwipay-rust/", env!("CARGO_PKG_VERSION")));
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if !request.params.is_empty() {
            req = req.query(&request.params);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let data = resp.bytes().await?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                endpoint = %request.endpoint,
                "API returned an error"
            );
            return Err(parse_api_error(status.as_u16(), &data));
        }

        if content_type.contains("json") && !data.is_empty() {
            decode_json(&data, &content_type).map(Payload::Json)
        } else {
            Ok(Payload::Bytes(data))
        }
    }

    fn token_for(&self, service: Service) -> Result<&str, QiwiError> {
        let (token, name) = match service {
            Service::Wallet => (&self.config.api_access_token, "api_access_token"),
            Service::P2P => (&self.config.secret_p2p, "secret_p2p"),
        };
        token
            .as_deref()
            .ok_or_else(|| QiwiError::Config(format!("{name} is required for {service:?} requests")))
    }

    fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Wallet => &self.config.wallet_base_url,
            Service::P2P => &self.config.p2p_base_url,
        }
    }
}

/// Decode a body the server labelled as JSON; a broken body is a mapping failure.
fn decode_json(data: &[u8], content_type: &str) -> Result<serde_json::Value, QiwiError> {
    serde_json::from_slice(data).map_err(|e| {
        let preview: String = String::from_utf8_lossy(data).chars().take(64).collect();
        warn!(content_type, error = %e, "response body is not valid JSON");
        QiwiError::Mapping {
            expected: "JSON payload",
            shape: format!("{} bytes of {content_type}: {preview:?}", data.len()),
            reason: e.to_string(),
        }
    })
}

fn parse_api_error(status: u16, body: &[u8]) -> QiwiError {
    match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(err_resp) => err_resp.into_error(status),
        Err(_) => QiwiError::Api {
            status,
            code: "UNKNOWN".into(),
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}
