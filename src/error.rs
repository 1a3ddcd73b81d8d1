use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QiwiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("QIWI API error: status={status}, code={code}, message={message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Mapping error: expected {expected}, got {shape}: {reason}")]
    Mapping {
        expected: &'static str,
        shape: String,
        reason: String,
    },

    #[error("Resource error: {path}: {reason}")]
    Resource { path: String, reason: String },

    #[error("{variant} doesn't provide a mechanism to get {operation}")]
    UnsupportedOperation {
        variant: &'static str,
        operation: &'static str,
    },

    #[error("No input variant matches a value of type {type_name}")]
    Discovery { type_name: &'static str },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error body returned by both the wallet and P2P APIs.
///
/// Wallet endpoints use `code`/`message`, P2P endpoints use
/// `errorCode`/`description`; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiErrorResponse {
    pub code: Option<String>,
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
    pub message: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "userMessage")]
    pub user_message: Option<String>,
}

impl ApiErrorResponse {
    pub(crate) fn into_error(self, status: u16) -> QiwiError {
        QiwiError::Api {
            status,
            code: self
                .error_code
                .or(self.code)
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            message: self
                .description
                .or(self.message)
                .or(self.user_message)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p2p_error_body() {
        let body = r#"{"serviceName":"invoicing-api","errorCode":"validation.error","description":"Validation error","userMessage":"Validation error","dateTime":"2018-11-13T16:49:59.166+03:00","traceId":"fd0e2a08c63ace83"}"#;
        let resp: ApiErrorResponse = serde_json::from_str(body).unwrap();
        match resp.into_error(400) {
            QiwiError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, "validation.error");
                assert_eq!(message, "Validation error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wallet_error_body() {
        let body = r#"{"code":"QWPRC-220","message":"Insufficient funds"}"#;
        let resp: ApiErrorResponse = serde_json::from_str(body).unwrap();
        let err = resp.into_error(400).to_string();
        assert!(err.contains("QWPRC-220"));
        assert!(err.contains("Insufficient funds"));
    }

    #[test]
    fn test_empty_error_body_defaults() {
        let resp: ApiErrorResponse = serde_json::from_str("{}").unwrap();
        match resp.into_error(500) {
            QiwiError::Api { code, message, .. } => {
                assert_eq!(code, "UNKNOWN");
                assert!(message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_operation_message() {
        let err = QiwiError::UnsupportedOperation {
            variant: "StreamInput",
            operation: "path",
        };
        assert_eq!(
            err.to_string(),
            "StreamInput doesn't provide a mechanism to get path"
        );
    }
}
