use crate::error::QiwiError;
use crate::format::normalize_phone;

const DEFAULT_WALLET_BASE_URL: &str = "https://edge.qiwi.com";
const DEFAULT_P2P_BASE_URL: &str = "https://api.qiwi.com";

pub struct ClientConfig {
    pub api_access_token: Option<String>,
    pub phone_number: Option<String>,
    pub secret_p2p: Option<String>,
    pub http_client: Option<reqwest::Client>,
    pub wallet_base_url: String,
    pub p2p_base_url: String,
}

pub struct ClientConfigBuilder {
    api_access_token: Option<String>,
    phone_number: Option<String>,
    secret_p2p: Option<String>,
    http_client: Option<reqwest::Client>,
    wallet_base_url: Option<String>,
    p2p_base_url: Option<String>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            api_access_token: None,
            phone_number: None,
            secret_p2p: None,
            http_client: None,
            wallet_base_url: None,
            p2p_base_url: None,
        }
    }
}

impl ClientConfigBuilder {
    pub fn api_access_token(mut self, token: impl Into<String>) -> Self {
        self.api_access_token = Some(token.into());
        self
    }

    /// Wallet phone number; a leading `+` and spaces are stripped.
    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn secret_p2p(mut self, secret: impl Into<String>) -> Self {
        self.secret_p2p = Some(secret.into());
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn wallet_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.wallet_base_url = Some(base_url.into());
        self
    }

    pub fn p2p_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.p2p_base_url = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<ClientConfig, QiwiError> {
        let api_access_token = self.api_access_token.filter(|t| !t.trim().is_empty());
        let secret_p2p = self.secret_p2p.filter(|t| !t.trim().is_empty());

        if api_access_token.is_none() && secret_p2p.is_none() {
            return Err(QiwiError::Config(
                "either api_access_token or secret_p2p is required".into(),
            ));
        }

        let phone_number = match self.phone_number {
            Some(raw) => {
                let phone = normalize_phone(&raw);
                if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
                    return Err(QiwiError::Config(format!(
                        "phone_number must contain only digits, got {raw}"
                    )));
                }
                Some(phone)
            }
            None => None,
        };

        Ok(ClientConfig {
            api_access_token,
            phone_number,
            secret_p2p,
            http_client: self.http_client,
            wallet_base_url: trim_base(self.wallet_base_url, DEFAULT_WALLET_BASE_URL),
            p2p_base_url: trim_base(self.p2p_base_url, DEFAULT_P2P_BASE_URL),
        })
    }
}

fn trim_base(base_url: Option<String>, default: &str) -> String {
    base_url
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_a_credential() {
        let err = ClientConfig::builder()
            .phone_number("+79001234567")
            .build()
            .err()
            .unwrap();
        assert!(err.to_string().contains("api_access_token or secret_p2p"));
    }

    #[test]
    fn test_blank_credential_is_ignored() {
        assert!(ClientConfig::builder().api_access_token("  ").build().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::builder()
            .api_access_token("token")
            .phone_number("+7 900 123 45 67")
            .build()
            .unwrap();
        assert_eq!(config.phone_number.as_deref(), Some("79001234567"));
        assert_eq!(config.wallet_base_url, "https://edge.qiwi.com");
        assert_eq!(config.p2p_base_url, "https://api.qiwi.com");
        assert!(config.secret_p2p.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::builder()
            .secret_p2p("secret")
            .p2p_base_url("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(config.p2p_base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_phone_number() {
        let err = ClientConfig::builder()
            .api_access_token("token")
            .phone_number("+7-900-abc")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, QiwiError::Config(_)));
    }
}
