use chrono::NaiveDate;
use serde_json::Value;

use crate::client::QiwiClient;
use crate::error::QiwiError;
use crate::format::format_date;
use crate::mapper::map_record;
use crate::method::{ApiMethod, HttpMethod, Payload, to_body};
use crate::model::identification::{Identification, IdentificationBody};
use crate::validation::{require, require_non_empty};

const IDENTIFICATION_PATH: &str = "/identification/v1/persons/{phone_number}/identification";

/// Current identification data of the wallet owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchIdentification;

impl ApiMethod for FetchIdentification {
    type Output = Identification;

    const PATH: &'static str = IDENTIFICATION_PATH;
    const HTTP_METHOD: HttpMethod = HttpMethod::Get;

    fn parse_response(&self, payload: Payload) -> Result<Identification, QiwiError> {
        map_record(payload.into_json()?)
    }
}

/// Submit passport data for simplified identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticate {
    birth_date: NaiveDate,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    passport: String,
    inn: Option<String>,
    snils: Option<String>,
    oms: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AuthenticateBuilder {
    birth_date: Option<NaiveDate>,
    first_name: Option<String>,
    middle_name: Option<String>,
    last_name: Option<String>,
    passport: Option<String>,
    inn: Option<String>,
    snils: Option<String>,
    oms: Option<String>,
}

impl Authenticate {
    pub fn builder() -> AuthenticateBuilder {
        AuthenticateBuilder::default()
    }
}

impl AuthenticateBuilder {
    pub fn birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    pub fn middle_name(mut self, name: impl Into<String>) -> Self {
        self.middle_name = Some(name.into());
        self
    }

    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Series and number, digits only.
    pub fn passport(mut self, passport: impl Into<String>) -> Self {
        self.passport = Some(passport.into());
        self
    }

    pub fn inn(mut self, inn: impl Into<String>) -> Self {
        self.inn = Some(inn.into());
        self
    }

    pub fn snils(mut self, snils: impl Into<String>) -> Self {
        self.snils = Some(snils.into());
        self
    }

    pub fn oms(mut self, oms: impl Into<String>) -> Self {
        self.oms = Some(oms.into());
        self
    }

    pub fn build(self) -> Result<Authenticate, QiwiError> {
        let passport = require(self.passport, "passport")?;
        let first_name = require(self.first_name, "first_name")?;
        let last_name = require(self.last_name, "last_name")?;
        let birth_date = require(self.birth_date, "birth_date")?;
        require_non_empty(&passport, "passport")?;
        require_non_empty(&first_name, "first_name")?;
        require_non_empty(&last_name, "last_name")?;

        Ok(Authenticate {
            birth_date,
            first_name,
            middle_name: self.middle_name,
            last_name,
            passport,
            inn: self.inn,
            snils: self.snils,
            oms: self.oms,
        })
    }
}

impl ApiMethod for Authenticate {
    type Output = Identification;

    const PATH: &'static str = IDENTIFICATION_PATH;
    const HTTP_METHOD: HttpMethod = HttpMethod::Post;

    fn body(&self) -> Result<Option<Value>, QiwiError> {
        to_body(&IdentificationBody {
            birth_date: format_date(self.birth_date),
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            passport: self.passport.clone(),
            inn: self.inn.clone(),
            snils: self.snils.clone(),
            oms: self.oms.clone(),
        })
    }

    fn parse_response(&self, payload: Payload) -> Result<Identification, QiwiError> {
        map_record(payload.into_json()?)
    }
}

impl QiwiClient {
    /// GET /identification/v1/persons/{phone_number}/identification
    pub async fn get_identification(&self) -> Result<Identification, QiwiError> {
        self.execute(&FetchIdentification).await
    }

    /// POST /identification/v1/persons/{phone_number}/identification
    pub async fn authenticate(&self, req: &Authenticate) -> Result<Identification, QiwiError> {
        self.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::PathParams;
    use serde_json::json;

    fn phone() -> PathParams {
        PathParams::new().with("phone_number", "79001234567")
    }

    fn ivanov() -> AuthenticateBuilder {
        Authenticate::builder()
            .birth_date(NaiveDate::from_ymd_opt(1998, 2, 11).unwrap())
            .first_name("Ivan")
            .last_name("Ivanov")
            .passport("4400111222")
    }

    #[test]
    fn test_authenticate_body() {
        let req = ivanov().inn("123456789012").build().unwrap();
        let request = req.build_request(&phone()).unwrap();
        assert_eq!(
            request.endpoint,
            "/identification/v1/persons/79001234567/identification"
        );
        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(
            request.body.unwrap(),
            json!({
                "birthDate": "1998-02-11",
                "firstName": "Ivan",
                "lastName": "Ivanov",
                "passport": "4400111222",
                "inn": "123456789012"
            })
        );
    }

    #[test]
    fn test_authenticate_requires_passport() {
        let err = Authenticate::builder()
            .birth_date(NaiveDate::from_ymd_opt(1998, 2, 11).unwrap())
            .first_name("Ivan")
            .last_name("Ivanov")
            .build()
            .unwrap_err();
        assert!(matches!(err, QiwiError::Validation(ref m) if m.contains("passport")));
    }

    #[test]
    fn test_authenticate_rejects_blank_name() {
        assert!(ivanov().first_name("  ").build().is_err());
    }

    #[test]
    fn test_fetch_identification_request() {
        let request = FetchIdentification.build_request(&phone()).unwrap();
        assert_eq!(request.http_method, HttpMethod::Get);
        assert!(request.body.is_none());
    }
}
