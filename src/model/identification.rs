use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identification data the wallet holds for its owner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Identification {
    pub id: i64,
    #[serde(rename = "type")]
    pub identification_type: String,
    pub birth_date: Option<NaiveDate>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub passport: Option<String>,
    pub inn: Option<String>,
    pub snils: Option<String>,
    pub oms: Option<String>,
}

/// Body of the identification request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationBody {
    pub birth_date: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub passport: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snils: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oms: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_record;
    use serde_json::json;

    #[test]
    fn test_map_identification() {
        let ident: Identification = map_record(json!({
            "id": 79112223344i64,
            "type": "VERIFIED",
            "birthDate": "1998-02-11",
            "firstName": "Ivan",
            "lastName": "Ivanov",
            "passport": "4400111222",
            "inn": null
        }))
        .unwrap();
        assert_eq!(ident.identification_type, "VERIFIED");
        assert_eq!(ident.birth_date, NaiveDate::from_ymd_opt(1998, 2, 11));
        assert!(ident.inn.is_none());
        assert!(ident.middle_name.is_none());
    }
}
