use std::fmt::Debug;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use qiwipay::mapper::{map_record, map_records};
use qiwipay::model::{
    Account, AccountInfo, Balance, Bill, Commission, Identification, Limit, OrderDetails,
    PaymentInfo, RefundBill, Restriction, Statistic, Transaction,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

fn transaction() -> Value {
    json!({
        "txnId": 9309,
        "personId": 79112223344i64,
        "date": "2017-01-21T11:41:07+03:00",
        "errorCode": 0,
        "status": "SUCCESS",
        "type": "OUT",
        "statusText": "Успешно",
        "trmTxnId": "1489826461807",
        "account": "+79001234567",
        "sum": {"amount": 70, "currency": 643},
        "commission": {"amount": 0, "currency": 643},
        "total": {"amount": 70, "currency": 643},
        "provider": {"id": 99, "shortName": "QIWI Wallet"},
        "comment": "lunch",
        "currencyRate": 1
    })
}

fn bill() -> Value {
    json!({
        "siteId": "9hh4jb-00",
        "billId": "b1",
        "amount": {"currency": "RUB", "value": "10.00"},
        "status": {"value": "WAITING", "changedDateTime": "2018-03-05T11:27:41+03:00"},
        "customer": {"phone": "78710009999"},
        "customFields": {"themeCode": "Yvan-YKaSh"},
        "comment": "Text comment",
        "creationDateTime": "2018-03-05T11:27:41+03:00",
        "expirationDateTime": "2018-04-13T14:30:00+03:00",
        "payUrl": "https://oplata.qiwi.com/form/?invoice_uid=d875277b"
    })
}

fn refund_bill() -> Value {
    json!({
        "amount": {"currency": "RUB", "value": "5.00"},
        "datetime": "2018-03-01T16:06:57+03:00",
        "refundId": "refund-1",
        "status": "PARTIAL"
    })
}

fn limit() -> Value {
    json!({
        "type": "TURNOVER",
        "currency": "RUB",
        "max": 100,
        "spent": 5,
        "rest": 95,
        "interval": {"dateFrom": "2024-01-01T00:00:00+03:00", "dateTill": "2024-02-01T00:00:00+03:00"}
    })
}

fn identification() -> Value {
    json!({
        "id": 79001234567i64,
        "type": "VERIFIED",
        "birthDate": "1998-02-11",
        "firstName": "Иван",
        "middleName": "Иванович",
        "lastName": "Иванов",
        "passport": "4400111222",
        "inn": "123456789012",
        "snils": "12345678901",
        "oms": "1234567890123456"
    })
}

fn statistic() -> Value {
    json!({
        "incomingTotal": [{"amount": 3500, "currency": 643}],
        "outgoingTotal": [{"amount": 3497.5, "currency": 643}]
    })
}

fn account_info() -> Value {
    json!({
        "authInfo": {"personId": 79001234567i64, "boundEmail": "me@example.com", "ip": "127.0.0.1"},
        "contractInfo": {"contractId": 79001234567i64, "blocked": false,
                         "identificationInfo": [{"bankAlias": "QIWI", "identificationLevel": "ANONYMOUS"}]},
        "userInfo": {"defaultPayCurrency": 643, "language": "ru", "operator": "Beeline", "phoneHash": "abc"}
    })
}

fn balance() -> Value {
    json!({"amount": "120.25", "currency": 643})
}

fn order_details() -> Value {
    json!({
        "id": "1234567",
        "cardAlias": "qvc-master",
        "status": "COMPLETED",
        "price": {"amount": 2.99, "currency": 643},
        "cardId": "4302"
    })
}

fn payment_info() -> Value {
    json!({
        "id": "1681129345000",
        "terms": "99",
        "fields": {"account": "+79001234567"},
        "sum": {"amount": 1, "currency": "643"},
        "source": "account_643",
        "comment": "thanks",
        "transaction": {"id": "4969142201", "state": {"code": "Accepted"}}
    })
}

fn account() -> Value {
    json!({
        "alias": "qw_wallet_rub",
        "fsAlias": "qb_wallet",
        "bankAlias": "QIWI",
        "title": "WALLET",
        "type": {"id": "WALLET", "title": "QIWI Wallet"},
        "hasBalance": true,
        "balance": {"amount": 120.25, "currency": 643},
        "currency": 643,
        "defaultAccount": true
    })
}

fn restriction() -> Value {
    json!({"restrictionCode": "OUTGOING_PAYMENTS", "restrictionDescription": "blocked"})
}

fn commission() -> Value {
    json!({
        "providerId": 99,
        "withdrawSum": {"amount": 102, "currency": "643"},
        "enrollmentSum": {"amount": 100, "currency": "643"},
        "qwCommission": {"amount": 2, "currency": "643"},
        "fundingSourceCommission": {"amount": 0, "currency": "643"},
        "withdrawToEnrollmentRate": 1
    })
}

fn extra_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,12}".prop_map(Value::from),
        prop::collection::vec(any::<i32>(), 0..4).prop_map(Value::from),
    ]
}

/// Keys that no record declares.
fn extra_keys() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(("x_[a-z]{1,8}", extra_value()), 0..6)
}

fn with_extras(mut base: Value, extras: &[(String, Value)]) -> Value {
    if let Value::Object(map) = &mut base {
        for (k, v) in extras {
            map.insert(k.clone(), v.clone());
        }
    }
    base
}

/// Split the sample's keys by `mask`: selected keys are dropped in one copy
/// and set to `null` in the other.
fn drop_and_null(sample: &Value, mask: u64) -> (Value, Value) {
    let mut dropped = Map::new();
    let mut nulled = Map::new();
    if let Value::Object(map) = sample {
        for (i, (k, v)) in map.iter().enumerate() {
            if mask & (1 << i) != 0 {
                nulled.insert(k.clone(), Value::Null);
            } else {
                dropped.insert(k.clone(), v.clone());
                nulled.insert(k.clone(), v.clone());
            }
        }
    }
    (Value::Object(dropped), Value::Object(nulled))
}

fn check_unknown_keys<T>(sample: Value, extras: &[(String, Value)]) -> Result<(), TestCaseError>
where
    T: DeserializeOwned + PartialEq + Debug,
{
    let plain: T = map_record(sample.clone()).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let noisy: T = map_record(with_extras(sample, extras))
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(plain, noisy);
    Ok(())
}

fn check_missing_keys<T>(sample: Value, mask: u64) -> Result<(), TestCaseError>
where
    T: DeserializeOwned + PartialEq + Debug + Default,
{
    let key_count = sample.as_object().map_or(0, Map::len);
    let (dropped, nulled) = drop_and_null(&sample, mask);
    let from_dropped: T = map_record(dropped).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let from_nulled: T = map_record(nulled).map_err(|e| TestCaseError::fail(e.to_string()))?;
    if (0..key_count).all(|i| mask & (1 << i) != 0) {
        prop_assert_eq!(&from_dropped, &T::default());
    }
    prop_assert_eq!(from_dropped, from_nulled);
    Ok(())
}

macro_rules! record_properties {
    ($($name:ident: $record:ty => $sample:expr;)+) => {
        $(
            mod $name {
                use super::*;

                #[test]
                fn sample_maps() {
                    map_record::<$record>($sample).unwrap();
                }

                #[test]
                fn empty_object_is_default() {
                    let record: $record = map_record(json!({})).unwrap();
                    assert_eq!(record, <$record>::default());
                }

                proptest! {
                    #[test]
                    fn unknown_keys_are_ignored(extras in extra_keys()) {
                        check_unknown_keys::<$record>($sample, &extras)?;
                    }

                    #[test]
                    fn missing_keys_map_like_nulls(mask in any::<u64>()) {
                        check_missing_keys::<$record>($sample, mask)?;
                    }
                }
            }
        )+
    };
}

record_properties! {
    transaction_record: Transaction => transaction();
    bill_record: Bill => bill();
    refund_bill_record: RefundBill => refund_bill();
    limit_record: Limit => limit();
    identification_record: Identification => identification();
    statistic_record: Statistic => statistic();
    account_info_record: AccountInfo => account_info();
    balance_record: Balance => balance();
    order_details_record: OrderDetails => order_details();
    payment_info_record: PaymentInfo => payment_info();
    account_record: Account => account();
    restriction_record: Restriction => restriction();
    commission_record: Commission => commission();
}

proptest! {
    #[test]
    fn missing_optional_keys_take_defaults(drop_max in any::<bool>(), drop_interval in any::<bool>()) {
        let mut limit = limit();
        if drop_max {
            limit.as_object_mut().unwrap().remove("max");
        }
        if drop_interval {
            limit.as_object_mut().unwrap().remove("interval");
        }
        let limits: Vec<Limit> = map_records(json!([limit])).unwrap();
        prop_assert_eq!(limits[0].max, if drop_max { 0.0 } else { 100.0 });
        prop_assert_eq!(limits[0].interval.date_from.is_none(), drop_interval);
        prop_assert_eq!(limits[0].limit_type.as_str(), "TURNOVER");
    }
}
