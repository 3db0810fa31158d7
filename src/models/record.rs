use serde::de::{self, Deserializer, MapAccess, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key serde_json uses to hand a number over as its original text.
const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// The loosely-typed wire shape handed out by the transaction store.
///
/// Every field is optional here; [`Transaction::try_from`](crate::models::Transaction)
/// decides what is fatal and what is coerced. `amount` and `id` accept either
/// JSON numbers or strings, and numbers keep their exact source digits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default, alias = "_id", deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub amount: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "userId", deserialize_with = "lenient_text")]
    pub owner_id: Option<String>,
    #[serde(default, alias = "userEmail")]
    pub owner_email: Option<String>,
    #[serde(default, alias = "userName")]
    pub owner_name: Option<String>
}

/// One CSV row, every cell taken verbatim as text.
///
/// CSV cells carry no type, so nothing here is inferred: `007` stays `007`
/// and long amounts keep every digit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "userId")]
    pub owner_id: Option<String>,
    #[serde(default, alias = "userEmail")]
    pub owner_email: Option<String>,
    #[serde(default, alias = "userName")]
    pub owner_name: Option<String>
}

impl From<CsvRecord> for TransactionRecord {
    fn from(record: CsvRecord) -> Self {
        let text = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        Self {
            id: text(record.id),
            transaction_type: text(record.transaction_type),
            category: text(record.category),
            amount: text(record.amount),
            description: text(record.description),
            date: text(record.date),
            owner_id: text(record.owner_id),
            owner_email: text(record.owner_email),
            owner_name: text(record.owner_name)
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientText)
}

struct LenientText;

impl<'de> Visitor<'de> for LenientText {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        match map.next_key::<String>()? {
            Some(key) if key == JSON_NUMBER_TOKEN => Ok(Some(map.next_value::<String>()?)),
            _ => Err(de::Error::invalid_type(Unexpected::Map, &self))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(LenientText)
    }
}
