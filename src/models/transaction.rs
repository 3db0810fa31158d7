use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::errors::RecordError;
use crate::models::{TransactionDraft, TransactionRecord, TransactionType, UNCATEGORIZED};
use crate::types::{parse_amount, MonthKey, OwnerId, TransactionId};

const DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A validated transaction snapshot as consumed by the aggregation engine.
///
/// Records are only ever read by the engine. A `date` of `None` means the
/// source value was missing or unparseable; such records are left out of
/// time-windowed and monthly views but still count toward totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Store assigned identifier.
    pub id: TransactionId,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Free-form label, exact-matched by the category filter.
    pub category: String,
    /// Always zero or greater.
    pub amount: Decimal,
    pub description: Option<String>,
    /// When the transaction happened, in the reporting calendar.
    pub date: Option<NaiveDateTime>,
    pub owner_id: Option<OwnerId>,
    pub owner_email: Option<String>,
    pub owner_name: Option<String>
}

impl Transaction {
    /// The calendar month this transaction is bucketed into.
    pub fn month(&self) -> Option<MonthKey> {
        self.date.map(MonthKey::from_date)
    }

    /// Replaces every editable field with the draft's values.
    pub fn apply(&mut self, draft: &TransactionDraft) {
        self.transaction_type = draft.transaction_type;
        self.category = draft.category.trim().to_string();
        self.amount = draft.amount;
        self.description = draft.description.clone();
        self.date = draft.date;
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = RecordError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let id = record.id
            .filter(|id| !id.trim().is_empty())
            .ok_or(RecordError::MissingId)?;

        let transaction_type = match record.transaction_type.as_deref() {
            None => return Err(RecordError::MissingType { id }),
            Some(raw) => raw.parse().map_err(|_| RecordError::UnknownType {
                id: id.clone(),
                value: raw.to_string()
            })?
        };

        let category = match record.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category.to_string(),
            _ => {
                warn!("Transaction [{id}] has no category, using '{UNCATEGORIZED}'");
                UNCATEGORIZED.to_string()
            }
        };

        let amount = coerce_amount(&id, record.amount.as_deref());

        let date = match record.date.as_deref() {
            Some(raw) => {
                let parsed = parse_transaction_date(raw);
                if parsed.is_none() {
                    warn!("Transaction [{id}] has an unparseable date '{raw}'");
                }
                parsed
            }
            None => {
                warn!("Transaction [{id}] has no date");
                None
            }
        };

        Ok(Transaction {
            id,
            transaction_type,
            category,
            amount,
            description: record.description.filter(|description| !description.trim().is_empty()),
            date,
            owner_id: record.owner_id,
            owner_email: record.owner_email,
            owner_name: record.owner_name
        })
    }
}

/// Parses a transaction date in any of the shapes the store hands out.
///
/// Accepts `YYYY-MM-DD`, local date-times with or without seconds, and RFC 3339
/// timestamps. For the latter the wall-clock time in the stated offset is kept,
/// so a timestamp never moves into a neighbouring month.
pub fn parse_transaction_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_local());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date_time);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn coerce_amount(id: &str, raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        warn!("Transaction [{id}] has no amount, counting it as 0");
        return Decimal::ZERO
    };

    match parse_amount(raw) {
        Ok(amount) if amount > Decimal::ZERO => amount,
        Ok(amount) => {
            warn!("Transaction [{id}] has a non-positive amount {amount}, counting it as 0");
            Decimal::ZERO
        }
        Err(error) => {
            warn!("Transaction [{id}] has an unparseable amount '{raw}', counting it as 0 | {error}");
            Decimal::ZERO
        }
    }
}
