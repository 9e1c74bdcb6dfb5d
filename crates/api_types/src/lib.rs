use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Success envelope used by every ledger endpoint.
///
/// The server always sends `success` and `message`; the client only relies
/// on `data`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Timestamps as sent by the ledger API.
///
/// Values carry an UTC offset when the database stores one; offset-less values
/// are taken as UTC.
pub mod timestamp {
    use chrono::{DateTime, FixedOffset, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn parse(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(value) => Ok(value),
            Err(err) => raw
                .parse::<NaiveDateTime>()
                .map(|naive| naive.and_utc().fixed_offset())
                .map_err(|_| err),
        }
    }

    pub fn serialize<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, FixedOffset};
        use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

        pub fn serialize<S>(
            value: &Option<DateTime<FixedOffset>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => serializer.serialize_some(&value.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(
            deserializer: D,
        ) -> Result<Option<DateTime<FixedOffset>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::parse(&raw).map_err(D::Error::custom))
                .transpose()
        }
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        /// Server-assigned identifier (UUID string).
        pub id: String,
        pub amount: f64,
        pub description: String,
        pub paid_by: String,
        #[serde(with = "crate::timestamp")]
        pub created_at: DateTime<FixedOffset>,
        #[serde(default, with = "crate::timestamp::option")]
        pub updated_at: Option<DateTime<FixedOffset>>,
    }

    /// Request body for `POST /expenses`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Must be > 0. The server rounds to two decimals.
        pub amount: f64,
        pub description: String,
        pub paid_by: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseList {
        pub expenses: Vec<Expense>,
        #[serde(default)]
        pub count: Option<usize>,
    }
}

pub mod balance {
    use super::*;

    /// Net position of one person across all recorded expenses.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Balance {
        pub person: String,
        pub total_paid: f64,
        pub total_share: f64,
        /// `total_paid - total_share`.
        pub balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceList {
        pub balances: Vec<Balance>,
    }
}

pub mod settlement {
    use super::*;

    /// A suggested payment `from_person -> to_person`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Settlement {
        pub from_person: String,
        pub to_person: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementList {
        pub settlements: Vec<Settlement>,
    }
}

pub mod error {
    use serde_json::Value;

    use super::*;

    /// Error body of a non-2xx response.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ErrorBody {
        #[serde(default)]
        pub detail: Option<Value>,
    }

    impl ErrorBody {
        /// Human readable detail, if the server supplied one.
        ///
        /// `detail` is usually a string; request validation failures carry a
        /// list of `{ "msg": ... }` objects instead.
        pub fn message(&self) -> Option<String> {
            match self.detail.as_ref()? {
                Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
                Value::Array(items) => {
                    let messages = items
                        .iter()
                        .filter_map(|item| item.get("msg").and_then(Value::as_str))
                        .collect::<Vec<_>>();
                    if messages.is_empty() {
                        None
                    } else {
                        Some(messages.join("; "))
                    }
                }
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ApiResponse, error::ErrorBody, expense::ExpenseList, settlement::SettlementList,
    };

    #[test]
    fn expense_list_accepts_naive_and_offset_timestamps() {
        let body = r#"{
            "success": true,
            "data": {
                "expenses": [
                    {"id": "a", "amount": 100.0, "description": "Dinner", "paid_by": "Shantanu",
                     "created_at": "2026-10-19T14:05:00.123456", "updated_at": "2026-10-19T14:05:00.123456"},
                    {"id": "b", "amount": 50.5, "description": "Taxi", "paid_by": "Sanket",
                     "created_at": "2026-10-19T14:05:00+05:30"}
                ],
                "count": 2
            },
            "message": "Expenses retrieved successfully"
        }"#;

        let parsed: ApiResponse<ExpenseList> = serde_json::from_str(body).unwrap();
        let expenses = parsed.data.expenses;
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].created_at.offset().local_minus_utc(), 0);
        assert!(expenses[0].updated_at.is_some());
        assert_eq!(expenses[1].created_at.offset().local_minus_utc(), 5 * 3600 + 1800);
        assert!(expenses[1].updated_at.is_none());
    }

    #[test]
    fn envelope_tolerates_missing_message() {
        let parsed: ApiResponse<SettlementList> =
            serde_json::from_str(r#"{"data": {"settlements": []}}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.message.is_none());
        assert!(parsed.data.settlements.is_empty());
    }

    #[test]
    fn error_body_reads_string_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Expense not found"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Expense not found"));
    }

    #[test]
    fn error_body_joins_validation_messages() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "amount"], "msg": "Amount must be positive"},
                           {"loc": ["body", "paid_by"], "msg": "paid_by cannot be empty"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some("Amount must be positive; paid_by cannot be empty")
        );
    }

    #[test]
    fn error_body_without_detail_has_no_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message().is_none());
        let blank: ErrorBody = serde_json::from_str(r#"{"detail": "  "}"#).unwrap();
        assert!(blank.message().is_none());
    }
}
