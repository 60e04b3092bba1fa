use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A revenue row. Belongs to a workplace, an employee, or both: rows with
/// both owners are employee revenue earned at that workplace, rows with only
/// an employee are direct revenue.
#[derive(Debug, Clone, FromRow)]
pub struct Revenue {
    pub id: String,
    pub workplace_id: Option<String>,
    pub employee_id: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Revenue row joined with owner display names
#[derive(Debug, Clone, FromRow)]
pub struct ListedRevenue {
    pub id: String,
    pub workplace_id: Option<String>,
    pub workplace_name: Option<String>,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    pub id: String,
    /// `workplace` when tied to a workplace, `employee` otherwise
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workplace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workplace_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ListedRevenue> for RevenueResponse {
    fn from(row: ListedRevenue) -> Self {
        let kind = if row.workplace_id.is_some() {
            "workplace"
        } else {
            "employee"
        };

        Self {
            id: row.id,
            kind,
            workplace_id: row.workplace_id,
            workplace_name: row.workplace_name,
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            description: row.description,
            amount: row.amount,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Body for revenue creation. At least one owner must be present; the
/// nested routes inject the owner taken from the URL.
#[derive(Debug, Deserialize)]
pub struct CreateRevenueRequest {
    pub workplace_id: Option<String>,
    pub employee_id: Option<String>,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Allow-listed update fields; ownership is fixed at creation
#[derive(Debug, Deserialize)]
pub struct UpdateRevenueRequest {
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn listed(workplace: bool, employee: bool) -> ListedRevenue {
        let ts = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        ListedRevenue {
            id: "r1".to_string(),
            workplace_id: workplace.then(|| "w1".to_string()),
            workplace_name: workplace.then(|| "Magazyn".to_string()),
            employee_id: employee.then(|| "e1".to_string()),
            employee_name: employee.then(|| "Jan Kowalski".to_string()),
            description: "delivery".to_string(),
            amount: dec!(250.00),
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_kind_follows_workplace_ownership() {
        assert_eq!(RevenueResponse::from(listed(true, false)).kind, "workplace");
        assert_eq!(RevenueResponse::from(listed(true, true)).kind, "workplace");
        assert_eq!(RevenueResponse::from(listed(false, true)).kind, "employee");
    }

    #[test]
    fn test_amount_serializes_as_number() {
        let json = serde_json::to_value(RevenueResponse::from(listed(false, true))).unwrap();
        assert_eq!(json["amount"], serde_json::json!(250.0));
        assert!(json.get("workplace_id").is_none());
    }
}
