use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

/// Whether a cost is booked against a workplace or an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostKind {
    Workplace,
    Employee,
}

impl std::fmt::Display for CostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostKind::Workplace => write!(f, "workplace"),
            CostKind::Employee => write!(f, "employee"),
        }
    }
}

impl FromStr for CostKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "workplace" => Ok(CostKind::Workplace),
            "employee" => Ok(CostKind::Employee),
            _ => Err(format!("Invalid cost type: {}", s)),
        }
    }
}

/// A cost row together with its owning entity's display name, as produced
/// by the manager-wide listing queries.
#[derive(Debug, Clone, FromRow)]
pub struct ListedCost {
    pub id: String,
    pub entity_id: String,
    pub entity_name: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A bare cost row (workplace_costs or employee_costs share this shape)
#[derive(Debug, Clone, FromRow)]
pub struct CostEntry {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct CostResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CostKind,
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

impl CostResponse {
    pub fn from_listed(kind: CostKind, row: ListedCost) -> Self {
        let (workplace_id, workplace_name, employee_id, employee_name) = match kind {
            CostKind::Workplace => (Some(row.entity_id), Some(row.entity_name), None, None),
            CostKind::Employee => (None, None, Some(row.entity_id), Some(row.entity_name)),
        };

        Self {
            id: row.id,
            kind,
            workplace_id,
            workplace_name,
            employee_id,
            employee_name,
            description: row.description,
            amount: row.amount,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Short form used by the nested `/employees/{id}/costs` and
/// `/workplaces/{id}/costs` listings.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl From<&CostEntry> for EntryResponse {
    fn from(entry: &CostEntry) -> Self {
        Self {
            id: entry.id.clone(),
            description: entry.description.clone(),
            amount: entry.amount,
            date: entry.date,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCostRequest {
    #[serde(rename = "type")]
    pub kind: CostKind,
    pub workplace_id: Option<String>,
    pub employee_id: Option<String>,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Payload for the nested cost routes, where the owning entity comes from
/// the URL instead of the body.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Allow-listed update fields
#[derive(Debug, Deserialize)]
pub struct UpdateCostRequest {
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_kind_round_trip() {
        assert_eq!(CostKind::from_str("workplace").unwrap(), CostKind::Workplace);
        assert_eq!(CostKind::from_str("employee").unwrap(), CostKind::Employee);
        assert!(CostKind::from_str("vendor").is_err());
        assert_eq!(CostKind::Workplace.to_string(), "workplace");
    }

    #[test]
    fn test_listed_cost_response_keeps_only_owner_fields() {
        let row = ListedCost {
            id: "c1".to_string(),
            entity_id: "w1".to_string(),
            entity_name: "Warsztat".to_string(),
            description: "paint".to_string(),
            amount: rust_decimal::Decimal::new(1050, 2),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            created_at: NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        };

        let response = CostResponse::from_listed(CostKind::Workplace, row);
        assert_eq!(response.workplace_id.as_deref(), Some("w1"));
        assert!(response.employee_id.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "workplace");
        assert!(json.get("employee_id").is_none());
        assert_eq!(json["amount"], serde_json::json!(10.5));
        assert_eq!(json["date"], "2024-03-05");
    }
}
