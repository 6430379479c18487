//! Shared helper functions for SQLite repositories.

use crate::db::{ListQuery, SortOrder};

/// Validate and map a sort field to the actual column name.
/// Returns None for invalid fields (falls back to default).
pub fn validate_sort_field(field: &str, allowed: &[&str]) -> Option<&'static str> {
    for &allowed_field in allowed {
        if field == allowed_field {
            // Return static str to avoid lifetime issues
            return match field {
                "name" => Some("name"),
                "symbol" => Some("symbol"),
                "activity_type" => Some("activity_type"),
                "amount" => Some("amount"),
                "trade_date" => Some("trade_date"),
                "settlement_date" => Some("settlement_date"),
                "started_at" => Some("started_at"),
                "created_at" => Some("created_at"),
                "updated_at" => Some("updated_at"),
                _ => None,
            };
        }
    }
    None
}

/// Build ORDER BY clause from ListQuery parameters.
pub fn build_order_clause(query: &ListQuery, allowed_fields: &[&str], default_field: &str) -> String {
    let sort_field = query
        .sort_by
        .as_deref()
        .and_then(|f| validate_sort_field(f, allowed_fields))
        .unwrap_or(default_field);

    let order = match query.sort_order.unwrap_or(SortOrder::Asc) {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    format!("ORDER BY {} {}", sort_field, order)
}

/// Build LIMIT/OFFSET clause from ListQuery parameters.
/// Note: SQL requires LIMIT when using OFFSET. If offset is provided without limit,
/// we use LIMIT -1 (SQLite's "no limit" value).
pub fn build_limit_offset_clause(query: &ListQuery) -> String {
    let mut clause = String::new();

    let has_offset = query.offset.is_some_and(|o| o > 0);

    if let Some(limit) = query.limit {
        clause.push_str(&format!(" LIMIT {}", limit));
    } else if has_offset {
        // SQLite requires LIMIT when using OFFSET
        clause.push_str(" LIMIT -1");
    }

    if has_offset {
        clause.push_str(&format!(" OFFSET {}", query.offset.unwrap()));
    }

    clause
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_defaults() {
        let query = ListQuery::default();
        assert_eq!(
            build_order_clause(&query, &["trade_date"], "trade_date"),
            "ORDER BY trade_date ASC"
        );
    }

    #[test]
    fn test_order_clause_rejects_unknown_fields() {
        let query = ListQuery {
            sort_by: Some("1; DROP TABLE activity".to_string()),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        assert_eq!(
            build_order_clause(&query, &["trade_date", "amount"], "trade_date"),
            "ORDER BY trade_date DESC"
        );
    }

    #[test]
    fn test_limit_offset_clause() {
        let query = ListQuery {
            limit: Some(20),
            offset: Some(40),
            ..Default::default()
        };
        assert_eq!(build_limit_offset_clause(&query), " LIMIT 20 OFFSET 40");
    }

    #[test]
    fn test_offset_without_limit_uses_sqlite_no_limit() {
        let query = ListQuery {
            offset: Some(10),
            ..Default::default()
        };
        assert_eq!(build_limit_offset_clause(&query), " LIMIT -1 OFFSET 10");
    }

    #[test]
    fn test_zero_offset_is_dropped() {
        let query = ListQuery {
            limit: Some(5),
            offset: Some(0),
            ..Default::default()
        };
        assert_eq!(build_limit_offset_clause(&query), " LIMIT 5");
    }
}
