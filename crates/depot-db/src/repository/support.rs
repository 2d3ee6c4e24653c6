//! Statements and decoding shared by every repository.
//!
//! Table and column names passed here are always `&'static str` constants
//! from the repositories, never caller input, so formatting them into SQL
//! is safe. Values are always bound.

use depot_core::EntityId;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use super::Attribute;
use crate::error::{DbError, DbResult};

/// Parses a stored identifier column.
pub(crate) fn decode_id(table: &'static str, column: &'static str, raw: &str) -> DbResult<EntityId> {
    Uuid::parse_str(raw).map_err(|e| DbError::decode(table, column, e.to_string()))
}

/// Parses a nullable identifier column.
pub(crate) fn decode_optional_id(
    table: &'static str,
    column: &'static str,
    raw: Option<&str>,
) -> DbResult<Option<EntityId>> {
    raw.map(|value| decode_id(table, column, value)).transpose()
}

/// Resolves the indexed column for an attribute, rejecting attributes the
/// table has no index for.
pub(crate) fn lookup_column(
    table: &'static str,
    supported: &[Attribute],
    attribute: Attribute,
) -> DbResult<&'static str> {
    if supported.contains(&attribute) {
        Ok(attribute.column())
    } else {
        Err(DbError::UnsupportedAttribute { table, attribute })
    }
}

pub(crate) async fn count_where(
    pool: &SqlitePool,
    table: &'static str,
    column: &'static str,
    value: &str,
) -> DbResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1");
    let count: i64 = sqlx::query_scalar(&sql).bind(value).fetch_one(pool).await?;

    debug!(table, column, count, "Counted rows by attribute");
    Ok(count)
}

pub(crate) async fn ids_where(
    pool: &SqlitePool,
    table: &'static str,
    column: &'static str,
    value: &str,
) -> DbResult<Vec<EntityId>> {
    let sql = format!("SELECT id FROM {table} WHERE {column} = ?1");
    let raw: Vec<String> = sqlx::query_scalar(&sql).bind(value).fetch_all(pool).await?;

    raw.iter().map(|id| decode_id(table, "id", id)).collect()
}

pub(crate) async fn exists(pool: &SqlitePool, table: &'static str, id: EntityId) -> DbResult<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)");
    let found: bool = sqlx::query_scalar(&sql)
        .bind(id.to_string())
        .fetch_one(pool)
        .await?;
    Ok(found)
}

pub(crate) async fn delete_by_id(
    pool: &SqlitePool,
    table: &'static str,
    id: EntityId,
) -> DbResult<()> {
    let sql = format!("DELETE FROM {table} WHERE id = ?1");
    let result = sqlx::query(&sql)
        .bind(id.to_string())
        .execute(pool)
        .await?;

    debug!(table, id = %id, rows = result.rows_affected(), "Deleted by id");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_id_reports_column() {
        let err = decode_id("products", "category_id", "garbage").unwrap_err();
        assert!(matches!(
            err,
            DbError::Decode {
                table: "products",
                column: "category_id",
                ..
            }
        ));
    }

    #[test]
    fn test_decode_optional_id() {
        let id = Uuid::new_v4();
        let raw = id.to_string();

        assert_eq!(decode_optional_id("t", "c", None).unwrap(), None);
        assert_eq!(
            decode_optional_id("t", "c", Some(raw.as_str())).unwrap(),
            Some(id)
        );
        assert!(decode_optional_id("t", "c", Some("x")).is_err());
    }

    #[test]
    fn test_lookup_column_rejects_unindexed_attribute() {
        assert_eq!(
            lookup_column("products", &[Attribute::Name, Attribute::Sku], Attribute::Sku).unwrap(),
            "sku"
        );
        assert!(matches!(
            lookup_column("categories", &[Attribute::Name], Attribute::Sku),
            Err(DbError::UnsupportedAttribute {
                table: "categories",
                attribute: Attribute::Sku
            })
        ));
    }
}
