//! Typed vehicle filters
//!
//! Each lookup the repository performs has its own variant, so a query can
//! only ever constrain the columns that lookup is meant to constrain.

use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

pub(crate) type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Field-equality constraints over the `vehicles` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleFilter {
    /// Match on primary key
    Id(i64),
    /// Match on primary key and claimed owner
    IdAndOwner { id: i64, owner: i64 },
    /// Match on primary key and current status
    IdAndStatus { id: i64, stored: String },
    /// Match on registration plate
    Plate(String),
    /// All vehicles of one owner
    Owner(i64),
}

impl VehicleFilter {
    /// SQL condition for this filter, with one `?` per bound value
    pub fn where_clause(&self) -> &'static str {
        match self {
            VehicleFilter::Id(_) => "id = ?",
            VehicleFilter::IdAndOwner { .. } => "id = ? AND owner = ?",
            VehicleFilter::IdAndStatus { .. } => "id = ? AND stored = ?",
            VehicleFilter::Plate(_) => "plate = ?",
            VehicleFilter::Owner(_) => "owner = ?",
        }
    }

    /// Bind values in the order `where_clause` expects them
    pub(crate) fn bind<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        match self {
            VehicleFilter::Id(id) => query.bind(*id),
            VehicleFilter::IdAndOwner { id, owner } => query.bind(*id).bind(*owner),
            VehicleFilter::IdAndStatus { id, stored } => query.bind(*id).bind(stored.as_str()),
            VehicleFilter::Plate(plate) => query.bind(plate.as_str()),
            VehicleFilter::Owner(owner) => query.bind(*owner),
        }
    }

    /// Short name used in log fields
    pub fn name(&self) -> &'static str {
        match self {
            VehicleFilter::Id(_) => "id",
            VehicleFilter::IdAndOwner { .. } => "id+owner",
            VehicleFilter::IdAndStatus { .. } => "id+stored",
            VehicleFilter::Plate(_) => "plate",
            VehicleFilter::Owner(_) => "owner",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_placeholders_match_bind_count() {
        let cases = [
            (VehicleFilter::Id(1), 1),
            (VehicleFilter::IdAndOwner { id: 1, owner: 5 }, 2),
            (
                VehicleFilter::IdAndStatus {
                    id: 1,
                    stored: "garage".to_string(),
                },
                2,
            ),
            (VehicleFilter::Plate("ABC123".to_string()), 1),
            (VehicleFilter::Owner(5), 1),
        ];

        for (filter, expected) in cases {
            assert_eq!(
                filter.where_clause().matches('?').count(),
                expected,
                "placeholder count for {}",
                filter.name()
            );
        }
    }

    #[test]
    fn test_status_filter_uses_stored_column() {
        let filter = VehicleFilter::IdAndStatus {
            id: 3,
            stored: "impounded".to_string(),
        };
        assert_eq!(filter.where_clause(), "id = ? AND stored = ?");
    }
}
