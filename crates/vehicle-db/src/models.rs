//! Database models

use crate::utils::parse_datetime_or_now;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// Vehicle model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i64,
    /// Registration plate, unique across all vehicles
    pub plate: String,
    /// Owning entity. Advisory only, no referential check is made.
    pub owner: i64,
    pub model: String,
    /// Status or location tag (e.g. "garage", "impounded")
    pub stored: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Bare reference to an existing vehicle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleRef {
    pub id: i64,
}

/// Vehicle listing row, without bookkeeping timestamps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleSummary {
    pub id: i64,
    pub plate: String,
    pub owner: i64,
    pub model: String,
    pub stored: String,
}

/// New vehicle (for insertion)
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub plate: String,
    pub owner: i64,
    pub model: String,
    pub stored: String,
}

impl From<&Vehicle> for VehicleRef {
    fn from(vehicle: &Vehicle) -> Self {
        VehicleRef { id: vehicle.id }
    }
}

impl From<Vehicle> for VehicleSummary {
    fn from(vehicle: Vehicle) -> Self {
        VehicleSummary {
            id: vehicle.id,
            plate: vehicle.plate,
            owner: vehicle.owner,
            model: vehicle.model,
            stored: vehicle.stored,
        }
    }
}

// ==================== TryFrom Implementations ====================

impl TryFrom<&sqlx::sqlite::SqliteRow> for Vehicle {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Vehicle {
            id: row.try_get("id")?,
            plate: row.try_get("plate")?,
            owner: row.try_get("owner")?,
            model: row.try_get("model")?,
            stored: row.try_get("stored")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
            updated_at: parse_datetime_or_now(&row.try_get::<String, _>("updated_at")?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle() -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: 1,
            plate: "ABC123".to_string(),
            owner: 5,
            model: "sedan".to_string(),
            stored: "garage".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_vehicle_ref_keeps_only_id() {
        let vehicle = sample_vehicle();
        assert_eq!(VehicleRef::from(&vehicle), VehicleRef { id: 1 });
    }

    #[test]
    fn test_summary_drops_timestamps() {
        let summary = VehicleSummary::from(sample_vehicle());
        assert_eq!(
            summary,
            VehicleSummary {
                id: 1,
                plate: "ABC123".to_string(),
                owner: 5,
                model: "sedan".to_string(),
                stored: "garage".to_string(),
            }
        );
    }
}
