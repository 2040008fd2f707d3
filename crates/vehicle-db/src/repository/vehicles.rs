//! Vehicle operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use tracing::debug;

use crate::error::DbError;
use crate::filter::VehicleFilter;
use crate::models::{NewVehicle, Vehicle};
use crate::repository::Database;
use crate::store::VehicleStore;

const VEHICLE_COLUMNS: &str = "id, plate, owner, model, stored, created_at, updated_at";

#[async_trait]
impl VehicleStore for Database {
    async fn find_first(&self, filter: &VehicleFilter) -> Result<Option<Vehicle>, DbError> {
        debug!(filter = filter.name(), "Finding first vehicle");

        let sql = format!(
            "SELECT {} FROM vehicles WHERE {} ORDER BY id LIMIT 1",
            VEHICLE_COLUMNS,
            filter.where_clause()
        );
        let result = filter
            .bind(sqlx::query(&sql))
            .fetch_optional(&self.pool)
            .await?;

        result
            .map(|row| Vehicle::try_from(&row).map_err(DbError::from))
            .transpose()
    }

    async fn find_many(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>, DbError> {
        debug!(filter = filter.name(), "Finding vehicles");

        let sql = format!(
            "SELECT {} FROM vehicles WHERE {} ORDER BY id",
            VEHICLE_COLUMNS,
            filter.where_clause()
        );
        let rows = filter
            .bind(sqlx::query(&sql))
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| Vehicle::try_from(row).map_err(DbError::from))
            .collect()
    }

    async fn update_status(&self, id: i64, stored: &str) -> Result<Vehicle, DbError> {
        let now = Utc::now();
        let sql = format!(
            r#"
            UPDATE vehicles
            SET stored = ?, updated_at = ?
            WHERE id = ?
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        );
        let result = sqlx::query(&sql)
            .bind(stored)
            .bind(now.to_rfc3339())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match result {
            Some(row) => Ok(Vehicle::try_from(&row)?),
            None => Err(DbError::NotFound(format!("vehicle with id {}", id))),
        }
    }

    async fn delete_by_plate(&self, plate: &str) -> Result<Vehicle, DbError> {
        let sql = format!("DELETE FROM vehicles WHERE plate = ? RETURNING {}", VEHICLE_COLUMNS);
        let result = sqlx::query(&sql)
            .bind(plate)
            .fetch_optional(&self.pool)
            .await?;

        match result {
            Some(row) => Ok(Vehicle::try_from(&row)?),
            None => Err(DbError::NotFound(format!("vehicle with plate '{}'", plate))),
        }
    }

    async fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO vehicles (plate, owner, model, stored, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&vehicle.plate)
        .bind(vehicle.owner)
        .bind(&vehicle.model)
        .bind(&vehicle.stored)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                DbError::Duplicate(format!("Vehicle '{}' already exists", vehicle.plate))
            }
            e => DbError::from(e),
        })?;

        let id: i64 = result.get("id");

        Ok(Vehicle {
            id,
            plate: vehicle.plate,
            owner: vehicle.owner,
            model: vehicle.model,
            stored: vehicle.stored,
            created_at: now,
            updated_at: now,
        })
    }
}
