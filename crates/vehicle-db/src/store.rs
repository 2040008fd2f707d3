//! Vehicle store trait

use async_trait::async_trait;

use crate::error::DbError;
use crate::filter::VehicleFilter;
use crate::models::{NewVehicle, Vehicle};

/// Query client for the `vehicles` record type
///
/// Implementations perform exactly one round trip per call. Mutations on a
/// key that does not exist fail with `DbError::NotFound`.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// First vehicle matching the filter
    async fn find_first(&self, filter: &VehicleFilter) -> Result<Option<Vehicle>, DbError>;

    /// Every vehicle matching the filter
    async fn find_many(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>, DbError>;

    /// Set the status of a vehicle, returning the updated record
    async fn update_status(&self, id: i64, stored: &str) -> Result<Vehicle, DbError>;

    /// Delete a vehicle by plate, returning its prior state
    async fn delete_by_plate(&self, plate: &str) -> Result<Vehicle, DbError>;

    /// Insert a new vehicle
    async fn insert(&self, vehicle: NewVehicle) -> Result<Vehicle, DbError>;
}
