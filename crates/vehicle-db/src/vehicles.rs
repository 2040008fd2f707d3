//! Vehicle repository facade
//!
//! Named lookups and mutations over a [`VehicleStore`]. Every operation comes
//! in two forms:
//!
//! - `try_*` returns `Result<Option<_>, DbError>` and keeps "nothing matched"
//!   (`Ok(None)`) apart from a store fault (`Err`).
//! - The plain form runs the `try_*` call through a guard that logs a fault
//!   with the operation name and returns the operation's sentinel (`None` or
//!   an empty `Vec`). It never returns an error.
//!
//! The plain form cannot tell an outage apart from an empty result. Callers
//! that need to alert on store faults should use the `try_*` form.

use std::sync::Arc;

use tracing::{debug, error};

use crate::error::DbError;
use crate::filter::VehicleFilter;
use crate::models::{NewVehicle, Vehicle, VehicleRef, VehicleSummary};
use crate::store::VehicleStore;

/// Vehicle lookups and mutations with fault-to-sentinel normalization
#[derive(Clone)]
pub struct VehicleRepository {
    store: Arc<dyn VehicleStore>,
}

impl VehicleRepository {
    /// Create a repository over the given store
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    // ==================== Typed Operations ====================

    /// Look up a vehicle reference by id
    pub async fn try_get_vehicle_by_id(&self, id: i64) -> Result<Option<VehicleRef>, DbError> {
        self.find_ref(VehicleFilter::Id(id)).await
    }

    /// Look up a vehicle reference by id, only if `owner` owns it
    pub async fn try_get_vehicle_owner(
        &self,
        id: i64,
        owner: i64,
    ) -> Result<Option<VehicleRef>, DbError> {
        self.find_ref(VehicleFilter::IdAndOwner { id, owner }).await
    }

    /// Get a vehicle by id, only if its status equals `status`
    pub async fn try_get_vehicle_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<Option<Vehicle>, DbError> {
        self.store
            .find_first(&VehicleFilter::IdAndStatus {
                id,
                stored: status.to_string(),
            })
            .await
    }

    /// Get a vehicle by plate
    pub async fn try_get_vehicle_plate(&self, plate: &str) -> Result<Option<Vehicle>, DbError> {
        self.store
            .find_first(&VehicleFilter::Plate(plate.to_string()))
            .await
    }

    /// List every vehicle of an owner
    pub async fn try_get_owned_vehicles(&self, owner: i64) -> Result<Vec<VehicleSummary>, DbError> {
        let vehicles = self.store.find_many(&VehicleFilter::Owner(owner)).await?;
        Ok(vehicles.into_iter().map(VehicleSummary::from).collect())
    }

    /// Set the status of a vehicle
    pub async fn try_set_vehicle_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<Option<Vehicle>, DbError> {
        absent_if_not_found(self.store.update_status(id, status).await)
    }

    /// Delete a vehicle by plate, returning its prior state
    pub async fn try_delete_vehicle(&self, plate: &str) -> Result<Option<Vehicle>, DbError> {
        absent_if_not_found(self.store.delete_by_plate(plate).await)
    }

    /// Register a new vehicle
    pub async fn insert_vehicle(&self, vehicle: NewVehicle) -> Result<Vehicle, DbError> {
        self.store.insert(vehicle).await
    }

    // ==================== Sentinel Operations ====================

    /// Look up a vehicle reference by id. `None` if absent or on failure.
    pub async fn get_vehicle_by_id(&self, id: i64) -> Option<VehicleRef> {
        or_sentinel("getVehicleById", self.try_get_vehicle_by_id(id).await)
    }

    /// Check that `owner` owns vehicle `id`. `None` on mismatch or failure.
    pub async fn get_vehicle_owner(&self, id: i64, owner: i64) -> Option<VehicleRef> {
        or_sentinel(
            "getVehicleOwner",
            self.try_get_vehicle_owner(id, owner).await,
        )
    }

    /// Get a vehicle whose status equals `status`. `None` otherwise.
    pub async fn get_vehicle_status(&self, id: i64, status: &str) -> Option<Vehicle> {
        or_sentinel(
            "getVehicleStatus",
            self.try_get_vehicle_status(id, status).await,
        )
    }

    /// Get a vehicle by plate. `None` if absent or on failure.
    pub async fn get_vehicle_plate(&self, plate: &str) -> Option<Vehicle> {
        or_sentinel("getVehiclePlate", self.try_get_vehicle_plate(plate).await)
    }

    /// List an owner's vehicles. Empty on failure.
    pub async fn get_owned_vehicles(&self, owner: i64) -> Vec<VehicleSummary> {
        or_sentinel("getOwnedVehicles", self.try_get_owned_vehicles(owner).await)
    }

    /// Set the status of a vehicle. `None` if the id is unknown or on failure.
    pub async fn set_vehicle_status(&self, id: i64, status: &str) -> Option<Vehicle> {
        or_sentinel(
            "setVehicleStatus",
            self.try_set_vehicle_status(id, status).await,
        )
    }

    /// Delete a vehicle by plate. `None` if the plate is unknown or on failure.
    pub async fn delete_vehicle(&self, plate: &str) -> Option<Vehicle> {
        or_sentinel("deleteVehicle", self.try_delete_vehicle(plate).await)
    }

    async fn find_ref(&self, filter: VehicleFilter) -> Result<Option<VehicleRef>, DbError> {
        let vehicle = self.store.find_first(&filter).await?;
        Ok(vehicle.as_ref().map(VehicleRef::from))
    }
}

/// Treat a mutation on a missing key as absence rather than a fault
fn absent_if_not_found<T>(result: Result<T, DbError>) -> Result<Option<T>, DbError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            debug!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Log a store fault and fall back to the empty value
fn or_sentinel<T: Default>(operation: &'static str, result: Result<T, DbError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!(operation, error = %e, "Vehicle store operation failed");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_becomes_absent() {
        let result: Result<i64, DbError> = Err(DbError::NotFound("vehicle with id 9".to_string()));
        assert!(matches!(absent_if_not_found(result), Ok(None)));

        let result: Result<i64, DbError> = Ok(4);
        assert!(matches!(absent_if_not_found(result), Ok(Some(4))));
    }

    #[test]
    fn test_other_errors_stay_errors() {
        let result: Result<i64, DbError> = Err(DbError::Duplicate("ABC123".to_string()));
        assert!(matches!(
            absent_if_not_found(result),
            Err(DbError::Duplicate(_))
        ));
    }

    #[test]
    fn test_or_sentinel_defaults() {
        let fault = || DbError::Migration("boom".to_string());

        let single: Option<VehicleRef> = or_sentinel("test", Err(fault()));
        assert!(single.is_none());

        let many: Vec<VehicleSummary> = or_sentinel("test", Err(fault()));
        assert!(many.is_empty());

        let found = or_sentinel("test", Ok(Some(VehicleRef { id: 1 })));
        assert_eq!(found, Some(VehicleRef { id: 1 }));
    }
}
