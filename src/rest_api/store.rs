//! # Car Store
//!
//! Storage seam for the REST handlers. Records reaching the store have
//! already passed the car schema.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::schema::CarRecord;

use super::errors::{RestError, RestResult};

/// A car with its store-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCar {
    pub id: u64,
    #[serde(flatten)]
    pub car: CarRecord,
}

/// Storage trait for car records
pub trait CarStore: Send + Sync {
    /// All cars, ordered by id
    fn list(&self) -> RestResult<Vec<StoredCar>>;

    /// One car by id
    fn get(&self, id: u64) -> RestResult<StoredCar>;

    /// Stores a new car and assigns its id
    fn create(&self, car: CarRecord) -> RestResult<StoredCar>;

    /// Replaces an existing car
    fn update(&self, id: u64, car: CarRecord) -> RestResult<StoredCar>;

    /// Removes a car
    fn delete(&self, id: u64) -> RestResult<()>;
}

#[derive(Debug, Default)]
struct Inventory {
    last_id: u64,
    cars: BTreeMap<u64, CarRecord>,
}

/// In-memory car store. Ids are sequential from 1 and never reused.
#[derive(Debug, Default)]
pub struct InMemoryCarStore {
    inventory: RwLock<Inventory>,
}

impl InMemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> RestError {
    RestError::Internal("Lock poisoned".to_string())
}

impl CarStore for InMemoryCarStore {
    fn list(&self) -> RestResult<Vec<StoredCar>> {
        let inventory = self.inventory.read().map_err(|_| poisoned())?;
        Ok(inventory
            .cars
            .iter()
            .map(|(id, car)| StoredCar {
                id: *id,
                car: car.clone(),
            })
            .collect())
    }

    fn get(&self, id: u64) -> RestResult<StoredCar> {
        let inventory = self.inventory.read().map_err(|_| poisoned())?;
        inventory
            .cars
            .get(&id)
            .map(|car| StoredCar {
                id,
                car: car.clone(),
            })
            .ok_or(RestError::NotFound(id))
    }

    fn create(&self, car: CarRecord) -> RestResult<StoredCar> {
        let mut inventory = self.inventory.write().map_err(|_| poisoned())?;
        inventory.last_id += 1;
        let id = inventory.last_id;
        inventory.cars.insert(id, car.clone());
        Ok(StoredCar { id, car })
    }

    fn update(&self, id: u64, car: CarRecord) -> RestResult<StoredCar> {
        let mut inventory = self.inventory.write().map_err(|_| poisoned())?;
        let slot = inventory.cars.get_mut(&id).ok_or(RestError::NotFound(id))?;
        *slot = car.clone();
        Ok(StoredCar { id, car })
    }

    fn delete(&self, id: u64) -> RestResult<()> {
        let mut inventory = self.inventory.write().map_err(|_| poisoned())?;
        inventory
            .cars
            .remove(&id)
            .map(|_| ())
            .ok_or(RestError::NotFound(id))
    }
}
