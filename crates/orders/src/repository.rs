//! Driver lookup.

use taxi_core::{DomainError, DomainResult};

use crate::driver::{Driver, DriverId};
use crate::values::{Car, Name};

/// Source of drivers by id.
pub trait DriverRepository {
    /// Fails with `NotFound` when the id is unknown.
    fn find_driver(&self, id: DriverId) -> DomainResult<Driver>;
}

impl<R: DriverRepository + ?Sized> DriverRepository for &R {
    fn find_driver(&self, id: DriverId) -> DomainResult<Driver> {
        (**self).find_driver(id)
    }
}

/// Repository that knows exactly one driver.
#[derive(Debug, Clone)]
pub struct MockDriverRepository {
    driver: Driver,
}

impl MockDriverRepository {
    pub fn new(driver: Driver) -> Self {
        Self { driver }
    }
}

impl Default for MockDriverRepository {
    /// Driver 15, Drive Driverson, Lada sedan A123BT 66.
    fn default() -> Self {
        Self::new(Driver::new(
            DriverId::new(15),
            Name::new(Some("Drive"), Some("Driverson")),
            Car::new(Some("Lada sedan"), Some("A123BT 66"), Some("Baklazhan")),
        ))
    }
}

impl DriverRepository for MockDriverRepository {
    fn find_driver(&self, id: DriverId) -> DomainResult<Driver> {
        if id == self.driver.driver_id() {
            Ok(self.driver.clone())
        } else {
            Err(DomainError::not_found(format!("Unknown driver id {id}")))
        }
    }
}
