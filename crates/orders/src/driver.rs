//! Driver entity.

use serde::{Deserialize, Serialize};

use taxi_core::Entity;

use crate::values::{Car, Name};

/// Driver identifier. `-1` is reserved for "no driver".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(i32);

impl DriverId {
    pub const UNASSIGNED: Self = Self(-1);

    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for DriverId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for DriverId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

static UNASSIGNED: Driver = Driver {
    id: DriverId::UNASSIGNED,
    name: Name::empty(),
    car: Car::empty(),
};

/// Entity: Driver. Compared by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    id: DriverId,
    name: Name,
    car: Car,
}

impl Driver {
    pub fn new(id: DriverId, name: Name, car: Car) -> Self {
        Self { id, name, car }
    }

    /// Placeholder read back when an order has no driver: id `-1`, empty name
    /// and car.
    pub fn unassigned() -> Self {
        UNASSIGNED.clone()
    }

    pub(crate) fn unassigned_ref() -> &'static Self {
        &UNASSIGNED
    }

    pub fn is_unassigned(&self) -> bool {
        self.id == DriverId::UNASSIGNED
    }

    pub fn driver_id(&self) -> DriverId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    /// `Id: .. DriverName: .. Color: .. CarModel: .. PlateNumber: ..`
    pub fn full_info(&self) -> String {
        let field = |value: &Option<String>| value.as_deref().unwrap_or_default().to_owned();
        [
            format!("Id: {}", self.id),
            format!("DriverName: {}", self.name.formatted()),
            format!("Color: {}", field(&self.car.color)),
            format!("CarModel: {}", field(&self.car.model)),
            format!("PlateNumber: {}", field(&self.car.plate_number)),
        ]
        .join(" ")
    }
}

impl Entity for Driver {
    type Id = DriverId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Driver {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Driver {}

impl core::hash::Hash for Driver {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driverson() -> Driver {
        Driver::new(
            DriverId::new(15),
            Name::new(Some("Drive"), Some("Driverson")),
            Car::new(Some("Lada sedan"), Some("A123BT 66"), Some("Baklazhan")),
        )
    }

    #[test]
    fn unassigned_driver_is_sentinel() {
        let driver = Driver::unassigned();
        assert!(driver.is_unassigned());
        assert_eq!(driver.driver_id().get(), -1);
        assert!(driver.name().is_empty());
        assert_eq!(driver.car(), &Car::empty());
    }

    #[test]
    fn drivers_compare_by_id_only() {
        let renamed = Driver::new(DriverId::new(15), Name::new(Some("Other"), Some("Person")), Car::empty());
        assert_eq!(driverson(), renamed);
        assert_ne!(driverson(), Driver::unassigned());
    }

    #[test]
    fn full_info_lists_driver_and_car() {
        assert_eq!(
            driverson().full_info(),
            "Id: 15 DriverName: Drive Driverson Color: Baklazhan CarModel: Lada sedan PlateNumber: A123BT 66"
        );
    }

    #[test]
    fn full_info_blanks_missing_car_details() {
        let driver = Driver::new(DriverId::new(3), Name::new(Some("A"), Some("B")), Car::empty());
        assert_eq!(
            driver.full_info(),
            "Id: 3 DriverName: A B Color:  CarModel:  PlateNumber: "
        );
    }
}
