//! Taxi order domain module.
//!
//! Business rules for taxi orders, implemented purely as deterministic domain
//! logic (no IO, no storage). The [`TaxiService`] facade is the only layer that
//! logs.

pub mod config;
pub mod driver;
pub mod order;
pub mod repository;
pub mod service;
pub mod values;

pub use config::TaxiConfig;
pub use driver::{Driver, DriverId};
pub use order::{OrderId, TaxiOrder, TaxiOrderCommand, TaxiOrderEvent, TaxiOrderStatus};
pub use repository::{DriverRepository, MockDriverRepository};
pub use service::TaxiService;
pub use values::{Address, Car, Name};
