//! Taxi order aggregate: lifecycle state machine, commands and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taxi_core::{Aggregate, AggregateRoot, Clock, DomainError, DomainResult, Event};

use crate::driver::{Driver, DriverId};
use crate::values::{Address, Name};

/// Format of `LastProgressTime` in [`TaxiOrder::short_order_info`].
pub const PROGRESS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Taxi order identifier, handed out sequentially by the service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u32);

impl OrderId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Taxi order status lifecycle.
///
/// ```text
/// WaitingForDriver --assign--> WaitingCarArrival --start--> InProgress --finish--> Finished
///        ^                            |
///        +---------unassign-----------+
/// cancel: any status except InProgress --> Canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxiOrderStatus {
    WaitingForDriver,
    WaitingCarArrival,
    InProgress,
    Finished,
    Canceled,
}

impl TaxiOrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaxiOrderStatus::WaitingForDriver => "WaitingForDriver",
            TaxiOrderStatus::WaitingCarArrival => "WaitingCarArrival",
            TaxiOrderStatus::InProgress => "InProgress",
            TaxiOrderStatus::Finished => "Finished",
            TaxiOrderStatus::Canceled => "Canceled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaxiOrderStatus::Finished | TaxiOrderStatus::Canceled)
    }
}

impl core::fmt::Display for TaxiOrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxiOrderCommand {
    UpdateDestination { destination: Address },
    AssignDriver { driver: Driver },
    UnassignDriver,
    Cancel,
    StartRide,
    FinishRide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxiOrderEvent {
    DestinationUpdated {
        order_id: OrderId,
        destination: Address,
    },
    DriverAssigned {
        order_id: OrderId,
        driver: Driver,
        occurred_at: DateTime<Utc>,
    },
    DriverUnassigned {
        order_id: OrderId,
        driver_id: DriverId,
    },
    OrderCanceled {
        order_id: OrderId,
        occurred_at: DateTime<Utc>,
    },
    RideStarted {
        order_id: OrderId,
        occurred_at: DateTime<Utc>,
    },
    RideFinished {
        order_id: OrderId,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for TaxiOrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TaxiOrderEvent::DestinationUpdated { .. } => "taxi.order.destination_updated",
            TaxiOrderEvent::DriverAssigned { .. } => "taxi.order.driver_assigned",
            TaxiOrderEvent::DriverUnassigned { .. } => "taxi.order.driver_unassigned",
            TaxiOrderEvent::OrderCanceled { .. } => "taxi.order.canceled",
            TaxiOrderEvent::RideStarted { .. } => "taxi.order.ride_started",
            TaxiOrderEvent::RideFinished { .. } => "taxi.order.ride_finished",
        }
    }

    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        match self {
            TaxiOrderEvent::DestinationUpdated { .. } | TaxiOrderEvent::DriverUnassigned { .. } => {
                None
            }
            TaxiOrderEvent::DriverAssigned { occurred_at, .. }
            | TaxiOrderEvent::OrderCanceled { occurred_at, .. }
            | TaxiOrderEvent::RideStarted { occurred_at, .. }
            | TaxiOrderEvent::RideFinished { occurred_at, .. } => Some(*occurred_at),
        }
    }
}

/// Aggregate root: TaxiOrder.
///
/// Owns the order lifecycle. Every mutator checks its guards first and reads
/// the clock only once the transition is accepted, so a rejected call leaves
/// the order untouched.
///
/// Guards are deliberately as permissive as the legacy service they replace:
/// the destination can be changed at any time, cancel is only refused while a
/// ride is in progress, and a ride can start from any status once a driver is
/// assigned.
#[derive(Debug, Clone, Serialize)]
pub struct TaxiOrder {
    id: OrderId,
    client_name: Name,
    start: Address,
    destination: Address,
    driver: Option<Driver>,
    status: TaxiOrderStatus,
    creation_time: DateTime<Utc>,
    driver_assignment_time: Option<DateTime<Utc>>,
    cancel_time: Option<DateTime<Utc>>,
    start_ride_time: Option<DateTime<Utc>>,
    finish_ride_time: Option<DateTime<Utc>>,
    version: u64,
}

impl TaxiOrder {
    /// New order waiting for a driver, without destination.
    pub fn create(id: OrderId, client_name: Name, start: Address, clock: &dyn Clock) -> Self {
        Self {
            id,
            client_name,
            start,
            destination: Address::empty(),
            driver: None,
            status: TaxiOrderStatus::WaitingForDriver,
            creation_time: clock.now(),
            driver_assignment_time: None,
            cancel_time: None,
            start_ride_time: None,
            finish_ride_time: None,
            version: 0,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.id
    }

    pub fn client_name(&self) -> &Name {
        &self.client_name
    }

    pub fn start(&self) -> &Address {
        &self.start
    }

    pub fn destination(&self) -> &Address {
        &self.destination
    }

    pub fn status(&self) -> TaxiOrderStatus {
        self.status
    }

    /// The assigned driver, or [`Driver::unassigned`] when there is none.
    pub fn driver(&self) -> &Driver {
        self.driver.as_ref().unwrap_or(Driver::unassigned_ref())
    }

    pub fn assigned_driver(&self) -> Option<&Driver> {
        self.driver.as_ref()
    }

    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    pub fn driver_assignment_time(&self) -> Option<DateTime<Utc>> {
        self.driver_assignment_time
    }

    pub fn cancel_time(&self) -> Option<DateTime<Utc>> {
        self.cancel_time
    }

    pub fn start_ride_time(&self) -> Option<DateTime<Utc>> {
        self.start_ride_time
    }

    pub fn finish_ride_time(&self) -> Option<DateTime<Utc>> {
        self.finish_ride_time
    }

    pub fn update_destination(&mut self, destination: Address) -> TaxiOrderEvent {
        let event = self.decide_update_destination(destination);
        self.apply(&event);
        event
    }

    pub fn assign_driver(
        &mut self,
        driver: Driver,
        clock: &dyn Clock,
    ) -> DomainResult<TaxiOrderEvent> {
        let event = self.decide_assign_driver(driver, clock)?;
        self.apply(&event);
        Ok(event)
    }

    pub fn unassign_driver(&mut self) -> DomainResult<TaxiOrderEvent> {
        let event = self.decide_unassign_driver()?;
        self.apply(&event);
        Ok(event)
    }

    pub fn cancel(&mut self, clock: &dyn Clock) -> DomainResult<TaxiOrderEvent> {
        let event = self.decide_cancel(clock)?;
        self.apply(&event);
        Ok(event)
    }

    pub fn start_ride(&mut self, clock: &dyn Clock) -> DomainResult<TaxiOrderEvent> {
        let event = self.decide_start_ride(clock)?;
        self.apply(&event);
        Ok(event)
    }

    pub fn finish_ride(&mut self, clock: &dyn Clock) -> DomainResult<TaxiOrderEvent> {
        let event = self.decide_finish_ride(clock)?;
        self.apply(&event);
        Ok(event)
    }

    /// Driver details, or `None` while the order waits for a driver.
    pub fn driver_full_info(&self) -> Option<String> {
        if self.status == TaxiOrderStatus::WaitingForDriver {
            return None;
        }
        Some(self.driver().full_info())
    }

    /// One-line summary of the order.
    pub fn short_order_info(&self) -> DomainResult<String> {
        let last_progress = self.last_progress_time()?;
        Ok([
            format!("OrderId: {}", self.id),
            format!("Status: {}", self.status),
            format!("Client: {}", self.client_name.formatted()),
            format!("Driver: {}", self.driver().name().formatted()),
            format!("From: {}", self.start.formatted()),
            format!("To: {}", self.destination.formatted()),
            format!("LastProgressTime: {}", last_progress.format(PROGRESS_TIME_FORMAT)),
        ]
        .join(" "))
    }

    /// Timestamp of the transition that reached the current status.
    pub fn last_progress_time(&self) -> DomainResult<DateTime<Utc>> {
        let recorded = match self.status {
            TaxiOrderStatus::WaitingForDriver => Some(self.creation_time),
            TaxiOrderStatus::WaitingCarArrival => self.driver_assignment_time,
            TaxiOrderStatus::InProgress => self.start_ride_time,
            TaxiOrderStatus::Finished => self.finish_ride_time,
            TaxiOrderStatus::Canceled => self.cancel_time,
        };
        recorded.ok_or_else(|| {
            DomainError::unsupported_state(format!("{} has no recorded time", self.status))
        })
    }

    fn ensure_driver_assigned(&self) -> DomainResult<()> {
        if self.driver.is_none() {
            return Err(DomainError::invalid_operation("No driver is assigned"));
        }
        Ok(())
    }

    fn decide_update_destination(&self, destination: Address) -> TaxiOrderEvent {
        TaxiOrderEvent::DestinationUpdated {
            order_id: self.id,
            destination,
        }
    }

    fn decide_assign_driver(
        &self,
        driver: Driver,
        clock: &dyn Clock,
    ) -> DomainResult<TaxiOrderEvent> {
        if self.driver.is_some() {
            return Err(DomainError::invalid_operation("Driver is already assigned"));
        }
        if driver.is_unassigned() {
            return Err(DomainError::invalid_operation(
                "Cannot assign the unassigned driver placeholder",
            ));
        }

        Ok(TaxiOrderEvent::DriverAssigned {
            order_id: self.id,
            driver,
            occurred_at: clock.now(),
        })
    }

    fn decide_unassign_driver(&self) -> DomainResult<TaxiOrderEvent> {
        self.ensure_driver_assigned()?;
        if self.status == TaxiOrderStatus::InProgress {
            return Err(DomainError::invalid_operation(
                "Cannot unassign driver after beginning of execution of the order",
            ));
        }

        Ok(TaxiOrderEvent::DriverUnassigned {
            order_id: self.id,
            driver_id: self.driver().driver_id(),
        })
    }

    fn decide_cancel(&self, clock: &dyn Clock) -> DomainResult<TaxiOrderEvent> {
        if self.status == TaxiOrderStatus::InProgress {
            return Err(DomainError::invalid_operation(
                "Cannot cancel order after beginning of its execution",
            ));
        }

        Ok(TaxiOrderEvent::OrderCanceled {
            order_id: self.id,
            occurred_at: clock.now(),
        })
    }

    fn decide_start_ride(&self, clock: &dyn Clock) -> DomainResult<TaxiOrderEvent> {
        self.ensure_driver_assigned()?;

        Ok(TaxiOrderEvent::RideStarted {
            order_id: self.id,
            occurred_at: clock.now(),
        })
    }

    fn decide_finish_ride(&self, clock: &dyn Clock) -> DomainResult<TaxiOrderEvent> {
        self.ensure_driver_assigned()?;
        if self.status != TaxiOrderStatus::InProgress {
            return Err(DomainError::invalid_operation(
                "Cannot finish order that is not in progress",
            ));
        }

        Ok(TaxiOrderEvent::RideFinished {
            order_id: self.id,
            occurred_at: clock.now(),
        })
    }
}

impl PartialEq for TaxiOrder {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TaxiOrder {}

impl AggregateRoot for TaxiOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for TaxiOrder {
    type Command = TaxiOrderCommand;
    type Event = TaxiOrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            TaxiOrderEvent::DestinationUpdated { destination, .. } => {
                self.destination = destination.clone();
            }
            TaxiOrderEvent::DriverAssigned {
                driver, occurred_at, ..
            } => {
                self.driver = Some(driver.clone());
                self.driver_assignment_time = Some(*occurred_at);
                self.status = TaxiOrderStatus::WaitingCarArrival;
            }
            TaxiOrderEvent::DriverUnassigned { .. } => {
                self.driver = None;
                self.status = TaxiOrderStatus::WaitingForDriver;
            }
            TaxiOrderEvent::OrderCanceled { occurred_at, .. } => {
                self.status = TaxiOrderStatus::Canceled;
                self.cancel_time = Some(*occurred_at);
            }
            TaxiOrderEvent::RideStarted { occurred_at, .. } => {
                self.status = TaxiOrderStatus::InProgress;
                self.start_ride_time = Some(*occurred_at);
            }
            TaxiOrderEvent::RideFinished { occurred_at, .. } => {
                self.status = TaxiOrderStatus::Finished;
                self.finish_ride_time = Some(*occurred_at);
            }
        }

        self.version += 1;
    }

    fn handle(
        &self,
        command: &Self::Command,
        clock: &dyn Clock,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        let event = match command {
            TaxiOrderCommand::UpdateDestination { destination } => {
                self.decide_update_destination(destination.clone())
            }
            TaxiOrderCommand::AssignDriver { driver } => {
                self.decide_assign_driver(driver.clone(), clock)?
            }
            TaxiOrderCommand::UnassignDriver => self.decide_unassign_driver()?,
            TaxiOrderCommand::Cancel => self.decide_cancel(clock)?,
            TaxiOrderCommand::StartRide => self.decide_start_ride(clock)?,
            TaxiOrderCommand::FinishRide => self.decide_finish_ride(clock)?,
        };
        Ok(vec![event])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Car;
    use chrono::{Duration, TimeZone};
    use std::cell::Cell;
    use taxi_core::ManualClock;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    fn driverson() -> Driver {
        Driver::new(
            DriverId::new(15),
            Name::new(Some("Drive"), Some("Driverson")),
            Car::new(Some("Lada sedan"), Some("A123BT 66"), Some("Baklazhan")),
        )
    }

    fn new_order(clock: &ManualClock) -> TaxiOrder {
        TaxiOrder::create(
            OrderId::new(0),
            Name::new(Some("John"), Some("Doe")),
            Address::new(Some("Baker St"), Some("5")),
            clock,
        )
    }

    fn expect_invalid(result: DomainResult<TaxiOrderEvent>, msg: &str) {
        match result {
            Err(DomainError::InvalidOperation(m)) if m == msg => {}
            other => panic!("Expected InvalidOperation({msg:?}), got {other:?}"),
        }
    }

    /// Serialized form, used to compare full state (equality is id-based).
    fn snapshot(order: &TaxiOrder) -> serde_json::Value {
        serde_json::to_value(order).unwrap()
    }

    #[test]
    fn create_starts_waiting_for_driver() {
        let clock = ManualClock::new(t0());
        let order = new_order(&clock);

        assert_eq!(order.status(), TaxiOrderStatus::WaitingForDriver);
        assert_eq!(order.creation_time(), t0());
        assert!(order.destination().is_empty());
        assert!(order.driver().is_unassigned());
        assert!(order.assigned_driver().is_none());
        assert_eq!(order.version(), 0);
        assert_eq!(order.last_progress_time().unwrap(), t0());
    }

    #[test]
    fn short_info_of_fresh_order() {
        let clock = ManualClock::new(t0());
        let order = new_order(&clock);

        assert_eq!(
            order.short_order_info().unwrap(),
            "OrderId: 0 Status: WaitingForDriver Client: John Doe Driver:  From: Baker St 5 To:  LastProgressTime: 2024-01-01 10:00:00"
        );
        assert_eq!(order.driver_full_info(), None);
    }

    #[test]
    fn destination_can_be_updated_repeatedly() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);

        order.update_destination(Address::new(Some("Main St"), Some("1")));
        order.update_destination(Address::new(Some("Elm St"), Some("7")));

        assert_eq!(order.destination(), &Address::new(Some("Elm St"), Some("7")));
        assert_eq!(order.version(), 2);
        assert!(order.short_order_info().unwrap().contains("To: Elm St 7"));
    }

    #[test]
    fn assign_driver_moves_to_waiting_car_arrival() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        let t1 = t0() + Duration::minutes(1);
        clock.set(t1);

        let event = order.assign_driver(driverson(), &clock).unwrap();

        assert_eq!(event.event_type(), "taxi.order.driver_assigned");
        assert_eq!(event.occurred_at(), Some(t1));
        assert_eq!(order.status(), TaxiOrderStatus::WaitingCarArrival);
        assert_eq!(order.driver_assignment_time(), Some(t1));
        assert_eq!(order.last_progress_time().unwrap(), t1);

        let info = order.driver_full_info().unwrap();
        assert!(info.contains("Id: 15"));
        assert!(info.contains("DriverName: Drive Driverson"));
        assert!(info.contains("Color: Baklazhan"));
    }

    #[test]
    fn assign_twice_fails_and_keeps_state() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        order.assign_driver(driverson(), &clock).unwrap();
        let before = snapshot(&order);

        clock.advance(Duration::minutes(1));
        expect_invalid(
            order.assign_driver(driverson(), &clock),
            "Driver is already assigned",
        );
        assert_eq!(snapshot(&order), before);
    }

    #[test]
    fn assigning_the_placeholder_is_rejected() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        expect_invalid(
            order.assign_driver(Driver::unassigned(), &clock),
            "Cannot assign the unassigned driver placeholder",
        );
        assert_eq!(order.status(), TaxiOrderStatus::WaitingForDriver);
    }

    #[test]
    fn unassign_without_driver_fails() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        expect_invalid(order.unassign_driver(), "No driver is assigned");
    }

    #[test]
    fn unassign_returns_to_waiting_for_driver() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        clock.advance(Duration::minutes(1));
        order.assign_driver(driverson(), &clock).unwrap();

        order.unassign_driver().unwrap();

        assert_eq!(order.status(), TaxiOrderStatus::WaitingForDriver);
        assert!(order.driver().is_unassigned());
        assert_eq!(order.last_progress_time().unwrap(), t0());

        // Driver can be assigned again.
        order.assign_driver(driverson(), &clock).unwrap();
        assert_eq!(order.status(), TaxiOrderStatus::WaitingCarArrival);
    }

    #[test]
    fn unassign_after_start_fails() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        order.assign_driver(driverson(), &clock).unwrap();
        order.start_ride(&clock).unwrap();

        expect_invalid(
            order.unassign_driver(),
            "Cannot unassign driver after beginning of execution of the order",
        );
        assert_eq!(order.status(), TaxiOrderStatus::InProgress);
    }

    #[test]
    fn start_ride_requires_driver() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        expect_invalid(order.start_ride(&clock), "No driver is assigned");
        assert_eq!(order.start_ride_time(), None);
    }

    #[test]
    fn cancel_during_ride_fails() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        order.assign_driver(driverson(), &clock).unwrap();
        order.start_ride(&clock).unwrap();

        expect_invalid(
            order.cancel(&clock),
            "Cannot cancel order after beginning of its execution",
        );
        assert_eq!(order.cancel_time(), None);
    }

    #[test]
    fn cancel_from_waiting_states() {
        let clock = ManualClock::new(t0());

        let mut waiting = new_order(&clock);
        clock.advance(Duration::minutes(3));
        waiting.cancel(&clock).unwrap();
        assert_eq!(waiting.status(), TaxiOrderStatus::Canceled);
        assert_eq!(
            waiting.last_progress_time().unwrap(),
            t0() + Duration::minutes(3)
        );

        let mut arriving = new_order(&clock);
        arriving.assign_driver(driverson(), &clock).unwrap();
        arriving.cancel(&clock).unwrap();
        assert_eq!(arriving.status(), TaxiOrderStatus::Canceled);
        assert!(arriving.status().is_terminal());
    }

    #[test]
    fn finish_requires_ride_in_progress() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        expect_invalid(order.finish_ride(&clock), "No driver is assigned");

        order.assign_driver(driverson(), &clock).unwrap();
        expect_invalid(
            order.finish_ride(&clock),
            "Cannot finish order that is not in progress",
        );
    }

    #[test]
    fn full_ride_lifecycle() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);
        let t1 = t0() + Duration::minutes(1);
        let t2 = t0() + Duration::minutes(10);
        let t3 = t0() + Duration::minutes(40);

        clock.set(t1);
        order.assign_driver(driverson(), &clock).unwrap();
        clock.set(t2);
        order.start_ride(&clock).unwrap();
        assert_eq!(order.status(), TaxiOrderStatus::InProgress);
        assert_eq!(order.last_progress_time().unwrap(), t2);

        clock.set(t3);
        order.finish_ride(&clock).unwrap();

        assert_eq!(order.status(), TaxiOrderStatus::Finished);
        assert_eq!(order.last_progress_time().unwrap(), t3);
        assert_eq!(order.creation_time(), t0());
        assert_eq!(order.driver_assignment_time(), Some(t1));
        assert_eq!(order.start_ride_time(), Some(t2));
        assert_eq!(order.finish_ride_time(), Some(t3));
        assert_eq!(order.version(), 3);
        assert!(
            order
                .short_order_info()
                .unwrap()
                .ends_with("Driver: Drive Driverson From: Baker St 5 To:  LastProgressTime: 2024-01-01 10:40:00")
        );
    }

    #[test]
    fn clock_is_read_once_per_accepted_transition() {
        let reads = Cell::new(0);
        let counting = || {
            reads.set(reads.get() + 1);
            t0()
        };

        let mut order = TaxiOrder::create(
            OrderId::new(1),
            Name::new(Some("John"), Some("Doe")),
            Address::new(Some("Baker St"), Some("5")),
            &counting,
        );
        assert_eq!(reads.get(), 1);

        let _ = order.finish_ride(&counting);
        let _ = order.start_ride(&counting);
        assert_eq!(reads.get(), 1);

        order.assign_driver(driverson(), &counting).unwrap();
        order.start_ride(&counting).unwrap();
        let _ = order.cancel(&counting);
        order.finish_ride(&counting).unwrap();
        assert_eq!(reads.get(), 4);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let clock = ManualClock::new(t0());
        let order = new_order(&clock);
        let before = snapshot(&order);

        let command = TaxiOrderCommand::AssignDriver {
            driver: driverson(),
        };
        let events1 = order.handle(&command, &clock).unwrap();
        let events2 = order.handle(&command, &clock).unwrap();

        assert_eq!(events1, events2);
        assert_eq!(snapshot(&order), before);
    }

    #[test]
    fn execute_routes_commands() {
        let clock = ManualClock::new(t0());
        let mut order = new_order(&clock);

        order
            .execute(
                &TaxiOrderCommand::UpdateDestination {
                    destination: Address::new(Some("Elm St"), Some("7")),
                },
                &clock,
            )
            .unwrap();
        order
            .execute(
                &TaxiOrderCommand::AssignDriver {
                    driver: driverson(),
                },
                &clock,
            )
            .unwrap();
        order.execute(&TaxiOrderCommand::StartRide, &clock).unwrap();
        let err = order
            .execute(&TaxiOrderCommand::UnassignDriver, &clock)
            .unwrap_err();

        assert!(err.is_invalid_operation());
        assert_eq!(order.status(), TaxiOrderStatus::InProgress);
        assert_eq!(order.destination(), &Address::new(Some("Elm St"), Some("7")));
    }

    #[test]
    fn orders_compare_by_id() {
        let clock = ManualClock::new(t0());
        let a = new_order(&clock);
        let mut b = new_order(&clock);
        b.update_destination(Address::new(Some("Elm St"), Some("7")));
        assert_eq!(a, b);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone, Copy)]
        enum Op {
            UpdateDestination,
            Assign,
            Unassign,
            Cancel,
            Start,
            Finish,
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::UpdateDestination),
                Just(Op::Assign),
                Just(Op::Unassign),
                Just(Op::Cancel),
                Just(Op::Start),
                Just(Op::Finish),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: rejected operations leave the order unchanged, and the
            /// last progress time always matches the most recent status change.
            #[test]
            fn random_sequences_respect_guards(ops in proptest::collection::vec(arb_op(), 0..30)) {
                let clock = ManualClock::new(t0());
                let mut order = new_order(&clock);
                let mut expected_progress = t0();
                let mut last_transition: Option<&'static str> = None;

                for op in ops {
                    clock.advance(Duration::seconds(1));
                    let before = snapshot(&order);
                    let status_before = order.status();

                    let result = match op {
                        Op::UpdateDestination => Ok(order.update_destination(Address::new(Some("Elm St"), Some("7")))),
                        Op::Assign => order.assign_driver(driverson(), &clock),
                        Op::Unassign => order.unassign_driver(),
                        Op::Cancel => order.cancel(&clock),
                        Op::Start => order.start_ride(&clock),
                        Op::Finish => {
                            let allowed = last_transition == Some("taxi.order.ride_started");
                            let result = order.finish_ride(&clock);
                            prop_assert_eq!(result.is_ok(), allowed);
                            result
                        }
                    };

                    match result {
                        Ok(event) => {
                            if let TaxiOrderEvent::DestinationUpdated { .. } = event {
                                continue;
                            }
                            last_transition = Some(event.event_type());
                            expected_progress = event.occurred_at().unwrap_or(order.creation_time());
                        }
                        Err(err) => {
                            prop_assert!(err.is_invalid_operation());
                            prop_assert_eq!(snapshot(&order), before);
                            prop_assert_eq!(order.status(), status_before);
                        }
                    }

                    prop_assert_eq!(order.last_progress_time().unwrap(), expected_progress);
                    prop_assert_eq!(
                        order.driver_full_info().is_none(),
                        order.status() == TaxiOrderStatus::WaitingForDriver
                    );
                }
            }
        }
    }
}
