//! Order service facade.
//!
//! Thin orchestration over [`TaxiOrder`]: hands out order ids, resolves
//! drivers through the repository and stamps transitions with the injected
//! clock. All validation stays in the aggregate; this layer only adds logging.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{Span, debug, field, info, instrument, warn};

use taxi_core::{Clock, DomainError, DomainResult, Event};

use crate::config::TaxiConfig;
use crate::driver::DriverId;
use crate::order::{OrderId, TaxiOrder, TaxiOrderEvent};
use crate::repository::DriverRepository;
use crate::values::{Address, Name};

pub struct TaxiService<R, C> {
    drivers: R,
    clock: C,
    // Wider than `OrderId` so running past `u32::MAX` is detected, not wrapped.
    next_id: AtomicU64,
}

impl<R, C> TaxiService<R, C>
where
    R: DriverRepository,
    C: Clock,
{
    pub fn new(drivers: R, clock: C) -> Self {
        Self::with_config(drivers, clock, TaxiConfig::default())
    }

    pub fn with_config(drivers: R, clock: C, config: TaxiConfig) -> Self {
        Self {
            drivers,
            clock,
            next_id: AtomicU64::new(u64::from(config.first_order_id)),
        }
    }

    /// Fails with `Conflict` once every `OrderId` has been handed out.
    #[instrument(skip_all, fields(order_id = field::Empty))]
    pub fn create_order_without_destination(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
        street: Option<&str>,
        building: Option<&str>,
    ) -> DomainResult<TaxiOrder> {
        let id = self.allocate_id()?;
        Span::current().record("order_id", field::display(id));

        let order = TaxiOrder::create(
            id,
            Name::new(first_name, last_name),
            Address::new(street, building),
            &self.clock,
        );
        info!("taxi order created");
        Ok(order)
    }

    #[instrument(skip_all, fields(order_id = %order.order_id()))]
    pub fn update_destination(
        &self,
        order: &mut TaxiOrder,
        street: Option<&str>,
        building: Option<&str>,
    ) {
        let event = order.update_destination(Address::new(street, building));
        debug!(event_type = event.event_type(), "order transition applied");
    }

    #[instrument(skip_all, fields(order_id = %order.order_id(), driver_id = %driver_id))]
    pub fn assign_driver(&self, order: &mut TaxiOrder, driver_id: DriverId) -> DomainResult<()> {
        let driver = self
            .drivers
            .find_driver(driver_id)
            .inspect_err(|err| warn!(error = %err, "driver lookup failed"))?;
        record(order.assign_driver(driver, &self.clock))
    }

    #[instrument(skip_all, fields(order_id = %order.order_id()))]
    pub fn unassign_driver(&self, order: &mut TaxiOrder) -> DomainResult<()> {
        record(order.unassign_driver())
    }

    pub fn driver_full_info(&self, order: &TaxiOrder) -> Option<String> {
        order.driver_full_info()
    }

    pub fn short_order_info(&self, order: &TaxiOrder) -> DomainResult<String> {
        order.short_order_info()
    }

    #[instrument(skip_all, fields(order_id = %order.order_id()))]
    pub fn cancel(&self, order: &mut TaxiOrder) -> DomainResult<()> {
        record(order.cancel(&self.clock))
    }

    #[instrument(skip_all, fields(order_id = %order.order_id()))]
    pub fn start_ride(&self, order: &mut TaxiOrder) -> DomainResult<()> {
        record(order.start_ride(&self.clock))
    }

    #[instrument(skip_all, fields(order_id = %order.order_id()))]
    pub fn finish_ride(&self, order: &mut TaxiOrder) -> DomainResult<()> {
        record(order.finish_ride(&self.clock))
    }
}

impl<R, C> TaxiService<R, C> {
    fn allocate_id(&self) -> DomainResult<OrderId> {
        let raw = self.next_id.fetch_add(1, Ordering::Relaxed);
        u32::try_from(raw).map(OrderId::new).map_err(|_| {
            warn!(next_id = raw, "order id space exhausted");
            DomainError::conflict("order id space exhausted")
        })
    }
}

fn record(result: DomainResult<TaxiOrderEvent>) -> DomainResult<()> {
    match result {
        Ok(event) => {
            debug!(event_type = event.event_type(), "order transition applied");
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "order transition rejected");
            Err(err)
        }
    }
}
