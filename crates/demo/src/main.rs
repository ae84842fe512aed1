use anyhow::Context;

use taxi_core::SystemClock;
use taxi_orders::{DriverId, MockDriverRepository, TaxiConfig, TaxiService};

fn main() -> anyhow::Result<()> {
    taxi_observability::init();

    let config = TaxiConfig::from_env();
    tracing::info!(first_order_id = config.first_order_id, "starting taxi demo");

    let service = TaxiService::with_config(MockDriverRepository::default(), SystemClock, config);

    let mut order = service
        .create_order_without_destination(Some("John"), Some("Doe"), Some("Baker St"), Some("5"))
        .context("creating the demo order")?;
    service.update_destination(&mut order, Some("Elm St"), Some("7"));
    println!("{}", service.short_order_info(&order)?);

    if let Err(err) = service.assign_driver(&mut order, DriverId::new(999)) {
        println!("lookup rejected: {err}");
    }

    service
        .assign_driver(&mut order, DriverId::new(15))
        .context("assigning the demo driver")?;
    if let Some(info) = service.driver_full_info(&order) {
        println!("{info}");
    }

    service.start_ride(&mut order)?;
    if let Err(err) = service.cancel(&mut order) {
        println!("cancel rejected: {err}");
    }
    service.finish_ride(&mut order)?;
    println!("{}", service.short_order_info(&order)?);

    let snapshot =
        serde_json::to_string_pretty(&order).context("serializing the final order snapshot")?;
    println!("{snapshot}");

    Ok(())
}
