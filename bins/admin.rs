use std::time::Duration;

use dotenvy::dotenv;
use tracing::{info, warn};

use client::ApiClient;
use configs::AppConfig;
use store::customers::CustomerStore;
use store::instruments::InstrumentStore;
use store::orders::OrderStore;
use store::passports::PassportStore;
use store::services::ServiceStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let cfg = AppConfig::load_and_validate()?;
    info!(base_url = %cfg.api.base_url, "connecting to workshop backend");
    let api = ApiClient::with_timeout(cfg.api.base_url.clone(), Duration::from_secs(cfg.api.timeout_secs))?;

    let mut customers = CustomerStore::new(api.clone());
    let mut instruments = InstrumentStore::new(api.clone());
    let mut services = ServiceStore::new(api.clone());
    let mut orders = OrderStore::new(api.clone());
    let mut passports = PassportStore::new(api);

    customers.fetch_all().await?;
    instruments.fetch_all().await?;
    services.fetch_all().await?;
    orders.fetch_all().await?;
    passports.fetch_all().await?;

    info!(
        customers = customers.state().items().len(),
        instruments = instruments.state().items().len(),
        services = services.state().items().len(),
        orders = orders.state().items().len(),
        passports = passports.state().items().len(),
        "workshop inventory loaded"
    );

    for order in orders.state().items() {
        let total = orders.total(order.id, services.catalog());
        match instruments.state().get(order.instrument_id) {
            Some(instrument) => {
                info!(order = %order.id, instrument = %instrument.model, status = %order.status, total = %total, "order");
            }
            None => {
                warn!(order = %order.id, status = %order.status, total = %total, "order references a missing instrument");
            }
        }
    }

    Ok(())
}
