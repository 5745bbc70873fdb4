// src/fulfillment.rs
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::{FulfillmentConfig, FulfillmentMode};
use crate::db::orders::{complete_order, fail_order, load_order};
use crate::db::Database;
use crate::domain::Order;
use crate::errors::ServerError;
use crate::provider::StatusOutcome;
use crate::service::PropertyService;

const TIMED_OUT: &str = "Timed out waiting for the provider";

/// Starts a detached worker that takes `order_id` from `processing` to a
/// terminal status. Earlier workers are never cancelled.
pub fn spawn_fulfillment(
    db: Database,
    service: Arc<PropertyService>,
    cfg: FulfillmentConfig,
    order_id: String,
) -> Result<JoinHandle<()>, ServerError> {
    thread::Builder::new()
        .name(format!("fulfill-{order_id}"))
        .spawn(move || match run_fulfillment(&db, &service, &cfg, &order_id) {
            Ok(order) => log::info!("order {} is {}", order.id, order.status),
            Err(e) => log::error!("fulfillment of order {order_id} failed: {e}"),
        })
        .map_err(|e| {
            log::error!("could not start fulfillment worker: {e}");
            ServerError::InternalError
        })
}

pub fn run_fulfillment(
    db: &Database,
    service: &PropertyService,
    cfg: &FulfillmentConfig,
    order_id: &str,
) -> Result<Order, ServerError> {
    let reference = match cfg.mode {
        FulfillmentMode::Simulated => None,
        FulfillmentMode::Polling => db
            .with_conn(|conn| load_order(conn, order_id))?
            .ok_or(ServerError::NotFound)?
            .provider_reference,
    };

    // Local fallback orders have nothing to poll.
    let Some(reference) = reference else {
        thread::sleep(cfg.delay);
        return db.with_conn(|conn| complete_order(conn, order_id));
    };

    for attempt in 1..=cfg.poll_attempts {
        thread::sleep(cfg.poll_interval);
        match service.poll_order_status(&reference) {
            StatusOutcome::Complete(_) => {
                return db.with_conn(|conn| complete_order(conn, order_id));
            }
            StatusOutcome::Failed(reason) => {
                return db.with_conn(|conn| fail_order(conn, order_id, &reason));
            }
            StatusOutcome::Pending => {
                log::debug!("order {order_id} still pending after poll {attempt}");
            }
        }
    }

    db.with_conn(|conn| fail_order(conn, order_id, TIMED_OUT))
}
