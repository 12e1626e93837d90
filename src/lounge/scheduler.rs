//! Background task that turns due bookings into sessions.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::service::LoungeService;

/// Spawns a task that runs [`LoungeService::convert_due_bookings`] every
/// `period`. The first scan runs immediately.
///
/// The scan period should stay below the booking conversion window or
/// bookings can be skipped.
pub fn spawn_booking_scheduler(service: Arc<LoungeService>, period: Duration) -> JoinHandle<()> {
    let period = period.max(Duration::from_secs(1));
    info!(period_secs = period.as_secs(), "Booking scheduler started");

    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            match service.convert_due_bookings(Utc::now()) {
                Ok(report) if report.converted > 0 => {
                    info!(converted = report.converted, "Bookings converted");
                }
                Ok(_) => debug!("No bookings due"),
                Err(e) => warn!(error = %e, "Booking conversion failed"),
            }
        }
    })
}
