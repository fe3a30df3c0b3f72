// reporter.rs
use log::{info, warn};
use rocket::fairing::AdHoc;
use std::sync::Arc;
use tokio::time::{interval, Duration};

use crate::store::Store;

/// Spawns the periodic status reporter once the server has lifted off. The
/// task wakes every `interval_secs`, logs the request and item counts, and
/// returns when server shutdown is requested; its worst-case stop latency is
/// one tick.
pub fn fairing(interval_secs: u64) -> AdHoc {
    AdHoc::on_liftoff("Status Reporter", move |rocket| {
        Box::pin(async move {
            let store = match rocket.state::<Arc<Store>>() {
                Some(store) => store.clone(),
                None => {
                    warn!("status reporter not started: store is not managed");
                    return;
                }
            };
            let shutdown = rocket.shutdown();
            tokio::spawn(async move {
                let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
                // the first tick of an interval completes immediately
                ticker.tick().await;
                let mut shutdown = std::pin::pin!(shutdown);
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            let (items, requests) = store.status().await;
                            info!(
                                "server status: {} requests handled, {} items stored",
                                requests, items
                            );
                        }
                        _ = &mut shutdown => {
                            info!("status reporter stopping");
                            break;
                        }
                    }
                }
            });
        })
    })
}
