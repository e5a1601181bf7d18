//! Fixed-interval reminder polling loop.
//!
//! # Responsibility
//! - Run `run_tick` against a shared task store on a fixed wall-clock
//!   interval from a background thread.
//! - Tie cancellation to the poller value's lifetime: dropping the poller
//!   stops and joins the thread, so no timer outlives its owner.
//!
//! # Invariants
//! - Exactly one tick runs at a time; the store is locked per tick.
//! - Tick failures are logged and do not stop the loop.

use super::{now_epoch_millis, run_tick, Notifier};
use crate::service::task_service::TaskStore;
use crate::store::LocalStore;
use log::{error, info};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Wall-clock gap between reminder scans.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Handle to the background polling thread.
///
/// The loop stops when this value is dropped or `stop` is called.
pub struct ReminderPoller {
    stop_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderPoller {
    /// Spawns the polling thread.
    ///
    /// The first tick runs one full `interval` after spawn; callers that
    /// want an immediate scan run `run_tick` themselves before spawning.
    pub fn spawn<S>(
        store: Arc<Mutex<TaskStore<S>>>,
        notifier: Arc<dyn Notifier + Send + Sync>,
        interval: Duration,
    ) -> Self
    where
        S: LocalStore + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = std::thread::spawn(move || {
            info!(
                "event=poller_start module=scheduler status=ok interval_ms={}",
                interval.as_millis()
            );
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let mut store = match store.lock() {
                            Ok(guard) => guard,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        if let Err(err) = run_tick(&mut store, notifier.as_ref(), now_epoch_millis())
                        {
                            error!(
                                "event=poller_tick module=scheduler status=error error={err}"
                            );
                        }
                    }
                    // Stop signal, or the handle was dropped without one.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            info!("event=poller_stop module=scheduler status=ok");
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Stops the loop and joins the thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ReminderPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}
