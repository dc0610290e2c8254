use crate::aerodrome::{Aerodrome, Landing, Transfer};
use crate::aircraft::Aircraft;
use crate::error::{AerodromeError, Result};
use crate::journal::{Entry, Event, Journal};
use crate::time::Time;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

struct Control {
    aerodrome: Aerodrome,
    journal: Journal,
    elapsed: Time,
}

impl Control {
    fn tick(&mut self, delta: Time) -> Vec<Landing> {
        self.elapsed += delta;
        let landings = self.aerodrome.tick(delta);
        for landing in &landings {
            tracing::info!(id = %landing.id, runway = landing.runway, at = self.elapsed.0, "landed");
            self.journal.record(self.elapsed, Event::Landed(landing.clone()));
        }
        landings
    }
}

/// Thread-safe handle to an aerodrome. Commands and clock ticks take the same lock,
/// so no queue is ever observed or modified halfway through an operation.
pub struct Tower {
    control: Arc<Mutex<Control>>,
    stop: Option<Sender<()>>,
    clock: Option<JoinHandle<()>>,
}

/// Rejects clock settings that would spin on the lock or never land anyone.
pub fn validate_clock(period: Duration, delta: Time) -> Result<()> {
    if period.is_zero() {
        return Err(AerodromeError::Clock("tick period must be positive".into()));
    }
    validate_delta(delta)
}

fn validate_delta(delta: Time) -> Result<()> {
    if !(1..=Aircraft::MAX_DURATION).contains(&delta.0) {
        return Err(AerodromeError::Clock(format!("tick delta {} is out of range", delta.0)));
    }
    Ok(())
}

fn lock(control: &Mutex<Control>) -> MutexGuard<'_, Control> {
    control.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Tower {
    pub fn new(aerodrome: Aerodrome) -> Tower {
        Tower {
            control: Arc::new(Mutex::new(Control {
                aerodrome,
                journal: Journal::default(),
                elapsed: Time::ZERO,
            })),
            stop: None,
            clock: None,
        }
    }

    /// Starts the background clock: every `period` the whole field advances by
    /// `delta`. Calling it on a running tower does nothing.
    pub fn start(&mut self, period: Duration, delta: Time) -> Result<()> {
        if self.clock.is_some() {
            return Ok(());
        }
        validate_clock(period, delta)?;

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let control = Arc::clone(&self.control);
        let handle = thread::Builder::new()
            .name("tower-clock".into())
            .spawn(move || {
                tracing::debug!(?period, delta = delta.0, "clock started");
                loop {
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => {
                            lock(&control).tick(delta);
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::debug!("clock stopped");
            })?;

        self.stop = Some(stop_tx);
        self.clock = Some(handle);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.clock.take() {
            if handle.join().is_err() {
                tracing::error!("clock thread panicked");
            }
        }
    }

    pub fn assign(&self, aircraft: Aircraft) -> Result<usize> {
        let mut control = lock(&self.control);
        let id = aircraft.id().clone();
        let runway = control.aerodrome.assign(aircraft)?;
        let at = control.elapsed;
        control.journal.record(at, Event::Added { id, runway });
        Ok(runway)
    }

    pub fn send_for_second_round(&self, id: &str) -> bool {
        let mut control = lock(&self.control);
        if !control.aerodrome.send_for_second_round(id) {
            tracing::warn!(id, "go-around for unknown aircraft");
            return false;
        }
        let at = control.elapsed;
        control.journal.record(at, Event::SentAround { id: id.into() });
        true
    }

    pub fn send_to_another_runway(&self, id: &str) -> Option<Transfer> {
        let mut control = lock(&self.control);
        let Some(transfer) = control.aerodrome.send_to_another_runway(id) else {
            tracing::warn!(id, "transfer for unknown aircraft");
            return None;
        };
        let at = control.elapsed;
        control.journal.record(at, Event::Transferred(transfer.clone()));
        Some(transfer)
    }

    /// Advances the clock right away, independently of the background period.
    pub fn tick_now(&self, delta: Time) -> Result<Vec<Landing>> {
        validate_delta(delta)?;
        Ok(lock(&self.control).tick(delta))
    }

    /// Consistent copy of the field for rendering.
    pub fn snapshot(&self) -> Aerodrome {
        lock(&self.control).aerodrome.clone()
    }

    pub fn elapsed(&self) -> Time {
        lock(&self.control).elapsed
    }

    pub fn journal(&self) -> Vec<Entry> {
        lock(&self.control).journal.entries().cloned().collect()
    }
}

impl Drop for Tower {
    fn drop(&mut self) {
        self.stop();
    }
}
