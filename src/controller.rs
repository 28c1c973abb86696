/// ----- ELEVATOR CONTROLLER -----
/// Public face of the simulation: owns the car, spawns the dispatch
/// engine on its own thread, and forwards submissions to it. Mirrors the
/// single-writer split: the controller never touches scheduling state,
/// it only passes messages and reads the car's atomics.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{error, warn};

use crate::car::{Car, CarStatus};
use crate::config::Settings;
use crate::engine::{self, Engine};
use crate::passenger::Passenger;

pub struct ElevatorController {
    car: Arc<Car>,
    settings: Settings,
    submit_tx: Sender<Passenger>,
    submit_rx: Option<Receiver<Passenger>>,
    stop_tx: Sender<()>,
    stop_rx: Option<Receiver<()>>,
    status_tx: Option<Sender<CarStatus>>,
    worker: Option<JoinHandle<()>>,
}

impl ElevatorController {
    pub fn new(car: Car) -> Self {
        Self::with_settings(car, Settings::default())
    }

    pub fn with_settings(car: Car, settings: Settings) -> Self {
        // Channels exist from construction, so requests submitted before
        // `start` queue up and are served once the loop begins.
        let (submit_tx, submit_rx) = unbounded();
        let (stop_tx, stop_rx) = unbounded();
        ElevatorController {
            car: Arc::new(car),
            settings,
            submit_tx,
            submit_rx: Some(submit_rx),
            stop_tx,
            stop_rx: Some(stop_rx),
            status_tx: None,
            worker: None,
        }
    }

    /// Shared view of the car for observers. Reads never block the
    /// dispatch loop.
    pub fn car(&self) -> Arc<Car> {
        self.car.clone()
    }

    /// Open a status stream fed after every tick. Register before
    /// `start`; once the loop owns its channels this is a logged no-op
    /// and the returned stream stays empty.
    pub fn watch(&mut self) -> Receiver<CarStatus> {
        let (status_tx, status_rx) = unbounded();
        if self.submit_rx.is_none() {
            warn!("elevator already started, status stream will stay empty");
        } else {
            self.status_tx = Some(status_tx);
        }
        status_rx
    }

    /// Start the dispatch loop on its own thread. `drained_tx`, if given,
    /// receives one message the first time the car parks with nothing
    /// left to do. Starting twice is a logged no-op; the controller is
    /// one-shot, so a stopped elevator cannot be started again either.
    pub fn start(&mut self, drained_tx: Option<Sender<()>>) -> std::io::Result<()> {
        let (submit_rx, stop_rx) = match (self.submit_rx.take(), self.stop_rx.take()) {
            (Some(submit_rx), Some(stop_rx)) => (submit_rx, stop_rx),
            _ => {
                warn!("elevator already started, ignoring");
                return Ok(());
            }
        };
        let engine = Engine::with_drain_signal(self.car.clone(), drained_tx);
        let poll_interval = self.settings.poll_interval;
        let status_tx = self.status_tx.take();
        let worker = thread::Builder::new().name("dispatch".to_string()).spawn(move || {
            let dispatch = AssertUnwindSafe(move || {
                engine::run(engine, poll_interval, submit_rx, stop_rx, status_tx)
            });
            // Whatever goes wrong inside a tick ends the loop; the car is
            // stopped, not restarted.
            if panic::catch_unwind(dispatch).is_err() {
                error!("dispatch loop died unexpectedly, elevator is stopped");
            }
        })?;
        self.worker = Some(worker);
        Ok(())
    }

    /// Ask the loop to finish its current tick and exit, then wait for
    /// it. Safe to call any number of times.
    pub fn stop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    /// Hand a request to the dispatch engine. Never blocks. Requests
    /// submitted after the loop is gone are dropped with a warning.
    pub fn submit(&self, passenger: Passenger) {
        if self.submit_tx.send(passenger).is_err() {
            warn!("dispatch loop is gone, dropping request");
        }
    }

    pub fn submit_all(&self, passengers: impl IntoIterator<Item = Passenger>) {
        for passenger in passengers {
            self.submit(passenger);
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|worker| !worker.is_finished())
    }
}

impl Drop for ElevatorController {
    fn drop(&mut self) {
        self.stop();
    }
}
