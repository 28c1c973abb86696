//! Single-car elevator simulation driven by the SCAN sweep discipline.
//!
//! The car walks monotonically in its current heading, boarding and
//! discharging passengers at every floor with pending work, reverses at
//! the bounds (or as soon as nothing remains anywhere), and parks once the
//! building is drained. Scheduling state lives on one dedicated thread;
//! submitters talk to it over a channel and observers read atomics, so
//! nothing ever blocks the dispatch loop.
//!
//! ```
//! use crossbeam_channel::bounded;
//! use elevator_scan::{Car, ElevatorController, Heading, Passenger, Stage};
//!
//! let car = Car::new(1, 9, 5, Heading::Idle)?;
//! let mut controller = ElevatorController::new(car);
//!
//! let (drained_tx, drained_rx) = bounded(1);
//! controller.start(Some(drained_tx))?;
//!
//! let rider = Passenger::new("lena", 6, 7)?;
//! controller.submit(rider.clone());
//!
//! drained_rx.recv_timeout(std::time::Duration::from_secs(30)).unwrap();
//! assert_eq!(rider.stage(), Stage::Discharged);
//! assert_eq!(controller.car().floor(), 7);
//! controller.stop();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod car;
pub mod config;
pub mod controller;
pub mod debug;
pub mod direction;
pub mod engine;
pub mod passenger;
mod registry;

pub use car::{Car, CarError, CarStatus};
pub use config::Settings;
pub use controller::ElevatorController;
pub use direction::{Direction, Heading};
pub use engine::Engine;
pub use passenger::{Passenger, RequestError, Stage};
