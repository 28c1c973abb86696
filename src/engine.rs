/// ----- DISPATCH ENGINE -----
/// One SCAN sweep at a time: the car walks monotonically in its current
/// heading, serves every floor with pending work along the way, reverses
/// at the bounds, and parks once the building is drained. The engine owns
/// all scheduling state; everyone else talks to it over channels or reads
/// the car's atomics.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{select, tick, Receiver, Sender};
use tracing::{debug, info, trace, warn};

use crate::car::{Car, CarStatus};
use crate::direction::Heading;
use crate::passenger::Passenger;
use crate::registry::Registry;

pub struct Engine {
    car: Arc<Car>,
    registry: Registry,
    drained_tx: Option<Sender<()>>,
}

impl Engine {
    pub fn new(car: Arc<Car>) -> Self {
        Self::with_drain_signal(car, None)
    }

    /// `drained_tx` fires once, the first time the car parks with nothing
    /// left to do. Later drains stay silent.
    pub fn with_drain_signal(car: Arc<Car>, drained_tx: Option<Sender<()>>) -> Self {
        Engine {
            car,
            registry: Registry::new(),
            drained_tx,
        }
    }

    /// Register a request with the engine. The run loop calls this as
    /// submissions come off the channel; single-stepped simulations can
    /// call it directly.
    pub fn admit(&mut self, passenger: Passenger) {
        info!(
            name = passenger.name(),
            origin = passenger.origin(),
            destination = passenger.destination(),
            direction = %passenger.direction(),
            "passenger waiting"
        );
        self.registry.add_waiting(passenger);
    }

    /// Requests not yet carried to completion.
    pub fn pending(&self) -> usize {
        self.registry.pending()
    }

    pub fn status(&self) -> CarStatus {
        CarStatus {
            floor: self.car.floor(),
            heading: self.car.heading(),
            waiting_up: self.registry.waiting_up_count(),
            waiting_down: self.registry.waiting_down_count(),
            riding: self.registry.riding_count(),
        }
    }

    /// One control tick: a parked car decides whether to leave idle, a
    /// moving car serves the floor it is on and then advances.
    pub fn tick(&mut self) {
        match self.car.heading() {
            Heading::Idle => self.leave_idle_or_stay(),
            Heading::Up | Heading::Down => {
                self.serve_floor();
                self.advance();
            }
        }
    }

    /// Pick a heading for a parked car. Biased toward the busier side:
    /// down only on strictly greater down-demand, ties go up, and a car
    /// parked at the bottom always starts upward. A heuristic, not a
    /// shortest-wait guarantee.
    fn leave_idle_or_stay(&mut self) {
        let up = self.registry.waiting_up_count();
        let down = self.registry.waiting_down_count();
        if up == 0 && down == 0 {
            trace!("nobody needs the elevator, staying idle");
            return;
        }
        let heading = if up < down && self.car.floor() != self.car.min_floor() {
            Heading::Down
        } else {
            Heading::Up
        };
        self.car.set_heading(heading);
        info!(floor = self.car.floor(), heading = %heading, "leaving idle");
    }

    /// Discharge every rider bound for this floor, then board everyone
    /// waiting to travel the way the car is going. FIFO within the floor.
    fn serve_floor(&mut self) {
        let floor = self.car.floor();
        for passenger in self.registry.take_riding(floor) {
            passenger.discharge();
            info!(name = passenger.name(), floor, "passenger got off");
        }
        let direction = match self.car.heading().direction() {
            Some(direction) => direction,
            None => return, // a parked car boards nobody
        };
        for passenger in self.registry.take_waiting(direction, floor) {
            passenger.board();
            info!(
                name = passenger.name(),
                floor,
                destination = passenger.destination(),
                direction = %direction,
                "passenger got on"
            );
            self.registry.add_riding(passenger);
        }
    }

    /// Move one floor in the current heading, reversing at the bounds.
    /// With nothing pending anywhere the car parks instead and the drain
    /// signal fires.
    fn advance(&mut self) {
        if self.registry.pending() == 0 {
            self.car.set_heading(Heading::Idle);
            info!(floor = self.car.floor(), "building drained, parking");
            if let Some(drained_tx) = self.drained_tx.take() {
                if drained_tx.try_send(()).is_err() {
                    warn!("drain signal receiver is gone");
                }
            }
            return;
        }
        let floor = self.car.floor();
        match self.car.heading() {
            Heading::Up => {
                if floor == self.car.max_floor() {
                    self.reverse(Heading::Down);
                    self.car.set_floor(floor - 1);
                } else {
                    self.car.set_floor(floor + 1);
                }
            }
            Heading::Down => {
                if floor == self.car.min_floor() {
                    self.reverse(Heading::Up);
                    self.car.set_floor(floor + 1);
                } else {
                    self.car.set_floor(floor - 1);
                }
            }
            Heading::Idle => (),
        }
        debug!(floor = self.car.floor(), heading = %self.car.heading(), "car moved");
    }

    /// Reversing serves the same floor a second time under the new
    /// heading, so passengers waiting in the other direction at the end of
    /// the line board before the car pulls away. Runs even when nobody is
    /// there to board.
    fn reverse(&mut self, heading: Heading) {
        info!(floor = self.car.floor(), heading = %heading, "reversing");
        self.car.set_heading(heading);
        self.serve_floor();
    }
}

/// Drive the engine until stopped. Submissions are folded into the
/// registry as they arrive; the SCAN decisions themselves happen on a
/// fixed tick, so a request waits at most one poll interval before it is
/// considered. A stop request, or every submitter and the stop handle
/// going away, ends the loop.
pub(crate) fn run(
    mut engine: Engine,
    poll_interval: Duration,
    submit_rx: Receiver<Passenger>,
    stop_rx: Receiver<()>,
    status_tx: Option<Sender<CarStatus>>,
) {
    let ticker = tick(poll_interval);
    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(submit_rx) -> msg => match msg {
                Ok(passenger) => engine.admit(passenger),
                Err(_) => break,
            },
            recv(ticker) -> _ => {
                engine.tick();
                if let Some(status_tx) = &status_tx {
                    let _ = status_tx.send(engine.status());
                }
            },
        }
    }
    debug!("dispatch loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    use crate::passenger::Stage;

    fn engine(min: u8, max: u8, start: u8, heading: Heading) -> Engine {
        Engine::new(Arc::new(Car::new(min, max, start, heading).unwrap()))
    }

    fn passenger(name: &str, origin: u8, destination: u8) -> Passenger {
        Passenger::new(name, origin, destination).unwrap()
    }

    /// Tick until `done` holds, with a hard cap so a scheduling bug fails
    /// the test instead of hanging it.
    fn tick_until(engine: &mut Engine, mut done: impl FnMut(&Engine) -> bool) {
        for _ in 0..200 {
            if done(engine) {
                return;
            }
            engine.tick();
        }
        panic!("no progress after 200 ticks");
    }

    #[test]
    fn stays_idle_with_no_requests() {
        let mut engine = engine(1, 9, 5, Heading::Idle);
        for _ in 0..5 {
            engine.tick();
        }
        assert_eq!(engine.status().heading, Heading::Idle);
        assert_eq!(engine.status().floor, 5);
    }

    #[test]
    fn round_trip_from_idle() {
        let mut engine = engine(1, 9, 5, Heading::Idle);
        let rider = passenger("rider", 6, 7);
        engine.admit(rider.clone());

        engine.tick();
        assert_eq!(engine.status().heading, Heading::Up);
        assert_eq!(engine.status().floor, 5);

        tick_until(&mut engine, |e| e.status().heading == Heading::Idle);
        assert_eq!(rider.stage(), Stage::Discharged);
        assert_eq!(engine.status().floor, 7);
        assert_eq!(engine.pending(), 0);
    }

    #[test]
    fn boards_on_the_same_tick_as_a_boundary_reversal() {
        let mut engine = engine(1, 9, 8, Heading::Idle);
        let going_up = passenger("going-up", 8, 9);
        let going_down = passenger("going-down", 9, 1);
        engine.admit(going_up.clone());
        engine.admit(going_down.clone());

        engine.tick(); // leaves idle, heading up
        engine.tick(); // boards at 8, moves to 9
        assert_eq!(engine.status().floor, 9);

        // Top-floor tick: the up rider gets off, the car reverses and the
        // down passenger boards before it leaves floor 9.
        engine.tick();
        assert_eq!(going_up.stage(), Stage::Discharged);
        assert_eq!(going_down.stage(), Stage::Boarded);
        assert_eq!(engine.status().heading, Heading::Down);
        assert_eq!(engine.status().floor, 8);

        tick_until(&mut engine, |e| e.status().heading == Heading::Idle);
        assert_eq!(going_down.stage(), Stage::Discharged);
        assert_eq!(engine.status().floor, 1);
    }

    #[test]
    fn reversal_with_nobody_opposite_is_harmless() {
        let mut engine = engine(1, 9, 8, Heading::Idle);
        let up_rider = passenger("up-rider", 8, 9);
        let below = passenger("below", 2, 1);
        engine.admit(up_rider.clone());
        engine.admit(below.clone());

        engine.tick(); // heading up (tie goes up)
        engine.tick(); // boards at 8, moves to 9
        engine.tick(); // discharges at 9, reverses with nobody waiting there
        assert_eq!(engine.status().heading, Heading::Down);
        assert_eq!(engine.status().floor, 8);
        assert_eq!(below.stage(), Stage::Waiting);

        tick_until(&mut engine, |e| e.status().heading == Heading::Idle);
        assert_eq!(below.stage(), Stage::Discharged);
    }

    #[test]
    fn no_wasted_motion_when_all_demand_is_below() {
        let mut engine = engine(1, 9, 5, Heading::Idle);
        let rider = passenger("rider", 3, 1);
        engine.admit(rider.clone());

        let mut highest = 0;
        tick_until(&mut engine, |e| {
            highest = highest.max(e.status().floor);
            e.status().heading == Heading::Idle && e.pending() == 0
        });
        assert_eq!(rider.stage(), Stage::Discharged);
        assert!(highest <= 5, "car climbed to {highest} with all demand below");
    }

    #[test]
    fn idle_ties_go_up() {
        let mut engine = engine(1, 9, 5, Heading::Idle);
        engine.admit(passenger("up", 6, 7));
        engine.admit(passenger("down", 4, 2));
        engine.tick();
        assert_eq!(engine.status().heading, Heading::Up);
    }

    #[test]
    fn idle_prefers_down_on_strictly_greater_demand() {
        let mut engine = engine(1, 9, 5, Heading::Idle);
        engine.admit(passenger("up", 6, 7));
        engine.admit(passenger("down-a", 4, 2));
        engine.admit(passenger("down-b", 3, 1));
        engine.tick();
        assert_eq!(engine.status().heading, Heading::Down);
    }

    #[test]
    fn idle_at_the_bottom_goes_up_despite_down_demand() {
        let mut engine = engine(1, 9, 2, Heading::Idle);
        // Ride the car down to the bottom floor first.
        engine.admit(passenger("settler", 2, 1));
        tick_until(&mut engine, |e| {
            e.status().heading == Heading::Idle && e.status().floor == 1
        });

        engine.admit(passenger("up", 3, 4));
        engine.admit(passenger("down-a", 5, 2));
        engine.admit(passenger("down-b", 6, 2));
        engine.tick();
        assert_eq!(engine.status().heading, Heading::Up);
    }

    #[test]
    fn drain_signal_fires_at_most_once() {
        let (drained_tx, drained_rx) = unbounded();
        let car = Arc::new(Car::new(1, 9, 5, Heading::Idle).unwrap());
        let mut engine = Engine::with_drain_signal(car, Some(drained_tx));

        engine.admit(passenger("first", 6, 7));
        tick_until(&mut engine, |e| {
            e.status().heading == Heading::Idle && e.pending() == 0
        });
        assert_eq!(drained_rx.try_recv(), Ok(()));

        // A second wave drains again, but the signal stays quiet.
        engine.admit(passenger("second", 7, 6));
        tick_until(&mut engine, |e| e.pending() == 0);
        assert!(drained_rx.try_recv().is_err());
    }
}
