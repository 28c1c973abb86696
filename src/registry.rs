use std::collections::HashMap;

use crate::direction::Direction;
use crate::passenger::Passenger;

/// Pending requests grouped per floor: two pools of waiting passengers
/// keyed by origin floor and one pool of riders keyed by destination.
/// Owned exclusively by the dispatch engine; submitters hand passengers
/// over on a channel instead of touching these maps.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    waiting_up: HashMap<u8, Vec<Passenger>>,
    waiting_down: HashMap<u8, Vec<Passenger>>,
    riding: HashMap<u8, Vec<Passenger>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the floor slot matching the desired direction. FIFO
    /// within a slot.
    pub fn add_waiting(&mut self, passenger: Passenger) {
        let pool = match passenger.direction() {
            Direction::Up => &mut self.waiting_up,
            Direction::Down => &mut self.waiting_down,
        };
        pool.entry(passenger.origin()).or_default().push(passenger);
    }

    /// Detach everyone waiting at `floor` to travel `direction`, leaving
    /// the slot empty.
    pub fn take_waiting(&mut self, direction: Direction, floor: u8) -> Vec<Passenger> {
        let pool = match direction {
            Direction::Up => &mut self.waiting_up,
            Direction::Down => &mut self.waiting_down,
        };
        pool.remove(&floor).unwrap_or_default()
    }

    /// File a boarded passenger under their destination floor.
    pub fn add_riding(&mut self, passenger: Passenger) {
        self.riding.entry(passenger.destination()).or_default().push(passenger);
    }

    /// Detach every rider getting off at `floor`.
    pub fn take_riding(&mut self, floor: u8) -> Vec<Passenger> {
        self.riding.remove(&floor).unwrap_or_default()
    }

    pub fn waiting_up_count(&self) -> usize {
        self.waiting_up.values().map(Vec::len).sum()
    }

    pub fn waiting_down_count(&self) -> usize {
        self.waiting_down.values().map(Vec::len).sum()
    }

    pub fn riding_count(&self) -> usize {
        self.riding.values().map(Vec::len).sum()
    }

    /// Everyone the car still owes service: waiting either way plus riders.
    pub fn pending(&self) -> usize {
        self.waiting_up_count() + self.waiting_down_count() + self.riding_count()
    }
}
