use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::direction::Direction;

/// Where a passenger is in their journey. Advances strictly
/// `Waiting -> Boarded -> Discharged`; only the dispatch engine moves it.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Waiting,
    Boarded,
    Discharged,
}

impl Stage {
    fn repr(self) -> u8 {
        match self {
            Stage::Waiting => 0,
            Stage::Boarded => 1,
            Stage::Discharged => 2,
        }
    }

    fn from_repr(repr: u8) -> Self {
        match repr {
            1 => Stage::Boarded,
            2 => Stage::Discharged,
            _ => Stage::Waiting,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("origin and destination are both floor {0}")]
    SameFloor(u8),
}

/// A single travel request: who is riding, where they get on and where
/// they want to get off. The direction is derived from the two floors, so
/// a request can never claim to go up while its destination is below its
/// origin.
///
/// Clones share the journey stage, so a submitter can keep one around to
/// watch for boarding and discharge while the engine works.
#[derive(Debug, Clone)]
pub struct Passenger {
    name: String,
    origin: u8,
    destination: u8,
    direction: Direction,
    stage: Arc<AtomicU8>,
}

impl Passenger {
    pub fn new(name: impl Into<String>, origin: u8, destination: u8) -> Result<Self, RequestError> {
        if origin == destination {
            return Err(RequestError::SameFloor(origin));
        }
        let direction = if destination > origin { Direction::Up } else { Direction::Down };
        Ok(Passenger {
            name: name.into(),
            origin,
            destination,
            direction,
            stage: Arc::new(AtomicU8::new(Stage::Waiting.repr())),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> u8 {
        self.origin
    }

    pub fn destination(&self) -> u8 {
        self.destination
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn stage(&self) -> Stage {
        Stage::from_repr(self.stage.load(Ordering::SeqCst))
    }

    pub(crate) fn board(&self) {
        self.stage.store(Stage::Boarded.repr(), Ordering::SeqCst);
    }

    pub(crate) fn discharge(&self) {
        self.stage.store(Stage::Discharged.repr(), Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_the_floors() {
        let up = Passenger::new("a", 2, 7).unwrap();
        assert_eq!(up.direction(), Direction::Up);
        let down = Passenger::new("b", 7, 2).unwrap();
        assert_eq!(down.direction(), Direction::Down);
    }

    #[test]
    fn same_floor_is_rejected() {
        let err = Passenger::new("a", 4, 4).unwrap_err();
        assert_eq!(err, RequestError::SameFloor(4));
    }

    #[test]
    fn clones_share_the_stage() {
        let passenger = Passenger::new("a", 1, 2).unwrap();
        let observer = passenger.clone();
        assert_eq!(observer.stage(), Stage::Waiting);
        passenger.board();
        assert_eq!(observer.stage(), Stage::Boarded);
        passenger.discharge();
        assert_eq!(observer.stage(), Stage::Discharged);
    }
}
