use std::sync::atomic::{AtomicU8, Ordering};

use crate::direction::Heading;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CarError {
    #[error("floor bounds are invalid: min floor {min} must be below max floor {max}")]
    InvalidBounds { min: u8, max: u8 },
    #[error("start floor {start} must be above floor {min} and at most floor {max}")]
    StartFloorOutOfRange { start: u8, min: u8, max: u8 },
}

/// The car's physical state. Floor and heading sit in atomics so status
/// consumers and tests can read them while the dispatch engine runs; the
/// engine is the only writer.
#[derive(Debug)]
pub struct Car {
    min_floor: u8,
    max_floor: u8,
    floor: AtomicU8,
    heading: AtomicU8,
}

impl Car {
    pub fn new(min_floor: u8, max_floor: u8, start_floor: u8, heading: Heading) -> Result<Self, CarError> {
        if min_floor >= max_floor {
            return Err(CarError::InvalidBounds { min: min_floor, max: max_floor });
        }
        if start_floor <= min_floor || start_floor > max_floor {
            return Err(CarError::StartFloorOutOfRange {
                start: start_floor,
                min: min_floor,
                max: max_floor,
            });
        }
        Ok(Car {
            min_floor,
            max_floor,
            floor: AtomicU8::new(start_floor),
            heading: AtomicU8::new(heading.repr()),
        })
    }

    pub fn min_floor(&self) -> u8 {
        self.min_floor
    }

    pub fn max_floor(&self) -> u8 {
        self.max_floor
    }

    pub fn floor(&self) -> u8 {
        self.floor.load(Ordering::SeqCst)
    }

    pub fn heading(&self) -> Heading {
        Heading::from_repr(self.heading.load(Ordering::SeqCst))
    }

    pub(crate) fn set_floor(&self, floor: u8) {
        debug_assert!((self.min_floor..=self.max_floor).contains(&floor));
        self.floor.store(floor, Ordering::SeqCst);
    }

    pub(crate) fn set_heading(&self, heading: Heading) {
        self.heading.store(heading.repr(), Ordering::SeqCst);
    }
}

/// Snapshot published to status consumers after every tick.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct CarStatus {
    pub floor: u8,
    pub heading: Heading,
    pub waiting_up: usize,
    pub waiting_down: usize,
    pub riding: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        let err = Car::new(9, 1, 5, Heading::Idle).unwrap_err();
        assert_eq!(err, CarError::InvalidBounds { min: 9, max: 1 });
    }

    #[test]
    fn rejects_start_at_or_below_the_bottom() {
        let err = Car::new(1, 9, 1, Heading::Idle).unwrap_err();
        assert_eq!(err, CarError::StartFloorOutOfRange { start: 1, min: 1, max: 9 });
    }

    #[test]
    fn rejects_start_above_the_top() {
        let err = Car::new(1, 9, 10, Heading::Idle).unwrap_err();
        assert_eq!(err, CarError::StartFloorOutOfRange { start: 10, min: 1, max: 9 });
    }

    #[test]
    fn top_floor_start_is_allowed() {
        let car = Car::new(1, 9, 9, Heading::Idle).unwrap();
        assert_eq!(car.floor(), 9);
        assert_eq!(car.heading(), Heading::Idle);
    }
}
