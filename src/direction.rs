use std::fmt;

/// The way a passenger wants to travel. There is no third option: a
/// request is always for some other floor.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the car is headed. `Idle` means parked with no pending work.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Idle,
}

impl Heading {
    /// The travel direction the car is serving, if it is moving at all.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Heading::Up => Some(Direction::Up),
            Heading::Down => Some(Direction::Down),
            Heading::Idle => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::Up => "up",
            Heading::Down => "down",
            Heading::Idle => "idle",
        }
    }

    // repr/from_repr exist for the atomic cell in `Car`.
    pub(crate) fn repr(self) -> u8 {
        match self {
            Heading::Idle => 0,
            Heading::Up => 1,
            Heading::Down => 2,
        }
    }

    pub(crate) fn from_repr(repr: u8) -> Self {
        match repr {
            1 => Heading::Up,
            2 => Heading::Down,
            _ => Heading::Idle,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_repr_roundtrips() {
        for heading in [Heading::Up, Heading::Down, Heading::Idle] {
            assert_eq!(Heading::from_repr(heading.repr()), heading);
        }
    }

    #[test]
    fn idle_serves_no_direction() {
        assert_eq!(Heading::Idle.direction(), None);
        assert_eq!(Heading::Up.direction(), Some(Direction::Up));
        assert_eq!(Heading::Down.direction(), Some(Direction::Down));
    }
}
