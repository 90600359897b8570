//! Ride requests and travel direction.

use std::cmp::Ordering;
use std::fmt;

use crate::{LiftError, LiftResult};

/// A floor number.  The ground floor is 0.
pub type Floor = i32;

// ── Direction ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` to `to`.
    ///
    /// Equal floors have no direction; asking for one is an invariant
    /// violation reported as [`LiftError::InvalidMovementDirection`].
    pub fn between(from: Floor, to: Floor) -> LiftResult<Direction> {
        match to.cmp(&from) {
            Ordering::Greater => Ok(Direction::Up),
            Ordering::Less    => Ok(Direction::Down),
            Ordering::Equal   => Err(LiftError::InvalidMovementDirection { from, to }),
        }
    }

    /// Floor delta of a single step in this direction.
    #[inline]
    pub fn step(self) -> Floor {
        match self {
            Direction::Up   => 1,
            Direction::Down => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up   => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

/// An immutable pickup/delivery request.
///
/// `direction` is redundant with the floor pair but is stored explicitly so
/// consumers can branch on it without recomputing.  A request whose two floors
/// are equal is legal: the car travels to the pickup floor and the delivery
/// leg is empty.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    /// Floor where the passenger waits.
    pub current_floor:     Floor,
    /// Floor where the passenger wants to go.
    pub destination_floor: Floor,
    pub direction:         Direction,
}

impl Request {
    /// Build a request with an explicit `direction`.
    ///
    /// When the floors differ, `direction` must agree with them; use
    /// [`between`](Self::between) to derive it instead.  Equal floors accept
    /// either direction.
    pub fn new(current_floor: Floor, destination_floor: Floor, direction: Direction) -> Self {
        debug_assert!(
            Direction::between(current_floor, destination_floor).map_or(true, |d| d == direction),
            "direction {direction} contradicts {current_floor}→{destination_floor}"
        );
        Self { current_floor, destination_floor, direction }
    }

    /// Ride from the ground floor up to `floor`.
    pub fn up_from_ground(floor: Floor) -> Self {
        Self::new(0, floor, Direction::Up)
    }

    /// Ride from `floor` down to the ground floor.
    pub fn down_to_ground(floor: Floor) -> Self {
        Self::new(floor, 0, Direction::Down)
    }

    /// Build a request, deriving `direction` from the floor pair.
    pub fn between(current_floor: Floor, destination_floor: Floor) -> LiftResult<Self> {
        let direction = Direction::between(current_floor, destination_floor)?;
        Ok(Self::new(current_floor, destination_floor, direction))
    }

    /// Floors a car starting at `from` travels to serve this request
    /// (empty leg to the pickup floor plus the delivery leg).
    pub fn trip_floors(&self, from: Floor) -> u32 {
        from.abs_diff(self.current_floor) + self.current_floor.abs_diff(self.destination_floor)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{} ({})", self.current_floor, self.destination_floor, self.direction)
    }
}
