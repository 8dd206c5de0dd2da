//! The drone roster: positions and kinodynamic limits.

use crate::error::{Result, ShowError};
use crate::math::Point3;

/// A single drone: its identity, current position, and kinodynamic limits.
///
/// Immutable after construction except for `current_position`, which the
/// sequencer updates between steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drone {
    pub drone_id: u32,
    pub current_position: Point3,
    pub max_velocity: f64,
    pub max_acceleration: f64,
}

impl Drone {
    /// Builds a drone, validating that both limits are strictly positive.
    pub fn new(drone_id: u32, initial_position: Point3, max_velocity: f64, max_acceleration: f64) -> Result<Self> {
        if !(max_velocity > 0.0) {
            return Err(ShowError::InvalidInput(format!(
                "drone {drone_id}: max_velocity must be > 0, got {max_velocity}"
            )));
        }
        if !(max_acceleration > 0.0) {
            return Err(ShowError::InvalidInput(format!(
                "drone {drone_id}: max_acceleration must be > 0, got {max_acceleration}"
            )));
        }
        if !initial_position.iter().all(|c| c.is_finite()) {
            return Err(ShowError::InvalidInput(format!(
                "drone {drone_id}: initial_position must be finite"
            )));
        }
        Ok(Self {
            drone_id,
            current_position: initial_position,
            max_velocity,
            max_acceleration,
        })
    }
}
