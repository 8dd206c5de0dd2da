//! Deterministic offline planner for multi-drone choreography shows.
//!
//! Given a drone roster and a list of formation steps, [`sequencer`] walks
//! the pipeline for each step — [`formation`] generation, [`assignment`] to
//! minimise total travel, [`trajectory`] synthesis as minimum-jerk curves,
//! then [`postprocess`] time-scaling and collision resolution — and stitches
//! the result into a global timeline that [`export`] can sample to CSV.

pub mod assignment;
pub mod drone;
pub mod error;
pub mod export;
pub mod formation;
pub mod math;
pub mod postprocess;
pub mod sequencer;
pub mod trajectory;
pub mod validator;

pub use drone::Drone;
pub use error::{Result, ShowError};
pub use formation::{FormationConfig, FormationSpec};
pub use math::Point3;
pub use sequencer::{SequencerParams, ShowResult, ShowSequencer, StepRecord, StepSpec};
pub use trajectory::Trajectory;
