//! YAML configuration: the drone roster and the show config live in two
//! separate files, parsed into `swarm-core`'s planning types, per §3/§6.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use swarm_core::formation::FormationConfig;
use swarm_core::math::Point3;
use swarm_core::sequencer::{SequencerParams, StepSpec};
use swarm_core::Drone;

/// One `drones:` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct DroneEntryConfig {
    pub id: u32,
    pub position: [f64; 3],
    pub max_velocity: f64,
    pub max_acceleration: f64,
}

/// Root of the drone roster file.
#[derive(Debug, Clone, Deserialize)]
pub struct DroneRosterConfig {
    pub drones: Vec<DroneEntryConfig>,
}

impl DroneRosterConfig {
    /// Loads and parses a drone roster file from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open drone roster file: {:?}", path))?;
        let config: DroneRosterConfig = serde_yaml::from_reader(file)
            .with_context(|| format!("failed to parse drone roster file: {:?}", path))?;
        Ok(config)
    }

    pub fn build_drones(&self) -> Result<Vec<Drone>> {
        self.drones
            .iter()
            .map(|d| {
                let position = Point3::new(d.position[0], d.position[1], d.position[2]);
                Drone::new(d.id, position, d.max_velocity, d.max_acceleration)
                    .with_context(|| format!("invalid drone entry (id {})", d.id))
            })
            .collect()
    }
}

/// One `sequences:` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    pub formation: FormationConfig,
    pub transition_duration: f64,
    #[serde(default)]
    pub hold_duration: f64,
}

/// Post-processing tunables. Every field has the same default as
/// [`SequencerParams::default`]; the config only needs to name overrides.
/// `seed` lives at the top of [`ShowConfig`] instead, per §3.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostprocessConfig {
    pub sample_dt: f64,
    pub min_separation: f64,
    pub epsilon: f64,
    pub max_time_scale_iterations: usize,
    pub collision_delay_step: f64,
    pub max_collision_iterations: usize,
    pub max_total_delay: f64,
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        let p = SequencerParams::default();
        Self {
            sample_dt: p.sample_dt,
            min_separation: p.min_separation,
            epsilon: p.epsilon,
            max_time_scale_iterations: p.max_time_scale_iterations,
            collision_delay_step: p.collision_delay_step,
            max_collision_iterations: p.max_collision_iterations,
            max_total_delay: p.max_total_delay,
        }
    }
}

impl From<PostprocessConfig> for SequencerParams {
    fn from(c: PostprocessConfig) -> Self {
        let default = SequencerParams::default();
        Self {
            seed: default.seed,
            sample_dt: c.sample_dt,
            min_separation: c.min_separation,
            epsilon: c.epsilon,
            max_time_scale_iterations: c.max_time_scale_iterations,
            collision_delay_step: c.collision_delay_step,
            max_collision_iterations: c.max_collision_iterations,
            max_total_delay: c.max_total_delay,
        }
    }
}

fn default_fps() -> u32 {
    20
}

/// Root of the show configuration file: the step sequence plus the
/// show-wide `fps` (export sample rate) and `seed` (count-normaliser RNG
/// seed), per §3/§6.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowConfig {
    pub sequences: Vec<StepConfig>,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub postprocess: PostprocessConfig,
}

impl ShowConfig {
    /// Loads and parses a show configuration file from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open show config file: {:?}", path))?;
        let config: ShowConfig =
            serde_yaml::from_reader(file).with_context(|| format!("failed to parse show config file: {:?}", path))?;
        Ok(config)
    }

    /// Resolves every step's [`FormationConfig`] and builds the planning
    /// inputs `swarm_core::ShowSequencer` needs.
    pub fn build_inputs(&self) -> Result<(Vec<StepSpec>, SequencerParams)> {
        let steps = self
            .sequences
            .iter()
            .map(|s| {
                let formation = s
                    .formation
                    .resolve()
                    .with_context(|| format!("invalid formation config: {:?}", s.formation.type_))?;
                Ok(StepSpec {
                    formation,
                    transition_duration: s.transition_duration,
                    hold_duration: s.hold_duration,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut params: SequencerParams = self.postprocess.clone().into();
        params.seed = self.seed;
        Ok((steps, params))
    }
}
