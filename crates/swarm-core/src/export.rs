//! Samples a finished show on a fixed FPS grid and writes it out as CSV,
//! either as one combined file or one file per drone, per §4.8/§6.

use crate::error::Result;
use crate::math::{central_difference, sanitize_for_export, Point3};
use crate::sequencer::ShowResult;
use std::path::Path;
use tracing::info;

/// One sampled row: a drone's position and central-difference velocity at a
/// given global time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRow {
    pub t: f64,
    pub drone_id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

/// Builds the `M = floor(duration*fps) + (1 if include_endpoint else 0)`
/// sample grid of timestamps `i/fps`, per §4.8.
fn sample_grid(duration: f64, fps: u32, include_endpoint: bool) -> Vec<f64> {
    let step = 1.0 / fps as f64;
    let m = (duration * fps as f64).floor() as usize + usize::from(include_endpoint);
    (0..m).map(|i| (i as f64 * step).min(duration)).collect()
}

/// Samples every `drone_id` in `drone_ids` across `show`'s full duration on
/// the FPS grid, with velocity via central difference (`dt = 1/fps`),
/// ordered by time then by drone id. Non-finite positions/velocities are
/// sanitised to NaN, never during planning/validation — export only.
pub fn sample_show(show: &ShowResult, drone_ids: &[u32], fps: u32, include_endpoint: bool) -> Vec<ExportRow> {
    let mut ids: Vec<u32> = drone_ids.to_vec();
    ids.sort_unstable();

    let duration = show.total_duration;
    let dt = 1.0 / fps as f64;
    let grid = sample_grid(duration, fps, include_endpoint);

    let mut rows = Vec::with_capacity(grid.len() * ids.len());
    for t in grid {
        for &id in &ids {
            let position_fn = |tt: f64| -> Point3 {
                show.position_at(id, tt).expect("drone id missing from show result")
            };
            let position = sanitize_for_export(position_fn(t));
            let velocity = sanitize_for_export(central_difference(&position_fn, t, dt, duration));
            rows.push(ExportRow {
                t,
                drone_id: id,
                x: position.x,
                y: position.y,
                z: position.z,
                vx: velocity.x,
                vy: velocity.y,
                vz: velocity.z,
            });
        }
    }
    rows
}

/// Writes one combined CSV with columns `t,drone_id,x,y,z,vx,vy,vz`, named
/// `all_drones_trajectory.csv`.
pub fn write_combined_csv(dir: &Path, show: &ShowResult, drone_ids: &[u32], fps: u32, include_endpoint: bool) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("all_drones_trajectory.csv");
    let rows = sample_show(show, drone_ids, fps, include_endpoint);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["t", "drone_id", "x", "y", "z", "vx", "vy", "vz"])?;
    for row in &rows {
        writer.write_record(&[
            row.t.to_string(),
            row.drone_id.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            row.z.to_string(),
            row.vx.to_string(),
            row.vy.to_string(),
            row.vz.to_string(),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote combined show CSV");
    Ok(())
}

/// Writes one CSV per drone, named `drone_<3-digit id>_trajectory.csv` inside
/// `dir`, with columns `t,x,y,z,vx,vy,vz`. Creates `dir` if it doesn't exist.
pub fn write_per_drone_csv(dir: &Path, show: &ShowResult, drone_ids: &[u32], fps: u32, include_endpoint: bool) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let rows = sample_show(show, drone_ids, fps, include_endpoint);

    let mut ids: Vec<u32> = drone_ids.to_vec();
    ids.sort_unstable();

    for id in ids {
        let path = dir.join(format!("drone_{id:03}_trajectory.csv"));
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["t", "x", "y", "z", "vx", "vy", "vz"])?;
        for row in rows.iter().filter(|r| r.drone_id == id) {
            writer.write_record(&[
                row.t.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.vx.to_string(),
                row.vy.to_string(),
                row.vz.to_string(),
            ])?;
        }
        writer.flush()?;
        info!(path = %path.display(), "wrote per-drone show CSV");
    }
    Ok(())
}
