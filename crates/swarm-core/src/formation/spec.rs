//! `FormationSpec`: the typed description of one step's target shape, and
//! `FormationConfig`: the `{type, params}` wire shape it's resolved from.

use crate::error::{Result, ShowError};
use crate::math::{Axis, Plane, Point3};
use serde::Deserialize;

/// One formation request, already resolved to a known shape. The sequencer
/// matches on this directly; it never sees an unrecognised `type` string.
#[derive(Debug, Clone)]
pub enum FormationSpec {
    Line {
        length: f64,
        axis: String,
    },
    Circle {
        radius: f64,
        center: [f64; 3],
        normal: [f64; 3],
    },
    Grid {
        spacing: f64,
        center: [f64; 3],
        plane: String,
    },
    Sphere {
        radius: f64,
        center: [f64; 3],
    },
    Heart {
        size: f64,
        center: [f64; 3],
        plane: String,
    },
    Wave {
        wavelength: f64,
        amplitude: f64,
        length: f64,
        center: [f64; 3],
    },
    Spiral {
        radius_start: f64,
        radius_end: f64,
        height: f64,
        turns: f64,
        center: [f64; 3],
    },
    Helix {
        radius: f64,
        height: f64,
        turns: f64,
        center: [f64; 3],
    },
    Number {
        digit: u8,
        size: f64,
        center: [f64; 3],
        plane: String,
    },
    Pyramid {
        base: f64,
        height: f64,
        center: [f64; 3],
    },
    Cube {
        side: f64,
        center: [f64; 3],
    },
    Star {
        outer_radius: f64,
        inner_radius: f64,
        size: f64,
        center: [f64; 3],
        plane: String,
    },
}

impl FormationSpec {
    /// Short type tag, used for `StepRecord::type_tag` and diagnostics.
    pub fn type_tag(&self) -> &'static str {
        match self {
            FormationSpec::Line { .. } => "line",
            FormationSpec::Circle { .. } => "circle",
            FormationSpec::Grid { .. } => "grid",
            FormationSpec::Sphere { .. } => "sphere",
            FormationSpec::Heart { .. } => "heart",
            FormationSpec::Wave { .. } => "wave",
            FormationSpec::Spiral { .. } => "spiral",
            FormationSpec::Helix { .. } => "helix",
            FormationSpec::Number { .. } => "number",
            FormationSpec::Pyramid { .. } => "pyramid",
            FormationSpec::Cube { .. } => "cube",
            FormationSpec::Star { .. } => "star",
        }
    }
}

/// Raw `{type, params}` pair as it appears in the show config's `sequences[].formation`
/// table (§6). Deserializing stops here: an unrecognised `type` is only ever
/// reported as a structured [`ShowError::UnsupportedFormation`], never as a
/// generic `serde_yaml` parse error, because `resolve` — not `Deserialize` —
/// is what dispatches on the tag.
#[derive(Debug, Clone, Deserialize)]
pub struct FormationConfig {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default = "default_params")]
    pub params: serde_yaml::Value,
}

fn default_params() -> serde_yaml::Value {
    serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
}

macro_rules! params_struct {
    ($name:ident { $($field:ident : $ty:ty),+ $(,)? }) => {
        #[derive(Debug, Deserialize)]
        struct $name {
            $($field: $ty,)+
        }
    };
}

params_struct!(LineParams { length: f64, axis: String });
params_struct!(CircleParams { radius: f64, center: [f64; 3], normal: [f64; 3] });
params_struct!(GridParams { spacing: f64, center: [f64; 3], plane: String });
params_struct!(SphereParams { radius: f64, center: [f64; 3] });
params_struct!(HeartParams { size: f64, center: [f64; 3], plane: String });
params_struct!(WaveParams { wavelength: f64, amplitude: f64, length: f64, center: [f64; 3] });
params_struct!(SpiralParams { radius_start: f64, radius_end: f64, height: f64, turns: f64, center: [f64; 3] });
params_struct!(HelixParams { radius: f64, height: f64, turns: f64, center: [f64; 3] });
params_struct!(NumberParams { digit: u8, size: f64, center: [f64; 3], plane: String });
params_struct!(PyramidParams { base: f64, height: f64, center: [f64; 3] });
params_struct!(CubeParams { side: f64, center: [f64; 3] });
params_struct!(StarParams { outer_radius: f64, inner_radius: f64, size: f64, center: [f64; 3], plane: String });

impl FormationConfig {
    /// Resolves this `{type, params}` pair into a typed `FormationSpec`.
    /// Unknown `type` strings produce `ShowError::UnsupportedFormation`;
    /// malformed `params` produce `ShowError::Yaml`.
    pub fn resolve(&self) -> Result<FormationSpec> {
        fn parse<T: serde::de::DeserializeOwned>(params: &serde_yaml::Value) -> Result<T> {
            Ok(serde_yaml::from_value(params.clone())?)
        }

        match self.type_.as_str() {
            "line" => {
                let p: LineParams = parse(&self.params)?;
                Ok(FormationSpec::Line { length: p.length, axis: p.axis })
            }
            "circle" => {
                let p: CircleParams = parse(&self.params)?;
                Ok(FormationSpec::Circle { radius: p.radius, center: p.center, normal: p.normal })
            }
            "grid" => {
                let p: GridParams = parse(&self.params)?;
                Ok(FormationSpec::Grid { spacing: p.spacing, center: p.center, plane: p.plane })
            }
            "sphere" => {
                let p: SphereParams = parse(&self.params)?;
                Ok(FormationSpec::Sphere { radius: p.radius, center: p.center })
            }
            "heart" => {
                let p: HeartParams = parse(&self.params)?;
                Ok(FormationSpec::Heart { size: p.size, center: p.center, plane: p.plane })
            }
            "wave" => {
                let p: WaveParams = parse(&self.params)?;
                Ok(FormationSpec::Wave {
                    wavelength: p.wavelength,
                    amplitude: p.amplitude,
                    length: p.length,
                    center: p.center,
                })
            }
            "spiral" => {
                let p: SpiralParams = parse(&self.params)?;
                Ok(FormationSpec::Spiral {
                    radius_start: p.radius_start,
                    radius_end: p.radius_end,
                    height: p.height,
                    turns: p.turns,
                    center: p.center,
                })
            }
            "helix" => {
                let p: HelixParams = parse(&self.params)?;
                Ok(FormationSpec::Helix { radius: p.radius, height: p.height, turns: p.turns, center: p.center })
            }
            "number" => {
                let p: NumberParams = parse(&self.params)?;
                Ok(FormationSpec::Number { digit: p.digit, size: p.size, center: p.center, plane: p.plane })
            }
            "pyramid" => {
                let p: PyramidParams = parse(&self.params)?;
                Ok(FormationSpec::Pyramid { base: p.base, height: p.height, center: p.center })
            }
            "cube" => {
                let p: CubeParams = parse(&self.params)?;
                Ok(FormationSpec::Cube { side: p.side, center: p.center })
            }
            "star" => {
                let p: StarParams = parse(&self.params)?;
                Ok(FormationSpec::Star {
                    outer_radius: p.outer_radius,
                    inner_radius: p.inner_radius,
                    size: p.size,
                    center: p.center,
                    plane: p.plane,
                })
            }
            other => Err(ShowError::UnsupportedFormation(other.to_string())),
        }
    }
}

pub(super) fn parse_axis(s: &str) -> Result<Axis> {
    Axis::parse(s).ok_or_else(|| ShowError::InvalidInput(format!("unknown axis: {s}")))
}

pub(super) fn parse_plane(s: &str) -> Result<Plane> {
    Plane::parse(s).ok_or_else(|| ShowError::InvalidInput(format!("unknown plane: {s}")))
}

pub(super) fn as_point(p: [f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(type_: &str, params: serde_yaml::Value) -> FormationConfig {
        FormationConfig { type_: type_.to_string(), params }
    }

    #[test]
    fn unknown_type_is_unsupported_formation() {
        let cfg = config("not_a_shape", default_params());
        match cfg.resolve() {
            Err(ShowError::UnsupportedFormation(t)) => assert_eq!(t, "not_a_shape"),
            other => panic!("expected UnsupportedFormation, got {other:?}"),
        }
    }

    #[test]
    fn known_type_resolves_with_matching_params() {
        let params = serde_yaml::from_str("radius: 2.0\ncenter: [0.0, 0.0, 0.0]\nnormal: [0.0, 0.0, 1.0]").unwrap();
        let cfg = config("circle", params);
        let spec = cfg.resolve().unwrap();
        assert_eq!(spec.type_tag(), "circle");
    }

    #[test]
    fn malformed_params_is_a_yaml_error() {
        let params = serde_yaml::from_str("radius: \"not a number\"").unwrap();
        let cfg = config("sphere", params);
        assert!(matches!(cfg.resolve(), Err(ShowError::Yaml(_))));
    }
}
