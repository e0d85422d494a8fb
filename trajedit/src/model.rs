use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EditError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ZERO: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
    pub fn add(self, o: Point3) -> Point3 {
        Point3::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
    pub fn sub(self, o: Point3) -> Point3 {
        Point3::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(a: [f64; 3]) -> Self {
        Point3::new(a[0], a[1], a[2])
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

/// One waypoint as seen by callers: position plus the optional auxiliary
/// (gripper) value. Present only when the set was loaded with that channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub pos: Point3,
    pub aux: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        ScreenPoint { x, y }
    }
    pub fn distance(self, o: ScreenPoint) -> f64 {
        (self.x - o.x).hypot(self.y - o.y)
    }
}

/// Translation constraint handed to the transform gizmo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    #[default]
    Free = 0,
    X = 1,
    Y = 2,
    Z = 3,
}

/// Which translate handles the gizmo should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GizmoHandles {
    pub x: bool,
    pub y: bool,
    pub z: bool,
    pub xy: bool,
    pub yz: bool,
    pub xz: bool,
}

impl AxisMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AxisMode::Free => "free",
            AxisMode::X => "x",
            AxisMode::Y => "y",
            AxisMode::Z => "z",
        }
    }

    // Planar handles only make sense when unconstrained.
    pub fn visible_handles(self) -> GizmoHandles {
        match self {
            AxisMode::Free => GizmoHandles { x: true, y: true, z: true, xy: true, yz: true, xz: true },
            single => GizmoHandles {
                x: single == AxisMode::X,
                y: single == AxisMode::Y,
                z: single == AxisMode::Z,
                xy: false,
                yz: false,
                xz: false,
            },
        }
    }
}

impl FromStr for AxisMode {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(AxisMode::Free),
            "x" => Ok(AxisMode::X),
            "y" => Ok(AxisMode::Y),
            "z" => Ok(AxisMode::Z),
            _ => Err(EditError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for AxisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_mode_parses_and_limits_handles() {
        assert_eq!("free".parse::<AxisMode>().unwrap(), AxisMode::Free);
        assert_eq!(" Y ".parse::<AxisMode>().unwrap(), AxisMode::Y);
        assert!(matches!("w".parse::<AxisMode>(), Err(EditError::InvalidMode(_))));

        let h = AxisMode::Z.visible_handles();
        assert!(!h.x && !h.y && h.z);
        assert!(!h.xy && !h.yz && !h.xz);
        let all = AxisMode::Free.visible_handles();
        assert!(all.x && all.y && all.z && all.xy && all.yz && all.xz);
    }
}
