use crate::error::{EditError, Result};
use crate::model::{Point3, ScreenPoint};

/// Maps a world position to screen pixels under the current camera.
///
/// Returning `None` means the point has no meaningful screen position (for
/// instance it sits behind the camera) and must be ignored by picking.
pub trait Projector {
    fn project(&self, p: Point3) -> Option<ScreenPoint>;
}

impl<F> Projector for F
where
    F: Fn(Point3) -> Option<ScreenPoint>,
{
    fn project(&self, p: Point3) -> Option<ScreenPoint> {
        self(p)
    }
}

/// Canvas rectangle in client pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Viewport> {
        for (param, v) in [("left", left), ("top", top), ("width", width), ("height", height)] {
            if !v.is_finite() {
                return Err(EditError::NonFinite { param });
            }
        }
        if width <= 0.0 {
            return Err(EditError::OutOfRange { param: "width", min: 0.0, max: f64::INFINITY, got: width });
        }
        if height <= 0.0 {
            return Err(EditError::OutOfRange { param: "height", min: 0.0, max: f64::INFINITY, got: height });
        }
        Ok(Viewport { left, top, width, height })
    }
}

/// Column-major view-projection matrix plus the canvas it renders into; the
/// same convention a WebGL camera exposes (`projectionMatrix * matrixWorldInverse`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewProjection {
    m: [f64; 16],
    viewport: Viewport,
}

impl ViewProjection {
    pub fn new(m: [f64; 16], viewport: Viewport) -> Result<ViewProjection> {
        if m.iter().any(|v| !v.is_finite()) {
            return Err(EditError::NonFinite { param: "view_projection" });
        }
        Ok(ViewProjection { m, viewport })
    }

    pub fn from_slice(m: &[f64], viewport: Viewport) -> Result<ViewProjection> {
        let arr: [f64; 16] = m.try_into().map_err(|_| EditError::InvalidArray {
            param: "view_projection",
            expected: 16,
            got: m.len(),
        })?;
        ViewProjection::new(arr, viewport)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl Projector for ViewProjection {
    fn project(&self, p: Point3) -> Option<ScreenPoint> {
        let m = &self.m;
        let cx = m[0] * p.x + m[4] * p.y + m[8] * p.z + m[12];
        let cy = m[1] * p.x + m[5] * p.y + m[9] * p.z + m[13];
        let cw = m[3] * p.x + m[7] * p.y + m[11] * p.z + m[15];
        if !(cw > 0.0) {
            return None;
        }
        let (nx, ny) = (cx / cw, cy / cw);
        let vp = &self.viewport;
        Some(ScreenPoint {
            x: (nx * 0.5 + 0.5) * vp.width + vp.left,
            y: (-ny * 0.5 + 0.5) * vp.height + vp.top,
        })
    }
}
