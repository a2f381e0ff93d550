//! Pinhole camera model and the rig-specific mount convention.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Pinhole intrinsics of the depth-aligned camera.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Focal length in pixels.
    pub focal_px: f64,
    /// Principal point, x component (pixels).
    pub cx: f64,
    /// Principal point, y component (pixels).
    pub cy: f64,
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        // Factory calibration of the rig's depth camera.
        Self {
            width: 640,
            height: 480,
            focal_px: 359.043_914_794_921_9,
            cx: 320.0,
            cy: 240.0,
        }
    }
}

impl CameraIntrinsics {
    /// Back-project a pixel with known depth into the body frame.
    ///
    /// The mount rotation is folded into the pinhole model, so the
    /// body-frame displacement comes out directly as
    /// `d = (Z/f)·(f, cx−x_px, cy−y_px)`; no explicit rotation step is
    /// needed. Equivalent to rotating the optical-frame ray by
    /// [`camera_mount_rotation`].
    pub fn back_project(&self, x_px: f64, y_px: f64, depth_m: f64) -> Vector3<f64> {
        let scale = depth_m / self.focal_px;
        Vector3::new(
            depth_m,
            scale * (self.cx - x_px),
            scale * (self.cy - y_px),
        )
    }
}

/// Rotation taking optical-frame coordinates (x right, y down, z forward)
/// into body-frame coordinates (x forward, y left, z up) for this rig.
///
/// The mount convention is fixed: the optical frame is reached from the body
/// frame by a +90° rotation about the body z-axis followed by a −90°
/// rotation about the resulting x-axis. This constant is the inverse of that
/// conversion.
pub fn camera_mount_rotation() -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -FRAC_PI_2)
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2)
}

/// Yaw-only rotation aligning the body x-axis with the horizontal projection
/// of a displacement.
///
/// The rotation angle is `arccos(v_x / ‖v‖)` for the projection
/// `v = (d_x, d_y, 0)`, negated when the target sits on the robot's right
/// (`v_y < 0`). Returns `None` when the displacement has no horizontal
/// component and the heading is undefined.
pub fn heading_quaternion(d: &Vector3<f64>) -> Option<UnitQuaternion<f64>> {
    let v = Vector3::new(d.x, d.y, 0.0);
    let norm = v.norm();
    if norm == 0.0 {
        return None;
    }
    let mut theta = (v.x / norm).clamp(-1.0, 1.0).acos();
    if v.y < 0.0 {
        theta = -theta;
    }
    Some(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), theta))
}
