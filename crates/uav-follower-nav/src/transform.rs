//! Back-projected goal pose in the map frame.

use log::debug;
use nalgebra::Vector3;

use uav_follower_core::{heading_quaternion, CameraIntrinsics, Pose};

use crate::error::FollowError;

/// Goal and diagnostic positions derived from one localized target.
#[derive(Clone, Copy, Debug)]
pub struct TargetTransform {
    /// Goal pose in the map frame: standoff-adjusted position plus the yaw
    /// toward the target composed onto the robot's orientation.
    pub goal: Pose,
    /// The target's own estimated map-frame position.
    pub target_position: Vector3<f64>,
}

/// Fuse pixel center, validated depth, and the current robot pose into a
/// map-frame goal standing `follow_distance` short of the target.
///
/// The displacement is first rotated by the inverse heading into a frame
/// aligned with the target; that isolates the forward component, so the
/// standoff comes off it alone. The adjusted vector is then rotated by the
/// robot's orientation and translated by its position. The goal orientation
/// is the Hamilton product of the current orientation and the heading.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
pub fn goal_from_target(
    camera: &CameraIntrinsics,
    center_px: (f64, f64),
    depth_m: f64,
    robot: &Pose,
    follow_distance: f64,
) -> Result<TargetTransform, FollowError> {
    let d = camera.back_project(center_px.0, center_px.1, depth_m);
    let heading = heading_quaternion(&d).ok_or(FollowError::UndefinedHeading)?;

    let aligned = heading.inverse() * d;
    debug!(
        "aligned displacement: ({:.3}, {:.3}, {:.3})",
        aligned.x, aligned.y, aligned.z
    );

    let mut goal_body = aligned;
    goal_body.x -= follow_distance;

    let goal = Pose {
        position: robot.orientation * goal_body + robot.position,
        orientation: robot.orientation * heading,
    };
    let target_position = robot.orientation * aligned + robot.position;

    Ok(TargetTransform {
        goal,
        target_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;
    use std::f64::consts::FRAC_PI_2;

    fn camera() -> CameraIntrinsics {
        CameraIntrinsics::default()
    }

    #[test]
    fn on_axis_target_from_identity_pose() {
        let cam = camera();
        let robot = Pose::identity();
        let t = goal_from_target(&cam, (cam.cx, cam.cy), 1.0, &robot, 0.4).unwrap();

        assert_relative_eq!(t.goal.position, Vector3::new(0.6, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(t.goal.orientation.angle(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(t.target_position, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn aligned_frame_zeroes_the_lateral_component() {
        // Off-axis target: after the inverse-heading rotation the lateral
        // component vanishes, so the standoff applies along the line of
        // sight and the goal sits on the forward axis of the aligned frame.
        let cam = camera();
        let robot = Pose::identity();
        let t = goal_from_target(&cam, (cam.cx - 100.0, cam.cy), 1.0, &robot, 0.0).unwrap();

        let d = cam.back_project(cam.cx - 100.0, cam.cy, 1.0);
        let expected = Vector3::new(d.x.hypot(d.y), 0.0, d.z);
        assert_relative_eq!(t.goal.position, expected, epsilon = 1e-12);
        assert_relative_eq!(t.target_position, expected, epsilon = 1e-12);
    }

    #[test]
    fn robot_pose_rotates_and_translates_the_goal() {
        let cam = camera();
        let yaw = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);
        let robot = Pose::new(Vector3::new(1.0, 2.0, 0.5), yaw);
        let t = goal_from_target(&cam, (cam.cx, cam.cy), 1.0, &robot, 0.4).unwrap();

        // Body-frame goal (0.6, 0, 0) rotated 90° about z lands on +y.
        assert_relative_eq!(t.goal.position, Vector3::new(1.0, 2.6, 0.5), epsilon = 1e-12);
        assert_relative_eq!(
            t.target_position,
            Vector3::new(1.0, 3.0, 0.5),
            epsilon = 1e-12
        );
        assert_relative_eq!(t.goal.orientation.angle(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn heading_composes_onto_the_robot_orientation() {
        let cam = camera();
        let yaw = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.3);
        let robot = Pose::new(Vector3::zeros(), yaw);
        let t = goal_from_target(&cam, (cam.cx - 50.0, cam.cy), 2.0, &robot, 0.0).unwrap();

        let d = cam.back_project(cam.cx - 50.0, cam.cy, 2.0);
        let heading = heading_quaternion(&d).unwrap();
        let expected = yaw * heading;
        assert_relative_eq!(
            t.goal.orientation.angle_to(&expected),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_depth_has_no_heading() {
        let cam = camera();
        let err = goal_from_target(&cam, (cam.cx, cam.cy), 0.0, &Pose::identity(), 0.4);
        assert!(matches!(err, Err(FollowError::UndefinedHeading)));
    }
}
