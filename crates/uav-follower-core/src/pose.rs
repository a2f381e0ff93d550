use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Position plus orientation, both expressed in the same parent frame.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Pose {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
        }
    }

    pub fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// A pose tagged with its reference frame and creation time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StampedPose {
    pub frame_id: String,
    pub stamp: SystemTime,
    pub pose: Pose,
}

/// A point tagged with its reference frame and creation time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StampedPoint {
    pub frame_id: String,
    pub stamp: SystemTime,
    pub point: Vector3<f64>,
}

/// Navigation goal in the map frame.
pub type GoalPose = StampedPose;
