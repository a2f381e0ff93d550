//! High-level facade crate for the `uav-follower-*` workspace.
//!
//! The pipeline turns per-frame object-detector bounding boxes, depth
//! imagery, and the robot pose into one map-frame navigation goal standing a
//! fixed distance short of the tracked drone.
//!
//! ## Quickstart
//!
//! ```no_run
//! use uav_follower::core::{Detection, DetectionBatch};
//! use uav_follower::nav::{FollowParams, FollowPipeline, StaticPose};
//! # use uav_follower::nav::{BadDetectionSink, DepthSource, ServiceError};
//! # use uav_follower::select::{ClusterSet, ClusterSolver};
//! # struct Engine;
//! # impl ClusterSolver for Engine {
//! #     fn solve(&self, _: &[nalgebra::Vector4<f64>], _: usize, _: &[nalgebra::Vector4<f64>], _: f64) -> ClusterSet { ClusterSet::default() }
//! # }
//! # struct Depth;
//! # impl DepthSource for Depth {
//! #     fn request_frames(&mut self, _: usize) -> Result<Vec<uav_follower::core::RangeImage>, ServiceError> { Ok(Vec::new()) }
//! # }
//! # struct Sink;
//! # impl BadDetectionSink for Sink { fn notify(&mut self) {} }
//!
//! let pipeline = FollowPipeline::new(FollowParams::default(), Engine);
//! let batch = DetectionBatch::new(vec![vec![Detection::from_xyxyn(0.45, 0.4, 0.55, 0.6)]]);
//!
//! let mut depth = Depth;
//! let mut pose = StaticPose::default();
//! let mut sink = Sink;
//! match pipeline.process(&batch, &mut depth, &mut pose, &mut sink) {
//!     Ok(out) => println!("goal: {:?}", out.goal.pose.position),
//!     Err(err) => println!("no goal: {err}"),
//! }
//! ```
//!
//! ## API map
//! - `uav_follower::core`: detection batches, range images, poses, and the
//!   pinhole/mount geometry.
//! - `uav_follower::select`: detection normalization, the clustering-engine
//!   contract, density filtering, and the candidate vote.
//! - `uav_follower::nav`: depth estimation, frame transforms, collaborator
//!   traits, and the per-batch pipeline.

pub use uav_follower_core as core;
pub use uav_follower_nav as nav;
pub use uav_follower_select as select;

pub use uav_follower_core::{CameraIntrinsics, Detection, DetectionBatch, GoalPose, Pose};
pub use uav_follower_nav::{FollowError, FollowOutput, FollowParams, FollowPipeline};
pub use uav_follower_select::{ClusterSolver, SelectParams};
