//! Depth estimation, frame transformation, and the per-batch pipeline.
//!
//! ## Quickstart
//!
//! ```no_run
//! use uav_follower_core::DetectionBatch;
//! use uav_follower_nav::{FollowParams, FollowPipeline};
//! # use uav_follower_nav::{BadDetectionSink, DepthSource, ServiceError, StaticPose};
//! # use uav_follower_select::{ClusterSet, ClusterSolver};
//! # struct Engine;
//! # impl ClusterSolver for Engine {
//! #     fn solve(&self, _: &[nalgebra::Vector4<f64>], _: usize, _: &[nalgebra::Vector4<f64>], _: f64) -> ClusterSet { ClusterSet::default() }
//! # }
//! # struct Depth;
//! # impl DepthSource for Depth {
//! #     fn request_frames(&mut self, _: usize) -> Result<Vec<uav_follower_core::RangeImage>, ServiceError> { Ok(Vec::new()) }
//! # }
//! # struct Sink;
//! # impl BadDetectionSink for Sink { fn notify(&mut self) {} }
//!
//! let pipeline = FollowPipeline::new(FollowParams::default(), Engine);
//! let mut depth = Depth;
//! let mut pose = StaticPose::default();
//! let mut sink = Sink;
//!
//! let batch = DetectionBatch::default();
//! let result = pipeline.process(&batch, &mut depth, &mut pose, &mut sink);
//! println!("goal: {}", result.is_ok());
//! ```

mod depth;
mod error;
mod params;
mod pipeline;
mod result;
mod services;
mod transform;

pub use depth::{estimate_depth, DepthEstimate, PixelBox, MAX_RANGE_MM};
pub use error::{DepthRejection, FollowError, ServiceError};
pub use params::FollowParams;
pub use pipeline::FollowPipeline;
pub use result::FollowOutput;
pub use services::{BadDetectionSink, DepthSource, PoseSource, StaticPose};
pub use transform::{goal_from_target, TargetTransform};
