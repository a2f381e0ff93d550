//! Target depth from noisy multi-frame range images.

use log::{debug, warn};
use nalgebra::Vector4;

use uav_follower_core::{CameraIntrinsics, RangeImage};

use crate::error::{DepthRejection, FollowError, ServiceError};
use crate::params::FollowParams;
use crate::services::DepthSource;

/// Largest plausible target range, millimeters. Determined experimentally
/// for this rig; readings beyond it are sensor noise.
pub const MAX_RANGE_MM: f64 = 1000.0;

/// Bounding box scaled to integer pixel indices (truncated, non-negative).
#[derive(Clone, Copy, Debug)]
pub struct PixelBox {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl PixelBox {
    /// Scale a normalized xyxy box to pixel indices.
    pub fn from_normalized(xyxyn: &Vector4<f64>, camera: &CameraIntrinsics) -> Self {
        let w = f64::from(camera.width);
        let h = f64::from(camera.height);
        Self {
            x_min: (xyxyn.x * w).max(0.0) as u32,
            y_min: (xyxyn.y * h).max(0.0) as u32,
            x_max: (xyxyn.z * w).max(0.0) as u32,
            y_max: (xyxyn.w * h).max(0.0) as u32,
        }
    }

    /// Box center in pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            (f64::from(self.x_min) + f64::from(self.x_max)) / 2.0,
            (f64::from(self.y_min) + f64::from(self.y_max)) / 2.0,
        )
    }
}

/// Validated depth for the winning box.
#[derive(Clone, Debug)]
pub struct DepthEstimate {
    /// Distance to the nearest valid return inside the box, meters.
    pub depth_m: f64,
    /// Averaged range image, when `keep_averaged_image` is set.
    pub averaged: Option<RangeImage>,
}

/// Average the requested frames element-wise and extract the nearest valid
/// return strictly inside `bbox`.
///
/// Accumulation is floating point; summing u16 samples would wrap. The
/// sub-region is inset one pixel on each axis to avoid edge artifacts, and
/// zero samples are sensor no-returns, discarded before taking the minimum.
/// The reading must be finite and within [`MAX_RANGE_MM`]; failures map to
/// [`FollowError::InvalidDepth`], which callers treat as a bad detection.
///
/// When `center_pixel_fallback` is set and the inset region yields nothing
/// (a degenerate box, or one off the image), the single averaged center
/// pixel is read instead before the same validity checks.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
pub fn estimate_depth(
    bbox: &PixelBox,
    source: &mut dyn DepthSource,
    params: &FollowParams,
) -> Result<DepthEstimate, FollowError> {
    let frames = source.request_frames(params.depth_frames)?;
    if frames.len() != params.depth_frames || frames.is_empty() {
        return Err(ServiceError::MalformedReply(format!(
            "asked for {} range frames, got {}",
            params.depth_frames,
            frames.len()
        ))
        .into());
    }

    let width = frames[0].width;
    let height = frames[0].height;
    if frames
        .iter()
        .any(|f| f.width != width || f.height != height || f.data.len() != width * height)
    {
        return Err(ServiceError::MalformedReply("range frames differ in size".into()).into());
    }

    let mut avg = vec![0.0f64; width * height];
    for frame in &frames {
        for (acc, &sample) in avg.iter_mut().zip(&frame.data) {
            *acc += f64::from(sample);
        }
    }
    let inv = 1.0 / frames.len() as f64;
    for acc in &mut avg {
        *acc *= inv;
    }

    // Region strictly inside the box: one-pixel inset on each axis.
    let x0 = bbox.x_min as usize + 1;
    let x1 = (bbox.x_max as usize).min(width);
    let y0 = bbox.y_min as usize + 1;
    let y1 = (bbox.y_max as usize).min(height);

    let mut z = f64::INFINITY;
    let mut found = false;
    for y in y0..y1 {
        for x in x0..x1 {
            let sample = avg[y * width + x];
            if sample != 0.0 && sample < z {
                z = sample;
                found = true;
            }
        }
    }

    if !found && params.center_pixel_fallback {
        let (cx, cy) = bbox.center();
        let (cx, cy) = (cx as usize, cy as usize);
        if cx < width && cy < height {
            z = avg[cy * width + cx];
            found = z != 0.0;
            if found {
                warn!("depth: inset region empty, fell back to center pixel");
            }
        }
    }

    if !found {
        warn!("depth: no valid return inside box {bbox:?}");
        return Err(FollowError::InvalidDepth {
            reason: DepthRejection::NoValidPixels,
        });
    }
    if !z.is_finite() {
        return Err(FollowError::InvalidDepth {
            reason: DepthRejection::NotFinite,
        });
    }
    if z > MAX_RANGE_MM {
        warn!("depth: {z:.1} mm beyond plausible range");
        return Err(FollowError::InvalidDepth {
            reason: DepthRejection::OutOfRange,
        });
    }

    let averaged = params.keep_averaged_image.then(|| RangeImage {
        width,
        height,
        data: avg
            .iter()
            .map(|&v| v.round().min(f64::from(u16::MAX)) as u16)
            .collect(),
    });

    let depth_m = z / 1000.0;
    debug!("depth: {depth_m:.3} m");
    Ok(DepthEstimate { depth_m, averaged })
}
