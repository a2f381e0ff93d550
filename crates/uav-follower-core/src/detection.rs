use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

/// Scalars per raw detector row: normalized xyxy box, confidence, class id.
pub const DETECTION_ROW_LEN: usize = 6;

/// One normalized bounding-box detection.
///
/// `xyxyn` holds (xmin, ymin, xmax, ymax) in [0, 1] relative to the image
/// dimensions, with x along columns and y along rows. Confidence and class
/// id are carried through untouched; candidate selection clusters on the box
/// coordinates alone.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Detection {
    pub xyxyn: Vector4<f64>,
    pub confidence: f64,
    pub class_id: f64,
}

impl Detection {
    /// Build a detection from a raw six-column inference row.
    pub fn from_row(row: [f64; DETECTION_ROW_LEN]) -> Self {
        Self {
            xyxyn: Vector4::new(row[0], row[1], row[2], row[3]),
            confidence: row[4],
            class_id: row[5],
        }
    }

    /// Detection with only box coordinates, confidence and class zeroed.
    pub fn from_xyxyn(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xyxyn: Vector4::new(xmin, ymin, xmax, ymax),
            confidence: 0.0,
            class_id: 0.0,
        }
    }
}

/// Ordered collection of per-frame detection arrays, one inner array per
/// upstream inference result appended to the batch.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DetectionBatch {
    pub frames: Vec<Vec<Detection>>,
}

impl DetectionBatch {
    pub fn new(frames: Vec<Vec<Detection>>) -> Self {
        Self { frames }
    }

    /// Total detections across all frames.
    pub fn total_detections(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }

    /// Whether the batch holds no detections at all.
    pub fn is_empty(&self) -> bool {
        self.frames.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_row_splits_box_and_metadata() {
        let det = Detection::from_row([0.1, 0.2, 0.3, 0.4, 0.87, 3.0]);
        assert_eq!(det.xyxyn, Vector4::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(det.confidence, 0.87);
        assert_eq!(det.class_id, 3.0);
    }

    #[test]
    fn batch_emptiness_ignores_empty_frames() {
        let batch = DetectionBatch::new(vec![Vec::new(), Vec::new()]);
        assert!(batch.is_empty());
        assert_eq!(batch.total_detections(), 0);

        let batch = DetectionBatch::new(vec![
            Vec::new(),
            vec![Detection::from_xyxyn(0.1, 0.1, 0.2, 0.2)],
        ]);
        assert!(!batch.is_empty());
        assert_eq!(batch.total_detections(), 1);
    }
}
