//! Trait for object detection inference backends.

use crate::tracker::Rect;

/// A single detector output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detection {
    /// Bounding box in TLBR format (x1, y1, x2, y2)
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
    /// Class index, when the model reports one
    pub class_id: Option<u32>,
}

impl Detection {
    pub fn new(bbox: Rect, score: f32) -> Self {
        Self {
            bbox,
            score,
            class_id: None,
        }
    }

    pub fn with_class(mut self, class_id: u32) -> Self {
        self.class_id = Some(class_id);
        self
    }
}

/// Trait for object detection inference backends.
///
/// Implement this trait to feed any detection model into a
/// [`CountingPipeline`](super::CountingPipeline).
///
/// # Example
///
/// ```ignore
/// use centroidtrack_rs::{Detection, DetectionSource};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl IntoDetections for Vec<Rect> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(|bbox| Detection::new(bbox, 1.0)).collect()
    }
}

/// Detector-side filtering applied before boxes reach the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionFilter {
    /// Keep only this class. Detections without a class always pass.
    pub class_id: Option<u32>,
    /// Minimum confidence, inclusive.
    pub min_confidence: f32,
}

impl Default for DetectionFilter {
    /// COCO "person" at confidence 0.4.
    fn default() -> Self {
        Self {
            class_id: Some(0),
            min_confidence: 0.4,
        }
    }
}

impl DetectionFilter {
    /// Accept everything.
    pub fn none() -> Self {
        Self {
            class_id: None,
            min_confidence: f32::NEG_INFINITY,
        }
    }

    pub fn accepts(&self, detection: &Detection) -> bool {
        if detection.score < self.min_confidence {
            return false;
        }
        match (self.class_id, detection.class_id) {
            (Some(wanted), Some(got)) => wanted == got,
            _ => true,
        }
    }

    /// Boxes of the accepted detections, in input order.
    pub fn apply(&self, detections: &[Detection]) -> Vec<Rect> {
        detections
            .iter()
            .filter(|d| self.accepts(d))
            .map(|d| d.bbox)
            .collect()
    }
}
