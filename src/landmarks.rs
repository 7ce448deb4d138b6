// src/landmarks.rs
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// MediaPipe hand landmark indices
pub const HAND_LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const MIDDLE_MCP: usize = 9;

/// One 3D hand key point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// How raw landmark frames are mapped to feature vectors.
///
/// A deployment picks one policy and uses it for both training and
/// prediction; vectors produced under different policies do not compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Subtract the anchor's x and y from every point; z stays raw depth.
    TranslateOnly,
    /// Subtract the full anchor point, then divide by the distance from
    /// the anchor to the scale-reference point when that distance is
    /// nonzero.
    TranslateScale,
}

/// Flattens a landmark frame into a translation-invariant (and, with
/// `TranslateScale`, scale-invariant) feature vector of `3 * frame.len()`
/// values.
///
/// `anchor_index` and `scale_ref_index` must be valid indices into the
/// frame; frame-length validation happens upstream.
pub fn normalize(
    frame: &[Landmark],
    policy: NormalizationPolicy,
    anchor_index: usize,
    scale_ref_index: usize,
) -> Vec<f64> {
    let anchor = frame[anchor_index].to_vector();
    let mut features = Vec::with_capacity(frame.len() * 3);

    match policy {
        NormalizationPolicy::TranslateOnly => {
            for point in frame {
                features.push(point.x - anchor.x);
                features.push(point.y - anchor.y);
                features.push(point.z);
            }
        }
        NormalizationPolicy::TranslateScale => {
            let translated: Vec<Vector3<f64>> =
                frame.iter().map(|p| p.to_vector() - anchor).collect();

            // Scale 0 means the reference point coincides with the anchor;
            // leave the frame unscaled rather than divide by zero.
            let scale = translated[scale_ref_index].norm();
            for point in &translated {
                let p = if scale > 0.0 { *point / scale } else { *point };
                features.push(p.x);
                features.push(p.y);
                features.push(p.z);
            }
        }
    }

    features
}
