//! Camera parameters and rigid/similarity transforms carried by a frame.
//!
//! All transforms use `f64` nalgebra types:
//! - `ExtrinsicData`: rigid camera pose (rotation + translation)
//! - `SimilarityTransform`: per-anchor pose with uniform scale
//! - `IntrinsicData`: pinhole camera model with radial/tangential distortion

use nalgebra::{Isometry3, Matrix3, Similarity3, Translation3, UnitQuaternion, Vector3};

/// Pinhole intrinsics for one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntrinsicData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Focal length in x, normalized by image width
    pub fx: f64,
    /// Focal length in y, normalized by image height
    pub fy: f64,
    /// Principal point x, normalized by image width
    pub cx: f64,
    /// Principal point y, normalized by image height
    pub cy: f64,
    /// Skew coefficient
    pub skew: f64,
    /// Distortion coefficients (k1, k2, p1, p2, k3)
    pub distortion: [f64; 5],
    /// Whether the engine considers these intrinsics usable
    pub valid: bool,
}

impl IntrinsicData {
    /// Create valid intrinsics without distortion.
    pub fn new(width: u32, height: u32, fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self {
            width,
            height,
            fx,
            fy,
            cx,
            cy,
            skew: 0.0,
            distortion: [0.0; 5],
            valid: true,
        }
    }

    /// Set the distortion coefficients.
    pub fn with_distortion(mut self, distortion: [f64; 5]) -> Self {
        self.distortion = distortion;
        self
    }

    /// Camera matrix K in pixel units.
    #[inline]
    pub fn camera_matrix(&self) -> Matrix3<f64> {
        let w = self.width as f64;
        let h = self.height as f64;
        Matrix3::new(
            self.fx * w,
            self.skew * w,
            self.cx * w,
            0.0,
            self.fy * h,
            self.cy * h,
            0.0,
            0.0,
            1.0,
        )
    }
}

/// Rigid transform between camera and world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrinsicData {
    pub pose: Isometry3<f64>,
    pub valid: bool,
}

impl ExtrinsicData {
    pub fn new(pose: Isometry3<f64>) -> Self {
        Self { pose, valid: true }
    }

    /// Build from a translation and a unit quaternion.
    pub fn from_parts(translation: Vector3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self::new(Isometry3::from_parts(
            Translation3::from(translation),
            rotation,
        ))
    }

    /// An invalid pose, as reported by the engine before the first track.
    pub fn invalid() -> Self {
        Self {
            pose: Isometry3::identity(),
            valid: false,
        }
    }

    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            pose: self.pose.inverse(),
            valid: self.valid,
        }
    }
}

impl Default for ExtrinsicData {
    fn default() -> Self {
        Self::invalid()
    }
}

/// Similarity transform (rotation, translation, uniform scale) of one anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityTransform {
    pub transform: Similarity3<f64>,
    pub valid: bool,
}

impl SimilarityTransform {
    pub fn new(transform: Similarity3<f64>) -> Self {
        Self {
            transform,
            valid: true,
        }
    }

    pub fn invalid() -> Self {
        Self {
            transform: Similarity3::identity(),
            valid: false,
        }
    }

    /// Uniform scale factor.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.transform.scaling()
    }

    /// Apply the transform to a point.
    #[inline]
    pub fn transform_point(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.transform
            .transform_point(&nalgebra::Point3::from(*point))
            .coords
    }
}

impl Default for SimilarityTransform {
    fn default() -> Self {
        Self::invalid()
    }
}
