//! Image buffers owned by a frame.

use ndarray::{Array2, Array3};

use crate::frame::camera::{ExtrinsicData, IntrinsicData};

/// Pixel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Single channel, 8 bit
    Grey,
    /// Three channels, 8 bit
    #[default]
    Rgb,
    /// Four channels, 8 bit
    Rgba,
}

impl ImageFormat {
    #[inline]
    pub fn channels(&self) -> usize {
        match self {
            Self::Grey => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// 8-bit image stored as a `(height, width, channels)` array.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    format: ImageFormat,
    pixels: Array3<u8>,
}

impl Image {
    /// Create a zero-filled image.
    pub fn new(width: u32, height: u32, format: ImageFormat) -> Self {
        Self {
            format,
            pixels: Array3::zeros((height as usize, width as usize, format.channels())),
        }
    }

    /// Wrap interleaved row-major bytes. Returns `None` if the length does not
    /// match `width * height * channels`.
    pub fn from_raw(width: u32, height: u32, format: ImageFormat, data: Vec<u8>) -> Option<Self> {
        let shape = (height as usize, width as usize, format.channels());
        Array3::from_shape_vec(shape, data)
            .ok()
            .map(|pixels| Self { format, pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.dim().1 as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.dim().0 as u32
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut Array3<u8> {
        &mut self.pixels
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}

/// Depth image together with the camera it was captured with.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedImage {
    /// Depth in meters, `(height, width)`
    pub depth: Array2<f32>,
    pub intrinsics: IntrinsicData,
    pub extrinsics: ExtrinsicData,
}

impl CalibratedImage {
    pub fn new(depth: Array2<f32>, intrinsics: IntrinsicData, extrinsics: ExtrinsicData) -> Self {
        Self {
            depth,
            intrinsics,
            extrinsics,
        }
    }
}
