//! Grayscale pixel grids.

use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimilarityError};

/// An 8-bit grayscale grid backed by an [`image::GrayImage`].
///
/// Zero-sized grids can be constructed; the feature extractors reject them.
/// Deserialization goes through [`GrayGrid::new`], so a decoded grid always
/// has a buffer matching its dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct GrayGrid {
    image: GrayImage,
}

/// Serialized form: dimensions plus row-major pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl TryFrom<RawGrid> for GrayGrid {
    type Error = SimilarityError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        GrayGrid::new(raw.width, raw.height, raw.pixels)
    }
}

impl From<GrayGrid> for RawGrid {
    fn from(grid: GrayGrid) -> Self {
        RawGrid {
            width: grid.width(),
            height: grid.height(),
            pixels: grid.image.into_raw(),
        }
    }
}

impl From<GrayImage> for GrayGrid {
    fn from(image: GrayImage) -> Self {
        Self { image }
    }
}

fn dimension(value: usize, name: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| SimilarityError::invalid_input(format!("grid {} {} is too large", name, value)))
}

impl GrayGrid {
    /// Wrap a row-major pixel buffer. The length must equal `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            SimilarityError::invalid_input(format!("grid size {}x{} overflows", width, height))
        })?;
        if pixels.len() != expected {
            return Err(SimilarityError::invalid_input(format!(
                "pixel buffer has {} values, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        let (w, h) = (dimension(width, "width")?, dimension(height, "height")?);
        GrayImage::from_raw(w, h, pixels)
            .map(Self::from)
            .ok_or_else(|| SimilarityError::invalid_input("pixel buffer does not fit the grid"))
    }

    /// A grid filled with a single intensity.
    pub fn uniform(width: usize, height: usize, value: u8) -> Self {
        Self::from(GrayImage::from_pixel(width as u32, height as u32, Luma([value])))
    }

    /// Build a grid by evaluating `f(x, y)` at every position.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        Self::from(GrayImage::from_fn(width as u32, height as u32, |x, y| {
            Luma([f(x as usize, y as usize)])
        }))
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// Raw row-major pixels.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// The backing image.
    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    /// Intensity at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.image.get_pixel(x as u32, y as u32).0[0]
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    /// Arithmetic mean intensity. Returns 0.0 for an empty grid.
    pub fn mean(&self) -> f64 {
        let pixels = self.pixels();
        if pixels.is_empty() {
            return 0.0;
        }
        let total: u64 = pixels.iter().map(|&p| p as u64).sum();
        total as f64 / pixels.len() as f64
    }

    /// Fails with `InvalidInput` for zero width or height.
    pub(crate) fn ensure_non_empty(&self, which: &str) -> Result<()> {
        if self.is_empty() {
            return Err(SimilarityError::invalid_input(format!(
                "{} grid is degenerate ({}x{})",
                which,
                self.width(),
                self.height()
            )));
        }
        Ok(())
    }
}
