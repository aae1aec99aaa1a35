//! Crisp feature extraction from a pair of grayscale grids.
//!
//! - **Intensity difference**: absolute difference of the mean intensities.
//! - **Edge similarity**: percentage of positions where the two edge maps,
//!   resampled to the common minimum size, hold equal values.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::grid::GrayGrid;

/// Lower bound on edge similarity. Keeps the input away from zero so that
/// the edge-similarity memberships never all vanish at the lower bound.
pub const EDGE_SIMILARITY_FLOOR: f64 = 1.0;

/// Both crisp inputs of the inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub intensity_diff: f64,
    pub edge_similarity: f64,
}

/// Absolute difference of the two grids' mean intensities, in [0, 255].
///
/// Grids may have different dimensions. Symmetric in its arguments.
pub fn compute_intensity_difference(a: &GrayGrid, b: &GrayGrid) -> Result<f64> {
    a.ensure_non_empty("first")?;
    b.ensure_non_empty("second")?;
    Ok((a.mean() - b.mean()).abs())
}

/// Edge-map agreement as a percentage in [1, 100].
///
/// Pixel-identical grids short-circuit to 100 without filtering; resampling
/// differently sized grids could otherwise hide the identity.
pub fn compute_edge_similarity(a: &GrayGrid, b: &GrayGrid) -> Result<f64> {
    a.ensure_non_empty("first")?;
    b.ensure_non_empty("second")?;

    if a == b {
        return Ok(100.0);
    }

    let width = a.width().min(b.width());
    let height = a.height().min(b.height());
    let edges_a = resize_nearest(&find_edges(a), width, height);
    let edges_b = resize_nearest(&find_edges(b), width, height);

    let equal = edges_a
        .pixels()
        .iter()
        .zip(edges_b.pixels())
        .filter(|(p, q)| p == q)
        .count();
    let similarity = equal as f64 / (width * height) as f64 * 100.0;
    trace!(equal, width, height, similarity, "edge maps compared");

    Ok(similarity.max(EDGE_SIMILARITY_FLOOR))
}

/// Run both extractors.
pub fn compute_features(a: &GrayGrid, b: &GrayGrid) -> Result<Features> {
    Ok(Features {
        intensity_diff: compute_intensity_difference(a, b)?,
        edge_similarity: compute_edge_similarity(a, b)?,
    })
}

/// 3x3 "find edges" filter: centre weight 8, each neighbour -1, clamped to
/// [0, 255].
///
/// The outermost rows and columns are copied from the source rather than
/// convolved against clamped neighbours, so `imageops::filter3x3` does not
/// fit here. Grids narrower or shorter than 3 pixels have no interior and
/// come back unchanged.
pub fn find_edges(grid: &GrayGrid) -> GrayGrid {
    let src = grid.as_image();
    let (w, h) = src.dimensions();
    if w < 3 || h < 3 {
        return grid.clone();
    }

    let edges = GrayImage::from_fn(w, h, |x, y| {
        if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
            return *src.get_pixel(x, y);
        }
        let mut acc = 0i32;
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                let p = src.get_pixel(nx, ny).0[0] as i32;
                acc += if nx == x && ny == y { 8 * p } else { -p };
            }
        }
        Luma([acc.clamp(0, 255) as u8])
    });
    GrayGrid::from(edges)
}

/// Nearest-neighbour resample to `width` x `height`.
pub fn resize_nearest(grid: &GrayGrid, width: usize, height: usize) -> GrayGrid {
    if grid.width() == width && grid.height() == height {
        return grid.clone();
    }
    GrayGrid::from(imageops::resize(
        grid.as_image(),
        width as u32,
        height as u32,
        FilterType::Nearest,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimilarityError;

    fn checkerboard(w: usize, h: usize) -> GrayGrid {
        GrayGrid::from_fn(w, h, |x, y| if (x + y) % 2 == 0 { 255 } else { 0 })
    }

    #[test]
    fn test_intensity_difference_uniform() {
        let a = GrayGrid::uniform(10, 10, 100);
        let b = GrayGrid::uniform(10, 10, 102);
        assert_eq!(compute_intensity_difference(&a, &b).unwrap(), 2.0);
        assert_eq!(compute_intensity_difference(&b, &a).unwrap(), 2.0);
    }

    #[test]
    fn test_intensity_difference_different_sizes() {
        let a = GrayGrid::uniform(3, 7, 40);
        let b = GrayGrid::uniform(12, 2, 200);
        assert_eq!(compute_intensity_difference(&a, &b).unwrap(), 160.0);
    }

    #[test]
    fn test_empty_grid_rejected() {
        let empty = GrayGrid::uniform(0, 4, 0);
        let ok = GrayGrid::uniform(4, 4, 0);
        assert!(matches!(
            compute_intensity_difference(&empty, &ok),
            Err(SimilarityError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_edge_similarity(&ok, &empty),
            Err(SimilarityError::InvalidInput(_))
        ));
        assert!(compute_edge_similarity(&empty, &empty).is_err());
    }

    #[test]
    fn test_find_edges_flat_interior_is_zero() {
        let e = find_edges(&GrayGrid::uniform(5, 5, 100));
        for y in 0..5 {
            for x in 0..5 {
                let border = x == 0 || y == 0 || x == 4 || y == 4;
                assert_eq!(e.get(x, y), if border { 100 } else { 0 });
            }
        }
    }

    #[test]
    fn test_find_edges_checkerboard_saturates() {
        let g = checkerboard(6, 5);
        // interior: bright pixels surrounded by dark saturate high, dark ones clamp at 0
        assert_eq!(find_edges(&g), g);
    }

    #[test]
    fn test_find_edges_small_grid_unchanged() {
        let g = GrayGrid::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(find_edges(&g), g);
    }

    #[test]
    fn test_resize_nearest_halves() {
        let g = GrayGrid::from_fn(10, 10, |x, y| (y * 10 + x) as u8);
        let r = resize_nearest(&g, 5, 5);
        assert_eq!(r.width(), 5);
        assert_eq!(r.get(0, 0), g.get(1, 1));
        assert_eq!(r.get(4, 2), g.get(9, 5));
    }

    #[test]
    fn test_resize_nearest_keeps_intensities() {
        // nearest sampling never blends: a 10x10 checkerboard halves to its odd/odd cells
        let r = resize_nearest(&checkerboard(10, 10), 5, 5);
        assert_eq!(r, GrayGrid::uniform(5, 5, 255));
        assert_eq!(resize_nearest(&r, 5, 5), r);
    }

    #[test]
    fn test_edge_similarity_identical_shortcut() {
        let g = checkerboard(7, 3);
        assert_eq!(compute_edge_similarity(&g, &g.clone()).unwrap(), 100.0);
    }

    #[test]
    fn test_edge_similarity_flat_images_disagree_on_border() {
        let a = GrayGrid::uniform(10, 10, 100);
        let b = GrayGrid::uniform(10, 10, 102);
        // 64 interior zeros agree, 36 copied border pixels differ
        assert!((compute_edge_similarity(&a, &b).unwrap() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_similarity_floor() {
        let a = GrayGrid::uniform(2, 2, 10);
        let b = GrayGrid::uniform(2, 2, 20);
        assert_eq!(compute_edge_similarity(&a, &b).unwrap(), EDGE_SIMILARITY_FLOOR);
    }

    #[test]
    fn test_compute_features() {
        let a = checkerboard(10, 10);
        let b = GrayGrid::uniform(10, 10, 128);
        let f = compute_features(&a, &b).unwrap();
        assert!((f.intensity_diff - 0.5).abs() < 1e-12);
        // only the 32 dark interior positions agree
        assert!((f.edge_similarity - 32.0).abs() < 1e-9);
    }
}
