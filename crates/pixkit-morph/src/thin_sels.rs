//! Hit-miss masks for binary thinning
//!
//! The thinning family is eight 3x3 masks built from two seeds, a corner
//! and an edge, each taken in four clockwise orientations. Mask `2k` is the
//! corner rotated `k` times and mask `2k + 1` is the edge rotated `k + 1`
//! times. Every mask requires the center pixel to be set.
//!
//! A mask is compiled into a `(care, want)` pair over an 8-bit code of the
//! neighborhood so matching a pixel is a single compare.

use std::sync::LazyLock;

use pixkit_core::{BorderType, GrayBorder, GrayImage};

use crate::{Sel, SelElement};

// ============================================================================
// Seeds
// ============================================================================

const D: SelElement = SelElement::DontCare;
const H: SelElement = SelElement::Hit;
const M: SelElement = SelElement::Miss;

// corner:
// . o o
// x X o
// . x .
const THIN_CORNER: [[SelElement; 3]; 3] = [[D, M, M], [H, H, M], [D, H, D]];

// edge:
// o o o
// . X .
// x x x
const THIN_EDGE: [[SelElement; 3]; 3] = [[M, M, M], [D, H, D], [H, H, H]];

/// Number of masks in the thinning family
pub const NUM_THIN_MASKS: usize = 8;

/// Neighbor offsets in code bit order
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One 3x3 thinning mask
#[derive(Debug, Clone)]
pub struct ThinMask {
    sel: Sel,
    care: u8,
    want: u8,
}

impl ThinMask {
    /// Compile a 3x3 SEL with its origin at the center
    fn from_sel(sel: Sel) -> Self {
        let mut care = 0u8;
        let mut want = 0u8;
        for (bit, &(dx, dy)) in NEIGHBORS.iter().enumerate() {
            match sel.get_element((1 + dx) as u32, (1 + dy) as u32) {
                Some(SelElement::Hit) => {
                    care |= 1 << bit;
                    want |= 1 << bit;
                }
                Some(SelElement::Miss) => care |= 1 << bit,
                _ => {}
            }
        }
        Self { sel, care, want }
    }

    /// The mask as a structuring element
    pub fn sel(&self) -> &Sel {
        &self.sel
    }

    /// True if the neighborhood code matches this mask
    #[inline]
    pub fn matches(&self, code: u8) -> bool {
        code & self.care == self.want
    }

    /// Test the pixel at `index` of `binary`, which must not touch the image
    /// edge
    ///
    /// `index` is a raw offset into `binary.data()`.
    #[inline]
    pub fn inner_mask(&self, binary: &GrayImage<u8>, index: usize) -> bool {
        binary.data()[index] == 1 && self.matches(inner_code(binary, index))
    }

    /// Test the pixel at `(x, y)`, reading neighbors through `border`
    #[inline]
    pub fn border_mask(&self, border: &GrayBorder<'_, u8>, x: i32, y: i32) -> bool {
        border.get(x, y) == 1 && self.matches(border_code(border, x, y))
    }
}

/// Neighborhood code of an interior pixel read by direct indexing
#[inline]
pub(crate) fn inner_code(binary: &GrayImage<u8>, index: usize) -> u8 {
    let data = binary.data();
    let stride = binary.stride() as isize;
    let mut code = 0u8;
    for (bit, &(dx, dy)) in NEIGHBORS.iter().enumerate() {
        let i = index as isize + dy as isize * stride + dx as isize;
        if data[i as usize] == 1 {
            code |= 1 << bit;
        }
    }
    code
}

/// Neighborhood code of any pixel read through a border accessor
#[inline]
pub(crate) fn border_code(border: &GrayBorder<'_, u8>, x: i32, y: i32) -> u8 {
    let mut code = 0u8;
    for (bit, &(dx, dy)) in NEIGHBORS.iter().enumerate() {
        if border.get(x + dx, y + dy) == 1 {
            code |= 1 << bit;
        }
    }
    code
}

/// Border accessor used by thinning: outside the image is background
pub(crate) fn thin_border(binary: &GrayImage<u8>) -> GrayBorder<'_, u8> {
    GrayBorder::new(binary, BorderType::Zero)
}

fn build_thin_masks() -> [ThinMask; NUM_THIN_MASKS] {
    let corner = Sel::from_grid3(THIN_CORNER);
    let edge = Sel::from_grid3(THIN_EDGE);
    std::array::from_fn(|i| {
        let k = (i / 2) as u32;
        let mut sel = if i % 2 == 0 {
            corner.rotate_orth(k)
        } else {
            edge.rotate_orth(k + 1)
        };
        sel.set_name(format!("thin_{}", i));
        ThinMask::from_sel(sel)
    })
}

static THIN_MASKS: LazyLock<[ThinMask; NUM_THIN_MASKS]> = LazyLock::new(build_thin_masks);

/// The eight thinning masks in family order
pub fn thin_masks() -> &'static [ThinMask; NUM_THIN_MASKS] {
    &THIN_MASKS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(rows: [[u8; 3]; 3]) -> u8 {
        let mut code = 0u8;
        for (bit, &(dx, dy)) in NEIGHBORS.iter().enumerate() {
            if rows[(1 + dy) as usize][(1 + dx) as usize] == 1 {
                code |= 1 << bit;
            }
        }
        code
    }

    #[test]
    fn test_family_shape() {
        let masks = thin_masks();
        for (i, mask) in masks.iter().enumerate() {
            let sel = mask.sel();
            assert_eq!((sel.width(), sel.height()), (3, 3));
            assert_eq!((sel.origin_x(), sel.origin_y()), (1, 1));
            assert_eq!(sel.get_element(1, 1), Some(SelElement::Hit));
            assert_eq!(sel.name(), Some(format!("thin_{}", i).as_str()));
        }
        assert_eq!(masks[0].sel().hit_count(), 3);
        assert_eq!(masks[7].sel().miss_count(), 3);
        assert_eq!(masks[7].sel().hit_count(), 4);
    }

    #[test]
    fn test_known_orientations() {
        let masks = thin_masks();
        let corner = Sel::from_string(".oo\nxXo\n.x.", 1, 1).unwrap();
        let edge = Sel::from_string("ooo\n.X.\nxxx", 1, 1).unwrap();
        assert_eq!(masks[0].sel().data(), corner.data());
        assert_eq!(masks[7].sel().data(), edge.data());
        // edge rotated once: solid side on the left
        let m1 = Sel::from_string("x.o\nxXo\nx.o", 1, 1).unwrap();
        assert_eq!(masks[1].sel().data(), m1.data());
        let m6 = Sel::from_string("oo.\noXx\n.x.", 1, 1).unwrap();
        assert_eq!(masks[6].sel().data(), m6.data());
    }

    #[test]
    fn test_edge_and_corner_codes() {
        let masks = thin_masks();
        let bottom_edge = code_of([[0, 0, 0], [1, 1, 1], [1, 1, 1]]);
        assert!(masks[7].matches(bottom_edge));
        assert!(!masks[3].matches(bottom_edge));

        let corner = code_of([[0, 0, 0], [1, 1, 0], [1, 1, 0]]);
        assert!(masks[0].matches(corner));

        let interior = code_of([[1, 1, 1], [1, 1, 1], [1, 1, 1]]);
        assert!(masks.iter().all(|m| !m.matches(interior)));
    }

    #[test]
    fn test_inner_and_border_agree() {
        let img = GrayImage::from_data(3, 3, vec![0, 0, 0, 1, 1, 0, 1, 1, 0]).unwrap();
        let border = thin_border(&img);
        let index = img.index_of(1, 1);
        for mask in thin_masks() {
            assert_eq!(mask.inner_mask(&img, index), mask.border_mask(&border, 1, 1));
        }
        assert!(thin_masks()[0].inner_mask(&img, index));
    }
}
