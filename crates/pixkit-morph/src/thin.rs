//! Binary thinning
//!
//! Thinning peels foreground pixels off a binary image until only a
//! skeleton remains. Each pass visits every foreground pixel and queues it
//! for removal if any of the eight [`thin_masks`] matches its
//! neighborhood. Queued pixels are cleared only after the whole pass, so
//! every mask sees the image as it was at the start of the pass. The
//! process stops when a pass removes nothing or an iteration limit is hit.
//!
//! Pixels on the outer ring of the image read their neighbors through a
//! border accessor that treats the outside as background; all other pixels
//! are read directly from the raster.
//!
//! Connectivity is not preserved for features of even width. A line or
//! block two pixels thick has no interior pixel to protect it: every one
//! of its pixels matches an edge or corner mask in the same pass, so the
//! whole feature is removed, and any shape joined through it falls apart.

use pixkit_core::GrayImage;
use tracing::{debug, trace};

use crate::MorphResult;
use crate::binary::check_binary;
use crate::thin_sels::{border_code, inner_code, thin_border, thin_masks};

/// Collect the raw data indices of every pixel set to 1, in raster order
///
/// Indices account for the image's start index and stride, so they can be
/// used directly with [`GrayImage::data`].
pub fn find_one_pixels(binary: &GrayImage<u8>, ones: &mut Vec<usize>) {
    ones.clear();
    for y in 0..binary.height() {
        let base = binary.index_of(0, y);
        ones.extend(
            binary
                .row(y)
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v == 1)
                .map(|(x, _)| base + x),
        );
    }
}

/// Iterative thinning engine
///
/// Holds the working lists between calls so repeated use does not
/// reallocate.
#[derive(Debug, Default)]
pub struct BinaryThinning {
    ones: Vec<usize>,
    removed: Vec<usize>,
}

impl BinaryThinning {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thin `binary` in place
    ///
    /// Runs until a pass removes nothing, or for at most `max_iterations`
    /// passes when given. Returns the number of passes performed.
    ///
    /// # Errors
    ///
    /// Returns `MorphError::NotBinary` if `binary` holds a value other than
    /// 0 or 1. The image is left untouched in that case.
    pub fn apply(
        &mut self,
        binary: &mut GrayImage<u8>,
        max_iterations: Option<usize>,
    ) -> MorphResult<usize> {
        check_binary(binary)?;
        find_one_pixels(binary, &mut self.ones);
        let initial = self.ones.len();

        let mut passes = 0;
        while max_iterations.is_none_or(|max| passes < max) {
            self.scan(binary);
            passes += 1;
            trace!(pass = passes, removed = self.removed.len(), "thinning pass");
            if self.removed.is_empty() {
                break;
            }

            let data = binary.data_mut();
            for &index in &self.removed {
                data[index] = 0;
            }
            self.ones.retain(|&index| data[index] == 1);
        }

        debug!(
            width = binary.width(),
            height = binary.height(),
            passes,
            initial,
            remaining = self.ones.len(),
            "thinning finished"
        );
        Ok(passes)
    }

    /// Queue every foreground pixel matched by a mask
    fn scan(&mut self, binary: &GrayImage<u8>) {
        self.removed.clear();

        let (w, h) = binary.dimensions();
        let start = binary.start_index();
        let stride = binary.stride();
        let border = thin_border(binary);
        let masks = thin_masks();

        for &index in &self.ones {
            let offset = index - start;
            let x = (offset % stride) as u32;
            let y = (offset / stride) as u32;

            let code = if x == 0 || y == 0 || x + 1 == w || y + 1 == h {
                border_code(&border, x as i32, y as i32)
            } else {
                inner_code(binary, index)
            };
            if masks.iter().any(|mask| mask.matches(code)) {
                self.removed.push(index);
            }
        }
    }
}

/// Thin a copy of `binary`
///
/// See [`BinaryThinning::apply`].
pub fn thin(binary: &GrayImage<u8>, max_iterations: Option<usize>) -> MorphResult<GrayImage<u8>> {
    let mut out = binary.clone();
    BinaryThinning::new().apply(&mut out, max_iterations)?;
    Ok(out)
}
