//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological operations.

use crate::{MorphError, MorphResult};

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - must match foreground (set pixels)
    Hit = 1,
    /// Miss - must match background (unset pixels)
    Miss = 2,
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
    name: Option<String>,
}

impl Sel {
    /// Create a new structuring element filled with don't-care elements
    ///
    /// The origin is placed at the center.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; (width * height) as usize],
            name: None,
        })
    }

    /// Create a structuring element from a string pattern
    ///
    /// Rows are separated by newlines and must all have the same length.
    ///
    /// - `x` hit, `o` miss, `.` or space don't care
    /// - `X`, `O`, `C` are the same as `x`, `o`, `.` and also mark the
    ///   origin, overriding `origin_x` / `origin_y`
    ///
    /// # Arguments
    /// * `pattern` - Rows of element characters
    /// * `origin_x` - X coordinate of origin
    /// * `origin_y` - Y coordinate of origin
    pub fn from_string(pattern: &str, origin_x: u32, origin_y: u32) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern.lines().collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut sel = Self::new(width, height)?;

        let mut origin = None;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(MorphError::InvalidSel(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let elem = match c {
                    'x' | 'X' => SelElement::Hit,
                    'o' | 'O' => SelElement::Miss,
                    '.' | ' ' | 'C' => SelElement::DontCare,
                    _ => {
                        return Err(MorphError::InvalidSel(format!(
                            "unexpected character {:?} at ({}, {})",
                            c, x, y
                        )));
                    }
                };
                if c.is_ascii_uppercase() {
                    origin = Some((x as u32, y as u32));
                }
                sel.data[y * width as usize + x] = elem;
            }
        }

        let (cx, cy) = origin.unwrap_or((origin_x, origin_y));
        sel.set_origin(cx, cy)?;
        Ok(sel)
    }

    /// Create a 3x3 SEL with its origin at the center from a row-major grid
    pub(crate) fn from_grid3(grid: [[SelElement; 3]; 3]) -> Self {
        Self {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            data: grid.into_iter().flatten().collect(),
            name: None,
        }
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({}, {}) outside {}x{}",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Set an element at (x, y)
    ///
    /// Positions outside the SEL are ignored.
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = elem;
        }
    }

    /// Get raw element data
    pub fn data(&self) -> &[SelElement] {
        &self.data
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Count the number of miss elements
    pub fn miss_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Miss).count()
    }

    /// Create the reflected (180-degree rotated) SEL
    pub fn reflect(&self) -> Self {
        self.rotate_orth(2)
    }

    /// Rotate the SEL clockwise by multiples of 90 degrees
    ///
    /// The origin moves with its element.
    ///
    /// # Arguments
    /// * `rotation` - Number of 90-degree rotations (taken modulo 4)
    pub fn rotate_orth(&self, rotation: u32) -> Self {
        let mut sel = self.clone();
        for _ in 0..rotation % 4 {
            sel = sel.rotate_cw();
        }
        sel
    }

    // new(x, y) = old(y, h - 1 - x)
    fn rotate_cw(&self) -> Self {
        let (w, h) = (self.height, self.width);
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..h {
            for x in 0..w {
                data.push(self.data[((self.height - 1 - x) * self.width + y) as usize]);
            }
        }
        Self {
            width: w,
            height: h,
            cx: self.height - 1 - self.cy,
            cy: self.cx,
            data,
            name: self.name.clone(),
        }
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets_of(SelElement::Hit)
    }

    /// Iterate over miss positions relative to origin
    pub fn miss_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets_of(SelElement::Miss)
    }

    fn offsets_of(&self, kind: SelElement) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &elem)| {
                if elem == kind {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_centers_origin() {
        let sel = Sel::new(5, 3).unwrap();
        assert_eq!((sel.origin_x(), sel.origin_y()), (2, 1));
        assert_eq!(sel.hit_count(), 0);
        assert!(Sel::new(0, 3).is_err());
    }

    #[test]
    fn test_from_string() {
        let sel = Sel::from_string("xo.\n.X.\nooo", 0, 0).unwrap();
        assert_eq!((sel.width(), sel.height()), (3, 3));
        assert_eq!((sel.origin_x(), sel.origin_y()), (1, 1));
        assert_eq!(sel.get_element(0, 0), Some(SelElement::Hit));
        assert_eq!(sel.get_element(1, 0), Some(SelElement::Miss));
        assert_eq!(sel.get_element(2, 0), Some(SelElement::DontCare));
        assert_eq!(sel.get_element(3, 0), None);
        assert_eq!(sel.hit_count(), 2);
        assert_eq!(sel.miss_count(), 4);
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        assert!(Sel::from_string("xx\nx", 0, 0).is_err());
        assert!(Sel::from_string("x?", 0, 0).is_err());
        assert!(Sel::from_string("xx", 5, 0).is_err());
        assert!(Sel::from_string("", 0, 0).is_err());
    }

    #[test]
    fn test_rotate_orth_clockwise() {
        let sel = Sel::from_string("xx.\n.C.\n..o", 0, 0).unwrap();
        let rot = sel.rotate_orth(1);
        // top row becomes right column
        assert_eq!(rot.get_element(2, 0), Some(SelElement::Hit));
        assert_eq!(rot.get_element(2, 1), Some(SelElement::Hit));
        assert_eq!(rot.get_element(0, 2), Some(SelElement::Miss));
        assert_eq!(sel.rotate_orth(4), sel);
        assert_eq!(sel.rotate_orth(2), sel.reflect());
    }

    #[test]
    fn test_rotate_non_square_moves_origin() {
        let sel = Sel::from_string("Xo.", 0, 0).unwrap();
        let rot = sel.rotate_orth(1);
        assert_eq!((rot.width(), rot.height()), (1, 3));
        assert_eq!((rot.origin_x(), rot.origin_y()), (0, 0));
        assert_eq!(rot.get_element(0, 1), Some(SelElement::Miss));

        let back = rot.rotate_orth(3);
        assert_eq!(back, sel);
    }

    #[test]
    fn test_offsets() {
        let sel = Sel::from_string("x.o\n.C.\n...", 0, 0).unwrap();
        assert_eq!(sel.hit_offsets().collect::<Vec<_>>(), vec![(-1, -1)]);
        assert_eq!(sel.miss_offsets().collect::<Vec<_>>(), vec![(1, -1)]);
    }
}
