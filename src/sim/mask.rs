//! Pixel collision masks
//!
//! A mask marks which pixels of a sprite frame are solid. Two sprites collide
//! precisely when their bounding rectangles overlap AND at least one solid
//! pixel of each lands on the same screen pixel.

/// Row-major solidity grid for one sprite frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    /// Every pixel solid
    #[cfg(test)]
    pub(crate) fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width * height],
        }
    }

    /// Solid ellipse inscribed in the frame.
    ///
    /// Stands in for sprite art: the sheet's characters are rounded blobs,
    /// so corners of their bounding boxes are transparent.
    pub fn ellipse(width: usize, height: usize) -> Self {
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        let mut bits = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let dx = (x as f32 + 0.5 - rx) / rx;
                let dy = (y as f32 + 0.5 - ry) / ry;
                bits.push(dx * dx + dy * dy <= 1.0);
            }
        }
        Self { width, height, bits }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Test overlap with `other` placed at `offset` relative to this mask's
    /// top-left corner (in whole pixels).
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (ox, oy) = offset;
        let x_start = ox.max(0);
        let y_start = oy.max(0);
        let x_end = (self.width as i32).min(ox + other.width as i32);
        let y_end = (self.height as i32).min(oy + other.height as i32);
        if x_start >= x_end || y_start >= y_end {
            return false;
        }
        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x as usize, y as usize)
                    && other.get((x - ox) as usize, (y - oy) as usize)
                {
                    return true;
                }
            }
        }
        false
    }
}
