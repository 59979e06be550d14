//! Flood-fill reachability mask
//!
//! The mask spans the image canvas padded by one cell on each side. Padding
//! guarantees the corner seed (0,0) lies outside the image content, so the
//! fill always starts in the exterior region regardless of the image's own
//! border pixels.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Boolean grid recording which cells a flood fill has reached from the
/// canvas border seed.
///
/// Dimensions are always `(image_width + 2) x (image_height + 2)`. The
/// interior region, offset by 1 in each axis, maps 1:1 onto image pixel
/// coordinates: image pixel `(x, y)` corresponds to mask cell `(x+1, y+1)`.
///
/// The mask is computed fresh per transform invocation and discarded after
/// use; it is never persisted or shared across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReachabilityMask {
    cells: Vec<bool>,
    width: u32,
    height: u32,
}

impl ReachabilityMask {
    /// Create an all-`false` mask for an image of the given dimensions.
    ///
    /// `image_width` and `image_height` are the dimensions of the image the
    /// mask will cover; the allocated grid is padded by one cell per side.
    #[must_use]
    pub fn new(image_width: u32, image_height: u32) -> Self {
        let width = image_width + 2;
        let height = image_height + 2;
        Self {
            cells: vec![false; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Build the mask for an image of the given dimensions and flood fill it
    /// from the corner seed (0,0).
    #[must_use]
    pub fn flood_filled(image_width: u32, image_height: u32) -> Self {
        let mut mask = Self::new(image_width, image_height);
        mask.flood_fill(0, 0);
        mask
    }

    /// Padded grid dimensions `(width, height)`, i.e. image dimensions + 2.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Mask value at padded-grid coordinates.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the padded grid.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "mask cell out of bounds");
        self.cells[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Mask value for image pixel `(x, y)`, i.e. padded cell `(x+1, y+1)`.
    #[must_use]
    pub fn covers_pixel(&self, x: u32, y: u32) -> bool {
        self.get(x + 1, y + 1)
    }

    /// Number of cells currently marked reached.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Flood fill `true` from the given seed using 4-connected adjacency.
    ///
    /// A cell ends up `true` iff a 4-connected path of previously-`false`
    /// cells connects it to the seed. Propagation gates on cell state only;
    /// no pixel value is consulted. Uses an explicit work stack, so depth is
    /// bounded by the heap rather than the call stack.
    pub fn flood_fill(&mut self, seed_x: u32, seed_y: u32) {
        if seed_x >= self.width || seed_y >= self.height {
            return;
        }

        let width = self.width as usize;
        let seed_index = (seed_y as usize) * width + (seed_x as usize);
        if self.cells[seed_index] {
            return;
        }

        let mut stack = vec![(seed_x, seed_y)];
        self.cells[seed_index] = true;

        while let Some((x, y)) = stack.pop() {
            // 4-connected neighbors: up, down, left, right
            if y > 0 {
                self.visit(x, y - 1, &mut stack);
            }
            if y + 1 < self.height {
                self.visit(x, y + 1, &mut stack);
            }
            if x > 0 {
                self.visit(x - 1, y, &mut stack);
            }
            if x + 1 < self.width {
                self.visit(x + 1, y, &mut stack);
            }
        }

        debug!(
            width = self.width,
            height = self.height,
            filled = self.filled_count(),
            "flood fill complete"
        );
    }

    fn visit(&mut self, x: u32, y: u32, stack: &mut Vec<(u32, u32)>) {
        let index = (y as usize) * (self.width as usize) + (x as usize);
        if !self.cells[index] {
            self.cells[index] = true;
            stack.push((x, y));
        }
    }
}
