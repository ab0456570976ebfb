use image::{Rgba, RgbaImage};

/// A pixel grid the flood fill can read and write by coordinate.
pub trait PixelSurface {
    type Pixel: Copy + PartialEq;

    fn dimensions(&self) -> (u32, u32);
    fn pixel(&self, x: u32, y: u32) -> Self::Pixel;
    fn set_pixel(&mut self, x: u32, y: u32, value: Self::Pixel);
}

impl PixelSurface for RgbaImage {
    type Pixel = Rgba<u8>;

    fn dimensions(&self) -> (u32, u32) {
        image::ImageBuffer::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.get_pixel(x, y)
    }

    fn set_pixel(&mut self, x: u32, y: u32, value: Rgba<u8>) {
        self.put_pixel(x, y, value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Seed off the surface, or it already had the replacement color
    Unchanged,
    Filled {
        pixels: usize,
        /// The pending-entry bound was hit before the region was exhausted
        truncated: bool,
    },
}

impl FillOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Filled { pixels, .. } if *pixels > 0)
    }
}

/// 4-connected flood fill from `seed` with an explicit stack.
///
/// Stops early, leaving the region partially filled, once more than
/// `stack_limit` coordinates are pending.
pub fn flood_fill<S: PixelSurface>(
    surface: &mut S,
    seed: (i32, i32),
    replacement: S::Pixel,
    stack_limit: usize,
) -> FillOutcome {
    let (width, height) = surface.dimensions();
    let in_bounds = |x: i32, y: i32| x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height;
    if !in_bounds(seed.0, seed.1) {
        return FillOutcome::Unchanged;
    }

    let target = surface.pixel(seed.0 as u32, seed.1 as u32);
    if target == replacement {
        return FillOutcome::Unchanged;
    }

    let mut visited = vec![false; width as usize * height as usize];
    let mut stack = vec![seed];
    let mut pixels = 0;
    let mut truncated = false;

    while let Some((x, y)) = stack.pop() {
        if !in_bounds(x, y) {
            continue;
        }
        let idx = y as usize * width as usize + x as usize;
        if visited[idx] || surface.pixel(x as u32, y as u32) != target {
            continue;
        }

        surface.set_pixel(x as u32, y as u32, replacement);
        visited[idx] = true;
        pixels += 1;

        stack.extend([(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]);
        if stack.len() > stack_limit {
            truncated = true;
            break;
        }
    }

    if truncated {
        log::warn!("flood fill stopped after {pixels} pixels: more than {stack_limit} pending");
    }
    FillOutcome::Filled { pixels, truncated }
}
