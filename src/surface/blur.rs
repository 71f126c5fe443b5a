//! Approximate Gaussian blur for drop shadows.
//!
//! Three successive box blurs over premultiplied RGBA, limited to a region.
//! Averaging premultiplied channels keeps every color channel at or below alpha.

use resvg::tiny_skia::Pixmap;

/// Pixel region `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Region {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    /// The region covering `[min_x, max_x] x [min_y, max_y]` grown by `margin`,
    /// clipped to a `width x height` image. `None` if nothing is left.
    pub fn around(
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
        margin: f32,
        width: u32,
        height: u32,
    ) -> Option<Region> {
        let clip = |v: f32, limit: u32| -> usize { v.max(0.0).min(limit as f32) as usize };
        let x0 = clip((min_x - margin).floor(), width);
        let y0 = clip((min_y - margin).floor(), height);
        let x1 = clip((max_x + margin).ceil(), width);
        let y1 = clip((max_y + margin).ceil(), height);
        (x1 > x0 && y1 > y0).then_some(Region { x0, y0, x1, y1 })
    }

    /// The whole of `pixmap`.
    pub fn covering(pixmap: &Pixmap) -> Region {
        Region {
            x0: 0,
            y0: 0,
            x1: pixmap.width() as usize,
            y1: pixmap.height() as usize,
        }
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }
}

/// Box widths whose three-pass convolution approximates a Gaussian of `sigma`.
fn box_sizes(sigma: f32) -> [usize; 3] {
    const N: f32 = 3.0;
    let ideal = (12.0 * sigma * sigma / N + 1.0).sqrt();
    let mut lower = ideal.floor() as i64;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let lower = lower.max(1);
    let upper = lower + 2;
    let (l, s) = (lower as f32, sigma);
    let m = ((12.0 * s * s - N * l * l - 4.0 * N * l - 3.0 * N) / (-4.0 * l - 4.0)).round() as i64;

    let mut sizes = [0usize; 3];
    for (i, size) in sizes.iter_mut().enumerate() {
        *size = (if (i as i64) < m { lower } else { upper }) as usize;
    }
    sizes
}

/// Blurs `region` of the pixmap in place.
pub(crate) fn gaussian_blur(pixmap: &mut Pixmap, region: Region, sigma: f32) {
    if sigma <= 0.0 {
        return;
    }
    let stride = pixmap.width() as usize * 4;
    let data = pixmap.data_mut();
    for size in box_sizes(sigma) {
        let radius = (size - 1) / 2;
        if radius == 0 {
            continue;
        }
        box_pass(data, stride, region, radius, true);
        box_pass(data, stride, region, radius, false);
    }
}

fn box_pass(data: &mut [u8], stride: usize, region: Region, radius: usize, horizontal: bool) {
    let (lines, len) = if horizontal {
        (region.y0..region.y1, region.x1 - region.x0)
    } else {
        (region.x0..region.x1, region.y1 - region.y0)
    };
    let index = |line: usize, i: usize| -> usize {
        if horizontal {
            line * stride + (region.x0 + i) * 4
        } else {
            (region.y0 + i) * stride + line * 4
        }
    };

    let width = (2 * radius + 1) as u32;
    let mut prefix = vec![[0u32; 4]; len + 1];
    for line in lines {
        for i in 0..len {
            let at = index(line, i);
            for c in 0..4 {
                prefix[i + 1][c] = prefix[i][c] + data[at + c] as u32;
            }
        }
        for i in 0..len {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius + 1).min(len);
            let at = index(line, i);
            for c in 0..4 {
                let sum = prefix[hi][c] - prefix[lo][c];
                data[at + c] = ((sum + width / 2) / width) as u8;
            }
        }
    }
}
