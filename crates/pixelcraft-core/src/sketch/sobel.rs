//! Sobel edge magnitude over a single-channel buffer.

use crate::luma::to_channel;

/// Horizontal gradient kernel, row-major.
pub const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];

/// Vertical gradient kernel, row-major.
pub const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// Compute the Sobel gradient magnitude of a `width x height` channel.
///
/// Only interior pixels (`1 <= x < width - 1`, `1 <= y < height - 1`) are
/// convolved. The returned buffer is zero-initialized, so the outermost ring
/// is always 0, and a channel narrower or shorter than 3 pixels yields all
/// zeros.
///
/// Each output pixel depends only on a read-only 3x3 neighbourhood, so rows
/// are independent of each other.
pub fn edge_magnitude(channel: &[u8], width: usize, height: usize) -> Vec<u8> {
    debug_assert_eq!(channel.len(), width * height, "Channel size mismatch");

    let mut edges = vec![0u8; width * height];
    if width < 3 || height < 3 {
        return edges;
    }

    for y in 1..height - 1 {
        let out_row = &mut edges[y * width..(y + 1) * width];
        for x in 1..width - 1 {
            let (sum_x, sum_y) = convolve(channel, width, x, y);
            let magnitude = ((sum_x * sum_x + sum_y * sum_y) as f64).sqrt();
            out_row[x] = to_channel(magnitude);
        }
    }

    edges
}

/// Apply both kernels centred on `(x, y)`. Caller guarantees `(x, y)` is interior.
#[inline]
fn convolve(channel: &[u8], width: usize, x: usize, y: usize) -> (i32, i32) {
    let mut sum_x = 0i32;
    let mut sum_y = 0i32;
    for ky in 0..3 {
        let row = (y + ky - 1) * width;
        for kx in 0..3 {
            let value = channel[row + x + kx - 1] as i32;
            let k = ky * 3 + kx;
            sum_x += value * SOBEL_X[k];
            sum_y += value * SOBEL_Y[k];
        }
    }
    (sum_x, sum_y)
}
