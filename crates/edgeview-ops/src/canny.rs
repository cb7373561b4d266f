//! Gradient edge detection with two-threshold hysteresis.
//!
//! A Canny-style detector over a single-channel luminance buffer:
//!
//! - 3x3 Sobel gradients with border clamping (replicate), producing `gx`,
//!   `gy`, and the L2 magnitude per pixel.
//! - Non-maximum suppression along the quantized gradient direction with a
//!   direction-aligned neighborhood. A pixel survives when its magnitude is
//!   `>=` both neighbors along the gradient, so plateau ties never depend on
//!   traversal order.
//! - Double threshold and 8-connectivity hysteresis: magnitudes above the
//!   high threshold seed edges; pixels at or above the low threshold are
//!   kept only when connected to a seed. Propagation is a stack flood-fill
//!   seeded in row-major order, so the output is deterministic.
//!
//! The outermost 1-pixel frame is never an edge; suppression ignores it to
//! keep neighbor lookups unchecked.

use crate::config::EdgeConfig;
use crate::{OpsError, OpsResult};
use edgeview_core::{PixelBuffer, PixelFormat};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Value written for edge pixels; non-edges are 0.
pub const EDGE_VALUE: u8 = 255;

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Per-pixel Sobel gradients of a luminance buffer.
///
/// Buffers are row-major, `width * height` long.
pub struct Gradients {
    /// Horizontal derivative (Sobel X).
    pub gx: Vec<f32>,
    /// Vertical derivative (Sobel Y).
    pub gy: Vec<f32>,
    /// L2 magnitude per pixel: `sqrt(gx^2 + gy^2)`.
    pub mag: Vec<f32>,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

#[inline]
fn gradient_row(rows: [&[u8]; 3], gx: &mut [f32], gy: &mut [f32], mag: &mut [f32]) {
    let w = gx.len();
    let [top, mid, bot] = rows;
    for x in 0..w {
        let xm = x.saturating_sub(1);
        let xp = (x + 1).min(w - 1);
        let sx = (top[xp] as f32 - top[xm] as f32)
            + 2.0 * (mid[xp] as f32 - mid[xm] as f32)
            + (bot[xp] as f32 - bot[xm] as f32);
        let sy = (bot[xm] as f32 + 2.0 * bot[x] as f32 + bot[xp] as f32)
            - (top[xm] as f32 + 2.0 * top[x] as f32 + top[xp] as f32);
        gx[x] = sx;
        gy[x] = sy;
        mag[x] = (sx * sx + sy * sy).sqrt();
    }
}

/// Computes Sobel gradients on a single-channel buffer.
///
/// Borders are handled by clamping indices (replicate), so the result is
/// defined for every pixel.
///
/// # Errors
///
/// Returns [`OpsError::ChannelMismatch`] unless the input is
/// [`PixelFormat::Gray`].
pub fn sobel_gradients(input: &PixelBuffer) -> OpsResult<Gradients> {
    if input.format() != PixelFormat::Gray {
        return Err(OpsError::ChannelMismatch {
            expected: PixelFormat::Gray,
            got: input.format(),
        });
    }
    let width = input.width() as usize;
    let height = input.height() as usize;
    let mut gx = vec![0.0f32; width * height];
    let mut gy = vec![0.0f32; width * height];
    let mut mag = vec![0.0f32; width * height];

    let row_for = |y: usize| input.row(y as u32);

    #[cfg(feature = "parallel")]
    gx.par_chunks_exact_mut(width)
        .zip(gy.par_chunks_exact_mut(width))
        .zip(mag.par_chunks_exact_mut(width))
        .enumerate()
        .for_each(|(y, ((gx_row, gy_row), mag_row))| {
            let rows = [
                row_for(y.saturating_sub(1)),
                row_for(y),
                row_for((y + 1).min(height - 1)),
            ];
            gradient_row(rows, gx_row, gy_row, mag_row);
        });

    #[cfg(not(feature = "parallel"))]
    gx.chunks_exact_mut(width)
        .zip(gy.chunks_exact_mut(width))
        .zip(mag.chunks_exact_mut(width))
        .enumerate()
        .for_each(|(y, ((gx_row, gy_row), mag_row))| {
            let rows = [
                row_for(y.saturating_sub(1)),
                row_for(y),
                row_for((y + 1).min(height - 1)),
            ];
            gradient_row(rows, gx_row, gy_row, mag_row);
        });

    Ok(Gradients {
        gx,
        gy,
        mag,
        width,
        height,
    })
}

/// Marks interior pixels that are local maxima along the gradient direction.
///
/// Pixels below `low` are skipped outright; they can never become edges.
fn suppress_nonmaxima(grad: &Gradients, low: f32) -> Vec<bool> {
    let w = grad.width;
    let h = grad.height;
    let mut keep = vec![false; w * h];
    if w < 3 || h < 3 {
        return keep;
    }

    for y in 1..h - 1 {
        let mag_prev = &grad.mag[(y - 1) * w..y * w];
        let mag_row = &grad.mag[y * w..(y + 1) * w];
        let mag_next = &grad.mag[(y + 1) * w..(y + 2) * w];
        let gx_row = &grad.gx[y * w..(y + 1) * w];
        let gy_row = &grad.gy[y * w..(y + 1) * w];
        let keep_row = &mut keep[y * w..(y + 1) * w];

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x + 1], mag_next[x - 1])
                } else {
                    (mag_prev[x - 1], mag_next[x + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x + 1], mag_next[x - 1])
            } else {
                (mag_prev[x - 1], mag_next[x + 1])
            };

            // Plateau ties keep the pixel; only a strictly larger neighbor
            // suppresses it.
            if mag < neighbor1 || mag < neighbor2 {
                continue;
            }

            keep_row[x] = true;
        }
    }

    keep
}

/// Double threshold and 8-connected hysteresis over the NMS survivors.
///
/// Returns the final edge map (0 or [`EDGE_VALUE`] per pixel).
fn hysteresis(grad: &Gradients, keep: &[bool], low: f32, high: f32) -> Vec<u8> {
    let w = grad.width;
    let h = grad.height;
    let mut edges = vec![0u8; w * h];
    if w < 3 || h < 3 {
        return edges;
    }

    let mut stack: Vec<usize> = Vec::new();

    // Seed from strong pixels in row-major order, then flood to connected
    // weak pixels. Survivors only exist in the interior, so neighbor
    // arithmetic stays in bounds.
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            if edges[idx] != 0 || !keep[idx] || grad.mag[idx] <= high {
                continue;
            }
            edges[idx] = EDGE_VALUE;
            stack.push(idx);

            while let Some(at) = stack.pop() {
                let (cy, cx) = (at / w, at % w);
                for dy in cy.saturating_sub(1)..=(cy + 1).min(h - 1) {
                    for dx in cx.saturating_sub(1)..=(cx + 1).min(w - 1) {
                        let n = dy * w + dx;
                        if edges[n] == 0 && keep[n] && grad.mag[n] >= low {
                            edges[n] = EDGE_VALUE;
                            stack.push(n);
                        }
                    }
                }
            }
        }
    }

    edges
}

/// Runs the full edge detection stage on a luminance buffer.
///
/// The output is a single-channel buffer of the same dimensions where every
/// pixel is either 0 or [`EDGE_VALUE`]. Buffers smaller than 3x3 have no
/// interior and produce an all-zero map.
///
/// # Errors
///
/// Returns [`OpsError::ChannelMismatch`] unless the input is
/// [`PixelFormat::Gray`].
pub fn detect_edges(input: &PixelBuffer, config: &EdgeConfig) -> OpsResult<PixelBuffer> {
    let (low, high) = config.ordered();
    let grad = sobel_gradients(input)?;
    let keep = suppress_nonmaxima(&grad, low);
    let edges = hysteresis(&grad, &keep, low, high);

    debug!(
        width = grad.width,
        height = grad.height,
        edge_pixels = edges.iter().filter(|&&v| v != 0).count(),
        "edge detection complete"
    );

    Ok(PixelBuffer::from_data(
        input.width(),
        input.height(),
        PixelFormat::Gray,
        edges,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Uniform background with a one-pixel vertical line of contrast.
    fn line_image(w: u32, h: u32, base: u8, line: u8, col: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::filled(w, h, PixelFormat::Gray, &[base]).unwrap();
        for y in 0..h {
            buf.set_pixel(col, y, &[line]);
        }
        buf
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let buf = PixelBuffer::filled(32, 32, PixelFormat::Gray, &[100]).unwrap();
        let out = detect_edges(&buf, &EdgeConfig::default()).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_vertical_line_detected_adjacent_to_line() {
        let buf = line_image(32, 32, 100, 200, 16);
        let out = detect_edges(&buf, &EdgeConfig::default()).unwrap();

        let mut edge_cols = std::collections::BTreeSet::new();
        for y in 0..32 {
            for x in 0..32 {
                if out.pixel(x, y)[0] != 0 {
                    edge_cols.insert(x);
                }
            }
        }
        assert!(!edge_cols.is_empty());
        // Every edge pixel sits within one pixel of the line
        assert!(edge_cols.iter().all(|&x| (15..=17).contains(&x)));
    }

    #[test]
    fn test_edge_values_are_binary() {
        let buf = line_image(32, 32, 100, 200, 16);
        let out = detect_edges(&buf, &EdgeConfig::default()).unwrap();
        assert!(out.data().iter().all(|&v| v == 0 || v == EDGE_VALUE));
    }

    #[test]
    fn test_isolated_weak_edge_discarded() {
        // Contrast of 20 puts the line response (~80) between the default
        // thresholds; without a strong seed nothing survives.
        let buf = line_image(32, 32, 100, 120, 16);
        let out = detect_edges(&buf, &EdgeConfig::default()).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_weak_edge_connected_to_strong_survives() {
        // Upper half: strong contrast. Lower half: weak contrast in the same
        // column, 8-connected to the strong response above it.
        let mut buf = PixelBuffer::filled(16, 32, PixelFormat::Gray, &[100]).unwrap();
        for y in 0..16 {
            buf.set_pixel(8, y, &[220]);
        }
        for y in 16..32 {
            buf.set_pixel(8, y, &[120]);
        }
        let out = detect_edges(&buf, &EdgeConfig::default()).unwrap();

        let weak_half_edges = (20..31)
            .flat_map(|y| (0..16).map(move |x| (x, y)))
            .filter(|&(x, y)| out.pixel(x, y)[0] != 0)
            .count();
        assert!(weak_half_edges > 0, "weak segment should ride the strong seed");
    }

    #[test]
    fn test_step_edge_stays_thin() {
        // Left half dark, right half bright: the response plateaus on the two
        // columns flanking the boundary and must not spread further.
        let mut buf = PixelBuffer::new(32, 32, PixelFormat::Gray).unwrap();
        for y in 0..32 {
            for x in 0..32 {
                buf.set_pixel(x, y, &[if x < 16 { 50 } else { 200 }]);
            }
        }
        let out = detect_edges(&buf, &EdgeConfig::default()).unwrap();
        for y in 0..32 {
            for x in 0..32 {
                let on = out.pixel(x, y)[0] != 0;
                if !(15..=16).contains(&x) {
                    assert!(!on, "unexpected edge at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_tiny_image_is_all_zero() {
        let buf = PixelBuffer::filled(2, 2, PixelFormat::Gray, &[255]).unwrap();
        let out = detect_edges(&buf, &EdgeConfig::default()).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_rejects_rgba_input() {
        let buf = PixelBuffer::new(8, 8, PixelFormat::Rgba).unwrap();
        assert!(matches!(
            detect_edges(&buf, &EdgeConfig::default()),
            Err(OpsError::ChannelMismatch { .. })
        ));
    }

    #[test]
    fn test_gradients_on_flat_image_are_zero() {
        let buf = PixelBuffer::filled(8, 8, PixelFormat::Gray, &[77]).unwrap();
        let grad = sobel_gradients(&buf).unwrap();
        assert!(grad.mag.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_gradient_magnitude_is_l2() {
        use approx::assert_relative_eq;
        // A lone bright pixel: its diagonal neighbor sees equal horizontal
        // and vertical responses, so the magnitude is sqrt(2) times either.
        let mut buf = PixelBuffer::new(9, 9, PixelFormat::Gray).unwrap();
        buf.set_pixel(4, 4, &[90]);
        let grad = sobel_gradients(&buf).unwrap();
        let idx = 3 * 9 + 3; // (x=3, y=3)
        assert_eq!(grad.gx[idx], 90.0);
        assert_eq!(grad.gy[idx], 90.0);
        assert_relative_eq!(grad.mag[idx], 90.0 * 2.0f32.sqrt(), max_relative = 1e-6);
    }

    #[test]
    fn test_gradient_magnitude_of_line() {
        // A lone bright column: interior response next to the line is
        // 4 * contrast with a pure horizontal direction.
        let buf = line_image(9, 9, 100, 200, 4);
        let grad = sobel_gradients(&buf).unwrap();
        let idx = 4 * 9 + 3; // (x=3, y=4)
        assert_eq!(grad.gx[idx], 400.0);
        assert_eq!(grad.gy[idx], 0.0);
        assert_eq!(grad.mag[idx], 400.0);
        // On the line itself both sides cancel
        assert_eq!(grad.mag[4 * 9 + 4], 0.0);
    }
}
