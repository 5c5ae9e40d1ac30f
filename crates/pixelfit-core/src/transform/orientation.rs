//! Upright re-rendering for EXIF orientations.
//!
//! Each orientation is a fixed pixel mapping. For a source of `w x h`, the
//! destination pixel `(x, y)` is read from:
//!
//! ```text
//! 2  mirror-X        (w-1-x, y)
//! 3  rotate 180      (w-1-x, h-1-y)
//! 4  mirror-Y        (x, h-1-y)
//! 5  transpose       (y, x)
//! 6  rotate 90 CW    (y, h-1-x)
//! 7  anti-transpose  (w-1-y, h-1-x)
//! 8  rotate 90 CCW   (w-1-y, x)
//! ```
//!
//! Orientations 5-8 produce an `h x w` output.

use crate::decode::{DecodedImage, Orientation};

/// Re-render `image` so that it displays upright.
///
/// `Orientation::Normal` returns the input as-is. Every other orientation
/// writes into a freshly allocated buffer.
pub fn apply_orientation(image: DecodedImage, orientation: Orientation) -> DecodedImage {
    if orientation == Orientation::Normal || image.is_empty() {
        return image;
    }

    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = if orientation.swaps_dimensions() {
        (src_h, src_w)
    } else {
        (src_w, src_h)
    };

    let mut output = vec![0u8; dst_w * dst_h * 3];

    for y in 0..dst_h {
        let dst_row = y * dst_w * 3;
        for x in 0..dst_w {
            let (sx, sy) = source_coords(orientation, x, y, src_w, src_h);
            let src_idx = (sy * src_w + sx) * 3;
            let dst_idx = dst_row + x * 3;
            output[dst_idx..dst_idx + 3].copy_from_slice(&image.pixels[src_idx..src_idx + 3]);
        }
    }

    DecodedImage {
        width: dst_w as u32,
        height: dst_h as u32,
        pixels: output,
    }
}

#[inline]
fn source_coords(
    orientation: Orientation,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
) -> (usize, usize) {
    match orientation {
        Orientation::Normal => (x, y),
        Orientation::MirrorX => (w - 1 - x, y),
        Orientation::Rotate180 => (w - 1 - x, h - 1 - y),
        Orientation::MirrorY => (x, h - 1 - y),
        Orientation::Transpose => (y, x),
        Orientation::Rotate90CW => (y, h - 1 - x),
        Orientation::Transverse => (w - 1 - y, h - 1 - x),
        Orientation::Rotate90CCW => (w - 1 - y, x),
    }
}
