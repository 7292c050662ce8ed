//! Software compositor
//!
//! All operations work in place on a [`Frame`]. Sprite overlay uses straight
//! (non-premultiplied) alpha: `out = fg * a + bg * (1 - a)`.

use image::imageops::{self, FilterType};

use crate::assets::Sprite;
use crate::foundation::math::IVec2;
use crate::render::{Frame, RenderError};

/// Alpha blend `sprite` onto `frame` with its top-left corner at `position`.
///
/// Pixels falling outside the frame are skipped, so sprites at negative or
/// oversized positions are clipped rather than rejected.
pub fn overlay(frame: &mut Frame, sprite: &Sprite, position: IVec2) {
    let (frame_width, frame_height) = (i64::from(frame.width()), i64::from(frame.height()));
    let (origin_x, origin_y) = (i64::from(position.x), i64::from(position.y));

    // Visible window of the sprite in sprite-local coordinates
    let start_x = (-origin_x).max(0);
    let start_y = (-origin_y).max(0);
    let end_x = i64::from(sprite.width()).min(frame_width - origin_x);
    let end_y = i64::from(sprite.height()).min(frame_height - origin_y);

    if start_x >= end_x || start_y >= end_y {
        return;
    }

    let source = sprite.image();
    for sy in start_y..end_y {
        for sx in start_x..end_x {
            let fg = source.get_pixel(sx as u32, sy as u32).0;
            let alpha = u32::from(fg[3]);
            if alpha == 0 {
                continue;
            }

            let bg = frame.get_pixel_mut((origin_x + sx) as u32, (origin_y + sy) as u32);
            if alpha == 255 {
                bg.0 = [fg[0], fg[1], fg[2]];
                continue;
            }

            for channel in 0..3 {
                let blended = u32::from(fg[channel]) * alpha
                    + u32::from(bg.0[channel]) * (255 - alpha);
                bg.0[channel] = ((blended + 127) / 255) as u8;
            }
        }
    }
}

/// Weighted sum of two equally sized frames, written into `frame`:
/// `frame = frame * alpha + other * beta`, saturated to `0..=255`.
pub fn blend_weighted(frame: &mut Frame, other: &Frame, alpha: f32, beta: f32) -> Result<(), RenderError> {
    if frame.dimensions() != other.dimensions() {
        return Err(RenderError::SizeMismatch {
            left_width: frame.width(),
            left_height: frame.height(),
            right_width: other.width(),
            right_height: other.height(),
        });
    }

    for (dst, src) in frame.pixels_mut().zip(other.pixels()) {
        for channel in 0..3 {
            let value = f32::from(dst.0[channel]) * alpha + f32::from(src.0[channel]) * beta;
            dst.0[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
    }

    Ok(())
}

/// Flip a frame left to right, turning a camera view into a mirror view
pub fn mirror(frame: &mut Frame) {
    imageops::flip_horizontal_in_place(frame);
}

/// Scale every channel by `factor` (clamped to `0.0..=1.0`)
pub fn dim(frame: &mut Frame, factor: f32) {
    let factor = factor.clamp(0.0, 1.0);
    for pixel in frame.pixels_mut() {
        for channel in &mut pixel.0 {
            *channel = (f32::from(*channel) * factor).round() as u8;
        }
    }
}

/// Resample `frame` to `width` x `height`
pub fn resize_to(frame: &Frame, width: u32, height: u32) -> Frame {
    if frame.dimensions() == (width, height) {
        return frame.clone();
    }
    log::debug!(
        "Resizing frame {}x{} -> {}x{}",
        frame.width(), frame.height(), width, height
    );
    imageops::resize(frame, width, height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::ivec2;
    use image::Rgb;

    fn black(width: u32, height: u32) -> Frame {
        Frame::from_pixel(width, height, Rgb([0, 0, 0]))
    }

    #[test]
    fn test_opaque_overlay_replaces_pixels() {
        let mut frame = black(4, 4);
        let sprite = Sprite::solid_color(2, 2, [200, 100, 50, 255]);

        overlay(&mut frame, &sprite, ivec2(1, 1));

        assert_eq!(frame.get_pixel(1, 1).0, [200, 100, 50]);
        assert_eq!(frame.get_pixel(2, 2).0, [200, 100, 50]);
        assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(frame.get_pixel(3, 3).0, [0, 0, 0]);
    }

    #[test]
    fn test_transparent_pixels_leave_background() {
        let mut frame = Frame::from_pixel(2, 2, Rgb([9, 9, 9]));
        let sprite = Sprite::solid_color(2, 2, [255, 255, 255, 0]);

        overlay(&mut frame, &sprite, ivec2(0, 0));

        assert_eq!(frame.get_pixel(0, 0).0, [9, 9, 9]);
    }

    #[test]
    fn test_half_alpha_blends() {
        let mut frame = black(1, 1);
        let sprite = Sprite::solid_color(1, 1, [255, 255, 255, 128]);

        overlay(&mut frame, &sprite, ivec2(0, 0));

        // 255 * 128 / 255 = 128
        assert_eq!(frame.get_pixel(0, 0).0, [128, 128, 128]);
    }

    #[test]
    fn test_overlay_clips_at_every_edge() {
        let sprite = Sprite::solid_color(3, 3, [255, 0, 0, 255]);

        let mut frame = black(4, 4);
        overlay(&mut frame, &sprite, ivec2(-2, -2));
        assert_eq!(frame.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(frame.get_pixel(1, 1).0, [0, 0, 0]);

        let mut frame = black(4, 4);
        overlay(&mut frame, &sprite, ivec2(3, 3));
        assert_eq!(frame.get_pixel(3, 3).0, [255, 0, 0]);
        assert_eq!(frame.get_pixel(2, 2).0, [0, 0, 0]);

        // Entirely off-frame is a no-op
        let mut frame = black(4, 4);
        overlay(&mut frame, &sprite, ivec2(100, -100));
        assert!(frame.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_blend_weighted() {
        let mut frame = Frame::from_pixel(2, 1, Rgb([100, 200, 250]));
        let background = Frame::from_pixel(2, 1, Rgb([50, 50, 250]));

        blend_weighted(&mut frame, &background, 0.8, 0.2).unwrap();

        assert_eq!(frame.get_pixel(0, 0).0, [90, 170, 250]);
    }

    #[test]
    fn test_blend_weighted_rejects_size_mismatch() {
        let mut frame = black(2, 2);
        let other = black(3, 2);
        let result = blend_weighted(&mut frame, &other, 0.5, 0.5);
        assert!(matches!(result, Err(RenderError::SizeMismatch { right_width: 3, .. })));
    }

    #[test]
    fn test_mirror_swaps_columns() {
        let mut frame = black(3, 1);
        frame.put_pixel(0, 0, Rgb([1, 2, 3]));

        mirror(&mut frame);

        assert_eq!(frame.get_pixel(2, 0).0, [1, 2, 3]);
        assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_dim_and_resize() {
        let mut frame = Frame::from_pixel(4, 2, Rgb([200, 100, 0]));
        dim(&mut frame, 0.5);
        assert_eq!(frame.get_pixel(3, 1).0, [100, 50, 0]);

        let resized = resize_to(&frame, 8, 4);
        assert_eq!(resized.dimensions(), (8, 4));
        assert_eq!(resized.get_pixel(4, 2).0, [100, 50, 0]);
    }
}
