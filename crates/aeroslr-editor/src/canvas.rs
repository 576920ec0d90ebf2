// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Map the Viewport panel's GUI-space canvas onto framebuffer pixels.
//!
//! GUI coordinates are points with a top-left origin; the mapped
//! [`DeviceRect`] is in framebuffer pixels with a bottom-left origin. wgpu
//! itself wants top-left, so the renderer converts through
//! [`DeviceRect::to_scissor`] at the last moment.

use egui::{Pos2, Rect, Vec2};

/// Surface facts sampled once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMapping {
    /// GUI-space origin of the main viewport.
    pub origin: Pos2,
    /// GUI display size in points.
    pub display: Vec2,
    /// Framebuffer size in physical pixels.
    pub framebuffer: [u32; 2],
}

/// Framebuffer rectangle, bottom-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Top-left-origin pixel rectangle as wgpu's viewport/scissor expect it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScissorRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl DeviceRect {
    pub fn aspect(&self) -> f32 {
        self.w as f32 / self.h as f32
    }

    /// Flip to top-left origin inside a framebuffer of height `fb_h`.
    /// Only meaningful for rects accepted by [`map_canvas`].
    pub fn to_scissor(&self, fb_h: u32) -> ScissorRect {
        let top = fb_h as i32 - self.y - self.h;
        ScissorRect {
            x: self.x.max(0) as u32,
            y: top.max(0) as u32,
            w: self.w.max(0) as u32,
            h: self.h.max(0) as u32,
        }
    }
}

/// Convert `canvas` to framebuffer pixels. `None` means "skip the 3D draw
/// this frame": empty or negative size, a degenerate display, or any part
/// of the rect outside the framebuffer.
pub fn map_canvas(canvas: Rect, m: &SurfaceMapping) -> Option<DeviceRect> {
    if !(m.display.x > 0.0 && m.display.y > 0.0) {
        return None;
    }
    let [fb_w, fb_h] = m.framebuffer;
    let (fb_w, fb_h) = (i32::try_from(fb_w).ok()?, i32::try_from(fb_h).ok()?);
    let scale_x = fb_w as f32 / m.display.x;
    let scale_y = fb_h as f32 / m.display.y;

    let size = canvas.size();
    let rect = DeviceRect {
        x: ((canvas.min.x - m.origin.x) * scale_x) as i32,
        y: (fb_h as f32 - ((canvas.min.y - m.origin.y) + size.y) * scale_y) as i32,
        w: (size.x * scale_x) as i32,
        h: (size.y * scale_y) as i32,
    };

    let inside = rect.w > 0
        && rect.h > 0
        && (0..fb_w).contains(&rect.x)
        && (0..fb_h).contains(&rect.y)
        && rect.x.checked_add(rect.w).is_some_and(|r| r <= fb_w)
        && rect.y.checked_add(rect.h).is_some_and(|b| b <= fb_h);
    inside.then_some(rect)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use egui::pos2;

    fn mapping(display: [f32; 2], fb: [u32; 2]) -> SurfaceMapping {
        SurfaceMapping {
            origin: Pos2::ZERO,
            display: Vec2::from(display),
            framebuffer: fb,
        }
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), egui::vec2(w, h))
    }

    #[test]
    fn maps_with_bottom_left_origin() {
        let m = mapping([1000.0, 800.0], [1000, 800]);
        let r = map_canvas(rect(100.0, 50.0, 400.0, 300.0), &m);
        assert_eq!(
            r,
            Some(DeviceRect {
                x: 100,
                y: 450,
                w: 400,
                h: 300
            })
        );
    }

    #[test]
    fn applies_dpi_scale() {
        let m = mapping([1000.0, 800.0], [2000, 1600]);
        let r = map_canvas(rect(100.0, 50.0, 400.0, 300.0), &m).expect("inside");
        assert_eq!((r.x, r.y, r.w, r.h), (200, 900, 800, 600));
        approx::assert_relative_eq!(r.aspect(), 800.0 / 600.0);
    }

    #[test]
    fn subtracts_main_viewport_origin() {
        let mut m = mapping([1000.0, 800.0], [1000, 800]);
        m.origin = pos2(20.0, 10.0);
        let r = map_canvas(rect(120.0, 60.0, 100.0, 100.0), &m);
        assert_eq!(r.map(|r| (r.x, r.y)), Some((100, 650)));
    }

    #[test]
    fn repeated_mapping_is_stable() {
        let m = mapping([1280.0, 720.0], [1920, 1080]);
        let canvas = rect(333.3, 77.7, 512.5, 401.1);
        let first = map_canvas(canvas, &m);
        assert!(first.is_some());
        for _ in 0..10 {
            assert_eq!(map_canvas(canvas, &m), first);
        }
    }

    #[test]
    fn rejects_empty_and_negative_sizes() {
        let m = mapping([1000.0, 800.0], [1000, 800]);
        assert_eq!(map_canvas(rect(10.0, 10.0, 0.0, 100.0), &m), None);
        assert_eq!(map_canvas(rect(10.0, 10.0, 100.0, 0.0), &m), None);
        assert_eq!(map_canvas(rect(10.0, 10.0, 0.4, 100.0), &m), None);
        assert_eq!(map_canvas(Rect::NOTHING, &m), None);
    }

    #[test]
    fn rejects_rects_leaving_the_framebuffer() {
        let m = mapping([1000.0, 800.0], [1000, 800]);
        // origin left of the framebuffer
        assert_eq!(map_canvas(rect(-5.0, 10.0, 100.0, 100.0), &m), None);
        // extends past the right edge
        assert_eq!(map_canvas(rect(950.0, 10.0, 100.0, 100.0), &m), None);
        // extends past the bottom edge, so device y goes negative
        assert_eq!(map_canvas(rect(10.0, 750.0, 100.0, 100.0), &m), None);
        // extends past the top edge
        assert_eq!(map_canvas(rect(10.0, -20.0, 100.0, 100.0), &m), None);
        // exactly filling the framebuffer is fine
        assert!(map_canvas(rect(0.0, 0.0, 1000.0, 800.0), &m).is_some());
    }

    #[test]
    fn rejects_canvas_wider_than_i32() {
        let m = mapping([1000.0, 800.0], [1000, 800]);
        // Width saturates to i32::MAX; x + w must not overflow.
        assert_eq!(map_canvas(rect(100.0, 0.0, 1e12, 300.0), &m), None);
    }

    #[test]
    fn rejects_degenerate_display() {
        let m = mapping([0.0, 800.0], [1000, 800]);
        assert_eq!(map_canvas(rect(10.0, 10.0, 100.0, 100.0), &m), None);
    }

    #[test]
    fn scissor_flips_back_to_top_left() {
        let d = DeviceRect {
            x: 100,
            y: 450,
            w: 400,
            h: 300,
        };
        assert_eq!(
            d.to_scissor(800),
            ScissorRect {
                x: 100,
                y: 50,
                w: 400,
                h: 300
            }
        );
    }
}
