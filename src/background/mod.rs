//! Ambient "aurora mist" background.
//!
//! A few large, faint radial gradients ("blobs") drift around the viewport on
//! sinusoidal paths driven by a slow animation clock. This module holds the pure
//! model (clock, viewport, blob geometry); `render` owns the canvas and the
//! `requestAnimationFrame` loop.

#[cfg(feature = "serde")]
use serde::Deserialize;
use std::f64::consts::FRAC_PI_2;

mod render;

pub use render::{BackgroundRenderer, FrameLoop};

// --- Clock / Viewport ------------------------------------------------------

/// Monotonic animation time. Advances a fixed step per rendered frame, never resets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    t: f64,
    step: f64,
}

impl AnimationClock {
    pub fn new(step: f64) -> Self {
        Self { t: 0.0, step }
    }
    pub fn advance(&mut self) -> f64 {
        self.t += self.step;
        self.t
    }
    pub fn t(&self) -> f64 {
        self.t
    }
}

/// Canvas size in pixels. Negative or non-finite input collapses to 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        let sane = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self { width: sane(width), height: sane(height) }
    }
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

// --- Blobs -------------------------------------------------------------------

/// Sinusoidal drift along one axis: `amplitude * sin(t * frequency + phase)` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Drift {
    pub amplitude: f64,
    pub frequency: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub phase: f64,
}

impl Drift {
    pub const fn sin(amplitude: f64, frequency: f64) -> Self {
        Self { amplitude, frequency, phase: 0.0 }
    }
    pub const fn cos(amplitude: f64, frequency: f64) -> Self {
        Self { amplitude, frequency, phase: FRAC_PI_2 }
    }
    pub fn offset(&self, t: f64) -> f64 {
        self.amplitude * (t * self.frequency + self.phase).sin()
    }
}

/// Static description of one blob.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct BlobSpec {
    /// Resting center as a fraction of viewport width / height.
    pub anchor: (f64, f64),
    pub drift_x: Drift,
    pub drift_y: Drift,
    /// Radius as a fraction of the smaller viewport side.
    pub radius_factor: f64,
    pub color: [u8; 3],
    /// Alpha at the center; the gradient fades to fully transparent at the rim.
    pub alpha: f64,
}

/// Teal, violet and a dim blue haze between them.
const AURORA: [BlobSpec; 3] = [
    BlobSpec {
        anchor: (0.15, 0.25),
        drift_x: Drift::sin(120.0, 1.1),
        drift_y: Drift::cos(80.0, 0.9),
        radius_factor: 0.9,
        color: [56, 198, 214],
        alpha: 0.06,
    },
    BlobSpec {
        anchor: (0.85, 0.6),
        drift_x: Drift::cos(140.0, 0.8),
        drift_y: Drift::sin(100.0, 1.3),
        radius_factor: 0.8,
        color: [155, 108, 255],
        alpha: 0.06,
    },
    BlobSpec {
        anchor: (0.5, 0.45),
        drift_x: Drift::sin(100.0, 0.5),
        drift_y: Drift::cos(60.0, 0.7),
        radius_factor: 0.7,
        color: [88, 140, 200],
        alpha: 0.03,
    },
];

/// One blob resolved for a single frame, ready to hand to the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobFrame {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Color stop at offset 0.
    pub inner: String,
    /// Color stop at offset 1.
    pub outer: String,
}

impl BlobSpec {
    pub fn aurora_defaults() -> &'static [BlobSpec; 3] {
        &AURORA
    }

    /// Center, radius and color stops at time `t`. The center is kept inside the canvas.
    pub fn at(&self, t: f64, vp: Viewport) -> BlobFrame {
        let x = vp.width * self.anchor.0 + self.drift_x.offset(t);
        let y = vp.height * self.anchor.1 + self.drift_y.offset(t);
        let [r, g, b] = self.color;
        BlobFrame {
            x: x.clamp(0.0, vp.width),
            y: y.clamp(0.0, vp.height),
            radius: vp.min_side() * self.radius_factor,
            inner: format!("rgba({r},{g},{b},{})", self.alpha),
            outer: format!("rgba({r},{g},{b},0)"),
        }
    }
}

// --- Scene ---------------------------------------------------------------------

/// Clock + cached viewport + blob list. Frame math without any DOM.
#[derive(Clone, Debug)]
pub struct Aurora {
    clock: AnimationClock,
    viewport: Viewport,
    blobs: Vec<BlobSpec>,
}

impl Aurora {
    pub fn new(blobs: Vec<BlobSpec>, clock_step: f64, viewport: Viewport) -> Self {
        Self { clock: AnimationClock::new(clock_step), viewport, blobs }
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Swap the cached viewport; the clock keeps running.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advance the clock one step and lay out every blob, in draw order.
    pub fn frame(&mut self) -> Vec<BlobFrame> {
        let t = self.clock.advance();
        self.blobs.iter().map(|b| b.at(t, self.viewport)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn clock_advances_by_step() {
        let mut c = AnimationClock::new(0.002);
        for i in 1..=10 {
            assert!(approx(c.advance(), 0.002 * i as f64));
        }
        assert!(approx(c.t(), 0.02));
    }

    #[test]
    fn cos_drift_is_phase_shifted_sin() {
        let d = Drift::cos(80.0, 0.9);
        for t in [0.0, 0.3, 1.7, 12.5] {
            assert!(approx(d.offset(t), 80.0 * (t * 0.9).cos()));
        }
    }

    #[test]
    fn first_blob_follows_its_formula() {
        let vp = Viewport::new(1200.0, 800.0);
        let t = 0.4;
        let f = AURORA[0].at(t, vp);
        assert!(approx(f.x, 1200.0 * 0.15 + (t * 1.1).sin() * 120.0));
        assert!(approx(f.y, 800.0 * 0.25 + (t * 0.9).cos() * 80.0));
        assert!(approx(f.radius, 800.0 * 0.9));
        assert_eq!(f.inner, "rgba(56,198,214,0.06)");
        assert_eq!(f.outer, "rgba(56,198,214,0)");
    }

    #[test]
    fn centers_stay_inside_small_canvas() {
        let vp = Viewport::new(150.0, 90.0);
        let mut t = 0.0;
        while t < 20.0 {
            for blob in &AURORA {
                let f = blob.at(t, vp);
                assert!((0.0..=vp.width).contains(&f.x), "x={} at t={}", f.x, t);
                assert!((0.0..=vp.height).contains(&f.y), "y={} at t={}", f.y, t);
            }
            t += 0.37;
        }
    }

    #[test]
    fn bad_viewport_collapses_to_zero() {
        let vp = Viewport::new(-5.0, f64::NAN);
        assert_eq!(vp, Viewport::new(0.0, 0.0));
        let f = AURORA[1].at(3.0, vp);
        assert_eq!((f.x, f.y, f.radius), (0.0, 0.0, 0.0));
    }

    #[test]
    fn resize_keeps_clock() {
        let mut a = Aurora::new(AURORA.to_vec(), 0.002, Viewport::new(800.0, 600.0));
        for _ in 0..5 {
            a.frame();
        }
        let before = a.clock().t();
        a.resize(Viewport::new(1920.0, 1080.0));
        assert_eq!(a.clock().t(), before);
        assert_eq!(a.viewport(), Viewport::new(1920.0, 1080.0));
        let frames = a.frame();
        assert_eq!(frames.len(), 3);
        assert!(approx(frames[0].radius, 1080.0 * 0.9));
    }

    #[test]
    fn frames_keep_draw_order() {
        let mut a = Aurora::new(AURORA.to_vec(), 0.002, Viewport::new(800.0, 600.0));
        let frames = a.frame();
        let inners: Vec<_> = frames.iter().map(|f| f.inner.as_str()).collect();
        assert_eq!(inners, ["rgba(56,198,214,0.06)", "rgba(155,108,255,0.06)", "rgba(88,140,200,0.03)"]);
    }
}
