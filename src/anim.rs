use std::collections::BTreeMap;

use crate::{
    anim_ease::Ease,
    core::Vec2,
    error::{GalleryError, GalleryResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Visual properties a driver may write to an element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    X,
    Y,
    Opacity,
    Scale,
    Rotation,   // degrees
    ClipRadius, // percent, `circle(N% at 50% 50%)`
    ShiftX,     // pointer-driven translation, composed with X
    ShiftY,     // pointer-driven translation, composed with Y
}

impl Property {
    /// Value an element has before any driver touches it.
    pub fn rest_value(self) -> f64 {
        match self {
            Self::Opacity | Self::Scale => 1.0,
            Self::ClipRadius => 100.0,
            Self::X | Self::Y | Self::Rotation | Self::ShiftX | Self::ShiftY => 0.0,
        }
    }
}

pub type PropertyMap = BTreeMap<Property, f64>;

pub fn props<const N: usize>(pairs: [(Property, f64); N]) -> PropertyMap {
    pairs.into_iter().collect()
}

/// Fixed-duration interpolation between two property sets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub from: PropertyMap,
    pub to: PropertyMap,
    pub duration_ms: f64,
    #[serde(default)]
    pub delay_ms: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: PropertyMap, to: PropertyMap, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0.0,
            ease: Ease::default(),
        }
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn validate(&self) -> GalleryResult<()> {
        if !(self.duration_ms >= 0.0) || !self.duration_ms.is_finite() {
            return Err(GalleryError::animation("tween duration must be >= 0"));
        }
        if !(self.delay_ms >= 0.0) || !self.delay_ms.is_finite() {
            return Err(GalleryError::animation("tween delay must be >= 0"));
        }
        if self.to.is_empty() {
            return Err(GalleryError::animation(
                "tween must animate at least one property",
            ));
        }
        Ok(())
    }

    /// Normalized (pre-ease) progress at `elapsed_ms` after the tween started.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let local = elapsed_ms - self.delay_ms;
        if self.duration_ms <= 0.0 {
            return if local >= 0.0 { 1.0 } else { 0.0 };
        }
        if local <= 0.0 {
            return 0.0;
        }
        (local / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn sample(&self, elapsed_ms: f64) -> PropertyMap {
        let te = self.ease.apply(self.progress(elapsed_ms));
        let mut out = self.from.clone();
        for (&property, to) in &self.to {
            let from = self
                .from
                .get(&property)
                .copied()
                .unwrap_or_else(|| property.rest_value());
            out.insert(property, f64::lerp(&from, to, te));
        }
        out
    }

    pub fn end_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms.max(0.0)
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.end_ms()
    }
}

/// Per-item additional delay of `index * interval_ms`.
pub fn stagger_delay(index: usize, interval_ms: f64) -> f64 {
    index as f64 * interval_ms
}
