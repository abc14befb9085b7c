//! Scroll-coupled property offsets with optional scrub damping.

use slotmap::{SlotMap, new_key_type};

use crate::{
    anim::{Lerp, Property},
    core::ElementId,
    error::{GalleryError, GalleryResult},
    viewport::Trigger,
};

/// Offsets below this are considered settled.
const SETTLE_EPSILON: f64 = 1e-3;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxSpec {
    pub target: ElementId,
    pub property: Property,
    pub from: f64, // value at progress 0
    pub to: f64,   // value at progress 1
    pub trigger: Trigger,
    pub scrub: Option<f64>, // None couples directly to scroll
}

impl ParallaxSpec {
    /// Offset along `Y` from 0 to `max_offset` over the trigger's scrub window.
    pub fn offset_y(target: impl Into<ElementId>, max_offset: f64, trigger: Trigger) -> Self {
        Self {
            target: target.into(),
            property: Property::Y,
            from: 0.0,
            to: max_offset,
            trigger,
            scrub: None,
        }
    }

    /// Arbitrary property scrubbed between `from` and `to`.
    pub fn property(
        target: impl Into<ElementId>,
        property: Property,
        from: f64,
        to: f64,
        trigger: Trigger,
    ) -> Self {
        Self {
            target: target.into(),
            property,
            from,
            to,
            trigger,
            scrub: None,
        }
    }

    pub fn scrub(mut self, scrub: f64) -> Self {
        self.scrub = Some(scrub);
        self
    }

    pub fn validate(&self) -> GalleryResult<()> {
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(GalleryError::animation("parallax range must be finite"));
        }
        if let Some(scrub) = self.scrub {
            if !(scrub > 0.0) || !scrub.is_finite() {
                return Err(GalleryError::animation("parallax scrub must be > 0"));
            }
        }
        self.trigger.validate()
    }

    pub fn target_offset(&self, progress: f64) -> f64 {
        f64::lerp(&self.from, &self.to, progress.clamp(0.0, 1.0))
    }

    /// Fraction of the remaining distance covered per tick.
    fn damping(&self) -> f64 {
        self.scrub.map_or(1.0, |s| (1.0 / s).min(1.0))
    }
}

new_key_type! {
    pub struct ParallaxHandle;
}

#[derive(Debug)]
struct Binding {
    spec: ParallaxSpec,
    applied: f64,
}

#[derive(Debug, Default)]
pub struct ParallaxDriver {
    bindings: SlotMap<ParallaxHandle, Binding>,
}

impl ParallaxDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, spec: ParallaxSpec) -> GalleryResult<ParallaxHandle> {
        spec.validate()?;
        let applied = spec.from;
        Ok(self.bindings.insert(Binding { spec, applied }))
    }

    /// Stops recomputation. Returns the last applied value; the element keeps it.
    pub fn unbind(&mut self, handle: ParallaxHandle) -> Option<f64> {
        self.bindings.remove(handle).map(|b| b.applied)
    }

    pub fn spec(&self, handle: ParallaxHandle) -> Option<&ParallaxSpec> {
        self.bindings.get(handle).map(|b| &b.spec)
    }

    pub fn applied(&self, handle: ParallaxHandle) -> Option<f64> {
        self.bindings.get(handle).map(|b| b.applied)
    }

    pub fn contains(&self, handle: ParallaxHandle) -> bool {
        self.bindings.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Move one tick toward the offset for `progress`.
    ///
    /// Returns the new applied value when it changed.
    pub fn update(&mut self, handle: ParallaxHandle, progress: f64) -> Option<f64> {
        let binding = self.bindings.get_mut(handle)?;
        let target = binding.spec.target_offset(progress);
        let delta = target - binding.applied;
        if delta == 0.0 {
            return None;
        }
        let next = if delta.abs() <= SETTLE_EPSILON {
            target
        } else {
            binding.applied + delta * binding.spec.damping()
        };
        binding.applied = next;
        Some(next)
    }
}
