//! One-shot reveal transitions.

use slotmap::{SlotMap, new_key_type};

use crate::{
    anim::{PropertyMap, Tween, stagger_delay},
    anim_ease::Ease,
    core::ElementId,
    error::{GalleryError, GalleryResult},
    latch::Latch,
    viewport::Trigger,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealSpec {
    pub target: ElementId,
    pub tween: Tween,
    pub trigger: Option<Trigger>, // None fires at mount
}

impl RevealSpec {
    pub fn new(
        target: impl Into<ElementId>,
        from: PropertyMap,
        to: PropertyMap,
        duration_ms: f64,
    ) -> Self {
        Self {
            target: target.into(),
            tween: Tween::new(from, to, duration_ms),
            trigger: None,
        }
    }

    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.tween.delay_ms = delay_ms;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.tween.ease = ease;
        self
    }

    pub fn on(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn validate(&self) -> GalleryResult<()> {
        if self.target.as_str().trim().is_empty() {
            return Err(GalleryError::animation("reveal target must be non-empty"));
        }
        self.tween.validate()?;
        if let Some(trigger) = &self.trigger {
            trigger.validate()?;
        }
        Ok(())
    }
}

/// Adds `index * interval_ms` to each spec's own delay.
pub fn stagger(specs: impl IntoIterator<Item = RevealSpec>, interval_ms: f64) -> Vec<RevealSpec> {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, mut spec)| {
            spec.tween.delay_ms += stagger_delay(i, interval_ms);
            spec
        })
        .collect()
}

new_key_type! {
    pub struct RevealHandle;
}

#[derive(Debug)]
struct Reveal {
    spec: RevealSpec,
    latch: Latch,
    started_at: Option<f64>,
    finished: bool,
}

#[derive(Debug, Default)]
pub struct RevealAnimator {
    reveals: SlotMap<RevealHandle, Reveal>,
}

impl RevealAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, spec: RevealSpec) -> GalleryResult<RevealHandle> {
        spec.validate()?;
        Ok(self.reveals.insert(Reveal {
            spec,
            latch: Latch::new(),
            started_at: None,
            finished: false,
        }))
    }

    /// Start the transition. Only the first call per registration has an effect.
    pub fn fire(&mut self, handle: RevealHandle, now_ms: f64) -> bool {
        let Some(reveal) = self.reveals.get_mut(handle) else {
            return false;
        };
        if !reveal.latch.accept() {
            tracing::trace!(element = %reveal.spec.target, "reveal already fired");
            return false;
        }
        reveal.started_at = Some(now_ms);
        true
    }

    /// Stops any in-flight interpolation. Safe on finished or unknown handles.
    pub fn cancel(&mut self, handle: RevealHandle) -> bool {
        self.reveals.remove(handle).is_some()
    }

    pub fn spec(&self, handle: RevealHandle) -> Option<&RevealSpec> {
        self.reveals.get(handle).map(|r| &r.spec)
    }

    pub fn is_fired(&self, handle: RevealHandle) -> bool {
        self.reveals.get(handle).is_some_and(|r| r.latch.is_fired())
    }

    pub fn is_finished(&self, handle: RevealHandle) -> bool {
        self.reveals.get(handle).is_some_and(|r| r.finished)
    }

    pub fn contains(&self, handle: RevealHandle) -> bool {
        self.reveals.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.reveals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reveals.is_empty()
    }

    /// Current values of every running reveal. The final frame is emitted once.
    pub fn tick(&mut self, now_ms: f64) -> Vec<(RevealHandle, ElementId, PropertyMap)> {
        let mut out = Vec::new();
        for (handle, reveal) in self.reveals.iter_mut() {
            let Some(started_at) = reveal.started_at else {
                continue;
            };
            if reveal.finished {
                continue;
            }
            let elapsed = (now_ms - started_at).max(0.0);
            if elapsed < reveal.spec.tween.delay_ms {
                continue;
            }
            out.push((
                handle,
                reveal.spec.target.clone(),
                reveal.spec.tween.sample(elapsed),
            ));
            reveal.finished = reveal.spec.tween.is_finished(elapsed);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{Property, props};

    fn fade(target: &str) -> RevealSpec {
        RevealSpec::new(
            target,
            props([(Property::Opacity, 0.0)]),
            props([(Property::Opacity, 1.0)]),
            100.0,
        )
        .ease(Ease::Linear)
    }

    #[test]
    fn fires_at_most_once() {
        let mut anim = RevealAnimator::new();
        let h = anim.schedule(fade("a")).unwrap();
        assert!(anim.fire(h, 0.0));
        assert!(!anim.fire(h, 10.0));
        assert!(!anim.fire(h, 500.0));
        let frames = anim.tick(50.0);
        assert_eq!(frames[0].2[&Property::Opacity], 0.5);
    }

    #[test]
    fn idle_until_fired() {
        let mut anim = RevealAnimator::new();
        anim.schedule(fade("a")).unwrap();
        assert!(anim.tick(1_000.0).is_empty());
    }

    #[test]
    fn final_frame_emitted_once() {
        let mut anim = RevealAnimator::new();
        let h = anim.schedule(fade("a")).unwrap();
        anim.fire(h, 0.0);
        let last = anim.tick(250.0);
        assert_eq!(last[0].2[&Property::Opacity], 1.0);
        assert!(anim.is_finished(h));
        assert!(anim.tick(300.0).is_empty());
    }

    #[test]
    fn cancel_is_safe_any_time() {
        let mut anim = RevealAnimator::new();
        let h = anim.schedule(fade("a")).unwrap();
        anim.fire(h, 0.0);
        anim.tick(50.0);
        assert!(anim.cancel(h));
        assert!(anim.tick(60.0).is_empty());
        assert!(!anim.cancel(h));
        assert!(!anim.fire(h, 70.0));
    }

    #[test]
    fn stagger_offsets_delays() {
        let specs = stagger([fade("a"), fade("b").delay(40.0), fade("c")], 80.0);
        let delays: Vec<f64> = specs.iter().map(|s| s.tween.delay_ms).collect();
        assert_eq!(delays, vec![0.0, 120.0, 160.0]);
    }

    #[test]
    fn schedule_rejects_empty_target_properties() {
        let mut anim = RevealAnimator::new();
        let spec = RevealSpec::new("a", PropertyMap::new(), PropertyMap::new(), 100.0);
        assert!(anim.schedule(spec).is_err());
        assert!(anim.is_empty());
    }

    #[test]
    fn delayed_reveal_waits() {
        let mut anim = RevealAnimator::new();
        let h = anim.schedule(fade("a").delay(100.0)).unwrap();
        anim.fire(h, 0.0);
        assert!(anim.tick(50.0).is_empty());
        assert_eq!(anim.tick(150.0)[0].2[&Property::Opacity], 0.5);
    }
}
