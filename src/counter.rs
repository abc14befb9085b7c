//! Latched count-up animation for displayed statistics.

use std::iter::FusedIterator;

use slotmap::{SlotMap, new_key_type};

use crate::{
    anim_ease::Ease,
    core::ElementId,
    error::{GalleryError, GalleryResult},
    latch::Latch,
    viewport::Trigger,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CounterTarget {
    pub element: ElementId,
    pub value: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CounterSpec {
    pub targets: Vec<CounterTarget>,
    pub duration_ms: f64,
    pub steps: u32,
    pub ease: Ease,
    pub trigger: Trigger,
}

impl CounterSpec {
    pub fn new(trigger: Trigger, duration_ms: f64, steps: u32) -> Self {
        Self {
            targets: Vec::new(),
            duration_ms,
            steps,
            ease: Ease::OutCubic,
            trigger,
        }
    }

    pub fn target(mut self, element: impl Into<ElementId>, value: u64) -> Self {
        self.targets.push(CounterTarget {
            element: element.into(),
            value,
        });
        self
    }

    pub fn validate(&self) -> GalleryResult<()> {
        if self.steps == 0 {
            return Err(GalleryError::animation("counter needs at least one step"));
        }
        if !(self.duration_ms >= 0.0) || !self.duration_ms.is_finite() {
            return Err(GalleryError::animation("counter duration must be >= 0"));
        }
        if self.targets.is_empty() {
            return Err(GalleryError::animation("counter needs at least one target"));
        }
        self.trigger.validate()
    }

    pub fn interval_ms(&self) -> f64 {
        self.duration_ms / f64::from(self.steps.max(1))
    }

    /// `round(target * ease(step / steps))` for every target.
    pub fn snapshot(&self, step: u32) -> CounterSnapshot {
        let step = step.min(self.steps);
        let t = f64::from(step) / f64::from(self.steps.max(1));
        let eased = self.ease.apply(t);
        CounterSnapshot {
            step,
            values: self
                .targets
                .iter()
                .map(|target| {
                    let value = (target.value as f64 * eased).round() as u64;
                    (target.element.clone(), value)
                })
                .collect(),
        }
    }

    /// Lazy, finite sequence of exactly `steps` snapshots (steps 1..=steps).
    pub fn run(&self) -> CounterRun<'_> {
        CounterRun {
            spec: self,
            next: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CounterSnapshot {
    pub step: u32,
    pub values: Vec<(ElementId, u64)>,
}

impl CounterSnapshot {
    pub fn value(&self, element: &ElementId) -> Option<u64> {
        self.values
            .iter()
            .find(|(id, _)| id == element)
            .map(|(_, v)| *v)
    }
}

#[derive(Clone, Debug)]
pub struct CounterRun<'a> {
    spec: &'a CounterSpec,
    next: u32,
}

impl Iterator for CounterRun<'_> {
    type Item = CounterSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.spec.steps {
            return None;
        }
        let snap = self.spec.snapshot(self.next);
        self.next += 1;
        Some(snap)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.spec.steps + 1).saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for CounterRun<'_> {}
impl FusedIterator for CounterRun<'_> {}

new_key_type! {
    pub struct CounterHandle;
}

#[derive(Debug)]
struct Counter {
    spec: CounterSpec,
    latch: Latch,
    started_at: Option<f64>,
    emitted_step: u32,
}

/// Wall-clock driver: one snapshot per tick, for the latest elapsed step.
///
/// Frames missed under load skip intermediate steps; the step count only moves forward
/// and the final step is always emitted.
#[derive(Debug, Default)]
pub struct CounterAnimator {
    counters: SlotMap<CounterHandle, Counter>,
}

impl CounterAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: CounterSpec) -> GalleryResult<CounterHandle> {
        spec.validate()?;
        Ok(self.counters.insert(Counter {
            spec,
            latch: Latch::new(),
            started_at: None,
            emitted_step: 0,
        }))
    }

    /// Start counting. Repeated entry events are dropped by the latch.
    pub fn start(&mut self, handle: CounterHandle, now_ms: f64) -> bool {
        let Some(counter) = self.counters.get_mut(handle) else {
            return false;
        };
        if !counter.latch.accept() {
            return false;
        }
        counter.started_at = Some(now_ms);
        true
    }

    pub fn cancel(&mut self, handle: CounterHandle) -> bool {
        self.counters.remove(handle).is_some()
    }

    pub fn is_started(&self, handle: CounterHandle) -> bool {
        self.counters.get(handle).is_some_and(|c| c.latch.is_fired())
    }

    pub fn is_finished(&self, handle: CounterHandle) -> bool {
        self.counters
            .get(handle)
            .is_some_and(|c| c.emitted_step >= c.spec.steps)
    }

    pub fn spec(&self, handle: CounterHandle) -> Option<&CounterSpec> {
        self.counters.get(handle).map(|c| &c.spec)
    }

    pub fn contains(&self, handle: CounterHandle) -> bool {
        self.counters.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn tick(&mut self, now_ms: f64) -> Vec<(CounterHandle, CounterSnapshot)> {
        let mut out = Vec::new();
        for (handle, counter) in self.counters.iter_mut() {
            let Some(started_at) = counter.started_at else {
                continue;
            };
            if counter.emitted_step >= counter.spec.steps {
                continue;
            }
            let interval = counter.spec.interval_ms();
            let elapsed = (now_ms - started_at).max(0.0);
            let step = if interval <= 0.0 || elapsed >= counter.spec.duration_ms {
                counter.spec.steps
            } else {
                ((elapsed / interval).floor() as u32).min(counter.spec.steps)
            };
            if step > counter.emitted_step {
                counter.emitted_step = step;
                out.push((handle, counter.spec.snapshot(step)));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(target: u64) -> CounterSpec {
        CounterSpec::new(Trigger::enter("about", 0.6), 2_000.0, 60).target("artworks", target)
    }

    #[test]
    fn run_ends_exactly_on_target_and_is_monotonic() {
        let spec = spec(42);
        let values: Vec<u64> = spec.run().map(|s| s.values[0].1).collect();
        assert_eq!(values.len(), 60);
        assert_eq!(*values.last().unwrap(), 42);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn run_reports_exact_size() {
        let spec = spec(5);
        let mut run = spec.run();
        assert_eq!(run.len(), 60);
        run.next();
        assert_eq!(run.len(), 59);
    }

    #[test]
    fn snapshot_uses_cubic_ease_out() {
        let spec = spec(100);
        // 1 - (1 - 0.5)^3 = 0.875
        assert_eq!(spec.snapshot(30).values[0].1, 88);
    }

    #[test]
    fn start_is_latched() {
        let mut anim = CounterAnimator::new();
        let h = anim.register(spec(42)).unwrap();
        assert!(anim.start(h, 0.0));
        assert!(!anim.start(h, 100.0));
        let first = anim.tick(1_010.0);
        assert_eq!(first[0].1.step, 30);
    }

    #[test]
    fn tick_skips_under_load_but_finishes_on_target() {
        let mut anim = CounterAnimator::new();
        let h = anim.register(spec(42)).unwrap();
        anim.start(h, 0.0);
        assert!(anim.tick(10.0).is_empty());
        let a = anim.tick(500.0);
        let b = anim.tick(5_000.0);
        assert!(a[0].1.step < b[0].1.step);
        assert_eq!(b[0].1.value(&ElementId::from("artworks")), Some(42));
        assert!(anim.is_finished(h));
        assert!(anim.tick(6_000.0).is_empty());
    }

    #[test]
    fn register_rejects_zero_steps() {
        let mut anim = CounterAnimator::new();
        let mut bad = spec(3);
        bad.steps = 0;
        assert!(anim.register(bad).is_err());
    }
}
