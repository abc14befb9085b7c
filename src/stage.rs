//! Composition root: the viewport observer plus the four drivers.
//!
//! Sections register through an [`AnimationScope`]; the stage turns scroll and
//! pointer input into property writes on a [`Surface`], once per frame.

use std::{cell::RefCell, rc::Rc};

use slotmap::SecondaryMap;

use crate::{
    anim::{Property, PropertyMap},
    core::{ElementId, Layout, Point, Viewport},
    counter::{CounterAnimator, CounterHandle, CounterSpec},
    error::GalleryResult,
    parallax::{ParallaxDriver, ParallaxHandle, ParallaxSpec},
    pointer::{PointerHandle, PointerParallaxDriver, PointerSpec},
    reveal::{RevealAnimator, RevealHandle, RevealSpec},
    scope::AnimationScope,
    surface::Surface,
    viewport::{ObserverId, ViewportObserver},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Link {
    Reveal(RevealHandle),
    Parallax(ParallaxHandle),
    Counter(CounterHandle),
}

/// Live registrations per driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RegistrationCounts {
    pub observers: usize,
    pub reveals: usize,
    pub parallax: usize,
    pub pointer: usize,
    pub counters: usize,
}

impl RegistrationCounts {
    pub fn total(&self) -> usize {
        self.observers + self.reveals + self.parallax + self.pointer + self.counters
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FrameReport {
    pub observations: usize,
    pub writes: usize,
}

#[derive(Debug, Default)]
pub(crate) struct StageInner {
    observer: ViewportObserver,
    reveals: RevealAnimator,
    parallax: ParallaxDriver,
    pointer: PointerParallaxDriver,
    counters: CounterAnimator,
    links: SecondaryMap<ObserverId, Link>,
    pending_fire: Vec<RevealHandle>,
    pending_writes: Vec<(RevealHandle, ElementId, PropertyMap)>, // from-states not yet applied
}

fn mounted(layout: &dyn Layout, id: &ElementId, what: &str) -> bool {
    if layout.bounds(id).is_some() {
        return true;
    }
    tracing::debug!(element = %id, kind = what, "element not mounted; registration skipped");
    false
}

fn accepted<T>(result: GalleryResult<T>, element: &ElementId, what: &str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!(element = %element, kind = what, error = %err, "invalid spec; registration skipped");
            None
        }
    }
}

impl StageInner {
    pub(crate) fn register_reveal(
        &mut self,
        layout: &dyn Layout,
        spec: RevealSpec,
    ) -> Option<(RevealHandle, Option<ObserverId>)> {
        if !mounted(layout, &spec.target, "reveal") {
            return None;
        }
        if let Some(trigger) = &spec.trigger {
            if !mounted(layout, &trigger.region, "reveal trigger") {
                return None;
            }
        }
        let target = spec.target.clone();
        let from = spec.tween.from.clone();
        let trigger = spec.trigger.clone();
        let handle = accepted(self.reveals.schedule(spec), &target, "reveal")?;

        self.pending_writes.push((handle, target, from));
        let observer = match trigger {
            Some(trigger) => {
                let id = self.observer.observe(trigger);
                self.links.insert(id, Link::Reveal(handle));
                Some(id)
            }
            None => {
                self.pending_fire.push(handle);
                None
            }
        };
        Some((handle, observer))
    }

    pub(crate) fn register_parallax(
        &mut self,
        layout: &dyn Layout,
        spec: ParallaxSpec,
    ) -> Option<(ParallaxHandle, ObserverId)> {
        if !mounted(layout, &spec.target, "parallax")
            || !mounted(layout, &spec.trigger.region, "parallax trigger")
        {
            return None;
        }
        let target = spec.target.clone();
        let trigger = spec.trigger.clone();
        let handle = accepted(self.parallax.bind(spec), &target, "parallax")?;
        let id = self.observer.observe(trigger);
        self.links.insert(id, Link::Parallax(handle));
        Some((handle, id))
    }

    pub(crate) fn register_pointer(
        &mut self,
        layout: &dyn Layout,
        spec: PointerSpec,
    ) -> Option<PointerHandle> {
        if !mounted(layout, &spec.target, "pointer") {
            return None;
        }
        let target = spec.target.clone();
        accepted(self.pointer.bind(spec), &target, "pointer")
    }

    pub(crate) fn register_counter(
        &mut self,
        layout: &dyn Layout,
        spec: CounterSpec,
    ) -> Option<(CounterHandle, ObserverId)> {
        if !mounted(layout, &spec.trigger.region, "counter trigger") {
            return None;
        }
        let region = spec.trigger.region.clone();
        let trigger = spec.trigger.clone();
        let handle = accepted(self.counters.register(spec), &region, "counter")?;
        let id = self.observer.observe(trigger);
        self.links.insert(id, Link::Counter(handle));
        Some((handle, id))
    }

    pub(crate) fn release_observer(&mut self, id: ObserverId) {
        self.links.remove(id);
        self.observer.unobserve(id);
    }

    pub(crate) fn release_reveal(&mut self, handle: RevealHandle) {
        self.pending_fire.retain(|h| *h != handle);
        self.pending_writes.retain(|(h, _, _)| *h != handle);
        self.reveals.cancel(handle);
    }

    pub(crate) fn release_parallax(&mut self, handle: ParallaxHandle) {
        self.parallax.unbind(handle);
    }

    pub(crate) fn release_pointer(&mut self, handle: PointerHandle) {
        self.pointer.unbind(handle);
    }

    pub(crate) fn release_counter(&mut self, handle: CounterHandle) {
        self.counters.cancel(handle);
    }

    fn counts(&self) -> RegistrationCounts {
        RegistrationCounts {
            observers: self.observer.len(),
            reveals: self.reveals.len(),
            parallax: self.parallax.len(),
            pointer: self.pointer.len(),
            counters: self.counters.len(),
        }
    }

    fn frame(
        &mut self,
        now_ms: f64,
        viewport: Viewport,
        layout: &dyn Layout,
        surface: &mut dyn Surface,
    ) -> FrameReport {
        let mut report = FrameReport::default();

        for (_, element, values) in self.pending_writes.drain(..) {
            if layout.bounds(&element).is_some() {
                surface.apply_properties(&element, &values);
                report.writes += values.len();
            }
        }
        for handle in std::mem::take(&mut self.pending_fire) {
            self.reveals.fire(handle, now_ms);
        }

        let observations = self.observer.tick(viewport, layout);
        report.observations = observations.len();
        for (id, obs) in observations {
            let Some(link) = self.links.get(id).copied() else {
                continue;
            };
            match link {
                Link::Reveal(handle) => {
                    if obs.entered {
                        self.reveals.fire(handle, now_ms);
                    }
                }
                Link::Counter(handle) => {
                    if obs.entered {
                        self.counters.start(handle, now_ms);
                    }
                }
                Link::Parallax(handle) => {
                    let Some(value) = self.parallax.update(handle, obs.progress) else {
                        continue;
                    };
                    let Some(spec) = self.parallax.spec(handle) else {
                        continue;
                    };
                    if layout.bounds(&spec.target).is_some() {
                        surface.apply_property(&spec.target, spec.property, value);
                        report.writes += 1;
                    }
                }
            }
        }

        for (_, element, values) in self.reveals.tick(now_ms) {
            if layout.bounds(&element).is_some() {
                surface.apply_properties(&element, &values);
                report.writes += values.len();
            }
        }
        for (_, snapshot) in self.counters.tick(now_ms) {
            for (element, value) in &snapshot.values {
                if layout.bounds(element).is_some() {
                    surface.apply_count(element, *value);
                    report.writes += 1;
                }
            }
        }
        for (_, element, offset) in self.pointer.tick(now_ms) {
            if layout.bounds(&element).is_some() {
                surface.apply_property(&element, Property::ShiftX, offset.x);
                surface.apply_property(&element, Property::ShiftY, offset.y);
                report.writes += 2;
            }
        }

        report
    }
}

/// Shared handle to the animation engine. Cloning shares the same engine.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    inner: Rc<RefCell<StageInner>>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a registration scope for one section mount.
    pub fn scope(&self, name: impl Into<String>) -> AnimationScope {
        AnimationScope::new(Rc::downgrade(&self.inner), name.into())
    }

    /// Re-evaluate every registration against the current scroll position.
    #[tracing::instrument(level = "trace", skip(self, layout, surface))]
    pub fn frame(
        &self,
        now_ms: f64,
        viewport: Viewport,
        layout: &dyn Layout,
        surface: &mut dyn Surface,
    ) -> FrameReport {
        self.inner
            .borrow_mut()
            .frame(now_ms, viewport, layout, surface)
    }

    /// Fan a pointer move (client coordinates) out to every pointer binding.
    pub fn pointer_moved(&self, now_ms: f64, pointer: Point, viewport: Viewport, layout: &dyn Layout) {
        self.inner
            .borrow_mut()
            .pointer
            .pointer_moved(now_ms, pointer, viewport, layout);
    }

    pub fn counts(&self) -> RegistrationCounts {
        self.inner.borrow().counts()
    }

    pub fn is_reveal_fired(&self, handle: RevealHandle) -> bool {
        self.inner.borrow().reveals.is_fired(handle)
    }

    pub fn is_counter_started(&self, handle: CounterHandle) -> bool {
        self.inner.borrow().counters.is_started(handle)
    }

    pub fn parallax_offset(&self, handle: ParallaxHandle) -> Option<f64> {
        self.inner.borrow().parallax.applied(handle)
    }
}
