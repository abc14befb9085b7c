use std::{cell::RefCell, rc::Weak};

use crate::{
    core::Layout,
    counter::{CounterHandle, CounterSpec},
    parallax::{ParallaxHandle, ParallaxSpec},
    pointer::{PointerHandle, PointerSpec},
    reveal::{RevealHandle, RevealSpec},
    stage::StageInner,
    viewport::ObserverId,
};

#[derive(Clone, Copy, Debug)]
enum Registration {
    Reveal(RevealHandle, Option<ObserverId>),
    Parallax(ParallaxHandle, ObserverId),
    Pointer(PointerHandle),
    Counter(CounterHandle, ObserverId),
}

/// Every registration made by one section mount.
///
/// `revert` releases them all; dropping the scope reverts as well, so a section
/// that unmounts on any path leaves nothing behind in the stage.
#[derive(Debug)]
pub struct AnimationScope {
    stage: Weak<RefCell<StageInner>>,
    name: String,
    registrations: Vec<Registration>,
}

impl AnimationScope {
    pub(crate) fn new(stage: Weak<RefCell<StageInner>>, name: String) -> Self {
        Self {
            stage,
            name,
            registrations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn with_stage<T>(&self, f: impl FnOnce(&mut StageInner) -> Option<T>) -> Option<T> {
        let stage = self.stage.upgrade()?;
        let mut inner = stage.try_borrow_mut().ok()?;
        f(&mut inner)
    }

    pub fn reveal(&mut self, layout: &dyn Layout, spec: RevealSpec) -> Option<RevealHandle> {
        let (handle, observer) = self.with_stage(|s| s.register_reveal(layout, spec))?;
        self.registrations
            .push(Registration::Reveal(handle, observer));
        Some(handle)
    }

    /// Registers each spec; returns how many were accepted.
    pub fn reveals(
        &mut self,
        layout: &dyn Layout,
        specs: impl IntoIterator<Item = RevealSpec>,
    ) -> usize {
        specs
            .into_iter()
            .filter_map(|spec| self.reveal(layout, spec))
            .count()
    }

    pub fn parallax(&mut self, layout: &dyn Layout, spec: ParallaxSpec) -> Option<ParallaxHandle> {
        let (handle, observer) = self.with_stage(|s| s.register_parallax(layout, spec))?;
        self.registrations
            .push(Registration::Parallax(handle, observer));
        Some(handle)
    }

    pub fn pointer(&mut self, layout: &dyn Layout, spec: PointerSpec) -> Option<PointerHandle> {
        let handle = self.with_stage(|s| s.register_pointer(layout, spec))?;
        self.registrations.push(Registration::Pointer(handle));
        Some(handle)
    }

    pub fn counter(&mut self, layout: &dyn Layout, spec: CounterSpec) -> Option<CounterHandle> {
        let (handle, observer) = self.with_stage(|s| s.register_counter(layout, spec))?;
        self.registrations
            .push(Registration::Counter(handle, observer));
        Some(handle)
    }

    /// Release every registration. Idempotent; returns how many were released.
    pub fn revert(&mut self) -> usize {
        let registrations = std::mem::take(&mut self.registrations);
        if registrations.is_empty() {
            return 0;
        }
        let Some(stage) = self.stage.upgrade() else {
            return 0;
        };
        let Ok(mut inner) = stage.try_borrow_mut() else {
            tracing::warn!(scope = %self.name, "stage busy during revert; registrations leaked");
            return 0;
        };
        for registration in &registrations {
            match *registration {
                Registration::Reveal(handle, observer) => {
                    if let Some(id) = observer {
                        inner.release_observer(id);
                    }
                    inner.release_reveal(handle);
                }
                Registration::Parallax(handle, id) => {
                    inner.release_observer(id);
                    inner.release_parallax(handle);
                }
                Registration::Pointer(handle) => inner.release_pointer(handle),
                Registration::Counter(handle, id) => {
                    inner.release_observer(id);
                    inner.release_counter(handle);
                }
            }
        }
        tracing::debug!(scope = %self.name, released = registrations.len(), "scope reverted");
        registrations.len()
    }
}

impl Drop for AnimationScope {
    fn drop(&mut self) {
        self.revert();
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        anim::{Property, props},
        core::{PageLayout, Rect},
        counter::CounterSpec,
        pointer::PointerSpec,
        reveal::RevealSpec,
        stage::Stage,
        viewport::Trigger,
    };

    fn layout() -> PageLayout {
        PageLayout::new(1000.0, 800.0)
            .with("section", Rect::new(0.0, 0.0, 1000.0, 1000.0))
            .with("a", Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn revert_releases_every_driver() {
        let stage = Stage::new();
        let layout = layout();
        let mut scope = stage.scope("s");
        scope
            .reveal(
                &layout,
                RevealSpec::new(
                    "a",
                    props([(Property::Y, 10.0)]),
                    props([(Property::Y, 0.0)]),
                    100.0,
                )
                .on(Trigger::enter("section", 0.8)),
            )
            .unwrap();
        scope.pointer(&layout, PointerSpec::new("a", 0.1)).unwrap();
        scope
            .counter(
                &layout,
                CounterSpec::new(Trigger::enter("section", 0.6), 100.0, 10).target("a", 4),
            )
            .unwrap();
        assert_eq!(stage.counts().total(), 5);
        assert_eq!(scope.revert(), 3);
        assert_eq!(stage.counts().total(), 0);
        assert_eq!(scope.revert(), 0);
    }

    #[test]
    fn drop_reverts() {
        let stage = Stage::new();
        let layout = layout();
        {
            let mut scope = stage.scope("s");
            scope.pointer(&layout, PointerSpec::new("a", 0.1)).unwrap();
            assert_eq!(stage.counts().pointer, 1);
        }
        assert_eq!(stage.counts().total(), 0);
    }

    #[test]
    fn scope_outliving_stage_is_harmless() {
        let layout = layout();
        let mut scope = {
            let stage = Stage::new();
            stage.scope("orphan")
        };
        assert!(scope.pointer(&layout, PointerSpec::new("a", 0.1)).is_none());
        assert_eq!(scope.revert(), 0);
    }
}
