//! Pointer parallax: offsets proportional to the pointer's distance from an origin.
//!
//! Every pointer move re-targets a short eased tween from the element's current
//! offset, so motion stays continuous while the pointer keeps moving.

use slotmap::{SlotMap, new_key_type};

use crate::{
    anim::Lerp,
    anim_ease::Ease,
    core::{ElementId, Layout, Point, Vec2, Viewport},
    error::{GalleryError, GalleryResult},
};

pub const DEFAULT_FOLLOW_MS: f64 = 500.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PointerOrigin {
    #[default]
    ViewportCenter,
    ElementCenter, // center of the bound element in client coordinates
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerSpec {
    pub target: ElementId,
    pub speed: f64, // offset per pixel of pointer delta; foreground elements move more
    pub origin: PointerOrigin,
    pub follow_ms: f64,
    pub ease: Ease,
}

impl PointerSpec {
    pub fn new(target: impl Into<ElementId>, speed: f64) -> Self {
        Self {
            target: target.into(),
            speed,
            origin: PointerOrigin::ViewportCenter,
            follow_ms: DEFAULT_FOLLOW_MS,
            ease: Ease::OutCubic,
        }
    }

    pub fn relative_to(mut self, origin: PointerOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn validate(&self) -> GalleryResult<()> {
        if !self.speed.is_finite() {
            return Err(GalleryError::animation("pointer speed must be finite"));
        }
        if !(self.follow_ms >= 0.0) {
            return Err(GalleryError::animation("pointer follow duration must be >= 0"));
        }
        Ok(())
    }
}

new_key_type! {
    pub struct PointerHandle;
}

#[derive(Clone, Copy, Debug)]
struct Follow {
    from: Vec2,
    to: Vec2,
    started_at: f64,
}

#[derive(Debug)]
struct Binding {
    spec: PointerSpec,
    current: Vec2,
    follow: Option<Follow>,
}

#[derive(Debug, Default)]
pub struct PointerParallaxDriver {
    bindings: SlotMap<PointerHandle, Binding>,
    order: Vec<PointerHandle>,
}

impl PointerParallaxDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, spec: PointerSpec) -> GalleryResult<PointerHandle> {
        spec.validate()?;
        let handle = self.bindings.insert(Binding {
            spec,
            current: Vec2::ZERO,
            follow: None,
        });
        self.order.push(handle);
        Ok(handle)
    }

    /// Returns the offset the element is left at.
    pub fn unbind(&mut self, handle: PointerHandle) -> Option<Vec2> {
        let binding = self.bindings.remove(handle)?;
        self.order.retain(|h| *h != handle);
        Some(binding.current)
    }

    pub fn offset(&self, handle: PointerHandle) -> Option<Vec2> {
        self.bindings.get(handle).map(|b| b.current)
    }

    pub fn contains(&self, handle: PointerHandle) -> bool {
        self.bindings.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Re-target every binding for a new pointer position (client coordinates).
    pub fn pointer_moved(
        &mut self,
        now_ms: f64,
        pointer: Point,
        viewport: Viewport,
        layout: &dyn Layout,
    ) {
        for handle in &self.order {
            let Some(binding) = self.bindings.get_mut(*handle) else {
                continue;
            };
            let origin = match binding.spec.origin {
                PointerOrigin::ViewportCenter => viewport.center(),
                PointerOrigin::ElementCenter => {
                    let Some(rect) = layout.bounds(&binding.spec.target) else {
                        continue;
                    };
                    let c = rect.center();
                    Point::new(c.x, c.y - viewport.scroll_y)
                }
            };
            let target = (pointer - origin) * binding.spec.speed;
            binding.follow = Some(Follow {
                from: binding.current,
                to: target,
                started_at: now_ms,
            });
        }
    }

    /// Advance every follow tween; returns offsets that changed, in bind order.
    pub fn tick(&mut self, now_ms: f64) -> Vec<(PointerHandle, ElementId, Vec2)> {
        let mut out = Vec::new();
        for handle in &self.order {
            let Some(binding) = self.bindings.get_mut(*handle) else {
                continue;
            };
            let Some(follow) = binding.follow else {
                continue;
            };
            let duration = binding.spec.follow_ms;
            let t = if duration <= 0.0 {
                1.0
            } else {
                ((now_ms - follow.started_at) / duration).clamp(0.0, 1.0)
            };
            let next = <Vec2 as Lerp>::lerp(&follow.from, &follow.to, binding.spec.ease.apply(t));
            if t >= 1.0 {
                binding.follow = None;
            }
            if next != binding.current {
                binding.current = next;
                out.push((*handle, binding.spec.target.clone(), next));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PageLayout, Rect};

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0).unwrap()
    }

    #[test]
    fn offset_scales_with_speed_from_viewport_center() {
        let layout = PageLayout::new(1000.0, 800.0);
        let mut driver = PointerParallaxDriver::new();
        let slow = driver.bind(PointerSpec::new("bg", 0.01)).unwrap();
        let fast = driver.bind(PointerSpec::new("fg", 0.02)).unwrap();
        driver.pointer_moved(0.0, Point::new(600.0, 400.0), viewport(), &layout);
        driver.tick(DEFAULT_FOLLOW_MS);
        assert_eq!(driver.offset(slow), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(driver.offset(fast), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn element_origin_uses_element_center() {
        let layout =
            PageLayout::new(1000.0, 800.0).with("photo", Rect::new(0.0, 900.0, 200.0, 1100.0));
        let mut driver = PointerParallaxDriver::new();
        let h = driver
            .bind(PointerSpec::new("photo", 1.0 / 25.0).relative_to(PointerOrigin::ElementCenter))
            .unwrap();
        // scrolled so the photo center sits at client y = 200
        let vp = viewport().scrolled_to(800.0);
        driver.pointer_moved(0.0, Point::new(350.0, 200.0), vp, &layout);
        driver.tick(1_000.0);
        let offset = driver.offset(h).unwrap();
        assert!((offset.x - 10.0).abs() < 1e-9);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn retarget_starts_from_current_offset() {
        let layout = PageLayout::new(1000.0, 800.0);
        let mut driver = PointerParallaxDriver::new();
        let h = driver
            .bind(PointerSpec {
                ease: Ease::Linear,
                ..PointerSpec::new("fg", 1.0)
            })
            .unwrap();
        driver.pointer_moved(0.0, Point::new(600.0, 400.0), viewport(), &layout);
        driver.tick(250.0);
        assert_eq!(driver.offset(h), Some(Vec2::new(50.0, 0.0)));
        driver.pointer_moved(250.0, Point::new(500.0, 400.0), viewport(), &layout);
        driver.tick(500.0);
        assert_eq!(driver.offset(h), Some(Vec2::new(25.0, 0.0)));
    }

    #[test]
    fn unbind_leaves_offset_and_stops_updates() {
        let layout = PageLayout::new(1000.0, 800.0);
        let mut driver = PointerParallaxDriver::new();
        let h = driver.bind(PointerSpec::new("fg", 0.5)).unwrap();
        driver.pointer_moved(0.0, Point::new(700.0, 400.0), viewport(), &layout);
        driver.tick(DEFAULT_FOLLOW_MS);
        assert_eq!(driver.unbind(h), Some(Vec2::new(100.0, 0.0)));
        driver.pointer_moved(10.0, Point::new(0.0, 0.0), viewport(), &layout);
        assert!(driver.tick(600.0).is_empty());
    }

    #[test]
    fn missing_element_is_skipped() {
        let layout = PageLayout::new(1000.0, 800.0);
        let mut driver = PointerParallaxDriver::new();
        let h = driver
            .bind(PointerSpec::new("gone", 1.0).relative_to(PointerOrigin::ElementCenter))
            .unwrap();
        driver.pointer_moved(0.0, Point::new(10.0, 10.0), viewport(), &layout);
        assert!(driver.tick(1_000.0).is_empty());
        assert_eq!(driver.offset(h), Some(Vec2::ZERO));
    }
}
