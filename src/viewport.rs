//! Viewport observer: visibility and scroll progress of registered regions.
//!
//! Region bounds are re-read from the [`Layout`] on every sample, so a region that
//! grows or moves after a reflow is tracked without re-registration.

use slotmap::{SlotMap, new_key_type};

use crate::{
    core::{ElementId, Layout, Rect, Viewport},
    error::{GalleryError, GalleryResult},
};

/// A point where an element edge meets a viewport edge, e.g. `"top 80%"`.
///
/// Both fields are fractions: `0.0` is the top edge, `1.0` the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    pub element: f64,
    pub viewport: f64,
}

impl Anchor {
    pub const TOP_TOP: Anchor = Anchor::new(0.0, 0.0);
    pub const TOP_BOTTOM: Anchor = Anchor::new(0.0, 1.0);
    pub const BOTTOM_TOP: Anchor = Anchor::new(1.0, 0.0);

    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Region top meets `fraction` of the viewport height.
    pub const fn top_at(fraction: f64) -> Self {
        Self::new(0.0, fraction)
    }

    pub fn parse(s: &str) -> GalleryResult<Self> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(GalleryError::animation(format!(
                "anchor '{s}' must be '<element edge> <viewport edge>'"
            )));
        };
        Ok(Self {
            element: parse_edge(element)?,
            viewport: parse_edge(viewport)?,
        })
    }

    /// Scroll offset at which this anchor is met for `region`.
    pub fn scroll_offset(self, region: Rect, viewport_height: f64) -> f64 {
        region.y0 + self.element * region.height() - self.viewport * viewport_height
    }
}

fn parse_edge(s: &str) -> GalleryResult<f64> {
    match s.to_ascii_lowercase().as_str() {
        "top" => Ok(0.0),
        "center" => Ok(0.5),
        "bottom" => Ok(1.0),
        other => {
            let pct = other
                .strip_suffix('%')
                .and_then(|n| n.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| GalleryError::animation(format!("unknown anchor edge '{s}'")))?;
            Ok(pct / 100.0)
        }
    }
}

/// What a registration observes: a region, an entry threshold and a scrub window.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trigger {
    pub region: ElementId,
    pub threshold: f64, // fraction of the viewport the region top must pass
    pub start: Anchor,
    pub end: Anchor,
}

impl Trigger {
    /// One-shot trigger entered when the region top crosses `threshold` of the viewport.
    pub fn enter(region: impl Into<ElementId>, threshold: f64) -> Self {
        Self {
            region: region.into(),
            threshold,
            start: Anchor::TOP_TOP,
            end: Anchor::BOTTOM_TOP,
        }
    }

    /// Scrub window from `start` to `end`; entry uses the start anchor.
    pub fn scrub(region: impl Into<ElementId>, start: Anchor, end: Anchor) -> Self {
        Self {
            region: region.into(),
            threshold: start.viewport,
            start,
            end,
        }
    }

    pub fn validate(&self) -> GalleryResult<()> {
        if !self.threshold.is_finite() {
            return Err(GalleryError::animation("trigger threshold must be finite"));
        }
        for a in [self.start, self.end] {
            if !a.element.is_finite() || !a.viewport.is_finite() {
                return Err(GalleryError::animation("trigger anchors must be finite"));
            }
        }
        Ok(())
    }

    /// Evaluate this trigger for the current viewport and region bounds.
    pub fn observe(&self, viewport: Viewport, region: Rect) -> Observation {
        let enter_at = Anchor::top_at(self.threshold).scroll_offset(region, viewport.height);
        let start = self.start.scroll_offset(region, viewport.height);
        let end = self.end.scroll_offset(region, viewport.height);
        let scroll = viewport.scroll_y;
        Observation {
            entered: scroll >= enter_at,
            active: scroll >= start.min(end) && scroll <= start.max(end),
            progress: progress(scroll, start, end),
        }
    }
}

/// `clamp((scroll - start) / (end - start), 0, 1)`; an empty window counts as fully entered.
pub fn progress(scroll: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span.abs() <= f64::EPSILON {
        return 1.0;
    }
    ((scroll - start) / span).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Observation {
    pub entered: bool,
    pub active: bool, // inside the scrub window
    pub progress: f64,
}

new_key_type! {
    pub struct ObserverId;
}

/// Fan-out of the scroll stream to registered triggers.
#[derive(Debug, Default)]
pub struct ViewportObserver {
    triggers: SlotMap<ObserverId, Trigger>,
    order: Vec<ObserverId>,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, trigger: Trigger) -> ObserverId {
        let id = self.triggers.insert(trigger);
        self.order.push(id);
        id
    }

    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        if self.triggers.remove(id).is_none() {
            return false;
        }
        self.order.retain(|o| *o != id);
        true
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn trigger(&self, id: ObserverId) -> Option<&Trigger> {
        self.triggers.get(id)
    }

    /// `None` if the id is unknown or its region is not currently laid out.
    pub fn sample(
        &self,
        id: ObserverId,
        viewport: Viewport,
        layout: &dyn Layout,
    ) -> Option<Observation> {
        let trigger = self.triggers.get(id)?;
        let region = layout.bounds(&trigger.region)?;
        Some(trigger.observe(viewport, region))
    }

    /// One observation per registered trigger, in registration order.
    /// Triggers whose region is missing from the layout are skipped.
    pub fn tick(&self, viewport: Viewport, layout: &dyn Layout) -> Vec<(ObserverId, Observation)> {
        self.order
            .iter()
            .filter_map(|&id| self.sample(id, viewport, layout).map(|o| (id, o)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PageLayout;

    fn viewport(scroll_y: f64) -> Viewport {
        Viewport::new(1000.0, 800.0).unwrap().scrolled_to(scroll_y)
    }

    #[test]
    fn anchor_parse_named_and_percent_edges() {
        assert_eq!(Anchor::parse("top 80%").unwrap(), Anchor::new(0.0, 0.8));
        assert_eq!(Anchor::parse("bottom top").unwrap(), Anchor::BOTTOM_TOP);
        assert_eq!(Anchor::parse("50% top").unwrap(), Anchor::new(0.5, 0.0));
        assert_eq!(Anchor::parse("center center").unwrap(), Anchor::new(0.5, 0.5));
        assert!(Anchor::parse("top").is_err());
        assert!(Anchor::parse("top left").is_err());
        assert!(Anchor::parse("top 80% extra").is_err());
    }

    #[test]
    fn default_window_matches_region_progress() {
        let trigger = Trigger::enter("s", 0.8);
        let region = Rect::new(0.0, 1000.0, 100.0, 2000.0);
        assert_eq!(trigger.observe(viewport(900.0), region).progress, 0.0);
        assert_eq!(trigger.observe(viewport(1500.0), region).progress, 0.5);
        assert_eq!(trigger.observe(viewport(2500.0), region).progress, 1.0);
    }

    #[test]
    fn entered_at_threshold_fraction() {
        let trigger = Trigger::enter("s", 0.8);
        let region = Rect::new(0.0, 1000.0, 100.0, 2000.0);
        // region top reaches 80% of an 800px viewport at scroll 360
        assert!(!trigger.observe(viewport(359.0), region).entered);
        assert!(trigger.observe(viewport(360.0), region).entered);
    }

    #[test]
    fn zero_height_region_is_fully_entered() {
        let trigger = Trigger::enter("s", 0.0);
        let region = Rect::new(0.0, 500.0, 100.0, 500.0);
        assert_eq!(trigger.observe(viewport(0.0), region).progress, 1.0);
    }

    #[test]
    fn tick_skips_unmounted_regions_and_keeps_order() {
        let layout = PageLayout::new(1000.0, 800.0).with("a", Rect::new(0.0, 0.0, 10.0, 100.0));
        let mut obs = ViewportObserver::new();
        let a = obs.observe(Trigger::enter("a", 1.0));
        let _missing = obs.observe(Trigger::enter("missing", 1.0));
        let a2 = obs.observe(Trigger::enter("a", 0.5));
        let ids: Vec<_> = obs
            .tick(viewport(0.0), &layout)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![a, a2]);
    }

    #[test]
    fn unobserve_is_idempotent() {
        let mut obs = ViewportObserver::new();
        let a = obs.observe(Trigger::enter("a", 1.0));
        assert!(obs.unobserve(a));
        assert!(!obs.unobserve(a));
        assert!(obs.is_empty());
    }

    #[test]
    fn resized_region_is_recomputed() {
        let mut layout =
            PageLayout::new(1000.0, 800.0).with("a", Rect::new(0.0, 0.0, 10.0, 1000.0));
        let mut obs = ViewportObserver::new();
        let id = obs.observe(Trigger::enter("a", 0.0));
        assert_eq!(obs.sample(id, viewport(500.0), &layout).unwrap().progress, 0.5);
        layout.insert("a", Rect::new(0.0, 0.0, 10.0, 2000.0));
        assert_eq!(obs.sample(id, viewport(500.0), &layout).unwrap().progress, 0.25);
    }
}
