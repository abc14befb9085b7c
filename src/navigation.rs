use crate::{
    anim::Lerp,
    anim_ease::Ease,
    core::{ElementId, Layout, PageLayout},
    error::{GalleryError, GalleryResult},
};

pub const SMOOTH_SCROLL_MS: f64 = 800.0;

/// Same-page anchors; the only addressing scheme of the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Hero,
    Gallery,
    About,
    Guestbook,
}

impl SectionId {
    pub const ALL: [SectionId; 4] = [
        SectionId::Hero,
        SectionId::Gallery,
        SectionId::About,
        SectionId::Guestbook,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Gallery => "gallery",
            Self::About => "about",
            Self::Guestbook => "guestbook",
        }
    }

    pub fn parse(s: &str) -> GalleryResult<Self> {
        let s = s.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| GalleryError::validation(format!("unknown section '{s}'")))
    }

    pub fn element(self) -> ElementId {
        ElementId::new(self.as_str())
    }
}

/// Scroll offset that brings the section's top to the viewport top, clamped to the document.
pub fn scroll_target(layout: &PageLayout, section: SectionId) -> Option<f64> {
    let top = layout.bounds(&section.element())?.y0;
    let max = (layout.document_height() - layout.viewport_height).max(0.0);
    Some(top.clamp(0.0, max))
}

/// Eased scroll from one offset to another.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SmoothScroll {
    pub from: f64,
    pub to: f64,
    pub started_at_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl SmoothScroll {
    pub fn new(from: f64, to: f64, started_at_ms: f64) -> Self {
        Self {
            from,
            to,
            started_at_ms,
            duration_ms: SMOOTH_SCROLL_MS,
            ease: Ease::OutQuart,
        }
    }

    pub fn towards(
        layout: &PageLayout,
        section: SectionId,
        scroll_y: f64,
        now_ms: f64,
    ) -> Option<Self> {
        let to = scroll_target(layout, section)?;
        Some(Self::new(scroll_y, to, now_ms))
    }

    pub fn sample(&self, now_ms: f64) -> f64 {
        let elapsed = now_ms - self.started_at_ms;
        if self.duration_ms <= 0.0 || elapsed >= self.duration_ms {
            return self.to;
        }
        let t = (elapsed / self.duration_ms).clamp(0.0, 1.0);
        f64::lerp(&self.from, &self.to, self.ease.apply(t))
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms - self.started_at_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;

    fn layout() -> PageLayout {
        PageLayout::new(1200.0, 800.0)
            .with("hero", Rect::new(0.0, 0.0, 1200.0, 800.0))
            .with("gallery", Rect::new(0.0, 800.0, 1200.0, 2400.0))
            .with("guestbook", Rect::new(0.0, 2400.0, 1200.0, 2800.0))
    }

    #[test]
    fn parse_accepts_anchor_form() {
        assert_eq!(SectionId::parse("#about").unwrap(), SectionId::About);
        assert!(SectionId::parse("footer").is_err());
    }

    #[test]
    fn target_is_clamped_to_document() {
        let layout = layout();
        assert_eq!(scroll_target(&layout, SectionId::Gallery), Some(800.0));
        // document is 2800 tall, viewport 800
        assert_eq!(scroll_target(&layout, SectionId::Guestbook), Some(2000.0));
        assert_eq!(scroll_target(&layout, SectionId::About), None);
    }

    #[test]
    fn smooth_scroll_lands_exactly() {
        let s = SmoothScroll::towards(&layout(), SectionId::Gallery, 0.0, 100.0).unwrap();
        assert_eq!(s.sample(100.0), 0.0);
        let mid = s.sample(500.0);
        assert!(mid > 400.0 && mid < 800.0);
        assert!(s.is_finished(900.0));
        assert_eq!(s.sample(900.0), 800.0);
    }
}
