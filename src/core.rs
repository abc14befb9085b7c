use std::collections::BTreeMap;

use crate::error::{GalleryError, GalleryResult};

pub use kurbo::{Point, Rect, Vec2};

/// Stable identifier of a page element (the unit drivers animate).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `gallery-card` + 2 -> `gallery-card-2`
    pub fn indexed(prefix: &str, index: usize) -> Self {
        Self(format!("{prefix}-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The visible window onto the document, in document pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub scroll_y: f64, // document offset of the viewport's top edge
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> GalleryResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(GalleryError::validation("viewport width/height must be > 0"));
        }
        Ok(Self {
            scroll_y: 0.0,
            width,
            height,
        })
    }

    pub fn scrolled_to(self, scroll_y: f64) -> Self {
        Self {
            scroll_y: scroll_y.max(0.0),
            ..self
        }
    }

    /// Center of the viewport in client coordinates (pointer space).
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Source of element geometry. Queried on every tick so reflowed layouts are picked up.
pub trait Layout {
    /// Element bounds in document coordinates, or `None` when the element is not mounted.
    fn bounds(&self, id: &ElementId) -> Option<Rect>;
}

/// Serializable page geometry used by the simulator and fixtures.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PageLayout {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub elements: BTreeMap<ElementId, Rect>,
}

impl PageLayout {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport_width,
            viewport_height,
            elements: BTreeMap::new(),
        }
    }

    pub fn with(mut self, id: impl Into<ElementId>, rect: Rect) -> Self {
        self.insert(id, rect);
        self
    }

    pub fn insert(&mut self, id: impl Into<ElementId>, rect: Rect) {
        self.elements.insert(id.into(), rect);
    }

    pub fn remove(&mut self, id: &ElementId) -> Option<Rect> {
        self.elements.remove(id)
    }

    pub fn viewport(&self) -> GalleryResult<Viewport> {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    /// Largest bottom edge of any element.
    pub fn document_height(&self) -> f64 {
        self.elements
            .values()
            .map(|r| r.y1)
            .fold(self.viewport_height, f64::max)
    }

    pub fn validate(&self) -> GalleryResult<()> {
        self.viewport()?;
        for (id, rect) in &self.elements {
            let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(GalleryError::validation(format!(
                    "element '{id}' has non-finite bounds"
                )));
            }
            if rect.y1 < rect.y0 || rect.x1 < rect.x0 {
                return Err(GalleryError::validation(format!(
                    "element '{id}' has inverted bounds"
                )));
            }
        }
        Ok(())
    }
}

impl Layout for PageLayout {
    fn bounds(&self, id: &ElementId) -> Option<Rect> {
        self.elements.get(id).copied()
    }
}
