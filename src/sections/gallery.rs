use std::collections::BTreeSet;

use crate::{
    anim::{Property, props},
    anim_ease::Ease,
    core::{ElementId, Layout},
    error::{GalleryError, GalleryResult},
    model::{Artwork, sample_artworks},
    parallax::ParallaxSpec,
    reveal::RevealSpec,
    scope::AnimationScope,
    sections::Section,
    share::{ShareHost, ShareOutcome, SharePayload, share},
    viewport::{Anchor, Trigger},
};

pub const SECTION: &str = "gallery";
pub const TITLE: &str = "gallery-title";
pub const CARD_PREFIX: &str = "gallery-card";

/// Alternating card drift gives the grid its staggered depth.
pub fn card_drift(index: usize) -> f64 {
    if index % 2 == 0 { -80.0 } else { -30.0 }
}

/// Artwork grid with a lightbox and per-session likes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Gallery {
    artworks: Vec<Artwork>,
    lightbox: Option<usize>,
    liked: BTreeSet<String>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(sample_artworks())
    }
}

impl Gallery {
    pub fn new(artworks: Vec<Artwork>) -> Self {
        Self {
            artworks,
            lightbox: None,
            liked: BTreeSet::new(),
        }
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn card_id(index: usize) -> ElementId {
        ElementId::indexed(CARD_PREFIX, index)
    }

    pub fn open(&mut self, index: usize) -> GalleryResult<&Artwork> {
        if index >= self.artworks.len() {
            return Err(GalleryError::validation(format!(
                "artwork index {index} out of range (len={})",
                self.artworks.len()
            )));
        }
        self.lightbox = Some(index);
        Ok(&self.artworks[index])
    }

    pub fn close(&mut self) {
        self.lightbox = None;
    }

    pub fn selected(&self) -> Option<&Artwork> {
        self.lightbox.and_then(|i| self.artworks.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.lightbox
    }

    /// Wraps past the last artwork. No-op while the lightbox is closed.
    pub fn next_artwork(&mut self) -> Option<&Artwork> {
        self.step(1)
    }

    /// Wraps before the first artwork.
    pub fn prev_artwork(&mut self) -> Option<&Artwork> {
        self.step(self.artworks.len().saturating_sub(1))
    }

    fn step(&mut self, by: usize) -> Option<&Artwork> {
        let len = self.artworks.len();
        let current = self.lightbox?;
        if len == 0 {
            return None;
        }
        let index = (current + by) % len;
        self.lightbox = Some(index);
        self.artworks.get(index)
    }

    /// Returns whether the artwork is liked afterwards.
    pub fn toggle_like(&mut self, id: &str) -> bool {
        if self.liked.remove(id) {
            return false;
        }
        self.liked.insert(id.to_owned());
        true
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.contains(id)
    }

    pub fn share(
        &self,
        host: &mut dyn ShareHost,
        index: usize,
        page_url: &str,
    ) -> GalleryResult<ShareOutcome> {
        let artwork = self.artworks.get(index).ok_or_else(|| {
            GalleryError::validation(format!("artwork index {index} out of range"))
        })?;
        let payload = SharePayload::new(&artwork.title, &artwork.description, page_url);
        share(host, &payload)
    }
}

impl Section for Gallery {
    fn name(&self) -> &'static str {
        "gallery"
    }

    fn register(&self, scope: &mut AnimationScope, layout: &dyn Layout) {
        scope.reveal(
            layout,
            RevealSpec::new(
                TITLE,
                props([(Property::Y, 40.0), (Property::Opacity, 0.0)]),
                props([(Property::Y, 0.0), (Property::Opacity, 1.0)]),
                600.0,
            )
            .on(Trigger::enter(SECTION, 0.8)),
        );

        let window = Trigger::scrub(SECTION, Anchor::TOP_BOTTOM, Anchor::BOTTOM_TOP);
        for i in 0..self.artworks.len() {
            let id = Self::card_id(i);
            scope.reveal(
                layout,
                RevealSpec::new(
                    id.clone(),
                    props([(Property::Y, 60.0), (Property::Opacity, 0.0)]),
                    props([(Property::Y, 0.0), (Property::Opacity, 1.0)]),
                    600.0,
                )
                .delay(i as f64 * 80.0)
                .ease(Ease::OutCubic)
                .on(Trigger::enter(id.clone(), 0.85)),
            );
            scope.parallax(
                layout,
                ParallaxSpec::offset_y(id, card_drift(i), window.clone()).scrub(1.5),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::tests::FakeShareHost;

    #[test]
    fn lightbox_wraps_both_ways() {
        let mut g = Gallery::default();
        assert!(g.next_artwork().is_none());
        g.open(5).unwrap();
        assert_eq!(g.next_artwork().unwrap().title, "Rainbow Landscape");
        assert_eq!(g.prev_artwork().unwrap().title, "Starry Night");
        g.open(0).unwrap();
        assert_eq!(g.prev_artwork().unwrap().id, "6");
        g.close();
        assert!(g.selected().is_none());
    }

    #[test]
    fn open_rejects_out_of_range() {
        let mut g = Gallery::default();
        assert!(g.open(6).unwrap_err().is_validation());
    }

    #[test]
    fn likes_toggle() {
        let mut g = Gallery::default();
        assert!(g.toggle_like("3"));
        assert!(g.is_liked("3"));
        assert!(!g.toggle_like("3"));
        assert!(!g.is_liked("3"));
    }

    #[test]
    fn share_uses_artwork_text() {
        let g = Gallery::default();
        let mut host = FakeShareHost {
            platform: true,
            ..Default::default()
        };
        g.share(&mut host, 1, "https://ll.example/").unwrap();
        assert_eq!(host.shared[0].title, "Fantasy Creature");
        assert_eq!(host.shared[0].url, "https://ll.example/");
    }

    #[test]
    fn drift_alternates() {
        assert_eq!(card_drift(0), -80.0);
        assert_eq!(card_drift(1), -30.0);
        assert_eq!(card_drift(4), -80.0);
    }
}
