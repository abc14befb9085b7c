use rand::Rng;

use crate::{
    anim::{Property, props},
    anim_ease::Ease,
    core::{ElementId, Layout},
    parallax::ParallaxSpec,
    pointer::PointerSpec,
    reveal::{RevealSpec, stagger},
    scope::AnimationScope,
    sections::Section,
    viewport::{Anchor, Trigger},
};

pub const TITLE_TEXT: &str = "GALLERY LL";
pub const SECTION: &str = "hero";
pub const TITLE: &str = "hero-title";
pub const CHAR_PREFIX: &str = "hero-char";
pub const ARTWORK_PREFIX: &str = "hero-artwork";

/// Largest scroll drift of a floating artwork, either direction.
pub const MAX_DRIFT_PX: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FloatingArtwork {
    pub alt: &'static str,
    pub rotation: f64, // resting tilt, degrees
}

pub const FLOATING: [FloatingArtwork; 5] = [
    FloatingArtwork { alt: "Rainbow Landscape", rotation: -6.0 },
    FloatingArtwork { alt: "Fantasy Creature", rotation: 4.0 },
    FloatingArtwork { alt: "Abstract Art", rotation: -2.0 },
    FloatingArtwork { alt: "Family Portrait", rotation: 5.0 },
    FloatingArtwork { alt: "Flowers", rotation: -4.0 },
];

pub fn pointer_speed(index: usize) -> f64 {
    0.012 + index as f64 * 0.004
}

/// Landing section: per-character title intro and floating artworks.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Hero {
    drifts: [f64; FLOATING.len()],
}

impl Hero {
    /// Draws each artwork's scroll drift uniformly from [-60, 60].
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut drifts = [0.0; FLOATING.len()];
        for d in &mut drifts {
            *d = rng.random_range(-MAX_DRIFT_PX..=MAX_DRIFT_PX);
        }
        Self { drifts }
    }

    pub fn with_drifts(drifts: [f64; FLOATING.len()]) -> Self {
        Self { drifts }
    }

    pub fn drifts(&self) -> &[f64] {
        &self.drifts
    }

    pub fn char_ids() -> impl Iterator<Item = ElementId> {
        (0..TITLE_TEXT.chars().count()).map(|i| ElementId::indexed(CHAR_PREFIX, i))
    }

    fn window(end: Anchor) -> Trigger {
        Trigger::scrub(SECTION, Anchor::TOP_TOP, end)
    }
}

impl Section for Hero {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn register(&self, scope: &mut AnimationScope, layout: &dyn Layout) {
        let chars = Self::char_ids().map(|id| {
            RevealSpec::new(
                id,
                props([(Property::Y, 80.0), (Property::Opacity, 0.0)]),
                props([(Property::Y, 0.0), (Property::Opacity, 1.0)]),
                800.0,
            )
            .ease(Ease::OutCubic)
        });
        scope.reveals(layout, stagger(chars, 40.0));

        for (i, drift) in self.drifts.iter().copied().enumerate() {
            let id = ElementId::indexed(ARTWORK_PREFIX, i);
            scope.reveal(
                layout,
                RevealSpec::new(
                    id.clone(),
                    props([(Property::Scale, 0.8), (Property::Opacity, 0.0)]),
                    props([(Property::Scale, 1.0), (Property::Opacity, 1.0)]),
                    600.0,
                )
                .delay(300.0 + i as f64 * 100.0)
                .ease(Ease::OutCubic),
            );
            scope.parallax(
                layout,
                ParallaxSpec::offset_y(id.clone(), drift, Self::window(Anchor::BOTTOM_TOP))
                    .scrub(1.5),
            );
            scope.pointer(layout, PointerSpec::new(id, pointer_speed(i)));
        }

        let fade = Self::window(Anchor::new(0.5, 0.0));
        scope.parallax(
            layout,
            ParallaxSpec::property(TITLE, Property::Opacity, 1.0, 0.0, fade.clone()).scrub(1.0),
        );
        scope.parallax(
            layout,
            ParallaxSpec::property(TITLE, Property::Scale, 1.0, 0.95, fade).scrub(1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        core::{PageLayout, Rect},
        stage::Stage,
    };

    fn layout() -> PageLayout {
        let mut layout = PageLayout::new(1200.0, 800.0)
            .with(SECTION, Rect::new(0.0, 0.0, 1200.0, 800.0))
            .with(TITLE, Rect::new(200.0, 300.0, 1000.0, 400.0));
        for id in Hero::char_ids() {
            layout.insert(id, Rect::new(0.0, 300.0, 50.0, 400.0));
        }
        for i in 0..FLOATING.len() {
            layout.insert(
                ElementId::indexed(ARTWORK_PREFIX, i),
                Rect::new(0.0, 100.0, 140.0, 240.0),
            );
        }
        layout
    }

    #[test]
    fn drifts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let hero = Hero::new(&mut rng);
        assert!(hero.drifts().iter().all(|d| d.abs() <= MAX_DRIFT_PX));
    }

    #[test]
    fn registers_every_element() {
        let stage = Stage::new();
        let scope = Hero::with_drifts([10.0, -10.0, 20.0, -20.0, 0.0]).mount(&stage, &layout());
        let counts = stage.counts();
        // 10 chars + 5 artworks
        assert_eq!(counts.reveals, 15);
        // 5 drifts + title opacity + title scale
        assert_eq!(counts.parallax, 7);
        assert_eq!(counts.pointer, 5);
        drop(scope);
        assert_eq!(stage.counts().total(), 0);
    }

    #[test]
    fn pointer_speed_grows_toward_foreground() {
        assert_eq!(pointer_speed(0), 0.012);
        assert!(pointer_speed(4) > pointer_speed(3));
    }
}
