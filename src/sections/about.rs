use crate::{
    anim::{Property, props},
    anim_ease::Ease,
    core::{ElementId, Layout},
    counter::CounterSpec,
    model::{ArtistProfile, sample_profile},
    pointer::{PointerOrigin, PointerSpec},
    reveal::{RevealSpec, stagger},
    scope::AnimationScope,
    sections::Section,
    viewport::Trigger,
};

pub const SECTION: &str = "about";
pub const TITLE: &str = "about-title";
pub const CONTENT: &str = "about-content";
pub const PHOTO: &str = "about-photo";
pub const STAT_CARD_PREFIX: &str = "about-stat-card";
pub const STAT_ARTWORKS: &str = "about-stat-artworks";
pub const STAT_AWARDS: &str = "about-stat-awards";
pub const STAT_THEMES: &str = "about-stat-themes";

pub const COUNTER_MS: f64 = 2_000.0;
pub const COUNTER_STEPS: u32 = 60;
pub const PHOTO_POINTER_SPEED: f64 = 1.0 / 25.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct About {
    pub profile: ArtistProfile,
}

impl Default for About {
    fn default() -> Self {
        Self::new(sample_profile())
    }
}

impl About {
    pub fn new(profile: ArtistProfile) -> Self {
        Self { profile }
    }

    pub fn counter_spec(&self) -> CounterSpec {
        let stats = self.profile.stats;
        CounterSpec::new(Trigger::enter(SECTION, 0.6), COUNTER_MS, COUNTER_STEPS)
            .target(STAT_ARTWORKS, stats.artworks)
            .target(STAT_AWARDS, stats.awards)
            .target(STAT_THEMES, stats.themes)
    }

    fn slide_in(target: &str, dx: f64) -> RevealSpec {
        RevealSpec::new(
            target,
            props([(Property::X, dx), (Property::Opacity, 0.0)]),
            props([(Property::X, 0.0), (Property::Opacity, 1.0)]),
            600.0,
        )
        .on(Trigger::enter(SECTION, 0.7))
    }
}

impl Section for About {
    fn name(&self) -> &'static str {
        "about"
    }

    fn register(&self, scope: &mut AnimationScope, layout: &dyn Layout) {
        scope.reveal(layout, Self::slide_in(TITLE, -40.0));
        scope.reveal(layout, Self::slide_in(CONTENT, -20.0).delay(150.0));
        scope.reveal(
            layout,
            RevealSpec::new(
                PHOTO,
                props([(Property::ClipRadius, 0.0)]),
                props([(Property::ClipRadius, 100.0)]),
                800.0,
            )
            .delay(300.0)
            .ease(Ease::OutCubic)
            .on(Trigger::enter(SECTION, 0.7)),
        );

        scope.counter(layout, self.counter_spec());

        let cards = (0..3).map(|i| {
            RevealSpec::new(
                ElementId::indexed(STAT_CARD_PREFIX, i),
                props([(Property::Y, 20.0), (Property::Opacity, 0.0)]),
                props([(Property::Y, 0.0), (Property::Opacity, 1.0)]),
                500.0,
            )
            .delay(400.0)
            .on(Trigger::enter(SECTION, 0.6))
        });
        scope.reveals(layout, stagger(cards, 80.0));

        scope.pointer(
            layout,
            PointerSpec::new(PHOTO, PHOTO_POINTER_SPEED).relative_to(PointerOrigin::ElementCenter),
        );
    }
}
