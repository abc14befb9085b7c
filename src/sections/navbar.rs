use crate::{
    anim::{Property, props},
    anim_ease::Ease,
    core::{ElementId, Layout, PageLayout},
    error::GalleryResult,
    navigation::{SectionId, SmoothScroll},
    reveal::{RevealSpec, stagger},
    scope::AnimationScope,
    sections::Section,
    share::{ShareHost, ShareOutcome, SharePayload, share},
};

/// Scroll offset past which the bar collapses into a pill.
pub const SCROLLED_AFTER_PX: f64 = 50.0;

pub const LINKS: [(&str, SectionId); 3] = [
    ("GALLERY", SectionId::Gallery),
    ("ABOUT", SectionId::About),
    ("GUESTBOOK", SectionId::Guestbook),
];

pub const CONTAINER: &str = "nav-container";
pub const LOGO: &str = "nav-logo";
pub const LINK_PREFIX: &str = "nav-link";
const LINK_COUNT: usize = LINKS.len() + 1; // section links plus the share button

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_AFTER_PX
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum NavStyle {
    Wide,
    Pill, // compact, glass background; hides the wordmark on small screens
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Navbar {
    scrolled: bool,
    menu_open: bool,
}

impl Navbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scrolled = is_scrolled(scroll_y);
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn style(&self) -> NavStyle {
        if self.scrolled {
            NavStyle::Pill
        } else {
            NavStyle::Wide
        }
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Close the menu and start a smooth scroll to `section`, if it is laid out.
    pub fn navigate(
        &mut self,
        layout: &PageLayout,
        section: SectionId,
        scroll_y: f64,
        now_ms: f64,
    ) -> Option<SmoothScroll> {
        self.menu_open = false;
        SmoothScroll::towards(layout, section, scroll_y, now_ms)
    }

    pub fn share(&self, host: &mut dyn ShareHost, page_url: &str) -> GalleryResult<ShareOutcome> {
        let payload = SharePayload::new("GALLERY LL", "Check out my artwork!", page_url);
        share(host, &payload)
    }
}

impl Section for Navbar {
    fn name(&self) -> &'static str {
        "navbar"
    }

    fn register(&self, scope: &mut AnimationScope, layout: &dyn Layout) {
        scope.reveal(
            layout,
            RevealSpec::new(
                CONTAINER,
                props([(Property::Y, -100.0), (Property::Opacity, 0.0)]),
                props([(Property::Y, 0.0), (Property::Opacity, 1.0)]),
                800.0,
            )
            .ease(Ease::OutQuart),
        );
        scope.reveal(
            layout,
            RevealSpec::new(
                LOGO,
                props([(Property::Rotation, -180.0), (Property::Scale, 0.0)]),
                props([(Property::Rotation, 0.0), (Property::Scale, 1.0)]),
                600.0,
            )
            .delay(200.0)
            .ease(Ease::OutCubic),
        );
        let links = (0..LINK_COUNT).map(|i| {
            RevealSpec::new(
                ElementId::indexed(LINK_PREFIX, i),
                props([(Property::Y, 20.0), (Property::Opacity, 0.0)]),
                props([(Property::Y, 0.0), (Property::Opacity, 1.0)]),
                400.0,
            )
            .delay(300.0)
            .ease(Ease::OutCubic)
        });
        scope.reveals(layout, stagger(links, 100.0));
    }
}
