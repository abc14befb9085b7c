//! The assembled single-page site: sections mounted on one stage.

use rand::Rng;

use crate::{
    core::{ElementId, Layout, PageLayout, Point, Rect},
    error::GalleryResult,
    model::GuestMessage,
    navigation::{SectionId, SmoothScroll},
    scope::AnimationScope,
    sections::{
        About, Footer, Gallery, Guestbook, Hero, Navbar, Section, about, gallery, guestbook, hero,
        navbar,
    },
    stage::{FrameReport, Stage},
    surface::Surface,
};

const NAV_HEIGHT: f64 = 72.0;
const CARD_HEIGHT: f64 = 420.0;
const NOTE_HEIGHT: f64 = 220.0;
const FOOTER_HEIGHT: f64 = 320.0;

pub struct Page {
    stage: Stage,
    pub navbar: Navbar,
    pub hero: Hero,
    pub gallery: Gallery,
    pub about: About,
    pub guestbook: Guestbook,
    pub footer: Footer,
    scopes: Vec<AnimationScope>,
    scroll_y: f64,
    smooth: Option<SmoothScroll>,
}

impl Page {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_sections(
            Hero::new(rng),
            Gallery::default(),
            About::default(),
            Guestbook::default(),
            Footer::current(),
        )
    }

    pub fn with_sections(
        hero: Hero,
        gallery: Gallery,
        about: About,
        guestbook: Guestbook,
        footer: Footer,
    ) -> Self {
        Self {
            stage: Stage::new(),
            navbar: Navbar::new(),
            hero,
            gallery,
            about,
            guestbook,
            footer,
            scopes: Vec::new(),
            scroll_y: 0.0,
            smooth: None,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn is_mounted(&self) -> bool {
        !self.scopes.is_empty()
    }

    /// Mount every section against `layout`, replacing any previous mount.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn mount(&mut self, layout: &dyn Layout) {
        self.unmount();
        let sections: [&dyn Section; 6] = [
            &self.navbar,
            &self.hero,
            &self.gallery,
            &self.about,
            &self.guestbook,
            &self.footer,
        ];
        self.scopes = sections
            .into_iter()
            .map(|section| section.mount(&self.stage, layout))
            .collect();
    }

    /// Revert every section scope; returns the number of registrations released.
    pub fn unmount(&mut self) -> usize {
        self.scopes.drain(..).map(|mut scope| scope.revert()).sum()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Jump to an offset; cancels any smooth scroll in flight.
    pub fn set_scroll(&mut self, scroll_y: f64) {
        self.smooth = None;
        self.apply_scroll(scroll_y);
    }

    fn apply_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.max(0.0);
        self.navbar.on_scroll(self.scroll_y);
    }

    /// Start a smooth scroll to `section`. `false` when it is not laid out.
    pub fn scroll_to(&mut self, layout: &PageLayout, section: SectionId, now_ms: f64) -> bool {
        self.smooth = self.navbar.navigate(layout, section, self.scroll_y, now_ms);
        self.smooth.is_some()
    }

    pub fn is_scrolling(&self) -> bool {
        self.smooth.is_some()
    }

    pub fn frame(
        &mut self,
        now_ms: f64,
        layout: &PageLayout,
        surface: &mut dyn Surface,
    ) -> GalleryResult<FrameReport> {
        if let Some(smooth) = self.smooth {
            self.apply_scroll(smooth.sample(now_ms));
            if smooth.is_finished(now_ms) {
                self.smooth = None;
            }
        }
        let viewport = layout.viewport()?.scrolled_to(self.scroll_y);
        Ok(self.stage.frame(now_ms, viewport, layout, surface))
    }

    pub fn pointer_moved(
        &mut self,
        now_ms: f64,
        pointer: Point,
        layout: &PageLayout,
    ) -> GalleryResult<()> {
        let viewport = layout.viewport()?.scrolled_to(self.scroll_y);
        self.stage.pointer_moved(now_ms, pointer, viewport, layout);
        Ok(())
    }

    /// Geometry for the current content at the given viewport size.
    pub fn layout(&self, width: f64, height: f64) -> PageLayout {
        build_layout(
            width,
            height,
            self.gallery.artworks().len(),
            self.guestbook.messages(),
        )
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Geometry of the sample page at the given viewport size.
pub fn default_layout(width: f64, height: f64) -> PageLayout {
    build_layout(
        width,
        height,
        Gallery::default().artworks().len(),
        Guestbook::default().messages(),
    )
}

fn grid_cell(width: f64, top: f64, index: usize, cell_height: f64) -> Rect {
    let col_width = (width - 64.0) / 3.0;
    let col = (index % 3) as f64;
    let row = (index / 3) as f64;
    let x0 = 32.0 + col * col_width;
    let y0 = top + row * (cell_height + 40.0);
    Rect::new(x0 + 12.0, y0, x0 + col_width - 12.0, y0 + cell_height)
}

fn build_layout(width: f64, height: f64, artworks: usize, notes: &[GuestMessage]) -> PageLayout {
    let mut layout = PageLayout::new(width, height);

    layout.insert(navbar::CONTAINER, Rect::new(0.0, 0.0, width, NAV_HEIGHT));
    layout.insert(navbar::LOGO, Rect::new(24.0, 16.0, 64.0, 56.0));
    for i in 0..navbar::LINKS.len() + 1 {
        let x0 = width - 420.0 + i as f64 * 100.0;
        layout.insert(
            ElementId::indexed(navbar::LINK_PREFIX, i),
            Rect::new(x0, 20.0, x0 + 90.0, 52.0),
        );
    }

    let hero_bottom = height;
    layout.insert(SectionId::Hero.element(), Rect::new(0.0, 0.0, width, hero_bottom));
    let title_y = height * 0.4;
    let title = Rect::new(width * 0.15, title_y, width * 0.85, title_y + 120.0);
    layout.insert(hero::TITLE, title);
    let chars = hero::TITLE_TEXT.chars().count();
    let char_width = title.width() / chars as f64;
    for (i, id) in Hero::char_ids().enumerate() {
        let x0 = title.x0 + i as f64 * char_width;
        layout.insert(id, Rect::new(x0, title.y0, x0 + char_width, title.y1));
    }
    for i in 0..hero::FLOATING.len() {
        let x0 = if i % 2 == 0 { width * 0.06 } else { width * 0.82 };
        let y0 =
            NAV_HEIGHT + i as f64 * (height - NAV_HEIGHT - 140.0) / hero::FLOATING.len() as f64;
        layout.insert(
            ElementId::indexed(hero::ARTWORK_PREFIX, i),
            Rect::new(x0, y0, x0 + 140.0, y0 + 140.0),
        );
    }

    let gallery_top = hero_bottom;
    let rows = artworks.div_ceil(3) as f64;
    let gallery_bottom = gallery_top + 260.0 + rows * (CARD_HEIGHT + 40.0);
    layout.insert(
        SectionId::Gallery.element(),
        Rect::new(0.0, gallery_top, width, gallery_bottom),
    );
    layout.insert(
        gallery::TITLE,
        Rect::new(width * 0.2, gallery_top + 96.0, width * 0.8, gallery_top + 160.0),
    );
    for i in 0..artworks {
        layout.insert(
            Gallery::card_id(i),
            grid_cell(width, gallery_top + 240.0, i, CARD_HEIGHT),
        );
    }

    let about_top = gallery_bottom;
    let about_bottom = about_top + 900.0;
    layout.insert(
        SectionId::About.element(),
        Rect::new(0.0, about_top, width, about_bottom),
    );
    let half = width / 2.0;
    let column = |y0: f64, y1: f64| Rect::new(48.0, about_top + y0, half - 24.0, about_top + y1);
    layout.insert(about::TITLE, column(96.0, 160.0));
    layout.insert(about::CONTENT, column(180.0, 520.0));
    layout.insert(
        about::PHOTO,
        Rect::new(half + 24.0, about_top + 120.0, width - 48.0, about_top + 620.0),
    );
    let stat_ids = [about::STAT_ARTWORKS, about::STAT_AWARDS, about::STAT_THEMES];
    let stat_width = (half - 72.0) / 3.0;
    for (i, stat) in stat_ids.into_iter().enumerate() {
        let x0 = 48.0 + i as f64 * stat_width;
        let card = Rect::new(x0, about_top + 560.0, x0 + stat_width - 12.0, about_top + 680.0);
        layout.insert(ElementId::indexed(about::STAT_CARD_PREFIX, i), card);
        let counter = Rect::new(card.x0 + 12.0, card.y0 + 16.0, card.x1 - 12.0, card.y0 + 64.0);
        layout.insert(stat, counter);
    }

    let guestbook_top = about_bottom;
    let note_rows = notes.len().div_ceil(3) as f64;
    let guestbook_bottom = guestbook_top + 640.0 + note_rows * (NOTE_HEIGHT + 40.0);
    layout.insert(
        SectionId::Guestbook.element(),
        Rect::new(0.0, guestbook_top, width, guestbook_bottom),
    );
    layout.insert(
        guestbook::TITLE,
        Rect::new(width * 0.2, guestbook_top + 96.0, width * 0.8, guestbook_top + 160.0),
    );
    for (i, note) in notes.iter().enumerate() {
        layout.insert(
            Guestbook::note_id(note),
            grid_cell(width, guestbook_top + 600.0, i, NOTE_HEIGHT),
        );
    }

    layout.insert(
        "footer",
        Rect::new(0.0, guestbook_bottom, width, guestbook_bottom + FOOTER_HEIGHT),
    );
    layout
}
