//! Page sections: each registers its elements with the stage on mount.

pub mod about;
pub mod footer;
pub mod gallery;
pub mod guestbook;
pub mod hero;
pub mod navbar;

pub use about::About;
pub use footer::Footer;
pub use gallery::Gallery;
pub use guestbook::Guestbook;
pub use hero::Hero;
pub use navbar::Navbar;

use crate::{core::Layout, scope::AnimationScope, stage::Stage};

pub trait Section {
    fn name(&self) -> &'static str;

    /// Register this section's animations. Elements missing from `layout` are skipped.
    fn register(&self, scope: &mut AnimationScope, layout: &dyn Layout);

    /// Open a scope on `stage` and register into it. Dropping the scope unmounts.
    #[tracing::instrument(level = "debug", skip_all, fields(section = self.name()))]
    fn mount(&self, stage: &Stage, layout: &dyn Layout) -> AnimationScope {
        let mut scope = stage.scope(self.name());
        self.register(&mut scope, layout);
        tracing::debug!(registrations = scope.len(), "section mounted");
        scope
    }
}
