//! Guestbook notes and the posting form.
//!
//! Posting is modelled as two calls around an artificial delay: `begin_submit`
//! validates and captures the draft, `complete_submit` publishes once the delay
//! has elapsed. The notes live only for the session.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::{
    anim::{Property, props},
    anim_ease::Ease,
    core::{ElementId, Layout},
    error::{GalleryError, GalleryResult},
    model::{GuestMessage, NOTE_PALETTE, clip_chars, sample_messages},
    reveal::RevealSpec,
    scope::AnimationScope,
    sections::Section,
    viewport::Trigger,
};

pub const SECTION: &str = "guestbook";
pub const TITLE: &str = "guestbook-title";
pub const NAME_MAX_CHARS: usize = 20;
pub const MESSAGE_MAX_CHARS: usize = 200;
pub const SUBMIT_DELAY_MS: f64 = 500.0;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Draft {
    pub name: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
struct Pending {
    name: String,
    message: String,
    ready_at_ms: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Guestbook {
    messages: Vec<GuestMessage>, // most recent first
    draft: Draft,
    pending: Option<Pending>,
}

impl Default for Guestbook {
    fn default() -> Self {
        Self::new(sample_messages())
    }
}

impl Guestbook {
    pub fn new(messages: Vec<GuestMessage>) -> Self {
        Self {
            messages,
            draft: Draft::default(),
            pending: None,
        }
    }

    pub fn messages(&self) -> &[GuestMessage] {
        &self.messages
    }

    pub fn note_id(message: &GuestMessage) -> ElementId {
        ElementId::new(format!("guestbook-note-{}", message.id))
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Input beyond 20 characters is dropped.
    pub fn set_name(&mut self, name: &str) {
        self.draft.name = clip_chars(name, NAME_MAX_CHARS);
    }

    /// Input beyond 200 characters is dropped.
    pub fn set_message(&mut self, message: &str) {
        self.draft.message = clip_chars(message, MESSAGE_MAX_CHARS);
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn begin_submit(&mut self, now_ms: f64) -> GalleryResult<()> {
        if self.pending.is_some() {
            return Err(GalleryError::validation("a message is already being posted"));
        }
        let name = self.draft.name.trim();
        let message = self.draft.message.trim();
        if name.is_empty() || message.is_empty() {
            return Err(GalleryError::validation("name and message are required"));
        }
        self.pending = Some(Pending {
            name: name.to_owned(),
            message: message.to_owned(),
            ready_at_ms: now_ms + SUBMIT_DELAY_MS,
        });
        Ok(())
    }

    /// Publish the pending note once the posting delay has elapsed.
    ///
    /// The note goes to the head of the list and the form is cleared.
    pub fn complete_submit(
        &mut self,
        now_ms: f64,
        created_at: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Option<&GuestMessage> {
        if self.pending.as_ref()?.ready_at_ms > now_ms {
            return None;
        }
        let pending = self.pending.take()?;
        let note = GuestMessage {
            id: self.fresh_id(),
            name: pending.name,
            message: pending.message,
            created_at,
            color: NOTE_PALETTE[rng.random_range(0..NOTE_PALETTE.len())].to_owned(),
            rotation: rng.random_range(-1.0..1.0),
        };
        tracing::debug!(id = %note.id, "guestbook note posted");
        self.messages.insert(0, note);
        self.draft = Draft::default();
        self.messages.first()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if self.messages.iter().all(|m| m.id != id) {
                return id;
            }
        }
    }
}

impl Section for Guestbook {
    fn name(&self) -> &'static str {
        "guestbook"
    }

    fn register(&self, scope: &mut AnimationScope, layout: &dyn Layout) {
        scope.reveal(
            layout,
            RevealSpec::new(
                TITLE,
                props([(Property::Y, 30.0), (Property::Opacity, 0.0)]),
                props([(Property::Y, 0.0), (Property::Opacity, 1.0)]),
                600.0,
            )
            .on(Trigger::enter(SECTION, 0.8)),
        );
        for (i, message) in self.messages.iter().enumerate() {
            let id = Self::note_id(message);
            scope.reveal(
                layout,
                RevealSpec::new(
                    id.clone(),
                    props([(Property::Scale, 0.9), (Property::Opacity, 0.0)]),
                    props([(Property::Scale, 1.0), (Property::Opacity, 1.0)]),
                    500.0,
                )
                .delay(i as f64 * 80.0)
                .ease(Ease::OutCubic)
                .on(Trigger::enter(id, 0.9)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn inputs_are_truncated_like_the_form() {
        let mut g = Guestbook::default();
        g.set_name(&"n".repeat(30));
        g.set_message(&"m".repeat(250));
        assert_eq!(g.draft().name.chars().count(), 20);
        assert_eq!(g.draft().message.chars().count(), 200);
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut g = Guestbook::default();
        g.set_name("   ");
        g.set_message("hello");
        assert!(g.begin_submit(0.0).unwrap_err().is_validation());
        assert!(!g.is_submitting());
    }

    #[test]
    fn note_waits_for_the_delay() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut g = Guestbook::default();
        g.set_name(" Sam ");
        g.set_message("Great art!");
        g.begin_submit(1_000.0).unwrap();
        assert!(g.begin_submit(1_001.0).is_err());
        assert!(g.complete_submit(1_499.0, Utc::now(), &mut rng).is_none());
        let note = g.complete_submit(1_500.0, Utc::now(), &mut rng).unwrap();
        assert_eq!(note.name, "Sam");
        assert!((-1.0..1.0).contains(&note.rotation));
        assert!(NOTE_PALETTE.contains(&note.color.as_str()));
        assert_eq!(g.draft(), &Draft::default());
        assert!(!g.is_submitting());
    }
}
