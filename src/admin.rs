//! Admin upload panel.
//!
//! `LoggedOut -> Authenticating -> LoggedIn -> Composing -> Uploading -> {Success, Failed}`.
//! The password gate is cosmetic and not an access-control boundary. A failed
//! upload is never retried automatically; the user resubmits from the form.

use chrono::{DateTime, Utc};

use crate::{
    error::{GalleryError, GalleryResult},
    model::{Category, clip_chars},
    upload::{ImageFile, ImageHost},
};

pub const TITLE_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 300;
pub const AUTO_CLOSE_MS: f64 = 1_500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum AdminState {
    LoggedOut,
    Authenticating,
    LoggedIn,
    Composing,
    Uploading,
    Success,
    Failed,
}

impl AdminState {
    pub fn is_authenticated(self) -> bool {
        !matches!(self, Self::LoggedOut | Self::Authenticating)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtworkForm {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub file: Option<ImageFile>,
}

/// Metadata of an uploaded artwork. Logged, not persisted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtworkRecord {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct AdminFlow {
    secret: String,
    state: AdminState,
    open: bool,
    form: ArtworkForm,
    close_at_ms: Option<f64>,
}

impl AdminFlow {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            state: AdminState::LoggedOut,
            open: false,
            form: ArtworkForm::default(),
            close_at_ms: None,
        }
    }

    pub fn state(&self) -> AdminState {
        self.state
    }

    pub fn form(&self) -> &ArtworkForm {
        &self.form
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing the panel discards the session and the form.
    pub fn close(&mut self) {
        self.open = false;
        self.state = AdminState::LoggedOut;
        self.form = ArtworkForm::default();
        self.close_at_ms = None;
    }

    pub fn heading(&self) -> &'static str {
        if self.state.is_authenticated() {
            "Upload New Artwork"
        } else {
            "Admin Login"
        }
    }

    pub fn status_message(&self) -> Option<&'static str> {
        match self.state {
            AdminState::Uploading => Some("Uploading..."),
            AdminState::Success => Some("✓ Upload successful!"),
            AdminState::Failed => Some("✗ Upload failed, please try again"),
            _ => None,
        }
    }

    pub fn login(&mut self, password: &str) -> GalleryResult<()> {
        if self.state.is_authenticated() {
            return Ok(());
        }
        self.state = AdminState::Authenticating;
        if password != self.secret {
            self.state = AdminState::LoggedOut;
            tracing::debug!("admin login rejected");
            return Err(GalleryError::auth("Incorrect password"));
        }
        self.state = AdminState::LoggedIn;
        Ok(())
    }

    fn editing(&mut self) -> GalleryResult<&mut ArtworkForm> {
        match self.state {
            AdminState::LoggedIn | AdminState::Composing | AdminState::Failed | AdminState::Success => {
                self.state = AdminState::Composing;
                self.close_at_ms = None;
                Ok(&mut self.form)
            }
            AdminState::Uploading => Err(GalleryError::validation("an upload is in progress")),
            AdminState::LoggedOut | AdminState::Authenticating => {
                Err(GalleryError::auth("log in before editing"))
            }
        }
    }

    pub fn set_title(&mut self, title: &str) -> GalleryResult<()> {
        self.editing()?.title = clip_chars(title, TITLE_MAX_CHARS);
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) -> GalleryResult<()> {
        self.editing()?.description = clip_chars(description, DESCRIPTION_MAX_CHARS);
        Ok(())
    }

    pub fn set_category(&mut self, category: Category) -> GalleryResult<()> {
        self.editing()?.category = Some(category);
        Ok(())
    }

    /// A rejected file leaves any earlier selection in place.
    pub fn select_file(&mut self, file: ImageFile) -> GalleryResult<()> {
        let form = self.editing()?;
        file.validate()?;
        form.file = Some(file);
        Ok(())
    }

    pub fn clear_file(&mut self) -> GalleryResult<()> {
        self.editing()?.file = None;
        Ok(())
    }

    /// Validate, upload and log the resulting record.
    ///
    /// Validation failures never reach `host`. On success the form is cleared and
    /// the panel closes `AUTO_CLOSE_MS` later (see [`AdminFlow::tick`]).
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn submit(&mut self, host: &mut dyn ImageHost, now_ms: f64) -> GalleryResult<ArtworkRecord> {
        self.editing()?;
        let title = self.form.title.trim().to_owned();
        let (Some(file), Some(category), false) =
            (self.form.file.as_ref(), self.form.category, title.is_empty())
        else {
            return Err(GalleryError::validation(
                "Please fill in all required fields and select an image",
            ));
        };
        file.validate()?;

        self.state = AdminState::Uploading;
        let url = match host.upload_image(file) {
            Ok(url) => url,
            Err(err) => {
                self.state = AdminState::Failed;
                tracing::error!(error = %err, "upload failed");
                if matches!(err, GalleryError::Transport(_)) {
                    return Err(err);
                }
                return Err(GalleryError::transport(err.to_string()));
            }
        };

        let record = ArtworkRecord {
            title,
            description: self.form.description.trim().to_owned(),
            category,
            image_url: url,
            created_at: Utc::now(),
        };
        tracing::info!(
            title = %record.title,
            category = %record.category,
            image_url = %record.image_url,
            "upload successful"
        );
        self.state = AdminState::Success;
        self.form = ArtworkForm::default();
        self.close_at_ms = Some(now_ms + AUTO_CLOSE_MS);
        Ok(record)
    }

    /// Hide the panel once the success notice has been shown long enough.
    /// The session stays logged in; returns true when the panel closed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.close_at_ms {
            Some(at) if self.state == AdminState::Success && now_ms >= at => {
                self.open = false;
                self.state = AdminState::LoggedIn;
                self.close_at_ms = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticHost(Option<String>);

    impl ImageHost for StaticHost {
        fn upload_image(&mut self, _file: &ImageFile) -> GalleryResult<String> {
            self.0
                .clone()
                .ok_or_else(|| GalleryError::transport("host unreachable"))
        }
    }

    fn png() -> ImageFile {
        ImageFile::new("cat.png", "image/png", vec![0; 1024])
    }

    fn composed() -> AdminFlow {
        let mut flow = AdminFlow::new("artist123");
        flow.open();
        flow.login("artist123").unwrap();
        flow.set_title("  Sleepy Cat ").unwrap();
        flow.set_category(Category::Animals).unwrap();
        flow.select_file(png()).unwrap();
        flow
    }

    #[test]
    fn wrong_password_stays_logged_out() {
        let mut flow = AdminFlow::new("artist123");
        assert!(matches!(flow.login("nope"), Err(GalleryError::Auth(_))));
        assert_eq!(flow.state(), AdminState::LoggedOut);
        assert!(flow.set_title("x").is_err());
        assert_eq!(flow.heading(), "Admin Login");
    }

    #[test]
    fn title_and_description_are_clipped() {
        let mut flow = composed();
        flow.set_title(&"t".repeat(80)).unwrap();
        flow.set_description(&"d".repeat(400)).unwrap();
        assert_eq!(flow.form().title.chars().count(), 50);
        assert_eq!(flow.form().description.chars().count(), 300);
    }

    #[test]
    fn rejected_file_keeps_previous_selection() {
        let mut flow = composed();
        let err = flow
            .select_file(ImageFile::new("a.txt", "text/plain", vec![1]))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(flow.form().file.as_ref().map(|f| f.name.as_str()), Some("cat.png"));
        let err = flow
            .select_file(ImageFile::new("huge.png", "image/png", vec![0; 6 * 1024 * 1024]))
            .unwrap_err();
        assert!(err.to_string().contains("5MB"));
        assert_eq!(flow.form().file.as_ref().map(|f| f.name.as_str()), Some("cat.png"));
    }

    #[test]
    fn success_auto_closes_after_delay() {
        let mut flow = composed();
        let mut host = StaticHost(Some("https://img.example/cat.png".into()));
        let record = flow.submit(&mut host, 10_000.0).unwrap();
        assert_eq!(record.title, "Sleepy Cat");
        assert_eq!(flow.state(), AdminState::Success);
        assert_eq!(flow.form(), &ArtworkForm::default());
        assert!(!flow.tick(11_499.0));
        assert!(flow.tick(11_500.0));
        assert!(!flow.is_open());
        assert_eq!(flow.state(), AdminState::LoggedIn);
        assert_eq!(flow.status_message(), None);
    }

    #[test]
    fn failure_keeps_form_for_resubmission() {
        let mut flow = composed();
        let err = flow.submit(&mut StaticHost(None), 0.0).unwrap_err();
        assert!(matches!(err, GalleryError::Transport(_)));
        assert_eq!(flow.state(), AdminState::Failed);
        assert_eq!(flow.status_message(), Some("✗ Upload failed, please try again"));
        assert!(flow.form().file.is_some());
        let mut ok = StaticHost(Some("https://img.example/x.png".into()));
        flow.submit(&mut ok, 0.0).unwrap();
        assert_eq!(flow.state(), AdminState::Success);
    }

    #[test]
    fn close_resets_everything() {
        let mut flow = composed();
        flow.close();
        assert_eq!(flow.state(), AdminState::LoggedOut);
        assert_eq!(flow.form(), &ArtworkForm::default());
    }
}
