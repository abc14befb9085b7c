//! Platform share with a clipboard fallback.

use crate::error::GalleryResult;

pub const COPIED_NOTICE: &str = "Link copied to clipboard!";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn new(title: impl Into<String>, text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            url: url.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ShareOutcome {
    Shared,
    Cancelled,
    Copied,
}

/// Host capabilities the share action relies on.
pub trait ShareHost {
    fn can_share(&self) -> bool;

    /// `Err` when the user dismissed the share sheet.
    fn share(&mut self, payload: &SharePayload) -> GalleryResult<()>;

    fn copy_to_clipboard(&mut self, text: &str) -> GalleryResult<()>;

    /// Blocking user notification.
    fn notify(&mut self, message: &str);
}

/// Share through the platform if it can; otherwise copy the URL and notify.
pub fn share(host: &mut dyn ShareHost, payload: &SharePayload) -> GalleryResult<ShareOutcome> {
    if host.can_share() {
        return Ok(match host.share(payload) {
            Ok(()) => ShareOutcome::Shared,
            Err(err) => {
                tracing::debug!(error = %err, "share cancelled");
                ShareOutcome::Cancelled
            }
        });
    }
    host.copy_to_clipboard(&payload.url)?;
    host.notify(COPIED_NOTICE);
    Ok(ShareOutcome::Copied)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::GalleryError;

    #[derive(Default)]
    pub(crate) struct FakeShareHost {
        pub platform: bool,
        pub dismiss: bool,
        pub shared: Vec<SharePayload>,
        pub clipboard: Option<String>,
        pub notices: Vec<String>,
    }

    impl ShareHost for FakeShareHost {
        fn can_share(&self) -> bool {
            self.platform
        }

        fn share(&mut self, payload: &SharePayload) -> GalleryResult<()> {
            if self.dismiss {
                return Err(GalleryError::transport("dismissed"));
            }
            self.shared.push(payload.clone());
            Ok(())
        }

        fn copy_to_clipboard(&mut self, text: &str) -> GalleryResult<()> {
            self.clipboard = Some(text.to_owned());
            Ok(())
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_owned());
        }
    }

    fn payload() -> SharePayload {
        SharePayload::new("GALLERY LL", "Check out my artwork!", "https://ll.example/")
    }

    #[test]
    fn falls_back_to_clipboard() {
        let mut host = FakeShareHost::default();
        assert_eq!(share(&mut host, &payload()).unwrap(), ShareOutcome::Copied);
        assert_eq!(host.clipboard.as_deref(), Some("https://ll.example/"));
        assert_eq!(host.notices, vec![COPIED_NOTICE.to_owned()]);
    }

    #[test]
    fn dismissed_share_is_not_an_error() {
        let mut host = FakeShareHost {
            platform: true,
            dismiss: true,
            ..Default::default()
        };
        assert_eq!(share(&mut host, &payload()).unwrap(), ShareOutcome::Cancelled);
        assert!(host.clipboard.is_none());
    }

    #[test]
    fn platform_share_receives_payload() {
        let mut host = FakeShareHost {
            platform: true,
            ..Default::default()
        };
        assert_eq!(share(&mut host, &payload()).unwrap(), ShareOutcome::Shared);
        assert_eq!(host.shared[0].title, "GALLERY LL");
    }
}
