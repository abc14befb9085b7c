use chrono::Datelike;

use crate::{core::Layout, navigation::SectionId, scope::AnimationScope, sections::Section};

pub const LINKS: [(&str, SectionId); 3] = [
    ("GALLERY", SectionId::Gallery),
    ("ABOUT", SectionId::About),
    ("GUESTBOOK", SectionId::Guestbook),
];

pub const TAGLINE: &str = "A personal digital gallery capturing moments of creativity and imagination";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Footer {
    pub year: i32,
}

impl Footer {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    pub fn current() -> Self {
        Self::new(chrono::Utc::now().year())
    }

    pub fn copyright(&self) -> String {
        format!("© {} GALLERY LL", self.year)
    }
}

impl Section for Footer {
    fn name(&self) -> &'static str {
        "footer"
    }

    // static
    fn register(&self, _scope: &mut AnimationScope, _layout: &dyn Layout) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copyright_line() {
        assert_eq!(Footer::new(2024).copyright(), "© 2024 GALLERY LL");
        assert_eq!(LINKS[2].1.as_str(), "guestbook");
    }
}
