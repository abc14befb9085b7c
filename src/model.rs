use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{GalleryError, GalleryResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Category {
    Landscape,
    Portrait,
    Animals,
    Fantasy,
    Abstract,
    Nature,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Landscape,
        Category::Portrait,
        Category::Animals,
        Category::Fantasy,
        Category::Abstract,
        Category::Nature,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "Landscape",
            Self::Portrait => "Portrait",
            Self::Animals => "Animals",
            Self::Fantasy => "Fantasy",
            Self::Abstract => "Abstract",
            Self::Nature => "Nature",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive.
    pub fn parse(name: &str) -> GalleryResult<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| GalleryError::validation(format!("unknown category '{name}'")))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub category: Option<Category>,
}

impl Artwork {
    /// `"Jan 15, 2024"`
    pub fn display_date(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }
}

/// Background tints for guestbook notes.
pub const NOTE_PALETTE: [&str; 6] = [
    "#A8E4A0/10",
    "#C5F0BF/20",
    "#A8E4A0/15",
    "#C5F0BF/15",
    "#A8E4A0/8",
    "#C5F0BF/10",
];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GuestMessage {
    pub id: String,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub color: String,
    pub rotation: f64, // degrees
}

impl GuestMessage {
    /// `"Mar 1"`
    pub fn display_date(&self) -> String {
        self.created_at.format("%b %-d").to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArtistStats {
    pub artworks: u64,
    pub awards: u64,
    pub themes: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtistProfile {
    pub name: String,
    pub age: u32,
    pub bio: String,
    pub photo_url: String,
    pub stats: ArtistStats,
}

impl ArtistProfile {
    /// Avatar letter.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// Midnight UTC; an impossible date maps to the epoch.
pub fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// First `max` characters of `s` (character count, not bytes).
pub fn clip_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn unsplash(photo: &str, w: u32, h: u32) -> String {
    format!("https://images.unsplash.com/photo-{photo}?w={w}&h={h}&fit=crop")
}

pub fn sample_artworks() -> Vec<Artwork> {
    let rows = [
        (
            "Rainbow Landscape",
            "A dreamy world with colorful clouds and glowing flowers",
            ("1541961017774-22349e4a1262", 600, 600),
            (2024, 1, 15),
            Category::Landscape,
        ),
        (
            "Fantasy Creature",
            "A flying unicorn with rainbow-colored wings",
            ("1579783902614-a3fb3927b6a5", 600, 800),
            (2024, 2, 1),
            Category::Fantasy,
        ),
        (
            "Abstract Art",
            "Created with my favorite colors, representing happiness",
            ("1549887534-1541e9326642", 600, 500),
            (2024, 2, 10),
            Category::Abstract,
        ),
        (
            "Family Portrait",
            "Our family having a picnic in the park",
            ("1578301978693-85fa9c0320b9", 600, 700),
            (2024, 2, 20),
            Category::Portrait,
        ),
        (
            "Underwater World",
            "Beautiful fish and glowing jellyfish in the deep sea",
            ("1549490349-8643362247b5", 600, 600),
            (2024, 3, 1),
            Category::Nature,
        ),
        (
            "Starry Night",
            "The stars twinkling in the night sky",
            ("1513364776144-60967b0f800f", 600, 800),
            (2024, 3, 10),
            Category::Landscape,
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (title, description, (photo, w, h), (y, m, d), category))| Artwork {
            id: (i + 1).to_string(),
            title: title.to_owned(),
            description: description.to_owned(),
            image_url: unsplash(photo, w, h),
            created_at: utc_date(y, m, d),
            category: Some(category),
        })
        .collect()
}

pub fn sample_messages() -> Vec<GuestMessage> {
    let rows = [
        (
            "Sarah",
            "I love your artwork! The colors are so beautiful. I want to draw like you!",
            1,
            0,
            -1.0,
        ),
        (
            "Aunt Mary",
            "LL, your drawings are getting better and better! Keep up the great work!",
            5,
            1,
            1.0,
        ),
        (
            "Teacher Chen",
            "So happy to see your progress! Keep your passion for art!",
            8,
            2,
            -1.0,
        ),
        (
            "Emma",
            "The rainbow landscape is so beautiful! Can you teach me how to draw it?",
            10,
            3,
            1.0,
        ),
        (
            "Uncle Tom",
            "Such talent at a young age. You will become a great artist!",
            12,
            0,
            -1.0,
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (name, message, day, color, rotation))| GuestMessage {
            id: (i + 1).to_string(),
            name: name.to_owned(),
            message: message.to_owned(),
            created_at: utc_date(2024, 3, day),
            color: NOTE_PALETTE[color].to_owned(),
            rotation,
        })
        .collect()
}

pub fn sample_profile() -> ArtistProfile {
    ArtistProfile {
        name: "LL".to_owned(),
        age: 10,
        bio: "Hi! I'm 10 years old and I've loved drawing since I was little. I enjoy using \
              bright colors to paint fantasy worlds and cute animals. My dream is to become an \
              illustrator when I grow up and create amazing storybooks!"
            .to_owned(),
        photo_url: unsplash("1503454537195-1dcabb73ffb9", 400, 400),
        stats: ArtistStats {
            artworks: 42,
            awards: 5,
            themes: 12,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("fantasy").unwrap(), Category::Fantasy);
        assert_eq!(Category::parse(" Nature ").unwrap(), Category::Nature);
        assert!(Category::parse("").unwrap_err().is_validation());
    }

    #[test]
    fn dates_format_like_the_site() {
        let art = &sample_artworks()[0];
        assert_eq!(art.display_date(), "Jan 15, 2024");
        let note = &sample_messages()[0];
        assert_eq!(note.display_date(), "Mar 1");
    }

    #[test]
    fn sample_data_shape() {
        assert_eq!(sample_artworks().len(), 6);
        let notes = sample_messages();
        assert_eq!(notes.len(), 5);
        assert_eq!(notes[1].color, NOTE_PALETTE[1]);
        assert_eq!(notes[4].name, "Uncle Tom");
        let profile = sample_profile();
        assert_eq!(profile.stats.artworks, 42);
        assert_eq!(profile.initial(), Some('L'));
    }

    #[test]
    fn clip_chars_counts_characters() {
        assert_eq!(clip_chars("héllo", 2), "hé");
        assert_eq!(clip_chars("ab", 20), "ab");
    }

    #[test]
    fn impossible_date_is_epoch() {
        assert_eq!(utc_date(2024, 2, 30), DateTime::<Utc>::default());
    }
}
