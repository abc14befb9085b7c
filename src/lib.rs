#![forbid(unsafe_code)]

pub mod admin;
pub mod anim;
pub mod anim_ease;
pub mod config;
pub mod core;
pub mod counter;
pub mod error;
pub mod latch;
pub mod model;
pub mod navigation;
pub mod page;
pub mod parallax;
pub mod pointer;
pub mod reveal;
pub mod scope;
pub mod sections;
pub mod share;
pub mod stage;
pub mod surface;
pub mod upload;
pub mod viewport;

pub use admin::{AdminFlow, AdminState, ArtworkForm, ArtworkRecord};
pub use anim::{Property, PropertyMap, Tween, props};
pub use anim_ease::Ease;
pub use config::{Config, DocumentStoreConfig, ImageHostConfig};
pub use core::{ElementId, Layout, PageLayout, Point, Rect, Vec2, Viewport};
pub use counter::{CounterAnimator, CounterHandle, CounterSnapshot, CounterSpec};
pub use error::{GalleryError, GalleryResult};
pub use latch::Latch;
pub use model::{ArtistProfile, Artwork, Category, GuestMessage};
pub use navigation::{SectionId, SmoothScroll};
pub use page::{Page, default_layout};
pub use parallax::{ParallaxDriver, ParallaxHandle, ParallaxSpec};
pub use pointer::{PointerHandle, PointerOrigin, PointerParallaxDriver, PointerSpec};
pub use reveal::{RevealAnimator, RevealHandle, RevealSpec, stagger};
pub use scope::AnimationScope;
pub use sections::Section;
pub use share::{ShareHost, ShareOutcome, SharePayload};
pub use stage::{FrameReport, RegistrationCounts, Stage};
pub use surface::{PropertySurface, Surface};
#[cfg(feature = "network")]
pub use upload::CloudinaryHost;
pub use upload::{ImageFile, ImageHost};
pub use viewport::{Anchor, Observation, ObserverId, Trigger, ViewportObserver};
