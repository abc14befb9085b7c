use crate::error::{GalleryError, GalleryResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    #[default]
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
}

impl Ease {
    pub const ALL: [Ease; 10] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
        }
    }

    /// Accepts the variant names and the `powerN.dir` aliases used in the site markup.
    pub fn parse(name: &str) -> GalleryResult<Self> {
        let name = name.trim().to_ascii_lowercase();
        let ease = match name.as_str() {
            "linear" | "none" => Self::Linear,
            "inquad" | "power1.in" => Self::InQuad,
            "outquad" | "power1.out" | "power1" => Self::OutQuad,
            "inoutquad" | "power1.inout" => Self::InOutQuad,
            "incubic" | "power2.in" => Self::InCubic,
            "outcubic" | "power2.out" | "power2" => Self::OutCubic,
            "inoutcubic" | "power2.inout" => Self::InOutCubic,
            "inquart" | "power3.in" => Self::InQuart,
            "outquart" | "power3.out" | "power3" => Self::OutQuart,
            "inoutquart" | "power3.inout" => Self::InOutQuart,
            other => {
                return Err(GalleryError::animation(format!("unknown ease '{other}'")));
            }
        };
        Ok(ease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_stable() {
        for ease in Ease::ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for ease in Ease::ALL {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b);
            assert!(b < c);
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Ease::OutCubic.apply(-3.0), 0.0);
        assert_eq!(Ease::OutCubic.apply(7.0), 1.0);
    }

    #[test]
    fn parse_accepts_power_aliases() {
        assert_eq!(Ease::parse("power2.out").unwrap(), Ease::OutCubic);
        assert_eq!(Ease::parse(" Power3.Out ").unwrap(), Ease::OutQuart);
        assert_eq!(Ease::parse("OutQuad").unwrap(), Ease::OutQuad);
        assert!(Ease::parse("bounce").is_err());
    }
}
