use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Aspect ratio choices offered to the user.
///
/// Serialized as a short token: `ORIGINAL`, `FREEFORM`, `SQUARE` or `W:H`.
/// Parsing is lenient: anything unrecognized becomes [`AspectRatio::FreeForm`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum AspectRatio {
    /// Ratio of the source image, following the current quarter-turn rotation.
    Original,
    /// Unlocked; edge drags resize each axis independently.
    #[default]
    FreeForm,
    Square,
    Ratio { width: u32, height: u32 },
}

/// Catalog shown by a fresh session.
pub const DEFAULT_CATALOG: [AspectRatio; 9] = [
    AspectRatio::Original,
    AspectRatio::FreeForm,
    AspectRatio::Square,
    AspectRatio::Ratio { width: 9, height: 16 },
    AspectRatio::Ratio { width: 8, height: 10 },
    AspectRatio::Ratio { width: 5, height: 7 },
    AspectRatio::Ratio { width: 3, height: 4 },
    AspectRatio::Ratio { width: 3, height: 5 },
    AspectRatio::Ratio { width: 2, height: 3 },
];

impl AspectRatio {
    /// The same ratio after a quarter turn: `W:H` becomes `H:W`.
    pub fn rotated(self) -> Self {
        match self {
            Self::Ratio { width, height } => Self::Ratio {
                width: height,
                height: width,
            },
            other => other,
        }
    }

    pub fn is_locked(self) -> bool {
        self != Self::FreeForm
    }

    /// Numeric width / height. `Original` needs the (already rotated) image size;
    /// `FreeForm` has no value.
    pub fn value(self, image_size: Size) -> Option<f64> {
        let v = match self {
            Self::Original => image_size.aspect(),
            Self::FreeForm => return None,
            Self::Square => 1.0,
            Self::Ratio { width, height } => width as f64 / height as f64,
        };
        (v.is_finite() && v > 0.0).then_some(v)
    }

    pub fn to_token(self) -> String {
        self.to_string()
    }

    pub fn from_token(token: &str) -> Self {
        match token {
            "ORIGINAL" => Self::Original,
            "FREEFORM" => Self::FreeForm,
            "SQUARE" => Self::Square,
            _ => parse_ratio(token).unwrap_or(Self::FreeForm),
        }
    }
}

fn parse_ratio(token: &str) -> Option<AspectRatio> {
    let (w, h) = token.split_once(':')?;
    let width: u32 = w.parse().ok()?;
    let height: u32 = h.parse().ok()?;
    (width > 0 && height > 0).then_some(AspectRatio::Ratio { width, height })
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("ORIGINAL"),
            Self::FreeForm => f.write_str("FREEFORM"),
            Self::Square => f.write_str("SQUARE"),
            Self::Ratio { width, height } => write!(f, "{width}:{height}"),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl From<&str> for AspectRatio {
    fn from(s: &str) -> Self {
        Self::from_token(s)
    }
}

impl From<String> for AspectRatio {
    fn from(s: String) -> Self {
        Self::from_token(&s)
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.to_token()
    }
}
