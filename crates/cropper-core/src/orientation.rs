//! Stored image orientation and its EXIF mapping.
//!
//! The orientation says how the stored pixel buffer must be transformed to be
//! displayed upright. Flipping the photo in the editor does not touch pixels: it
//! swaps the orientation for its mirrored counterpart, and the rasterizer applies
//! whatever orientation the crop state carries.

use image::metadata::Orientation as ExifOrientation;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// One of the eight orientations a stored image can carry.
///
/// ```text
///     Up          UpMirrored    Down          DownMirrored
///     EXIF 1      EXIF 2        EXIF 3        EXIF 4
///
///     LeftMirrored  Right       RightMirrored  Left
///     EXIF 5        EXIF 6      EXIF 7         EXIF 8
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageOrientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

impl ImageOrientation {
    /// Indexed by raw code.
    const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpMirrored,
        Self::DownMirrored,
        Self::LeftMirrored,
        Self::RightMirrored,
    ];

    /// Raw code, 0 through 7 in declaration order.
    pub fn raw_value(self) -> u8 {
        self as u8
    }

    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub fn to_exif(self) -> u8 {
        match self {
            Self::Up => 1,
            Self::UpMirrored => 2,
            Self::Down => 3,
            Self::DownMirrored => 4,
            Self::LeftMirrored => 5,
            Self::Right => 6,
            Self::RightMirrored => 7,
            Self::Left => 8,
        }
    }

    /// `None` outside 1..=8.
    pub fn from_exif(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::Up,
            2 => Self::UpMirrored,
            3 => Self::Down,
            4 => Self::DownMirrored,
            5 => Self::LeftMirrored,
            6 => Self::Right,
            7 => Self::RightMirrored,
            8 => Self::Left,
            _ => return None,
        })
    }

    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Self::UpMirrored | Self::DownMirrored | Self::LeftMirrored | Self::RightMirrored
        )
    }

    /// The orientation that displays this one mirrored left to right.
    /// Applying it twice gives back the original.
    pub fn mirrored(self) -> Self {
        match self {
            Self::Up => Self::UpMirrored,
            Self::UpMirrored => Self::Up,
            Self::Down => Self::DownMirrored,
            Self::DownMirrored => Self::Down,
            Self::Right => Self::LeftMirrored,
            Self::LeftMirrored => Self::Right,
            Self::Left => Self::RightMirrored,
            Self::RightMirrored => Self::Left,
        }
    }

    /// Whether displaying upright swaps the stored width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Left | Self::Right | Self::LeftMirrored | Self::RightMirrored
        )
    }

    /// Rearrange stored pixels into display order.
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        if self == Self::Up {
            return image.clone();
        }
        let mut oriented = image.clone();
        if let Some(exif) = ExifOrientation::from_exif(self.to_exif()) {
            oriented.apply_orientation(exif);
        }
        oriented
    }
}
