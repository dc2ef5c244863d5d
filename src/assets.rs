//! Pre-rendered tick and numeral backgrounds.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::ClockError;
use crate::face::{Style, StyleFlags};

/// Resolution tier of a background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 3] = [SizeBucket::Small, SizeBucket::Medium, SizeBucket::Large];

    pub fn for_diameter(diameter: f64) -> Self {
        if diameter <= 256.0 {
            SizeBucket::Small
        } else if diameter <= 512.0 {
            SizeBucket::Medium
        } else {
            SizeBucket::Large
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            SizeBucket::Small => "Small",
            SizeBucket::Medium => "Medium",
            SizeBucket::Large => "Large",
        }
    }
}

/// Which static layers a background image carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundKind {
    NumbersAndTicks,
    Numbers,
    Ticks,
}

impl BackgroundKind {
    pub const ALL: [BackgroundKind; 3] = [
        BackgroundKind::NumbersAndTicks,
        BackgroundKind::Numbers,
        BackgroundKind::Ticks,
    ];

    pub fn for_style(style: StyleFlags) -> Option<Self> {
        match (style.contains(Style::Numbered), style.contains(Style::Ticked)) {
            (true, true) => Some(BackgroundKind::NumbersAndTicks),
            (true, false) => Some(BackgroundKind::Numbers),
            (false, true) => Some(BackgroundKind::Ticks),
            (false, false) => None,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            BackgroundKind::NumbersAndTicks => "ClockStaticBackground",
            BackgroundKind::Numbers => "ClockNumbersStaticBackground",
            BackgroundKind::Ticks => "ClockTicksStaticBackground",
        }
    }
}

/// Asset name for a kind and bucket, e.g. `ClockTicksStaticBackgroundMedium`.
pub fn asset_name(kind: BackgroundKind, bucket: SizeBucket) -> String {
    format!("{}{}", kind.prefix(), bucket.suffix())
}

/// A decoded RGBA8 image.
#[derive(Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl BackgroundImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Supplies static backgrounds in place of procedural ticks and numerals.
pub trait BackgroundProvider {
    fn background(&self, kind: BackgroundKind, bucket: SizeBucket) -> Option<Arc<BackgroundImage>>;
}

/// Backgrounds read from `<name>.png` files in one directory.
#[derive(Debug, Default)]
pub struct AssetDirectory {
    images: HashMap<(BackgroundKind, SizeBucket), Arc<BackgroundImage>>,
}

impl AssetDirectory {
    /// Loads every background present in `dir`; missing files are skipped.
    pub fn load(dir: &Path) -> Result<Self, ClockError> {
        if !dir.is_dir() {
            return Err(ClockError::Config(format!(
                "asset directory {} does not exist",
                dir.display()
            )));
        }
        let mut images = HashMap::new();
        for kind in BackgroundKind::ALL {
            for bucket in SizeBucket::ALL {
                let path = dir.join(format!("{}.png", asset_name(kind, bucket)));
                if !path.is_file() {
                    continue;
                }
                let decoded = image::open(&path)?.into_rgba8();
                log::debug!(
                    "loaded {} ({}x{})",
                    path.display(),
                    decoded.width(),
                    decoded.height()
                );
                images.insert(
                    (kind, bucket),
                    Arc::new(BackgroundImage {
                        width: decoded.width(),
                        height: decoded.height(),
                        pixels: decoded.into_raw(),
                    }),
                );
            }
        }
        log::info!("{} background assets loaded from {}", images.len(), dir.display());
        Ok(Self { images })
    }

    pub fn insert(&mut self, kind: BackgroundKind, bucket: SizeBucket, image: BackgroundImage) {
        self.images.insert((kind, bucket), Arc::new(image));
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl BackgroundProvider for AssetDirectory {
    fn background(&self, kind: BackgroundKind, bucket: SizeBucket) -> Option<Arc<BackgroundImage>> {
        self.images.get(&(kind, bucket)).cloned()
    }
}
