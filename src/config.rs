use std::{env, fmt, path::PathBuf, str::FromStr};

const DEFAULT_SUBFOLDER: &str = "Downloads/Encrypted_images_folder";

/// Bits carried by one pixel.
pub const BITS_PER_PIXEL: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour `{0}`, expected `r,g,b` with each channel in 0..=255")]
pub struct ParseRgbError(String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_owned());

        let mut channels = s.split(',').map(|c| c.trim().parse::<u8>());
        let mut next = || -> Result<u8, ParseRgbError> {
            channels.next().ok_or_else(err)?.map_err(|_| err())
        };
        let rgb = Rgb::new(next()?, next()?, next()?);

        if channels.next().is_some() {
            return Err(err());
        }
        Ok(rgb)
    }
}

/// How the pixel loop decides when to stop visiting pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Termination {
    /// Stop once the number of visited pixels reaches the slice's *character*
    /// length. This visits up to twice as many pixels as there are bit pairs;
    /// the surplus pixels read an empty remainder and stay black.
    #[default]
    Legacy,
    /// Stop after `len / 2` pixels, one per complete bit pair.
    Exact,
}

/// Geometry, palette and destination for rendered images.
///
/// Passed by reference to every operation; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    /// Colour for the `01` bit pair.
    pub first_color: Rgb,
    /// Colour for the `10` bit pair.
    pub second_color: Rgb,
    /// Colour for the `11` bit pair.
    pub third_color: Rgb,
    pub save_dir: PathBuf,
    pub termination: Termination,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            first_color: Rgb::RED,
            second_color: Rgb::GREEN,
            third_color: Rgb::BLUE,
            save_dir: default_save_dir(),
            termination: Termination::default(),
        }
    }
}

impl ImageConfig {
    pub fn new(width: u32, height: u32, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            width,
            height,
            save_dir: save_dir.into(),
            ..Self::default()
        }
    }

    /// Number of bits a single image can hold.
    pub fn max_bits(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(BITS_PER_PIXEL)
    }

    /// Maps a bit pair to its pixel colour.
    ///
    /// Anything other than a complete pair yields `None` and the pixel keeps
    /// its default colour.
    pub fn color_for(&self, pair: &str) -> Option<Rgb> {
        match pair {
            "00" => Some(Rgb::WHITE),
            "01" => Some(self.first_color),
            "10" => Some(self.second_color),
            "11" => Some(self.third_color),
            _ => None,
        }
    }
}

/// `~/Downloads/Encrypted_images_folder`, or a relative path when no home
/// directory is known.
pub fn default_save_dir() -> PathBuf {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_SUBFOLDER)
}
