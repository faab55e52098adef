use std::{fs, path::PathBuf};

use crate::{
    config::{ImageConfig, Termination, BITS_PER_PIXEL},
    error::{Error, Result},
    png::Png,
};

/// Returns the (at most two character) pair starting at `cursor`, clipped to
/// the end of `bits`.
fn pair_at(bits: &str, cursor: usize) -> &str {
    let start = cursor.min(bits.len());
    let end = cursor.saturating_add(BITS_PER_PIXEL).min(bits.len());
    &bits[start..end]
}

/// Paints `bits` onto a fresh surface, one bit pair per pixel in row-major
/// order.
pub fn paint(bits: &str, config: &ImageConfig) -> Png {
    let mut image = Png::new_rgb(config.width, config.height);

    let limit = match config.termination {
        Termination::Legacy => bits.len(),
        Termination::Exact => bits.len() / BITS_PER_PIXEL,
    };

    let mut visited = 0usize;
    let mut cursor = 0usize;
    'rows: for y in 0..config.height {
        for x in 0..config.width {
            if config.termination == Termination::Exact && visited >= limit {
                break 'rows;
            }

            if let Some(colour) = config.color_for(pair_at(bits, cursor)) {
                image.put_pixel(x, y, colour);
            }

            cursor += BITS_PER_PIXEL;
            visited += 1;
            // Checked after painting, so an empty slice still visits one pixel.
            if visited >= limit {
                break 'rows;
            }
        }
    }

    log::debug!(
        "painted {} of {} pixels from {} bits",
        visited,
        config.width as usize * config.height as usize,
        bits.len()
    );
    image
}

/// Paints `bits` and saves it as `{save_dir}/{name}.png`, returning the
/// written path.
///
/// With `cancel` set nothing is touched and `Ok(None)` is returned.
pub fn render(
    bits: &str,
    name: &str,
    config: &ImageConfig,
    cancel: bool,
) -> Result<Option<PathBuf>> {
    if cancel {
        log::trace!("render of {name} cancelled");
        return Ok(None);
    }

    let image = paint(bits, config);

    fs::create_dir_all(&config.save_dir).map_err(|source| Error::CreateDir {
        path: config.save_dir.clone(),
        source,
    })?;

    let path = config.save_dir.join(format!("{name}.png"));
    image.save(&path).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;

    log::info!("wrote {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgb;

    fn config(width: u32, height: u32, termination: Termination) -> ImageConfig {
        ImageConfig {
            termination,
            ..ImageConfig::new(width, height, "unused")
        }
    }

    #[test]
    fn pair_is_clipped() {
        assert_eq!(pair_at("0110", 0), "01");
        assert_eq!(pair_at("011", 2), "1");
        assert_eq!(pair_at("01", 2), "");
        assert_eq!(pair_at("01", 10), "");
    }

    #[test]
    fn maps_pairs_in_row_major_order() {
        let image = paint("0110", &config(2, 1, Termination::Legacy));
        assert_eq!(image.pixel(0, 0), Rgb::RED);
        assert_eq!(image.pixel(1, 0), Rgb::GREEN);

        let image = paint("00011011", &config(2, 2, Termination::Legacy));
        assert_eq!(image.pixel(0, 0), Rgb::WHITE);
        assert_eq!(image.pixel(1, 0), Rgb::RED);
        assert_eq!(image.pixel(0, 1), Rgb::GREEN);
        assert_eq!(image.pixel(1, 1), Rgb::BLUE);
    }

    #[test]
    fn trailing_single_bit_stays_black() {
        let image = paint("111", &config(3, 1, Termination::Legacy));
        assert_eq!(image.pixel(0, 0), Rgb::BLUE);
        assert_eq!(image.pixel(1, 0), Rgb::BLACK);
        assert_eq!(image.pixel(2, 0), Rgb::BLACK);
    }

    #[test]
    fn empty_slice_is_all_black() {
        for termination in [Termination::Legacy, Termination::Exact] {
            let image = paint("", &config(2, 2, termination));
            assert_eq!(image, Png::new_rgb(2, 2));
        }
    }

    #[test]
    fn slice_longer_than_grid_is_truncated() {
        let image = paint("0101010111", &config(2, 1, Termination::Legacy));
        assert_eq!(image.pixel(0, 0), Rgb::RED);
        assert_eq!(image.pixel(1, 0), Rgb::RED);
    }

    #[test]
    fn legacy_and_exact_paint_the_same_pixels() {
        for bits in ["", "0", "01", "011", "0110", "01101100", "1101001011"] {
            let legacy = paint(bits, &config(3, 3, Termination::Legacy));
            let exact = paint(bits, &config(3, 3, Termination::Exact));
            assert_eq!(legacy, exact, "bits {bits:?}");
        }
    }

    #[test]
    fn cancel_has_no_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let save_dir = dir.path().join("never").join("created");
        let config = ImageConfig::new(2, 1, &save_dir);

        assert!(render("0110", "x", &config, true).unwrap().is_none());
        assert!(!save_dir.exists());
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = ImageConfig::new(2, 1, dir.path().join("a").join("b"));

        let path = render("0110", "img", &config, false).unwrap().unwrap();
        assert_eq!(path, dir.path().join("a").join("b").join("img.png"));
        assert!(path.is_file());
    }

    #[test]
    fn directory_creation_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();
        let config = ImageConfig::new(2, 1, blocker.join("sub"));

        let err = render("0110", "img", &config, false).unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. }), "{err}");
    }
}
