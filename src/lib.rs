//! Encodes text as a sequence of PNG images, two bits per pixel.
//!
//! Text is first turned into a [`BitString`] (8 binary digits per character),
//! which is then split into chunks of at most [`ImageConfig::max_bits`] bits.
//! Each chunk is painted row by row: `00` is white, `01`, `10` and `11` map to
//! the configured colours, and any pixel without a complete pair stays black.
//!
//! ```no_run
//! use text_to_image::{encode_text, ImageConfig};
//!
//! let config = ImageConfig::new(64, 64, "out");
//! for path in encode_text("hello", &config)? {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), text_to_image::Error>(())
//! ```

use std::path::PathBuf;

pub use crate::bits::{text_to_bits, BitString};
pub use crate::chunk::{chunk_for, chunks, image_count, image_name, ImageChunk};
pub use crate::config::{default_save_dir, ImageConfig, ParseRgbError, Rgb, Termination};
pub use crate::error::{Error, Result};
pub use crate::png::Png;
pub use crate::raster::{paint, render};

mod bits;
mod chunk;
mod config;
mod error;
mod png;
mod raster;

/// Encodes `text` and writes one image per chunk, returning the written
/// paths in index order.
///
/// Stops at the first failure; images already written are left in place.
pub fn encode_text(text: &str, config: &ImageConfig) -> Result<Vec<PathBuf>> {
    let bits = text_to_bits(text);
    let max_bits = config.max_bits();
    log::debug!(
        "encoding {} bits into {} image(s)",
        bits.len(),
        image_count(bits.len(), max_bits)
    );

    let mut written = Vec::new();
    for chunk in chunks(&bits, max_bits, config.width, config.height) {
        if let Some(path) = render(chunk.bits, &chunk.name, config, false)? {
            written.push(path);
        }
    }
    Ok(written)
}
