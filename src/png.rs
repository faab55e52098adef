use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use libflate::zlib::{EncodeOptions, Encoder};

use crate::config::Rgb;

const HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

// Upper bound on compressed bytes carried by a single IDAT chunk.
const IDAT_LEN: usize = 8 * 1024;

const BIT_DEPTH: u8 = 8;
const COLOUR_TYPE_RGB: u8 = 2;
const CHANNELS: usize = 3;

#[derive(Clone, Debug)]
pub struct Chunk {
    pub name: [u8; 4],
    pub data: Vec<u8>,
    pub crc: u32,
}

impl Chunk {
    pub fn crc(name: &[u8; 4], data: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(name);
        hasher.update(data);
        hasher.finalize()
    }

    #[cfg(test)]
    pub fn check_crc(&self) -> bool {
        Chunk::crc(&self.name, &self.data) == self.crc
    }

    pub fn from_data(name: &[u8; 4], data: &[u8]) -> Chunk {
        Chunk {
            name: *name,
            data: data.to_owned(),
            crc: Chunk::crc(name, data),
        }
    }

    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.size().to_be_bytes())?;
        out.write_all(&self.name)?;
        out.write_all(&self.data)?;
        out.write_all(&self.crc.to_be_bytes())
    }
}

/// An 8-bit RGB raster surface that serialises to PNG.
///
/// Every pixel starts out black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Png {
    dimension: (u32, u32),
    rows: Vec<Vec<u8>>,
}

impl Png {
    pub fn new_rgb(width: u32, height: u32) -> Png {
        let bytes_per_row = width as usize * CHANNELS;

        Png {
            dimension: (width, height),
            rows: vec![vec![0x00; bytes_per_row]; height as usize],
        }
    }

    pub fn dimension(&self) -> (u32, u32) {
        self.dimension
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, colour: Rgb) {
        let offset = x as usize * CHANNELS;
        let row = &mut self.rows[y as usize];
        row[offset..offset + CHANNELS].copy_from_slice(&[colour.r, colour.g, colour.b]);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let offset = x as usize * CHANNELS;
        let px = &self.rows[y as usize][offset..offset + CHANNELS];
        Rgb::new(px[0], px[1], px[2])
    }

    fn ihdr(&self) -> Chunk {
        let (width, height) = self.dimension;
        let mut data = Vec::with_capacity(13);
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[
            BIT_DEPTH,
            COLOUR_TYPE_RGB,
            0, // Type 0 compression
            0, // Type 0 filtering
            0, // No interlacing
        ]);
        Chunk::from_data(b"IHDR", &data)
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&HEADER)?;
        self.ihdr().write_to(out)?;

        let row_len = self.rows.first().map_or(0, Vec::len);
        let mut uncompressed = Vec::with_capacity(self.rows.len() * (row_len + 1));
        for row in &self.rows {
            uncompressed.push(0x00); // No filter
            uncompressed.extend_from_slice(row);
        }

        let data = Self::compress_block(&uncompressed)?;
        for block in data.chunks(IDAT_LEN) {
            Chunk::from_data(b"IDAT", block).write_to(out)?;
        }

        Chunk::from_data(b"IEND", &[]).write_to(out)
    }

    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Writes the image to `path`, truncating any existing file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(&mut file)?;
        file.flush()
    }

    fn compress_block(data: &[u8]) -> io::Result<Vec<u8>> {
        // Fixed codes: libflate's dynamic tables fail to inflate in some decoders
        // once images get large.
        let options = EncodeOptions::new().fixed_huffman_codes();
        let mut encoder = Encoder::with_options(Vec::new(), options)?;
        encoder.write_all(data)?;
        encoder.finish().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iend_crc_matches_png_constant() {
        assert_eq!(Chunk::from_data(b"IEND", &[]).crc, 0xAE426082);
    }

    #[test]
    fn new_surface_is_black() {
        let png = Png::new_rgb(3, 2);
        assert_eq!(png.dimension(), (3, 2));
        assert_eq!(png.pixel(2, 1), Rgb::BLACK);
    }

    #[test]
    fn put_pixel_only_touches_target() {
        let mut png = Png::new_rgb(2, 2);
        png.put_pixel(1, 0, Rgb::new(1, 2, 3));

        assert_eq!(png.pixel(1, 0), Rgb::new(1, 2, 3));
        assert_eq!(png.pixel(0, 0), Rgb::BLACK);
        assert_eq!(png.pixel(1, 1), Rgb::BLACK);
    }

    #[test]
    fn encoded_stream_has_signature_and_valid_ihdr() {
        let bytes = Png::new_rgb(4, 5).to_bytes().unwrap();
        assert_eq!(&bytes[..8], &HEADER);

        // length(4) + "IHDR"(4) + data(13) + crc(4)
        assert_eq!(&bytes[8..12], &13u32.to_be_bytes());
        assert_eq!(&bytes[12..16], b"IHDR");
        let ihdr = Chunk {
            name: *b"IHDR",
            data: bytes[16..29].to_vec(),
            crc: u32::from_be_bytes(bytes[29..33].try_into().unwrap()),
        };
        assert!(ihdr.check_crc());
        assert_eq!(&ihdr.data[..4], &4u32.to_be_bytes());
        assert_eq!(&ihdr.data[4..8], &5u32.to_be_bytes());
        assert_eq!(ihdr.data[8], BIT_DEPTH);
        assert_eq!(ihdr.data[9], COLOUR_TYPE_RGB);

        assert_eq!(&bytes[bytes.len() - 8..bytes.len() - 4], b"IEND");
    }
}
