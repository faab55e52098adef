use crate::bits::BitString;

/// One image's worth of a bit string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageChunk<'a> {
    pub bits: &'a str,
    pub name: String,
    pub index: usize,
}

/// Number of images needed to hold `total_bits`.
///
/// Zero capacity holds nothing, so it plans zero images.
pub fn image_count(total_bits: usize, max_bits_per_image: usize) -> usize {
    if max_bits_per_image == 0 {
        return 0;
    }
    total_bits.div_ceil(max_bits_per_image)
}

pub fn image_name(width: u32, height: u32, index: usize) -> String {
    format!("encrypted_image_{width}x{height}_({index})")
}

/// Slices out the bits for image `index`.
///
/// An index past the end yields an empty slice.
pub fn chunk_for(
    bits: &BitString,
    index: usize,
    max_bits_per_image: usize,
    width: u32,
    height: u32,
) -> ImageChunk<'_> {
    let bits = bits.as_str();
    let start = index.saturating_mul(max_bits_per_image).min(bits.len());
    let end = start.saturating_add(max_bits_per_image).min(bits.len());

    ImageChunk {
        bits: &bits[start..end],
        name: image_name(width, height, index),
        index,
    }
}

/// Every chunk of `bits`, in index order.
pub fn chunks(
    bits: &BitString,
    max_bits_per_image: usize,
    width: u32,
    height: u32,
) -> impl Iterator<Item = ImageChunk<'_>> {
    (0..image_count(bits.len(), max_bits_per_image))
        .map(move |index| chunk_for(bits, index, max_bits_per_image, width, height))
}
