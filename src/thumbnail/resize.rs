use std::io::Cursor;

use bytes::Bytes;
use image::imageops::FilterType;
use image::GenericImageView;

/// Scale an encoded image to an exact pixel width, preserving aspect ratio.
///
/// Output is re-encoded in the source format (guessed from the bytes, not
/// the file name). Upscales when the original is narrower than the target.
pub fn resize_to_width(data: &[u8], width: u32) -> Result<Bytes, anyhow::Error> {
    let reader = image::ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    let format = reader.format().unwrap_or(image::ImageFormat::Png);
    let img = reader.decode()?;

    let (orig_w, orig_h) = img.dimensions();
    let height = ((orig_h as u64 * width as u64) / orig_w.max(1) as u64).max(1) as u32;
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);

    let mut buffer = Vec::new();
    resized.write_to(&mut Cursor::new(&mut buffer), format)?;
    Ok(Bytes::from(buffer))
}
