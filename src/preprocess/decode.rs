/// Image header probing: format and natural size without decoding pixels.

use image::{ImageFormat, ImageReader};
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn mime(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Sniff the format from magic bytes.
pub fn sniff_format(data: &[u8]) -> Option<ImageFormat> {
    image::guess_format(data).ok()
}

/// Read the header of an encoded image.
pub fn probe_image(data: &[u8]) -> Result<ImageInfo, String> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Image probe: {e}"))?;

    let format = reader
        .format()
        .ok_or_else(|| "Image probe: unrecognised format".to_string())?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| format!("Image header: {e}"))?;

    Ok(ImageInfo {
        format,
        width,
        height,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    pub(crate) fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(width, height, Rgb([40, 160, 60]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn probes_png_and_jpeg() {
        let info = probe_image(&encoded(32, 16, ImageFormat::Png)).unwrap();
        assert_eq!((info.width, info.height), (32, 16));
        assert_eq!(info.mime(), "image/png");

        let info = probe_image(&encoded(20, 10, ImageFormat::Jpeg)).unwrap();
        assert_eq!((info.width, info.height), (20, 10));
        assert_eq!(info.mime(), "image/jpeg");
    }

    #[test]
    fn webp_and_bmp_headers_are_probed() {
        let bmp = encoded(12, 7, ImageFormat::Bmp);
        let info = probe_image(&bmp).unwrap();
        assert_eq!((info.width, info.height, info.mime()), (12, 7, "image/bmp"));

        // 1x1 lossless WebP.
        let webp: &[u8] = b"RIFF\x1a\x00\x00\x00WEBPVP8L\x0d\x00\x00\x00\x2f\x00\x00\x00\x10\x07\x10\x11\x11\x88\x88\xfe\x07\x00";
        let info = probe_image(webp).unwrap();
        assert_eq!((info.width, info.height, info.mime()), (1, 1, "image/webp"));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(probe_image(b"definitely not an image").is_err());
        assert_eq!(sniff_format(b"nope"), None);
    }
}
