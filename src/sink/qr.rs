use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{QrCode, render::svg};

use crate::error::Error;

use super::{ImageEncoder, Images};

const DEFAULT_SIZE: u32 = 256;

/// QR code renderer, PNG for raster and SVG for vector output.
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    pub min_size: u32,
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_SIZE,
        }
    }
}

impl ImageEncoder for QrEncoder {
    type Error = Error;

    fn encode(&self, text: &str) -> Result<Images, Self::Error> {
        let code = QrCode::new(text.as_bytes())?;

        let raster = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_size, self.min_size)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(raster).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        let svg = code
            .render::<svg::Color>()
            .min_dimensions(self.min_size, self.min_size)
            .build();

        Ok(Images { png, svg })
    }
}

/// Writes `<base>.png` and `<base>.svg`.
pub fn save(images: &Images, base: &Path) -> std::io::Result<(PathBuf, PathBuf)> {
    let png_path = with_suffix(base, ".png");
    let svg_path = with_suffix(base, ".svg");

    fs::write(&png_path, &images.png)?;
    fs::write(&svg_path, &images.svg)?;

    Ok((png_path, svg_path))
}

// `with_extension` would eat a dotted base name such as `wg.home`
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(suffix);
    path.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_qr_encode() {
        let images = QrEncoder::default().encode("sn://wg?eJyrVkrOz0nJTEnNS1GyUs").unwrap();

        assert_eq!(images.png[..8], PNG_SIGNATURE);
        assert!(images.svg.contains("<svg"));
    }

    #[test]
    fn test_qr_too_long() {
        let text = "x".repeat(8000);

        assert!(matches!(
            QrEncoder::default().encode(&text),
            Err(Error::QrError(_))
        ));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let images = Images {
            png: PNG_SIGNATURE.to_vec(),
            svg: "<svg/>".to_string(),
        };

        let (png, svg) = save(&images, &dir.path().join("wg.home")).unwrap();

        assert_eq!(png, dir.path().join("wg.home.png"));
        assert_eq!(fs::read(png).unwrap(), PNG_SIGNATURE);
        assert_eq!(fs::read_to_string(svg).unwrap(), "<svg/>");
    }
}
