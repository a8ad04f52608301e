use crate::Error;
use image::{DynamicImage, GrayImage, Luma};
use qrcode::{EcLevel, QrCode};
use sha2::{Digest, Sha256};

/// How many pixels each QR module is rendered at. The codes are scaled when
/// they are placed on the page, so this only affects print sharpness.
const MODULE_SCALE: u32 = 10;

/// Deterministic cache key for a URL's code image: the lowercase-hex SHA-256
/// of the URL bytes. The same URL always yields the same key, so repeated
/// URLs share a single embedded image and re-runs are idempotent.
pub fn qr_key(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}

/// Encode a URL as a QR code and render it into a black-and-white greyscale
/// image, with no quiet border (the card's background asset frames the code).
pub fn qr_image(url: &str) -> Result<DynamicImage, Error> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let img_size = module_count * MODULE_SCALE;
    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, colour) in modules.iter().enumerate() {
        if *colour != qrcode::Color::Dark {
            continue;
        }
        let x = (i as u32) % module_count;
        let y = (i as u32) / module_count;
        for dx in 0..MODULE_SCALE {
            for dy in 0..MODULE_SCALE {
                img.put_pixel(x * MODULE_SCALE + dx, y * MODULE_SCALE + dy, Luma([0u8]));
            }
        }
    }

    Ok(DynamicImage::ImageLuma8(img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_deterministic() {
        let a = qr_key("http://example.com/x");
        let b = qr_key("http://example.com/x");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn distinct_urls_have_distinct_keys() {
        assert_ne!(qr_key("http://example.com/x"), qr_key("http://example.com/y"));
    }

    #[test]
    fn produces_a_square_image() {
        let img = qr_image("https://example.com").expect("url encodes");
        assert!(img.width() > 0);
        assert_eq!(img.width(), img.height());
        assert_eq!(img.width() % MODULE_SCALE, 0);
    }

    #[test]
    fn image_contains_dark_and_light_modules() {
        use image::GenericImageView;
        let img = qr_image("https://example.com").expect("url encodes");
        let mut seen = std::collections::HashSet::new();
        for (_, _, p) in img.pixels() {
            seen.insert(p.0[0]);
        }
        assert!(seen.contains(&0));
        assert!(seen.contains(&255));
    }
}
