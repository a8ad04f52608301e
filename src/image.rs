use crate::refs::{ObjectReferences, RefType};
use crate::Error;
use image::DynamicImage;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// A raster image that can be embedded in the document. Greyscale images are
/// embedded in the DeviceGray colour space; everything else is flattened to
/// DeviceRGB, with an alpha channel preserved as a soft mask.
pub struct Image {
    pub image: DynamicImage,
}

struct EncodeOutput {
    greyscale: bool,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    pub fn new(image: DynamicImage) -> Image {
        Image { image }
    }

    /// Load an image from a file on disk, sniffing the format from its contents
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Image, Error> {
        let data = std::fs::read(path)?;
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;
        Ok(Image { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    fn encode(&self) -> EncodeOutput {
        use image::GenericImageView;
        let level = CompressionLevel::DefaultLevel as u8;

        if let DynamicImage::ImageLuma8(grey) = &self.image {
            return EncodeOutput {
                greyscale: true,
                bytes: compress_to_vec_zlib(grey.as_raw(), level),
                mask: None,
            };
        }

        let mask = self.image.color().has_alpha().then(|| {
            let alphas: Vec<_> = self.image.pixels().map(|p| (p.2).0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });

        EncodeOutput {
            greyscale: false,
            bytes: compress_to_vec_zlib(self.image.to_rgb8().as_raw(), level),
            mask,
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), Error> {
        let id = refs.gen(RefType::Image(image_index));

        let encoded = self.encode();

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(Filter::FlateDecode);
        image.width(self.image.width() as i32);
        image.height(self.image.height() as i32);
        if encoded.greyscale {
            image.color_space().device_gray();
        } else {
            image.color_space().device_rgb();
        }
        image.bits_per_component(8);

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));
        if let Some(mask_id) = &mask_id {
            image.s_mask(*mask_id);
        }

        image.finish();

        if let Some(mask_id) = mask_id {
            let mask_bytes = encoded.mask.as_ref().expect("mask bytes exist");
            let mut s_mask = writer.image_xobject(mask_id, mask_bytes.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.image.width() as i32);
            s_mask.height(self.image.height() as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }
}
