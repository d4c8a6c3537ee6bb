use std::{fs::File, io::BufWriter, path::Path};

use blurkit_image::{ImageSize, PixelBuffer};
use image::{
    codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding},
    ExtendedColorType, ImageEncoder, ImageFormat,
};

use crate::error::IoError;

/// Pick the output format from the file extension.
fn format_from_extension(file_path: &Path) -> Result<ImageFormat, IoError> {
    let format = file_path
        .extension()
        .and_then(ImageFormat::from_extension)
        .filter(|f| matches!(f, ImageFormat::Png | ImageFormat::Pnm | ImageFormat::Jpeg));

    format.ok_or_else(|| IoError::InvalidFileExtension(file_path.to_path_buf()))
}

/// Reads an RGB8 image from the given file path.
///
/// The method tries to read from any image format supported by the enabled
/// codecs (PNG, PNM, JPEG). Images with other color types are converted to
/// 8-bit RGB, dropping any alpha channel.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A pixel buffer containing the image data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<PixelBuffer, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    if img.color() != image::ColorType::Rgb8 {
        log::debug!(
            "converting {} from {:?} to rgb8",
            file_path.display(),
            img.color()
        );
    }

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let image = PixelBuffer::from_interleaved(size, img.into_rgb8().as_raw())?;

    Ok(image)
}

/// Writes the given image to the given file path.
///
/// The format is chosen from the file extension: `png`, `ppm` (binary PPM)
/// or `jpg`/`jpeg`.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `image` - The pixel buffer to encode.
pub fn write_image_rgb8(file_path: impl AsRef<Path>, image: &PixelBuffer) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let format = format_from_extension(file_path)?;

    let width = image.width() as u32;
    let height = image.height() as u32;
    let data = image.to_interleaved();

    match format {
        // the pnm encoder defaults to PAM for rgb8, force the P6 pixmap
        ImageFormat::Pnm => {
            let writer = BufWriter::new(File::create(file_path)?);
            PnmEncoder::new(writer)
                .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
                .write_image(&data, width, height, ExtendedColorType::Rgb8)?;
        }
        _ => image::save_buffer_with_format(
            file_path,
            &data,
            width,
            height,
            image::ColorType::Rgb8,
            format,
        )?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blurkit_image::Channel;

    fn gradient_image() -> PixelBuffer {
        let size = ImageSize {
            width: 6,
            height: 4,
        };
        let mut image = PixelBuffer::from_size_val(size, 0).unwrap();
        for y in 0..size.height {
            for x in 0..size.width {
                image
                    .set_pixel(x, y, [(x * 40) as u8, (y * 60) as u8, 200])
                    .unwrap();
            }
        }
        image
    }

    #[test]
    fn read_write_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let image = gradient_image();
        write_image_rgb8(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back, image);
        Ok(())
    }

    #[test]
    fn read_write_ppm() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.ppm");

        let image = gradient_image();
        write_image_rgb8(&file_path, &image)?;

        let bytes = std::fs::read(&file_path)?;
        assert!(bytes.starts_with(b"P6\n"));
        assert!(!bytes.windows(5).any(|w| w == b"WIDTH"));

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back, image);
        Ok(())
    }

    #[test]
    fn read_write_jpeg() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.jpeg");

        write_image_rgb8(&file_path, &gradient_image())?;

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back.width(), 6);
        assert_eq!(image_back.height(), 4);
        assert_eq!(image_back.num_channels(), 3);
        Ok(())
    }

    #[test]
    fn read_grayscale_as_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        image::save_buffer_with_format(
            &file_path,
            &[0, 100, 200, 255],
            2,
            2,
            image::ColorType::L8,
            ImageFormat::Png,
        )?;

        let image = read_image_any_rgb8(&file_path)?;
        for ch in Channel::ALL {
            assert_eq!(image.channel(ch), &[0, 100, 200, 255]);
        }
        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_any_rgb8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn write_invalid_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        for name in ["image.bmp", "image"] {
            let res = write_image_rgb8(tmp_dir.path().join(name), &gradient_image());
            assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        }
        Ok(())
    }
}
