//! Image decoding and downsampling into a [`PixelGrid`].
//!
//! Alpha is dropped without compositing, then the image is resampled with
//! bilinear (triangle) filtering to the configured sample size. Downsampling
//! bounds classification cost and smooths noise.
//!
//! A PNG cut short (a partial download, say) is still classified: the rows
//! that decoded are kept and the missing ones are black.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hue_sort_core::{ClassifierConfig, PixelGrid, SortError};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use tracing::warn;

/// Extensions (lowercase, without dot) treated as images when scanning.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff"];

/// True if `path` has one of [`IMAGE_EXTENSIONS`], compared case-insensitively.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Decodes `path` and resamples it to `config.sample_width x config.sample_height`.
///
/// The format is sniffed from the file contents, falling back to the
/// extension. Any open or decode failure is `SortError::ImageLoad`, except a
/// truncated PNG, which goes through [`decode_truncated_png`].
pub fn load_grid(path: &Path, config: &ClassifierConfig) -> Result<PixelGrid, SortError> {
    let load_err = |message: String| SortError::ImageLoad {
        path: path.display().to_string(),
        message,
    };
    let reader = ImageReader::open(path)
        .map_err(|e| load_err(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| load_err(e.to_string()))?;
    let format = reader.format();
    let img = match reader.decode() {
        Ok(img) => img,
        Err(e) if format == Some(ImageFormat::Png) => {
            let partial = decode_truncated_png(path).map_err(|_| load_err(e.to_string()))?;
            DynamicImage::ImageRgb8(partial)
        }
        Err(e) => return Err(load_err(e.to_string())),
    };
    downsample(&img, config.sample_width, config.sample_height)
}

/// Decodes a PNG row by row, keeping every row decoded before the stream
/// ended or went bad. Rows never reached stay black.
///
/// Fails if the header is unreadable, the image is interlaced, or not even
/// the first row decodes.
pub fn decode_truncated_png(path: &Path) -> Result<RgbImage, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(|e| e.to_string())?;

    let info = reader.info();
    let (width, height) = (info.width, info.height);
    if info.interlaced {
        return Err("interlaced PNG".into());
    }
    let (color, depth) = reader.output_color_type();
    if depth != png::BitDepth::Eight {
        return Err(format!("unsupported bit depth {depth:?}"));
    }

    let stride = width as usize * 3;
    let mut buf = vec![0u8; stride * height as usize];
    let mut rows = 0usize;
    let mut stop = None;
    for out in buf.chunks_exact_mut(stride) {
        match reader.next_row() {
            Ok(Some(row)) => expand_row(row.data(), color, out)?,
            Ok(None) => break,
            Err(e) => {
                stop = Some(e);
                break;
            }
        }
        rows += 1;
    }
    if let Some(e) = stop {
        if rows == 0 {
            return Err(e.to_string());
        }
        warn!(
            file = %path.display(),
            rows,
            height,
            error = %e,
            "truncated PNG, missing rows filled with black"
        );
    }
    RgbImage::from_raw(width, height, buf).ok_or_else(|| "buffer size mismatch".to_string())
}

/// Writes one decoded 8-bit row as RGB. Gray is replicated; alpha is dropped.
fn expand_row(data: &[u8], color: png::ColorType, out: &mut [u8]) -> Result<(), String> {
    let samples = match color {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => return Err("palette not expanded".into()),
    };
    for (px, rgb) in data.chunks_exact(samples).zip(out.chunks_exact_mut(3)) {
        if samples < 3 {
            rgb.fill(px[0]);
        } else {
            rgb.copy_from_slice(&px[..3]);
        }
    }
    Ok(())
}

/// Converts to 8-bit RGB and resizes to exactly `width x height` with
/// bilinear filtering.
pub fn downsample(img: &DynamicImage, width: u32, height: u32) -> Result<PixelGrid, SortError> {
    if width == 0 || height == 0 {
        return Err(SortError::InvalidDimensions);
    }
    let rgb = img.to_rgb8();
    let small = image::imageops::resize(&rgb, width, height, FilterType::Triangle);
    PixelGrid::from_rgb8(width as usize, height as usize, small.as_raw())
}
