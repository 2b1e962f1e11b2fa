//! Frame transforms and classifier-input encoding

use crate::{CaptureConfig, SamplerConfig, SamplerError};
use camera_stream::VideoFrame;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, ExtendedColorType, ImageBuffer, ImageEncoder, Luma, Rgb};
use std::io::Cursor;
use tracing::trace;

/// Zoom percentage that maps to "no zoom" (full frame)
pub const REFERENCE_ZOOM: f32 = 80.0;

/// Crop the frame to the centered region selected by the zoom setting.
///
/// `scale = zoom / 80`; the crop is `width/scale` x `height/scale` centered
/// in the source frame. Zoom at or below the reference keeps the full frame.
pub fn zoom_crop(frame: &VideoFrame, zoom_percent: u32) -> VideoFrame {
    let scale = zoom_percent as f32 / REFERENCE_ZOOM;
    if scale <= 1.0 {
        return frame.clone();
    }
    let crop_w = ((frame.width as f32 / scale).round() as u32).max(1);
    let crop_h = ((frame.height as f32 / scale).round() as u32).max(1);
    frame.crop_centered(crop_w, crop_h)
}

/// Apply brightness then contrast as percentage multipliers (100 = identity).
///
/// Brightness scales each channel linearly; contrast pivots around mid-gray
/// 128. Matches the order the capture filter chain applies them.
pub fn adjust_levels(frame: &VideoFrame, brightness_percent: u32, contrast_percent: u32) -> VideoFrame {
    if brightness_percent == 100 && contrast_percent == 100 {
        return frame.clone();
    }

    let brightness = brightness_percent as f32 / 100.0;
    let contrast = contrast_percent as f32 / 100.0;

    let data = frame
        .data
        .iter()
        .map(|&v| {
            let brightened = v as f32 * brightness;
            let contrasted = (brightened - 128.0) * contrast + 128.0;
            contrasted.round().clamp(0.0, 255.0) as u8
        })
        .collect();

    VideoFrame {
        data,
        width: frame.width,
        height: frame.height,
        timestamp_ms: frame.timestamp_ms,
        sequence: frame.sequence,
    }
}

/// Produce the encoded classifier input for one sampling tick.
///
/// Pipeline: zoom crop -> brightness/contrast -> (grayscale) -> resize to
/// `output_size` -> JPEG.
pub fn encode_frame(
    frame: &VideoFrame,
    capture: &CaptureConfig,
    sampler: &SamplerConfig,
) -> Result<Vec<u8>, SamplerError> {
    let cropped = zoom_crop(frame, capture.zoom_percent);
    let adjusted = adjust_levels(&cropped, capture.brightness_percent, capture.contrast_percent);

    let rgb: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(adjusted.width, adjusted.height, adjusted.data)
            .ok_or(SamplerError::Buffer)?;

    let size = sampler.output_size;
    let mut bytes = Vec::new();
    let cursor = Cursor::new(&mut bytes);
    let encoder = JpegEncoder::new_with_quality(cursor, sampler.jpeg_quality);

    if sampler.grayscale {
        let gray: ImageBuffer<Luma<u8>, Vec<u8>> = imageops::grayscale(&rgb);
        let resized = imageops::resize(&gray, size, size, imageops::FilterType::Triangle);
        encoder.write_image(resized.as_raw(), size, size, ExtendedColorType::L8)?;
    } else {
        let resized = imageops::resize(&rgb, size, size, imageops::FilterType::Triangle);
        encoder.write_image(resized.as_raw(), size, size, ExtendedColorType::Rgb8)?;
    }

    trace!(
        sequence = frame.sequence,
        bytes = bytes.len(),
        "Frame encoded for classification"
    );
    Ok(bytes)
}
