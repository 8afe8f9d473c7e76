use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::surface::Surface;
use crate::error::ApiError;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encodes the surface as an RGBA PNG.
pub fn encode_png(surface: &Surface) -> Result<Vec<u8>, ApiError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ApiError::InternalError(format!("PNG header: {e}")))?;
        writer
            .write_image_data(surface.pixels())
            .map_err(|e| ApiError::InternalError(format!("PNG data: {e}")))?;
        writer
            .finish()
            .map_err(|e| ApiError::InternalError(format!("PNG finish: {e}")))?;
    }
    Ok(out)
}

/// Wraps PNG bytes into a `data:image/png;base64,...` URL.
pub fn to_png_data_url(png_bytes: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png_bytes))
}

/// Extracts the PNG bytes from a data URL produced by [`to_png_data_url`].
pub fn decode_png_data_url(data_url: &str) -> Result<Vec<u8>, ApiError> {
    let payload = data_url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| ApiError::validation("Signature is not a PNG data URL"))?;
    STANDARD
        .decode(payload)
        .map_err(|e| ApiError::validation(format!("Signature payload is not valid base64: {e}")))
}
