use serde::Deserialize;

use crate::error::PaintError;

/// The backend's response schema for all three image operations.
///
/// Validated at the boundary: a 2xx body that does not carry an `image`
/// string is a malformed response, not a silently missing field.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ImageResponse {
    pub image: String,
}

/// A fetched photo in displayable form.
///
/// The backend hands back a URL; a native client has to download and decode
/// it before it can be drawn. The RGBA pixels go straight into an iced image
/// handle.
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Backdrop {
    /// Decode downloaded photo bytes into RGBA pixels.
    pub fn decode(url: String, bytes: &[u8]) -> Result<Self, PaintError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| PaintError::Decode(e.to_string()))?
            .to_rgba8();

        let (width, height) = decoded.dimensions();

        Ok(Backdrop {
            url,
            width,
            height,
            rgba: decoded.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_response_parses_image_field() {
        let parsed: ImageResponse =
            serde_json::from_str(r#"{"image": "https://cdn/x.png"}"#).unwrap();
        assert_eq!(parsed.image, "https://cdn/x.png");
    }

    #[test]
    fn test_response_rejects_missing_image() {
        assert!(serde_json::from_str::<ImageResponse>(r#"{"url": "x"}"#).is_err());
        assert!(serde_json::from_str::<ImageResponse>(r#"{"image": null}"#).is_err());
        assert!(serde_json::from_str::<ImageResponse>("not json at all").is_err());
    }

    #[test]
    fn test_backdrop_decodes_png_bytes() {
        let pixels = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        pixels.write_to(&mut bytes, image::ImageFormat::Png).unwrap();

        let backdrop =
            Backdrop::decode("https://cdn/x.png".into(), bytes.get_ref()).unwrap();

        assert_eq!(backdrop.width, 3);
        assert_eq!(backdrop.height, 2);
        assert_eq!(backdrop.rgba.len(), 3 * 2 * 4);
        assert_eq!(&backdrop.rgba[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_backdrop_rejects_garbage_bytes() {
        let result = Backdrop::decode("https://cdn/x.png".into(), b"definitely not a png");
        assert!(matches!(result, Err(PaintError::Decode(_))));
    }
}
