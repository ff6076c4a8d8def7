use std::io::Cursor;
use std::str::FromStr;

use image::{ImageFormat, Rgba, RgbaImage};
use log::debug;

use crate::{
    builder::QR,
    common::error::{QRError, QRResult},
};

// Render options
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Target image width in pixels
    pub width: u32,
    /// Quiet zone in modules
    pub margin: u32,
    pub light: Rgba<u8>,
    pub dark: Rgba<u8>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: 300, margin: 2, light: Rgba([255, 255, 255, 255]), dark: Rgba([0, 0, 0, 255]) }
    }
}

impl RenderOptions {
    /// Pixels per module. Falls back to 8 when the target width can't fit one
    /// pixel per module.
    pub fn scale(&self, qr_width: usize) -> u32 {
        let footprint = qr_width as u32 + 2 * self.margin;
        if self.width < footprint {
            FALLBACK_SCALE
        } else {
            self.width / footprint
        }
    }
}

/// Hex color in `RRGGBB` or `RRGGBBAA` form, with an optional leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub Rgba<u8>);

impl FromStr for HexColor {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(QRError::InvalidColor);
        }

        let mut rgba = [255u8; 4];
        for (i, channel) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
            *channel =
                u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| QRError::InvalidColor)?;
        }
        Ok(Self(Rgba(rgba)))
    }
}

// Raster export
//------------------------------------------------------------------------------

impl QR {
    /// Nearest neighbour rendering with `scale` pixels per module and a quiet
    /// zone of `margin` modules on each side.
    pub fn to_image(&self, scale: u32, margin: u32, light: Rgba<u8>, dark: Rgba<u8>) -> RgbaImage {
        let w = self.width() as u32;
        let total_sz = (w + 2 * margin) * scale;
        let matrix = self.matrix();

        RgbaImage::from_fn(total_sz, total_sz, |x, y| {
            let (r, c) = (y / scale, x / scale);
            if r < margin || r >= margin + w || c < margin || c >= margin + w {
                return light;
            }
            matrix.get((r - margin) as usize, (c - margin) as usize).select(light, dark)
        })
    }

    pub fn to_png(&self, opts: &RenderOptions) -> QRResult<Vec<u8>> {
        let scale = opts.scale(self.width());
        debug!("Rendering {}x{} QR at scale {scale}", self.width(), self.width());

        let img = self.to_image(scale, opts.margin, opts.light, opts.dark);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).map_err(|err| {
            debug!("Failed to encode PNG: {err}");
            QRError::ImageEncoding
        })?;
        Ok(bytes)
    }
}


// Global constants
//------------------------------------------------------------------------------

const FALLBACK_SCALE: u32 = 8;
