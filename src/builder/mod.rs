mod canvas;
mod ec;
mod qr;

pub(crate) use canvas::Canvas;
pub use qr::QR;

use log::debug;

use crate::common::{
    codec::{find_version, encode_with_version, Segment},
    error::{QRError, QRResult},
    mask::apply_best_mask,
    metadata::ECLevel,
};
use ec::build_codewords;

pub struct QRBuilder<'a> {
    content: &'a str,
    ec_level: ECLevel,
}

impl<'a> QRBuilder<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content, ec_level: ECLevel::M }
    }

    /// Builder over raw bytes, which must be valid UTF-8 text.
    pub fn from_utf8(data: &'a [u8]) -> QRResult<Self> {
        let content = std::str::from_utf8(data).map_err(|_| QRError::InvalidInputType)?;
        Ok(Self::new(content))
    }

    pub fn content(&mut self, content: &'a str) -> &mut Self {
        self.content = content;
        self
    }

    /// Minimum error correction level. A stronger level is picked whenever it
    /// fits the same version.
    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn metadata(&self) -> String {
        format!("{{ Chars: {}, Min ec level: {:?} }}", self.content.chars().count(), self.ec_level)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());

        let seg = Segment::new(self.content)?;
        debug!("Encoding content in {:?} mode", seg.mode());

        let (version, ec_level) = find_version(&seg, self.ec_level)?;
        let data = encode_with_version(&seg, version, ec_level)?;

        let codewords = build_codewords(data.data(), version, ec_level);
        debug!("Constructed {} codewords with ecc & interleaving", codewords.len());

        let canvas = Canvas::with_function_patterns(version);
        let seq = canvas.module_sequence();
        let (mask, matrix) =
            apply_best_mask(|mask| canvas.draw_symbol(&seq, &codewords, ec_level, mask));
        debug!("Selected mask {} with penalty {}", *mask, matrix.penalty());

        Ok(QR::new(matrix, version, ec_level, seg.mode(), codewords, mask))
    }
}
