use serde::{Deserialize, Serialize};

use super::Canvas;
use crate::{
    common::{
        codec::Mode,
        error::{QRError, QRResult},
        mask::MaskPattern,
        matrix::BitMatrix,
        metadata::{ECLevel, Version},
    },
    persist::QRRecord,
};

/// A finished symbol along with everything needed to redraw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "QRRecord", try_from = "QRRecord")]
pub struct QR {
    matrix: BitMatrix,
    ver: Version,
    ecl: ECLevel,
    mode: Mode,
    codewords: Vec<u8>,
    mask: MaskPattern,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn new(
        matrix: BitMatrix,
        ver: Version,
        ecl: ECLevel,
        mode: Mode,
        codewords: Vec<u8>,
        mask: MaskPattern,
    ) -> Self {
        debug_assert_eq!(matrix.size(), ver.width(), "Matrix size doesn't match version");

        Self { matrix, ver, ecl, mode, codewords, mask }
    }

    /// Redraws the symbol from its final codewords. The result is bit
    /// identical to the symbol the codewords were taken from.
    pub fn from_parts(
        ver: Version,
        ecl: ECLevel,
        mode: Mode,
        codewords: Vec<u8>,
        mask: MaskPattern,
    ) -> QRResult<Self> {
        if codewords.len() != ver.total_codewords() {
            return Err(QRError::MalformedPersistedState);
        }

        let canvas = Canvas::with_function_patterns(ver);
        let seq = canvas.module_sequence();
        let matrix = canvas.draw_symbol(&seq, &codewords, ecl, mask);
        Ok(Self::new(matrix, ver, ecl, mode, codewords, mask))
    }

    pub fn matrix(&self) -> &BitMatrix {
        &self.matrix
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.matrix.size()
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {}, Ec level: {:?}, Mode: {:?}, Mask: {} }}",
            *self.ver, self.ecl, self.mode, *self.mask
        )
    }

    /// Block character rendering for terminals with a dark background: light
    /// modules & the 4 module quiet zone are filled, dark modules are blank.
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = 4 * module_sz;
        let qr_sz = self.width() * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = (i - qz_sz) / module_sz;
                let c = (j - qz_sz) / module_sz;
                canvas.push(self.matrix.get(r, c).select('█', ' '));
            }
            canvas.push('\n');
        }

        canvas
    }
}
