//! JSON persistence of finished symbols.
//!
//! Only the parts needed to redraw a symbol are stored: version, error
//! correction level, mode, final codewords and mask. The matrix is redrawn on
//! load, so a round trip yields a bit identical symbol.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    builder::QR,
    common::{
        codec::Mode,
        error::{QRError, QRResult},
        mask::MaskPattern,
        metadata::{ECLevel, Version},
    },
};

/// Serialized shape of a [`QR`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QRRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: usize,
    pub size: usize,
    pub error_level: ECLevel,
    pub encoding_mode: Mode,
    pub codewords: Vec<u8>,
    pub mask_index: u8,
}

impl From<QR> for QRRecord {
    fn from(qr: QR) -> Self {
        Self::from(&qr)
    }
}

impl From<&QR> for QRRecord {
    fn from(qr: &QR) -> Self {
        Self {
            kind: RECORD_KIND.to_string(),
            version: *qr.version(),
            size: qr.width(),
            error_level: qr.ec_level(),
            encoding_mode: qr.mode(),
            codewords: qr.codewords().to_vec(),
            mask_index: *qr.mask(),
        }
    }
}

impl TryFrom<QRRecord> for QR {
    type Error = QRError;

    fn try_from(record: QRRecord) -> Result<Self, Self::Error> {
        if record.kind != RECORD_KIND {
            debug!("Unexpected record type {:?}", record.kind);
            return Err(QRError::MalformedPersistedState);
        }
        let ver = Version::new(record.version).map_err(|_| QRError::MalformedPersistedState)?;
        if record.size != ver.width() {
            debug!("Record size {} doesn't match version {}", record.size, *ver);
            return Err(QRError::MalformedPersistedState);
        }
        let mask = MaskPattern::new(record.mask_index).map_err(|_| QRError::MalformedPersistedState)?;

        QR::from_parts(ver, record.error_level, record.encoding_mode, record.codewords, mask)
    }
}

impl QR {
    pub fn to_json(&self) -> QRResult<String> {
        serde_json::to_string(self).map_err(|err| {
            debug!("Failed to serialize QR: {err}");
            QRError::MalformedPersistedState
        })
    }

    /// Rebuilds a symbol from JSON written by [`QR::to_json`]. Missing fields,
    /// wrong shapes & inconsistent values fail with `MalformedPersistedState`.
    pub fn from_json(json: &str) -> QRResult<Self> {
        serde_json::from_str::<QRRecord>(json)
            .map_err(|err| {
                debug!("Failed to parse QR record: {err}");
                QRError::MalformedPersistedState
            })
            .and_then(QR::try_from)
    }
}


// Global constants
//------------------------------------------------------------------------------

static RECORD_KIND: &str = "QRView";
