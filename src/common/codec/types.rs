use encoding_rs::SHIFT_JIS;
use serde::{Deserialize, Serialize};

use crate::common::{
    error::{QRError, QRResult},
    metadata::Version,
};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode as u8
    }
}

impl TryFrom<u8> for Mode {
    type Error = QRError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0b0001 => Ok(Self::Numeric),
            0b0010 => Ok(Self::Alphanumeric),
            0b0100 => Ok(Self::Byte),
            0b1000 => Ok(Self::Kanji),
            _ => Err(QRError::MalformedPersistedState),
        }
    }
}

impl Mode {
    /// Picks the cheapest mode whose repertoire covers every character, trying
    /// Numeric, Alphanumeric, Byte and Kanji in that order.
    pub fn classify(content: &str) -> QRResult<Self> {
        if content.chars().all(|c| Self::Numeric.contains(c)) {
            Ok(Self::Numeric)
        } else if content.chars().all(|c| Self::Alphanumeric.contains(c)) {
            Ok(Self::Alphanumeric)
        } else if content.chars().all(|c| Self::Byte.contains(c)) {
            Ok(Self::Byte)
        } else if content.chars().all(|c| Self::Kanji.contains(c)) {
            Ok(Self::Kanji)
        } else {
            Err(QRError::UnsupportedContent)
        }
    }

    pub fn contains(&self, c: char) -> bool {
        match self {
            Self::Numeric => c.is_ascii_digit(),
            Self::Alphanumeric => alphanumeric_digit(c).is_some(),
            Self::Byte => (c as u32) <= 0xFF,
            Self::Kanji => is_kanji_script(c),
        }
    }

    pub fn indicator(&self) -> u16 {
        *self as u16
    }

    pub fn char_cnt_bits(&self, ver: Version) -> usize {
        let tier = match *ver {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Self::Numeric => [10, 12, 14][tier],
            Self::Alphanumeric => [9, 11, 13][tier],
            Self::Byte => [8, 16, 16][tier],
            Self::Kanji => [8, 10, 12][tier],
        }
    }

    /// Max characters that fit in `bits`, the exact inverse of the packing cost.
    pub fn capacity(&self, bits: usize) -> usize {
        match self {
            Self::Numeric => {
                let rem = bits % 10;
                (bits / 10) * 3 + if rem > 6 { 2 } else if rem > 3 { 1 } else { 0 }
            }
            Self::Alphanumeric => (bits / 11) * 2 + if bits % 11 > 5 { 1 } else { 0 },
            Self::Byte => bits >> 3,
            Self::Kanji => bits / 13,
        }
    }

    /// Bits taken by `char_cnt` characters once encoded, header excluded.
    pub fn encoded_len(&self, char_cnt: usize) -> usize {
        match self {
            Self::Numeric => (char_cnt / 3) * 10 + [0, 4, 7][char_cnt % 3],
            Self::Alphanumeric => (char_cnt / 2) * 11 + (char_cnt & 1) * 6,
            Self::Byte => char_cnt * 8,
            Self::Kanji => char_cnt * 13,
        }
    }
}

#[inline]
fn alphanumeric_digit(c: char) -> Option<u16> {
    let digit = match c {
        '0'..='9' => c as u16 - '0' as u16,
        'A'..='Z' => c as u16 - 'A' as u16 + 10,
        ' ' => 36,
        '$' => 37,
        '%' => 38,
        '*' => 39,
        '+' => 40,
        '-' => 41,
        '.' => 42,
        '/' => 43,
        ':' => 44,
        _ => return None,
    };
    Some(digit)
}

// Han ideographs, kana and the CJK punctuation sharing those scripts. Fullwidth
// forms are limited to punctuation, fullwidth Latin letters & digits are out.
fn is_kanji_script(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x31F0..=0x31FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xF900..=0xFAFF
        | 0xFF01..=0xFF0F
        | 0xFF1A..=0xFF20
        | 0xFF3B..=0xFF40
        | 0xFF5B..=0xFF60)
}

// 13 bit value of a double byte Shift JIS character
fn kanji_value(c: char) -> QRResult<u16> {
    let mut buf = [0u8; 4];
    let (sjis, _, has_err) = SHIFT_JIS.encode(c.encode_utf8(&mut buf));
    if has_err || sjis.len() != 2 {
        return Err(QRError::UnsupportedContent);
    }

    let code = u16::from_be_bytes([sjis[0], sjis[1]]);
    let reduced = match code {
        0x8140..=0x9FFC => code - 0x8140,
        0xE040..=0xEBBF => code - 0xC140,
        _ => return Err(QRError::UnsupportedContent),
    };
    Ok((reduced >> 8) * 0xC0 + (reduced & 0xFF))
}

// Segment
//------------------------------------------------------------------------------

/// Classified content along with the `(value, bit width)` pairs its mode
/// packs into the bitstream.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Segment {
    mode: Mode,
    char_cnt: usize,
    values: Vec<(u16, usize)>,
}

impl Segment {
    pub fn new(content: &str) -> QRResult<Self> {
        let mode = Mode::classify(content)?;
        let values = Self::encode_values(mode, content)?;
        let char_cnt = content.chars().count();
        Ok(Self { mode, char_cnt, values })
    }

    fn encode_values(mode: Mode, content: &str) -> QRResult<Vec<(u16, usize)>> {
        let chars = content.chars().collect::<Vec<_>>();
        let values = match mode {
            Mode::Numeric => chars
                .chunks(3)
                .map(|c| {
                    let n = c.iter().fold(0, |n, d| n * 10 + (*d as u16 - '0' as u16));
                    (n, [0, 4, 7, 10][c.len()])
                })
                .collect(),
            Mode::Alphanumeric => chars
                .chunks(2)
                .map(|c| {
                    let n = c.iter().filter_map(|d| alphanumeric_digit(*d)).fold(0, |n, d| n * 45 + d);
                    (n, if c.len() == 2 { 11 } else { 6 })
                })
                .collect(),
            // Latin-1: one byte per character
            Mode::Byte => chars.iter().map(|c| (*c as u16, 8)).collect(),
            Mode::Kanji => {
                chars.iter().map(|c| kanji_value(*c).map(|v| (v, 13))).collect::<QRResult<_>>()?
            }
        };
        Ok(values)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn char_cnt(&self) -> usize {
        self.char_cnt
    }

    pub fn values(&self) -> impl Iterator<Item = (u16, usize)> + '_ {
        self.values.iter().copied()
    }

    pub fn bit_len(&self, ver: Version) -> usize {
        4 + self.mode.char_cnt_bits(ver) + self.mode.encoded_len(self.char_cnt)
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
