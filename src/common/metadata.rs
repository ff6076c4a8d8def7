use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{QRError, QRResult};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(&self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    /// Levels ordered from strongest to weakest, the order in which the
    /// capacity planner tries them.
    pub const STRONGEST_FIRST: [ECLevel; 4] = [Self::H, Self::Q, Self::M, Self::L];

    // Format info encodes levels in the order M, L, H, Q
    pub fn format_bits(self) -> u32 {
        match self {
            Self::M => 0b00,
            Self::L => 0b01,
            Self::H => 0b10,
            Self::Q => 0b11,
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" | "l" => Ok(Self::L),
            "M" | "m" => Ok(Self::M),
            "Q" | "q" => Ok(Self::Q),
            "H" | "h" => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub fn new(version: usize) -> QRResult<Self> {
        if !(1..=40).contains(&version) {
            return Err(QRError::InvalidVersion);
        }
        Ok(Self(version))
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    /// Track coordinates of the alignment patterns. Patterns sit at every
    /// (row, col) pair of tracks except the three overlapping finders.
    pub fn alignment_pattern(self) -> Vec<i16> {
        let v = self.0 as i16;
        if v == 1 {
            return Vec::new();
        }

        let count = v / 7 + 2;
        let step = if v == 32 { 26 } else { (v * 4 + count * 2 + 1) / (count * 2 - 2) * 2 };
        let last = self.width() as i16 - 7;

        let mut tracks = vec![6; count as usize];
        for (i, t) in tracks.iter_mut().enumerate().skip(1) {
            *t = last - (count - 1 - i as i16) * step;
        }
        tracks
    }

    /// Modules left for data & ec codewords once finder, separator, timing,
    /// alignment, format and version areas are removed.
    pub fn total_modules(self) -> usize {
        let v = self.0;
        let mut res = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align = v / 7 + 2;
            res -= (25 * align - 10) * align - 55;
            if v >= 7 {
                res -= 36;
            }
        }
        res
    }

    pub fn total_codewords(self) -> usize {
        self.total_modules() >> 3
    }

    pub fn remainder_bits(self) -> usize {
        self.total_modules() & 7
    }

    /// Returns `(blocks, ec codewords per block)`.
    pub fn ec_blocks(self, ecl: ECLevel) -> (usize, usize) {
        EC_TABLE[self.0 - 1][ecl as usize]
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        self.ec_blocks(ecl).1
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        let (blocks, ecc) = self.ec_blocks(ecl);
        self.total_codewords() - blocks * ecc
    }

    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only drawn from version 7 onwards");

        bch_encode(self.0 as u32, 6, VERSION_INFO_GENERATOR, 12)
    }
}

// Format info
//------------------------------------------------------------------------------

pub fn format_info(ecl: ECLevel, mask: u8) -> u32 {
    debug_assert!(mask < 8, "Invalid masking pattern");

    let data = (ecl.format_bits() << 3) | mask as u32;
    bch_encode(data, 5, FORMAT_INFO_GENERATOR, 10) ^ FORMAT_INFO_MASK
}

// Appends the remainder of GF(2) division by the generator to the data bits
fn bch_encode(data: u32, data_len: usize, generator: u32, ec_len: usize) -> u32 {
    let mut rem = data << ec_len;
    for i in (0..data_len).rev() {
        if rem & (1 << (i + ec_len)) != 0 {
            rem ^= generator << i;
        }
    }
    (data << ec_len) | rem
}


// Global constants
//------------------------------------------------------------------------------

static FORMAT_INFO_GENERATOR: u32 = 0b101_0011_0111;

static FORMAT_INFO_MASK: u32 = 0b101_0100_0001_0010;

static VERSION_INFO_GENERATOR: u32 = 0b1_1111_0010_0101;

// (blocks, ec codewords per block) for levels L, M, Q, H
static EC_TABLE: [[(usize, usize); 4]; 40] = [
    [(1, 7), (1, 10), (1, 13), (1, 17)],
    [(1, 10), (1, 16), (1, 22), (1, 28)],
    [(1, 15), (1, 26), (2, 18), (2, 22)],
    [(1, 20), (2, 18), (2, 26), (4, 16)],
    [(1, 26), (2, 24), (4, 18), (4, 22)],
    [(2, 18), (4, 16), (4, 24), (4, 28)],
    [(2, 20), (4, 18), (6, 18), (5, 26)],
    [(2, 24), (4, 22), (6, 22), (6, 26)],
    [(2, 30), (5, 22), (8, 20), (8, 24)],
    [(4, 18), (5, 26), (8, 24), (8, 28)],
    [(4, 20), (5, 30), (8, 28), (11, 24)],
    [(4, 24), (8, 22), (10, 26), (11, 28)],
    [(4, 26), (9, 22), (12, 24), (16, 22)],
    [(4, 30), (9, 24), (16, 20), (16, 24)],
    [(6, 22), (10, 24), (12, 30), (18, 24)],
    [(6, 24), (10, 28), (17, 24), (16, 30)],
    [(6, 28), (11, 28), (16, 28), (19, 28)],
    [(6, 30), (13, 26), (18, 28), (21, 28)],
    [(7, 28), (14, 26), (21, 26), (25, 26)],
    [(8, 28), (16, 26), (20, 30), (25, 28)],
    [(8, 28), (17, 26), (23, 28), (25, 30)],
    [(9, 28), (17, 28), (23, 30), (34, 24)],
    [(9, 30), (18, 28), (25, 30), (30, 30)],
    [(10, 30), (20, 28), (27, 30), (32, 30)],
    [(12, 26), (21, 28), (29, 30), (35, 30)],
    [(12, 28), (23, 28), (34, 28), (37, 30)],
    [(12, 30), (25, 28), (34, 30), (40, 30)],
    [(13, 30), (26, 28), (35, 30), (42, 30)],
    [(14, 30), (28, 28), (38, 30), (45, 30)],
    [(15, 30), (29, 28), (40, 30), (48, 30)],
    [(16, 30), (31, 28), (43, 30), (51, 30)],
    [(17, 30), (33, 28), (45, 30), (54, 30)],
    [(18, 30), (35, 28), (48, 30), (57, 30)],
    [(19, 30), (37, 28), (51, 30), (60, 30)],
    [(19, 30), (38, 28), (53, 30), (63, 30)],
    [(20, 30), (40, 28), (56, 30), (66, 30)],
    [(21, 30), (43, 28), (59, 30), (70, 30)],
    [(22, 30), (45, 28), (62, 30), (74, 30)],
    [(24, 30), (47, 28), (65, 30), (77, 30)],
    [(25, 30), (49, 28), (68, 30), (81, 30)],
];
