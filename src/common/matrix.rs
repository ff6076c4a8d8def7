use super::{mask::compute_total_penalty, metadata::Color};

// Finished symbol grid
//------------------------------------------------------------------------------

/// Immutable size x size grid of modules, packed 8 per byte along each row.
/// The penalty score is computed once when the grid is finalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    size: usize,
    stride: usize,
    bits: Vec<u8>,
    penalty: u32,
}

impl BitMatrix {
    pub fn from_fn(size: usize, is_dark: impl Fn(usize, usize) -> bool) -> Self {
        let mut res = Self::unscored(size, is_dark);
        res.penalty = compute_total_penalty(&res);
        res
    }

    fn unscored(size: usize, is_dark: impl Fn(usize, usize) -> bool) -> Self {
        let stride = (size + 7) >> 3;
        let mut bits = vec![0u8; stride * size];
        for r in 0..size {
            for c in 0..size {
                if is_dark(r, c) {
                    bits[r * stride + (c >> 3)] |= 0x80 >> (c & 7);
                }
            }
        }
        Self { size, stride, bits, penalty: 0 }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.size && c < self.size, "Module ({r}, {c}) out of bounds");

        self.bits[r * self.stride + (c >> 3)] & (0x80 >> (c & 7)) != 0
    }

    pub fn get(&self, r: usize, c: usize) -> Color {
        Color::from(self.is_dark(r, c))
    }

    // Packed bytes of a row, trailing bits past `size` are zero
    pub fn row(&self, r: usize) -> &[u8] {
        &self.bits[r * self.stride..(r + 1) * self.stride]
    }

    pub fn count_dark_modules(&self) -> usize {
        (0..self.size).flat_map(|r| self.row(r)).map(|b| b.count_ones() as usize).sum()
    }
}

#[cfg(test)]
pub(crate) fn unscored_matrix(rows: &[&str]) -> BitMatrix {
    let size = rows.len();
    let grid = rows.iter().map(|r| r.as_bytes()).collect::<Vec<_>>();
    BitMatrix::unscored(size, |r, c| grid[r][c] == b'1')
}

#[cfg(test)]
mod matrix_tests {
    use super::{unscored_matrix, BitMatrix};
    use crate::common::metadata::Color;

    #[test]
    fn test_packing() {
        let m = BitMatrix::from_fn(21, |r, c| r == c);
        assert_eq!(m.size(), 21);
        assert_eq!(m.row(0), [0x80, 0, 0]);
        assert_eq!(m.row(9), [0, 0x40, 0]);
        assert_eq!(m.row(20), [0, 0, 0x08]);
        assert_eq!(m.count_dark_modules(), 21);
        assert_eq!(m.get(4, 4), Color::Dark);
        assert_eq!(m.get(4, 5), Color::Light);
    }

    #[test]
    fn test_penalty_cached_on_construction() {
        let m = BitMatrix::from_fn(21, |_, _| false);
        assert!(m.penalty() > 0);
        assert_eq!(unscored_matrix(&["10", "01"]).penalty(), 0);
    }
}
