use std::ops::Deref;

use log::trace;
use rayon::prelude::*;

use super::{
    error::{QRError, QRResult},
    matrix::BitMatrix,
};

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskingPattern);
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (((r + c) as i32 & 1) + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Draws the symbol under each of the 8 masks in parallel and keeps the one
/// with the lowest penalty. Ties go to the lowest mask index.
pub fn apply_best_mask<F>(draw: F) -> (MaskPattern, BitMatrix)
where
    F: Fn(MaskPattern) -> BitMatrix + Sync,
{
    let mut candidates = (0..8u8)
        .into_par_iter()
        .map(|m| {
            let mask = MaskPattern(m);
            let matrix = draw(mask);
            trace!("Mask {m} scored penalty {}", matrix.penalty());
            (mask, matrix)
        })
        .collect::<Vec<_>>();

    let mut best = 0;
    for (i, (_, matrix)) in candidates.iter().enumerate().skip(1) {
        if matrix.penalty() < candidates[best].1.penalty() {
            best = i;
        }
    }
    candidates.swap_remove(best)
}

// Penalty scorer
//------------------------------------------------------------------------------

pub fn compute_total_penalty(matrix: &BitMatrix) -> u32 {
    let adj_pen = compute_adjacent_penalty(matrix);
    let blk_pen = compute_block_penalty(matrix);
    let fp_pen_h = compute_finder_pattern_penalty(matrix, true);
    let fp_pen_v = compute_finder_pattern_penalty(matrix, false);
    let bal_pen = compute_balance_penalty(matrix);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Rule 1: runs of 5 or more same colored modules in a row or column
fn compute_adjacent_penalty(matrix: &BitMatrix) -> u32 {
    let mut pen = 0;
    let w = matrix.size();
    let mut cols = vec![(false, 0); w];
    for r in 0..w {
        let mut row = (false, 0);
        for (c, col) in cols.iter_mut().enumerate() {
            let bit = matrix.is_dark(r, c);
            pen += extend_run(&mut row, bit);
            pen += extend_run(col, bit);
        }
    }
    pen
}

fn extend_run(run: &mut (bool, u32), bit: bool) -> u32 {
    if run.1 == 0 || run.0 != bit {
        *run = (bit, 0);
    }
    run.1 += 1;
    match run.1 {
        5 => 3,
        n if n > 5 => 1,
        _ => 0,
    }
}

// Rule 2: 2x2 blocks of same colored modules
fn compute_block_penalty(matrix: &BitMatrix) -> u32 {
    let mut pen = 0;
    let w = matrix.size();
    for r in 1..w {
        for c in 1..w {
            let bit = matrix.is_dark(r, c);
            if bit == matrix.is_dark(r - 1, c)
                && bit == matrix.is_dark(r, c - 1)
                && bit == matrix.is_dark(r - 1, c - 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Rule 3: 1:1:3:1:1 finder-like windows followed or preceded by 4 light modules
fn compute_finder_pattern_penalty(matrix: &BitMatrix, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = matrix.size();
    let get = |i: usize, j: usize| if is_hor { matrix.is_dark(i, j) } else { matrix.is_dark(j, i) };
    for i in 0..w {
        for j in 0..w.saturating_sub(10) {
            let window = (j..j + 11).fold(0u16, |acc, k| (acc << 1) | get(i, k) as u16);
            if window == FINDER_LIKE_PATTERN || window == FINDER_LIKE_PATTERN_REV {
                pen += 40;
            }
        }
    }
    pen
}

// Rule 4: 10 * |floor(dark% / 5) - 10|, so 45% to just under 50% already
// scores 10 while 50% to just under 55% scores 0
fn compute_balance_penalty(matrix: &BitMatrix) -> u32 {
    let dark_cnt = matrix.count_dark_modules();
    let w = matrix.size();
    let tot = w * w;
    let fifths = dark_cnt * 20 / tot;
    fifths.abs_diff(10) as u32 * 10
}


// Global constants
//------------------------------------------------------------------------------

static FINDER_LIKE_PATTERN: u16 = 0b101_1101_0000;

static FINDER_LIKE_PATTERN_REV: u16 = 0b000_0101_1101;
