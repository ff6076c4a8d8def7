use std::ops::Deref;

use crate::common::{
    iter::EncRegionIter,
    mask::MaskPattern,
    matrix::BitMatrix,
    metadata::{format_info, Color, ECLevel, Version},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Mutable module grid a symbol is drawn on before it is frozen into a
/// [`BitMatrix`].
#[derive(Debug, Clone)]
pub struct Canvas {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
}

// Canvas for builder
//------------------------------------------------------------------------------

impl Canvas {
    pub fn new(ver: Version) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver }
    }

    /// Canvas with finder, separator, timing & alignment patterns drawn, the
    /// format area reserved and, from version 7, the version info written.
    pub fn with_function_patterns(ver: Version) -> Self {
        let mut canvas = Self::new(ver);
        canvas.draw_all_function_patterns();
        canvas.reserve_format_area();
        canvas.draw_version_info();
        canvas
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative coordinates wrap around from the bottom or right edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row {r} out of bounds for width {w}");
        debug_assert!(-w <= c && c < w, "Column {c} out of bounds for width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }

    /// Freezes the canvas. Every module must have been drawn by now.
    pub fn to_matrix(&self) -> BitMatrix {
        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found in canvas");

        let w = self.w;
        BitMatrix::from_fn(w, |r, c| *self.grid[r * w + c] == Color::Dark)
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl Canvas {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 pattern centered at (r, c) along with its separator
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let module = match (i, j) {
                    (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                    (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                    (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                    _ => Module::Func(Color::Dark),
                };
                self.set(r + i, c + j, module);
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl Canvas {
    fn draw_timing_pattern(&mut self) {
        let last = self.w as i16 - 9;
        self.draw_line(6, 8, 6, last);
        self.draw_line(8, 6, last, 6);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, Module::Func(Color::from(j & 1 == 0)));
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, Module::Func(Color::from(i & 1 == 0)));
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl Canvas {
    fn draw_alignment_patterns(&mut self) {
        let tracks = self.ver.alignment_pattern();
        for &r in &tracks {
            for &c in &tracks {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        // Skip the three corners taken by finder patterns
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                let module = match (i, j) {
                    (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                    _ => Module::Func(Color::Light),
                };
                self.set(r + i, c + j, module);
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl Canvas {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
    }
}

// Format & version info
//------------------------------------------------------------------------------

impl Canvas {
    fn reserve_format_area(&mut self) {
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
    }

    fn draw_format_info(&mut self, format_info: u32) {
        let (off, on) = (Module::Format(Color::Light), Module::Format(Color::Dark));
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_SIDE);
        // Dark module
        self.set(-8, 8, on);
    }

    fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let ver_info = self.ver.info();
        let (off, on) = (Module::Version(Color::Light), Module::Version(Color::Dark));
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_TR);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_BL);
    }

    // Writes `number` MSB first onto the given coordinates
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            if number & mask == 0 {
                self.set(r, c, off_clr);
            } else {
                self.set(r, c, on_clr);
            }
            mask >>= 1;
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl Canvas {
    /// Modules left free by the function patterns, in zig-zag placement order.
    /// Depends only on the version, so one sequence serves all 8 masks.
    pub fn module_sequence(&self) -> Vec<(i16, i16)> {
        EncRegionIter::new(self.ver).filter(|&(r, c)| self.get(r, c) == Module::Empty).collect()
    }

    /// Position `i` carries bit `7 - i % 8` of codeword `i / 8`, XORed with
    /// the mask. Positions past the last codeword are remainder bits set to 0.
    pub fn draw_codewords(&mut self, seq: &[(i16, i16)], codewords: &[u8], mask: MaskPattern) {
        debug_assert!(
            codewords.len() << 3 <= seq.len(),
            "Codewords don't fit the encoding region: Codewords {}, Modules {}",
            codewords.len(),
            seq.len()
        );

        let mask_fn = mask.mask_functions();
        for (i, &(r, c)) in seq.iter().enumerate() {
            let bit = codewords.get(i >> 3).is_some_and(|b| (b >> (7 - (i & 7))) & 1 == 1);
            self.set(r, c, Module::Data(Color::from(bit ^ mask_fn(r, c))));
        }
    }

    /// Draws the masked codewords & matching format info onto a copy of the
    /// canvas and freezes it.
    pub fn draw_symbol(
        &self,
        seq: &[(i16, i16)],
        codewords: &[u8],
        ecl: ECLevel,
        mask: MaskPattern,
    ) -> BitMatrix {
        let mut canvas = self.clone();
        canvas.draw_codewords(seq, codewords, mask);
        canvas.draw_format_info(format_info(ecl, *mask));
        canvas.to_matrix()
    }
}


// Global constants
//------------------------------------------------------------------------------

const FORMAT_INFO_BIT_LEN: usize = 15;

const VERSION_INFO_BIT_LEN: usize = 18;

// MSB first
static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];
