use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks every coordinate in placement order: two-column strips from the right
/// edge leftwards, alternating upward and downward, skipping the vertical
/// timing column. Callers filter out modules that are already taken.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let adjusted_col = if self.c <= VERT_TIMING_COL { self.c + 1 } else { self.c };
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::EncRegionIter;
    use crate::common::metadata::Version;

    #[test]
    fn test_enc_region_iter_start() {
        let coords = EncRegionIter::new(Version::new(1).unwrap()).take(6).collect::<Vec<_>>();
        assert_eq!(coords, [(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn test_enc_region_iter_turns() {
        let coords = EncRegionIter::new(Version::new(1).unwrap()).collect::<Vec<_>>();
        // Top of the first strip turns into the second strip heading down
        assert_eq!(coords[40..44], [(0, 20), (0, 19), (0, 18), (0, 17)]);
        assert_eq!(coords[44], (1, 18));
    }

    #[test]
    fn test_enc_region_iter_skips_timing_column() {
        for ver in Version::all() {
            let w = ver.width() as i16;
            let coords = EncRegionIter::new(ver).collect::<Vec<_>>();
            assert!(coords.iter().all(|&(_, c)| c != 6));
            assert_eq!(coords.len() as i16, w * (w - 1));
            let uniq = coords.iter().collect::<HashSet<_>>();
            assert_eq!(uniq.len(), coords.len());
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

const VERT_TIMING_COL: i16 = 6;
