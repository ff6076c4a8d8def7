use log::debug;

use super::types::{Mode, Segment, PADDING_CODEWORDS};
use crate::common::{
    bitstream::BitStream,
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

// Capacity planner
//------------------------------------------------------------------------------

/// Finds the smallest version that holds the segment. At each version the
/// levels are tried strongest first down to `ecl`, so the returned level is
/// never weaker than requested but may be stronger.
pub fn find_version(seg: &Segment, ecl: ECLevel) -> QRResult<(Version, ECLevel)> {
    let mode = seg.mode();
    let char_cnt = seg.char_cnt();
    for ver in Version::all() {
        for &cand in ECLevel::STRONGEST_FIRST.iter().take_while(|&&l| l >= ecl) {
            let bcap = data_bit_capacity(ver, cand, mode);
            if mode.capacity(bcap) >= char_cnt {
                debug!("Content of {char_cnt} chars fits version {} at level {cand:?}", *ver);
                return Ok((ver, cand));
            }
        }
    }
    Err(QRError::ContentTooLarge)
}

// Bits left for encoded characters once mode indicator & char count are written
pub fn data_bit_capacity(ver: Version, ecl: ECLevel, mode: Mode) -> usize {
    (ver.data_codewords(ecl) << 3).saturating_sub(4 + mode.char_cnt_bits(ver))
}

// Bitstream packer
//------------------------------------------------------------------------------

/// Packs the segment into exactly `ver.data_codewords(ecl)` bytes: header,
/// values, terminator and alternating pad codewords.
pub fn encode_with_version(seg: &Segment, ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    let dcap = ver.data_codewords(ecl);
    if seg.bit_len(ver) > dcap << 3 {
        return Err(QRError::ContentTooLarge);
    }

    let mut bs = BitStream::new(dcap);
    push_header(seg, ver, &mut bs);
    for (value, width) in seg.values() {
        bs.push_bits(value, width);
    }
    pad_remaining_capacity(&mut bs);
    Ok(bs)
}

fn push_header(seg: &Segment, ver: Version, bs: &mut BitStream) {
    let mode = seg.mode();
    bs.push_bits(mode.indicator(), 4);
    bs.push_bits(seg.char_cnt() as u16, mode.char_cnt_bits(ver));
}

// The terminator & bit padding are already zero in the buffer. When fewer than
// 4 bits remain in the current byte the terminator spills into the next one,
// so pad codewords start a byte later.
fn pad_remaining_capacity(bs: &mut BitStream) {
    let len = bs.len();
    let start = (len >> 3) + if 8 - (len & 7) < 4 { 2 } else { 1 };
    let end = bs.capacity() >> 3;
    for (i, pos) in (start..end).enumerate() {
        bs.set_byte(pos, PADDING_CODEWORDS[i & 1]);
    }
}
