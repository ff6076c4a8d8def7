use std::ops::Deref;

use crate::common::{
    ec::ecc,
    metadata::{ECLevel, Version},
};

// Block splitter & interleaver
//------------------------------------------------------------------------------

/// Splits the data codewords into blocks, computes their ec codewords and
/// returns the final codeword sequence: interleaved data followed by
/// interleaved ec.
pub fn build_codewords(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let (data_blocks, ecc_blocks) = compute_ecc(data, version, ec_level);

    let mut codewords = interleave(&data_blocks);
    codewords.extend(interleave(&ecc_blocks));

    debug_assert_eq!(
        codewords.len(),
        version.total_codewords(),
        "Codeword count doesn't match version capacity"
    );
    codewords
}

// ECC: Error Correction Codeword generator
fn compute_ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, version, ec_level);

    let ecc_size_per_block = version.ecc_per_block(ec_level);
    let ecc_blocks = data_blocks.iter().map(|b| ecc(b, ecc_size_per_block)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

// Group 1 blocks come first, group 2 blocks are one codeword longer
fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (total_blocks, _) = version.ec_blocks(ec_level);
    let block1_size = data.len() / total_blocks;
    let block2_count = data.len() % total_blocks;
    let block1_count = total_blocks - block2_count;
    let total_block1_size = block1_size * block1_count;

    debug_assert!(
        data.len() == version.data_codewords(ec_level),
        "Data len doesn't match data capacity: Data len {}, Capacity {}",
        data.len(),
        version.data_codewords(ec_level)
    );

    let mut data_blocks = Vec::with_capacity(total_blocks);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_count > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block1_size + 1));
    }
    data_blocks
}

pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}
