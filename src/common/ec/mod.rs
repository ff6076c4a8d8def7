mod galois;

use galois::{generator_polynomial, mul};

// Max ec codewords per block across all versions & levels
pub static MAX_EC_SIZE: usize = 30;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Returns the `ecc_count` error correction codewords of a data block: the
/// remainder of `block * x^ecc_count` divided by the generator polynomial.
pub fn ecc(block: &[u8], ecc_count: usize) -> Vec<u8> {
    let len = block.len();
    let gen_poly = generator_polynomial(ecc_count);

    let mut res = block.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = res[i];
        if lead_coeff == 0 {
            continue;
        }

        for (u, &v) in res[i + 1..].iter_mut().zip(gen_poly.iter()) {
            *u ^= mul(v, lead_coeff);
        }
    }

    res.split_off(len)
}

#[cfg(test)]
mod ec_tests {
    use super::ecc;

    #[test]
    fn test_poly_mod_1() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_iso_numeric_example() {
        let res = ecc(b"\x10\x20\x0c\x56\x61\x80\xec\x11\xec\x11\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xa5\x24\xd4\xc1\xed\x36\xc7\x87\x2c\x55");
    }

    #[test]
    fn test_zero_block() {
        assert_eq!(ecc(&[0; 9], 17), vec![0; 17]);
    }
}
