use std::sync::OnceLock;

use super::MAX_EC_SIZE;

// GF(256) arithmetic over the QR primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let mut log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    if log_sum >= 255 {
        log_sum -= 255;
    }
    EXP_TABLE[log_sum]
}

/// Coefficients of (x - 2^0)(x - 2^1)...(x - 2^(degree - 1)), highest term
/// first with the leading 1 dropped.
pub fn generator_polynomial(degree: usize) -> &'static [u8] {
    debug_assert!(degree <= MAX_EC_SIZE, "Generator degree {degree} exceeds {MAX_EC_SIZE}");

    let polys = GENERATOR_POLYNOMIALS
        .get_or_init(|| (0..=MAX_EC_SIZE).map(compute_generator_polynomial).collect());
    &polys[degree][1..]
}

fn compute_generator_polynomial(degree: usize) -> Vec<u8> {
    let mut poly = vec![1u8];
    for i in 0..degree {
        let root = EXP_TABLE[i];
        let mut next = vec![0u8; poly.len() + 1];
        for (j, &coeff) in poly.iter().enumerate() {
            next[j] ^= coeff;
            next[j + 1] ^= mul(coeff, root);
        }
        poly = next;
    }
    poly
}

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLYNOMIAL;
        }
        i += 1;
    }
    table[255] = table[0];
    table
}

const fn build_log_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[EXP_TABLE[i] as usize] = i as u8;
        i += 1;
    }
    table
}


// Global constants
//------------------------------------------------------------------------------

const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;

const EXP_TABLE: [u8; 256] = build_exp_table();

const LOG_TABLE: [u8; 256] = build_log_table();

static GENERATOR_POLYNOMIALS: OnceLock<Vec<Vec<u8>>> = OnceLock::new();
