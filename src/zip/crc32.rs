//! CRC-32 (IEEE 802.3) as used by PKZIP and zlib.

/// Reflected form of the IEEE 802.3 polynomial.
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Compute the CRC-32 checksum of `data`.
///
/// Bit-wise implementation: register starts at all ones, each byte is
/// folded in low bit first, and the result is the one's complement of the
/// register. Pure function of its input; empty input yields `0`.
pub fn checksum(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (POLYNOMIAL & mask);
        }
    }
    !crc
}
