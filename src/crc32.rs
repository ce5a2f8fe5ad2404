//! CRC-32 checksum engine for the ZIP writer.
//!
//! Standard reflected CRC-32 with polynomial `0xEDB88320`, the exact
//! variant zlib and PKZIP use. The 256-entry lookup table is computed at
//! compile time. This is a compatibility-bearing algorithm: any deviation
//! makes archives unreadable by standard tools.

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                0xEDB8_8320 ^ (crc >> 1)
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = build_table();

/// Compute the CRC-32 of a byte slice.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFF_u32;
    for &byte in data {
        let index = ((crc ^ byte as u32) & 0xFF) as usize;
        crc = CRC_TABLE[index] ^ (crc >> 8);
    }
    crc ^ 0xFFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn test_check_value() {
        // The standard CRC-32 check value
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_known_strings() {
        assert_eq!(crc32(b"hello"), crc32fast::hash(b"hello"));
        assert_eq!(crc32(b"The quick brown fox"), crc32fast::hash(b"The quick brown fox"));
    }

    #[test]
    fn test_binary_data_matches_reference() {
        let data: Vec<u8> = (0..=255).cycle().take(4096).collect();
        assert_eq!(crc32(&data), crc32fast::hash(&data));
    }

    proptest! {
        #[test]
        fn prop_matches_reference_implementation(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
            prop_assert_eq!(crc32(&data), crc32fast::hash(&data));
        }
    }
}
