use alloy_primitives::Address;

/// `0x1234…5678` display form. Empty for empty input; anything too short to
/// abbreviate comes back unchanged.
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_owned();
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

/// Format validity independent of any network: `0x` plus 40 hex digits,
/// single-case or a correct EIP-55 checksum.
pub fn is_valid_address(address: &str) -> bool {
    parse_address(address).is_some()
}

pub fn parse_address(address: &str) -> Option<Address> {
    let digits = address.strip_prefix("0x")?;
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(address, None).ok();
    }

    address.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_long_addresses() {
        assert_eq!(
            format_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234…5678"
        );
    }

    #[test]
    fn formats_empty_and_short_input_verbatim() {
        assert_eq!(format_address(""), "");
        assert_eq!(format_address("0x1234"), "0x1234");
    }

    #[test]
    fn accepts_checksummed_and_single_case_addresses() {
        assert!(is_valid_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(is_valid_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(is_valid_address("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED"));
        assert!(is_valid_address("0x57ae67e75d4973757090aa3931f3208a2cfc0673"));
    }

    #[test]
    fn rejects_bad_checksums_and_shapes() {
        assert!(!is_valid_address("0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(!is_valid_address("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(!is_valid_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe"));
        assert!(!is_valid_address("0xgaaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn parsed_addresses_keep_their_value() {
        let parsed = parse_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(
            parsed.to_checksum(None),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }
}
