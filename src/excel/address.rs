//! A1-style cell addressing with 1-based coordinates

/// Largest column index in an .xlsx worksheet (XFD).
pub const MAX_COLUMNS: u32 = 16_384;

/// Largest row index in an .xlsx worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Convert a 1-based column index to its letters
///
/// Examples:
/// - 1 → A
/// - 26 → Z
/// - 27 → AA
/// - 16384 → XFD
///
/// Column 0 has no letters and yields an empty string.
pub fn column_letters(column: u32) -> String {
    let mut result = String::new();
    let mut remaining = column;

    while remaining > 0 {
        let remainder = (remaining - 1) % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        remaining = (remaining - 1) / 26;
    }

    result
}

/// Build an A1-style address from 1-based column and row, e.g. (2, 3) → "B3".
pub fn cell_address(column: u32, row: u32) -> String {
    format!("{}{}", column_letters(column), row)
}

/// Parse an A1-style address into 1-based (column, row). `$` anchors are ignored.
pub fn parse_cell_address(address: &str) -> Option<(u32, u32)> {
    let cleaned: String = address.trim().chars().filter(|c| *c != '$').collect();
    let split = cleaned.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cleaned.split_at(split);

    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut column: u32 = 0;
    for c in letters.chars() {
        let value = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        column = column.checked_mul(26)?.checked_add(value)?;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 || column > MAX_COLUMNS || row > MAX_ROWS {
        return None;
    }

    Some((column, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        // Single letters
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(2), "B");
        assert_eq!(column_letters(26), "Z");

        // Double letters
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(28), "AB");
        assert_eq!(column_letters(52), "AZ");
        assert_eq!(column_letters(53), "BA");
        assert_eq!(column_letters(702), "ZZ");

        // Triple letters
        assert_eq!(column_letters(703), "AAA");
        assert_eq!(column_letters(MAX_COLUMNS), "XFD");

        assert_eq!(column_letters(0), "");
    }

    #[test]
    fn test_cell_address() {
        assert_eq!(cell_address(1, 1), "A1");
        assert_eq!(cell_address(28, 10), "AB10");
    }

    #[test]
    fn test_parse_cell_address() {
        assert_eq!(parse_cell_address("A1"), Some((1, 1)));
        assert_eq!(parse_cell_address("ab12"), Some((28, 12)));
        assert_eq!(parse_cell_address("$C$7"), Some((3, 7)));
        assert_eq!(parse_cell_address("XFD1048576"), Some((MAX_COLUMNS, MAX_ROWS)));

        assert_eq!(parse_cell_address("XFE1"), None);
        assert_eq!(parse_cell_address("A0"), None);
        assert_eq!(parse_cell_address("12"), None);
        assert_eq!(parse_cell_address("B"), None);
        assert_eq!(parse_cell_address("A1B"), None);
    }

    #[test]
    fn test_parse_inverts_cell_address() {
        for column in [1, 26, 27, 702, 703, 9999] {
            let address = cell_address(column, 42);
            assert_eq!(parse_cell_address(&address), Some((column, 42)));
        }
    }
}
