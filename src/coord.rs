//! Human-facing coordinate labels such as `A10`.
//!
//! A label is a single column symbol followed by a 1-based row number.
//! Columns use `A-Z`, then `a-z`, then the ASCII punctuation symbols, which
//! caps boards at [`MAX_FIELD_WIDTH`](crate::config::MAX_FIELD_WIDTH)
//! columns. Row numbers never contain those symbols, so parsing is
//! unambiguous.

use alloc::format;
use alloc::string::String;

use crate::config::MAX_FIELD_WIDTH;

const COLUMN_LABELS: &[u8; MAX_FIELD_WIDTH] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Errors returned when parsing a coordinate label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// Input was empty.
    Empty,
    /// First character is not a column of this board.
    UnknownColumn(char),
    /// Remainder is not a positive decimal row number.
    InvalidRow(String),
    /// Row number is outside `1..=height`.
    RowOutOfRange { row: usize, height: usize },
}

impl core::fmt::Display for CoordError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoordError::Empty => write!(f, "Empty input"),
            CoordError::UnknownColumn(c) => write!(f, "Invalid column '{}'", c),
            CoordError::InvalidRow(s) => write!(f, "Invalid row '{}'", s),
            CoordError::RowOutOfRange { row, height } => {
                write!(f, "Row {} out of bounds, must be 1-{}", row, height)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoordError {}

/// Column symbol for `col`, or `None` past the last supported column.
pub fn column_label(col: usize) -> Option<char> {
    COLUMN_LABELS.get(col).map(|&b| b as char)
}

/// Column index of `label`.
pub fn column_index(label: char) -> Option<usize> {
    if !label.is_ascii() {
        return None;
    }
    COLUMN_LABELS.iter().position(|&b| b == label as u8)
}

/// Render `pos` of a board `width` columns wide, e.g. `A10` for column 0 row 9.
pub fn render_label(pos: usize, width: usize) -> String {
    let col = pos % width;
    let row = pos / width;
    let symbol = column_label(col).unwrap_or('?');
    format!("{}{}", symbol, row + 1)
}

/// Parse a label back into a position on a `width` x `height` board.
pub fn parse_label(input: &str, width: usize, height: usize) -> Result<usize, CoordError> {
    let mut chars = input.chars();
    let symbol = chars.next().ok_or(CoordError::Empty)?;
    let col = column_index(symbol)
        .filter(|&c| c < width)
        .ok_or(CoordError::UnknownColumn(symbol))?;
    let rest = chars.as_str();
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoordError::InvalidRow(rest.into()));
    }
    let row: usize = rest
        .parse()
        .map_err(|_| CoordError::InvalidRow(rest.into()))?;
    if row == 0 || row > height {
        return Err(CoordError::RowOutOfRange { row, height });
    }
    Ok((row - 1) * width + col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_alphabet_is_distinct() {
        for (i, &a) in COLUMN_LABELS.iter().enumerate() {
            assert!(!a.is_ascii_digit());
            assert!(COLUMN_LABELS[i + 1..].iter().all(|&b| b != a));
        }
    }

    #[test]
    fn known_labels() {
        assert_eq!(render_label(90, 10), "A10");
        assert_eq!(parse_label("A10", 10, 10), Ok(90));
        assert_eq!(parse_label("J1", 10, 10), Ok(9));
        assert_eq!(column_label(26), Some('a'));
        assert_eq!(column_label(52), Some('!'));
        assert_eq!(column_label(83), Some('~'));
        assert_eq!(column_label(84), None);
    }

    #[test]
    fn rejects_bad_labels() {
        assert_eq!(parse_label("", 10, 10), Err(CoordError::Empty));
        assert_eq!(parse_label("K1", 10, 10), Err(CoordError::UnknownColumn('K')));
        assert_eq!(parse_label("a1", 10, 10), Err(CoordError::UnknownColumn('a')));
        assert_eq!(parse_label("A", 10, 10), Err(CoordError::InvalidRow(String::new())));
        assert_eq!(parse_label("A+1", 10, 10), Err(CoordError::InvalidRow("+1".into())));
        assert_eq!(
            parse_label("A0", 10, 10),
            Err(CoordError::RowOutOfRange { row: 0, height: 10 })
        );
        assert_eq!(
            parse_label("A11", 10, 10),
            Err(CoordError::RowOutOfRange { row: 11, height: 10 })
        );
    }
}
