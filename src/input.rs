//! Text ingestion for grids.
//!
//! Accepted layout: `DIM` rows separated by newlines or `/`, tiles within a
//! row separated by whitespace or commas. Blank lines are ignored, so
//! `"1 2 3/4 5 6/7 8 0"` and a three-line block read the same.

use std::io::BufRead;

use crate::error::InvalidGrid;
use crate::grid::Grid;

/// Splits one row into tile numbers.
pub fn parse_row(line: &str) -> Result<Vec<u32>, InvalidGrid> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u32>().map_err(|_| InvalidGrid::NotANumber {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parses and validates a whole grid.
pub fn parse_grid<const DIM: usize>(text: &str) -> Result<Grid<DIM>, InvalidGrid> {
    let rows = text
        .split(['\n', '/'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_row)
        .collect::<Result<Vec<_>, _>>()?;

    Grid::from_rows(&rows)
}

/// Reads `rows` non-empty lines from `reader` and joins them into one block
/// for [`parse_grid`].
///
/// Returns `Ok(None)` if the reader ends before any row was read. A block
/// cut short by end of input is returned as is and fails validation later.
pub fn read_block<R: BufRead>(reader: &mut R, rows: usize) -> std::io::Result<Option<String>> {
    let mut block = Vec::with_capacity(rows);
    let mut line = String::new();

    while block.len() < rows {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            block.push(trimmed.to_string());
        }
    }

    if block.is_empty() {
        return Ok(None);
    }
    Ok(Some(block.join("\n")))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_slash_separated() {
        let grid = parse_grid::<3>("1 2 3/4 5 6/7 8 0").unwrap();
        assert_eq!(grid, Grid::solved());
    }

    #[test]
    fn test_parse_multiline_with_commas() {
        let grid = parse_grid::<3>("\n 1, 2, 3\n4,5,6\n\n7 8 0\n").unwrap();
        assert_eq!(grid, Grid::solved());
    }

    #[test]
    fn test_parse_rejects_words() {
        assert_eq!(
            parse_grid::<3>("1 2 3/4 x 6/7 8 0"),
            Err(InvalidGrid::NotANumber {
                token: "x".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(
            parse_grid::<2>("1 -2/3 0"),
            Err(InvalidGrid::NotANumber { .. })
        ));
    }

    #[test]
    fn test_parse_reports_shape_errors() {
        assert_eq!(
            parse_grid::<3>("1 2 3/4 5 6"),
            Err(InvalidGrid::WrongRowCount {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            parse_grid::<2>("1 2 3/0"),
            Err(InvalidGrid::WrongRowLength {
                row: 0,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_parse_reports_permutation_errors() {
        assert_eq!(parse_grid::<2>("1 2/3 3"), Err(InvalidGrid::MissingBlank));
        assert_eq!(
            parse_grid::<2>("1 1/3 0"),
            Err(InvalidGrid::DuplicateValue { value: 1 })
        );
    }

    #[test]
    fn test_read_block_stops_after_requested_rows() {
        let mut reader = Cursor::new("1 2 3\n\n4 5 6\n7 8 0\n8 7 6\n");
        let block = read_block(&mut reader, 3).unwrap().unwrap();
        assert_eq!(block, "1 2 3\n4 5 6\n7 8 0");
        assert_eq!(parse_grid::<3>(&block), Ok(Grid::solved()));

        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert_eq!(rest, "8 7 6\n");
    }

    #[test]
    fn test_read_block_on_empty_input() {
        let mut reader = Cursor::new("");
        assert!(read_block(&mut reader, 3).unwrap().is_none());
    }

    #[test]
    fn test_short_block_fails_validation() {
        let mut reader = Cursor::new("1 2\n");
        let block = read_block(&mut reader, 2).unwrap().unwrap();
        assert_eq!(
            parse_grid::<2>(&block),
            Err(InvalidGrid::WrongRowCount {
                expected: 2,
                found: 1
            })
        );
    }
}
