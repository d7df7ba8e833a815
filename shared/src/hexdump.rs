//! Hex dump helpers for binary protocol tests
//!
//! Dump layout, one row per 4 bytes:
//! ```text
//!  01  *02* 03   04   ....
//! ```
//! Each byte is two lowercase hex digits framed by `*` when marked (spaces
//! otherwise), followed by two spaces and the printable ASCII of the row.

use tracing::warn;

/// Bytes per dump row
const COLUMNS: usize = 4;

/// Maximum number of bytes rendered by a single dump
pub const DUMP_SIZE_LIMIT: usize = 1024;

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Render `data` as a hex dump, framing every byte whose mark is set
///
/// `marks` may be shorter than `data`; bytes past its end are unmarked.
pub fn hex_dump_with_marks(data: &[u8], marks: &[bool]) -> String {
    let (data, marks) = if data.len() > DUMP_SIZE_LIMIT || marks.len() > DUMP_SIZE_LIMIT {
        warn!("Only dumping first {} bytes", DUMP_SIZE_LIMIT);
        (
            &data[..data.len().min(DUMP_SIZE_LIMIT)],
            &marks[..marks.len().min(DUMP_SIZE_LIMIT)],
        )
    } else {
        (data, marks)
    };

    let mut out = String::with_capacity(data.len().div_ceil(COLUMNS) * (COLUMNS * 5 + 3));

    for (row_index, row) in data.chunks(COLUMNS).enumerate() {
        for column in 0..COLUMNS {
            match row.get(column) {
                Some(&byte) => {
                    let offset = row_index * COLUMNS + column;
                    let mark = marks.get(offset).copied().unwrap_or(false);
                    let frame = if mark { '*' } else { ' ' };
                    out.push(frame);
                    out.push(HEX_CHARS[usize::from(byte >> 4)] as char);
                    out.push(HEX_CHARS[usize::from(byte & 0x0f)] as char);
                    out.push(frame);
                }
                None => out.push_str("    "),
            }
        }

        out.push_str("  ");
        for &byte in row {
            out.push(if (0x20..=0x7f).contains(&byte) {
                byte as char
            } else {
                '.'
            });
        }
        out.push('\n');
    }

    out
}

/// Compute per-byte mismatch marks between two buffers
///
/// Returns `None` when the buffers are identical. Otherwise the marks cover
/// the longer buffer: differing bytes and every byte past the shorter
/// buffer's end are set.
pub fn mismatch_marks(actual: &[u8], expected: &[u8]) -> Option<Vec<bool>> {
    let max_len = actual.len().max(expected.len());

    let mut marks = vec![true; max_len];
    for (mark, (a, e)) in marks.iter_mut().zip(actual.iter().zip(expected)) {
        *mark = a != e;
    }

    let identical = actual.len() == expected.len() && !marks.contains(&true);
    if identical {
        None
    } else {
        Some(marks)
    }
}

/// Format the failure message produced by [`compare_byte_buffers_with_hex_error`]
pub fn hex_error_message(description: &str, actual: &[u8], expected: &[u8], marks: &[bool]) -> String {
    format!(
        "Description:\n{}\n\nExpected:\n{}\nActual:\n{}",
        description,
        hex_dump_with_marks(expected, marks),
        hex_dump_with_marks(actual, marks),
    )
}

/// Assert that two byte buffers are equal
///
/// # Panics
///
/// Panics with a marked hex dump of both buffers when they differ.
#[track_caller]
pub fn compare_byte_buffers_with_hex_error(description: &str, actual: &[u8], expected: &[u8]) {
    if let Some(marks) = mismatch_marks(actual, expected) {
        panic!("{}", hex_error_message(description, actual, expected, &marks));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic;

    #[test]
    fn test_dump_single_row() {
        let dump = hex_dump_with_marks(&[0x01, 0x02], &[false, true]);
        assert_eq!(dump, " 01 *02*          ..\n");
    }

    #[test]
    fn test_dump_printable_ascii() {
        let dump = hex_dump_with_marks(b"abcdef", &[]);
        assert_eq!(dump, " 61  62  63  64   abcd\n 65  66           ef\n");
    }

    #[test]
    fn test_dump_marks_shorter_than_data() {
        let dump = hex_dump_with_marks(&[0xff, 0x00, 0x7f, 0x20, 0x10], &[true]);
        let rows: Vec<&str> = dump.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("*ff* 00  7f  20 "));
        assert!(rows[1].starts_with(" 10 "));
    }

    #[test]
    fn test_dump_is_truncated_at_limit() {
        let data = vec![0u8; DUMP_SIZE_LIMIT + 8];
        let dump = hex_dump_with_marks(&data, &[]);
        assert_eq!(dump.lines().count(), DUMP_SIZE_LIMIT / COLUMNS);
    }

    #[test]
    fn test_mismatch_marks_identical() {
        assert_eq!(mismatch_marks(&[1, 2, 3], &[1, 2, 3]), None);
        assert_eq!(mismatch_marks(&[], &[]), None);
    }

    #[test]
    fn test_mismatch_marks_differing_byte() {
        let marks = mismatch_marks(&[0x01, 0x02], &[0x01, 0x03]).expect("should differ");
        assert_eq!(marks, vec![false, true]);
    }

    #[test]
    fn test_mismatch_marks_length_difference() {
        let marks = mismatch_marks(&[0x01], &[0x01, 0x02, 0x03]).expect("should differ");
        assert_eq!(marks, vec![false, true, true]);
    }

    #[test]
    fn test_compare_equal_buffers_passes() {
        compare_byte_buffers_with_hex_error("same", &[0xde, 0xad], &[0xde, 0xad]);
    }

    #[test]
    fn test_compare_reports_marked_dump() {
        let result = panic::catch_unwind(|| {
            compare_byte_buffers_with_hex_error("frame header", &[0x01, 0x02], &[0x01, 0x03]);
        });
        let payload = result.expect_err("mismatch should fail");
        let message = payload
            .downcast_ref::<String>()
            .expect("panic message should be a String");

        assert!(message.starts_with("Description:\nframe header\n"));
        assert!(message.contains("Expected:\n 01 *03*"));
        assert!(message.contains("Actual:\n 01 *02*"));
    }
}
