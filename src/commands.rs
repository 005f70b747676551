//! Commands sent to control the vehicle.
//!
//! A command line holds zero or more fields separated by `,` and is deliminated from the
//! next line by newline. Each field is a one letter code followed by a signed integer:
//!
//! ```text
//! F100,R-050,H075
//! ```
//!
//! Parsing never fails. Malformed fields are skipped and the rest of the line is still read,
//! so a garbled line simply updates fewer fields.

use core::ops::RangeInclusive;

use ascii::AsciiChar;

use crate::config::{DRIVE_RANGE, ELEVATION_RANGE, FIELD_SEPARATOR, TURN_RANGE};
use crate::utils::clamp_to;

/// Codes introducing a field in a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCode {
    /// Drive forward or backward.
    ///
    /// Sent in form:
    ///
    /// 'FXXX' where XXX is any number between -100 and 100.
    Drive,
    /// Turn right or left.
    ///
    /// Sent in form:
    ///
    /// 'RXXX' where XXX is any number between -100 and 100, right positive.
    Turn,
    /// Set height or thrust, for drones and rockets.
    ///
    /// Sent in form:
    ///
    /// 'HXXX' where XXX is any number between 0 and 100.
    Elevation,
}

impl FieldCode {
    /// Returns the field introduced by `byte`, if it is a known code.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match AsciiChar::from_ascii(byte).ok()? {
            AsciiChar::F => Some(FieldCode::Drive),
            AsciiChar::R => Some(FieldCode::Turn),
            AsciiChar::H => Some(FieldCode::Elevation),
            _ => None,
        }
    }

    /// Legal values for this field. Parsed values are clamped into it.
    pub fn range(self) -> RangeInclusive<i32> {
        match self {
            FieldCode::Drive => DRIVE_RANGE,
            FieldCode::Turn => TURN_RANGE,
            FieldCode::Elevation => ELEVATION_RANGE,
        }
    }
}

/// Fields updated by a single command line. `None` leaves the field unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialSnapshot {
    pub drive: Option<i8>,
    pub turn: Option<i8>,
    pub elevation: Option<u8>,
}

impl PartialSnapshot {
    /// True when the line carried no valid field.
    pub fn is_empty(&self) -> bool {
        self.drive.is_none() && self.turn.is_none() && self.elevation.is_none()
    }

    /// Records `value` for `code`, clamped into the field's range. A later call for
    /// the same code overwrites an earlier one.
    pub fn set(&mut self, code: FieldCode, value: i32) {
        let value = clamp_to(value, &code.range());
        match code {
            FieldCode::Drive => self.drive = Some(value as i8),
            FieldCode::Turn => self.turn = Some(value as i8),
            FieldCode::Elevation => self.elevation = Some(value as u8),
        }
    }
}

impl From<&[u8]> for PartialSnapshot {
    fn from(line: &[u8]) -> Self {
        parse(line)
    }
}

/// Parses one command line, without its terminator.
pub fn parse(line: &[u8]) -> PartialSnapshot {
    let mut snapshot = PartialSnapshot::default();
    let mut pos = 0;

    while pos < line.len() {
        let byte = line[pos];
        // Empty segment or padding before a code
        if byte == FIELD_SEPARATOR || byte.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let code = FieldCode::from_byte(byte);
        pos += 1;

        // Find the start of the value, without leaving this field
        while pos < line.len() && line[pos] != FIELD_SEPARATOR && !starts_integer(line[pos]) {
            pos += 1;
        }
        if pos >= line.len() {
            break;
        }

        if starts_integer(line[pos]) {
            let (value, consumed) = parse_integer(&line[pos..]);
            pos += consumed;

            // Unknown codes still consume their value
            if let (Some(code), Some(value)) = (code, value) {
                snapshot.set(code, value);
            }
        }

        // Skip whatever trails the value up to the next field
        while pos < line.len() && line[pos] != FIELD_SEPARATOR {
            pos += 1;
        }
        pos += 1;
    }

    snapshot
}

fn starts_integer(byte: u8) -> bool {
    match AsciiChar::from_ascii(byte) {
        Ok(AsciiChar::Minus) => true,
        Ok(ch) => ch.as_char().is_ascii_digit(),
        Err(_) => false,
    }
}

/// Reads the longest signed integer literal at the start of `bytes`.
///
/// Returns the value, if any digits were found, and the number of bytes consumed.
/// Overlong literals saturate.
fn parse_integer(bytes: &[u8]) -> (Option<i32>, usize) {
    let negative = bytes.first() == Some(&b'-');
    let start = usize::from(negative);

    let mut value: i32 = 0;
    let mut end = start;
    while let Some(digit) = bytes.get(end).and_then(|&b| char::from(b).to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(digit as i32);
        end += 1;
    }

    if end == start {
        return (None, end);
    }
    (Some(if negative { -value } else { value }), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(line: &str) -> (Option<i8>, Option<i8>, Option<u8>) {
        let parsed = parse(line.as_bytes());
        (parsed.drive, parsed.turn, parsed.elevation)
    }

    #[test]
    fn parses_full_command() {
        assert_eq!(fields("F100,R-050,H075"), (Some(100), Some(-50), Some(75)));
    }

    #[test]
    fn reproduces_every_valid_triple() {
        for drive in (-100..=100).step_by(7) {
            for turn in (-100..=100).step_by(13) {
                for elevation in (0..=100).step_by(11) {
                    let line = format!("F{},R{},H{}", drive, turn, elevation);
                    assert_eq!(
                        fields(&line),
                        (Some(drive as i8), Some(turn as i8), Some(elevation as u8)),
                        "{}",
                        line
                    );
                }
            }
        }
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(fields("F500").0, Some(100));
        assert_eq!(fields("F-500").0, Some(-100));
        assert_eq!(fields("H-10").2, Some(0));
        assert_eq!(fields("R99999999999999").1, Some(100));
    }

    #[test]
    fn absent_fields_are_none() {
        assert_eq!(fields("R025"), (None, Some(25), None));
    }

    #[test]
    fn last_occurrence_wins() {
        assert_eq!(fields("F10,F-20,F30").0, Some(30));
    }

    #[test]
    fn malformed_field_does_not_abort_line() {
        assert_eq!(fields("F100,X,R050"), (Some(100), Some(50), None));
        assert_eq!(fields("F100,R,H20"), (Some(100), None, Some(20)));
    }

    #[test]
    fn unknown_code_consumes_its_value() {
        assert_eq!(fields("X40,H30"), (None, None, Some(30)));
    }

    #[test]
    fn value_without_code_is_ignored() {
        assert!(parse(b"100").is_empty());
        assert!(parse(b"-5,").is_empty());
    }

    #[test]
    fn tolerates_separators_and_padding() {
        assert_eq!(fields(",F10,,R20,"), (Some(10), Some(20), None));
        assert_eq!(fields("F10, R20\r"), (Some(10), Some(20), None));
    }

    #[test]
    fn bare_code_at_end() {
        assert_eq!(fields("F10,R"), (Some(10), None, None));
        assert!(parse(b"H").is_empty());
    }

    #[test]
    fn lone_minus_is_malformed() {
        assert_eq!(fields("F-,R5"), (None, Some(5), None));
    }

    #[test]
    fn noise_between_code_and_value_is_skipped() {
        assert_eq!(fields("F:+45"), (Some(45), None, None));
        assert_eq!(fields("R\u{00e9}12"), (None, Some(12), None));
    }

    #[test]
    fn empty_line() {
        assert!(parse(b"").is_empty());
    }

    #[test]
    fn from_bytes_matches_parse() {
        let line: &[u8] = b"H42";
        assert_eq!(PartialSnapshot::from(line), parse(line));
    }
}
