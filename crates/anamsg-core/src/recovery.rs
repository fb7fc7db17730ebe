//! Parsing of the recovery subsystem's status output.
//!
//! The recovery subsystem reports its result inside a human-readable
//! status line of the form `"... recovered index (cm): <digits> ..."`.
//! Extracting `<digits>` is the caller's obligation, and it must never
//! proceed with a wrong or absent value — anything other than a clean
//! parse is an error here.

use crate::codec::PackedMessage;
use crate::error::CodecError;

/// The marker preceding the recovered index in a recovery status line.
const RECOVERY_MARKER: &str = "recovered index (cm):";

/// Extract the recovered index from a recovery status line.
///
/// # Errors
///
/// Returns [`CodecError::MalformedRecoveryOutput`] when the marker is
/// missing (including "index not found" reports) or no digits follow it.
pub fn parse_recovered_index(output: &str) -> Result<u64, CodecError> {
    let malformed = || CodecError::MalformedRecoveryOutput(output.to_string());

    let start = output.find(RECOVERY_MARKER).ok_or_else(malformed)? + RECOVERY_MARKER.len();
    let rest = output[start..].trim_start();

    let digits: &str = rest
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or("");
    if digits.is_empty() {
        return Err(malformed());
    }
    digits.parse().map_err(|_| malformed())
}

/// Extract the recovered index and validate it against the schema range,
/// producing the packed message ready for decoding.
pub fn parse_recovered_message(output: &str) -> Result<PackedMessage, CodecError> {
    PackedMessage::new(parse_recovered_index(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typical_status_line() {
        let line = "Alice recovered index (cm): 17210049 (in 1.243s)";
        assert_eq!(parse_recovered_index(line).unwrap(), 17210049);
    }

    #[test]
    fn test_parse_multiline_output() {
        let output = "search bound: 1073741823\nAlice recovered index (cm): 99 (in 52ms)\n";
        assert_eq!(parse_recovered_index(output).unwrap(), 99);
    }

    #[test]
    fn test_parse_not_found_report_is_malformed() {
        let output = "Alice index not found in range 0..1073741823 (time: 34.1s)";
        assert!(matches!(
            parse_recovered_index(output),
            Err(CodecError::MalformedRecoveryOutput(_))
        ));
    }

    #[test]
    fn test_parse_marker_without_digits() {
        assert!(parse_recovered_index("recovered index (cm): pending").is_err());
        assert!(parse_recovered_index("recovered index (cm):").is_err());
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_recovered_index("").is_err());
    }

    #[test]
    fn test_parse_recovered_message_range_guard() {
        let ok = parse_recovered_message("recovered index (cm): 5").unwrap();
        assert_eq!(ok.value(), 5);
        // Parsed digits beyond the schema range fail the range guard, not
        // the parse.
        let err = parse_recovered_message("recovered index (cm): 1073741824").unwrap_err();
        assert_eq!(err, CodecError::ValueOutOfSchemaRange(1073741824));
    }
}
