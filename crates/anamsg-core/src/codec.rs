//! # Packed-Message Codec — Encode, Decode, Render
//!
//! The bit-exact codec over the 30-bit wire integer. `PackedMessage` is the
//! only value that crosses the boundary to the encryption subsystem, and
//! its private inner field makes the range invariant structural: the only
//! constructors are [`PackedMessage::new()`] (range-checked) and the
//! encoder itself.
//!
//! ## Asymmetric validation
//!
//! The encoder rejects any out-of-range field with a field-specific error
//! before writing bits. The decoder never rejects a representable bit
//! pattern: out-of-range hour/minute patterns are clamped and unmapped
//! codes degrade to `unknown(<code>)` labels, trading strictness for
//! robustness against malformed or adversarial payloads.
//!
//! Both directions are pure and stateless; they may be called concurrently
//! from any number of threads.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::schema::{
    label, label_or_unknown, Field, ACTION, FLAGS, HOUR, MINUTE, MODIFIER, SCHEMA_BITS, TARGET,
    WHEN, WHERE,
};
use crate::vocab::{Action, Flag, Location, Modifier, Target};

/// Fixed placeholder returned when there is nothing valid to render.
pub const INVALID_FORMAT: &str = "Invalid message format";

/// A packed message: a single unsigned integer in `[0, 2^30 - 1]`.
///
/// The encryption layer treats this value as an opaque payload; no other
/// representation of a message may be handed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u32")]
pub struct PackedMessage(u32);

impl PackedMessage {
    /// Construct a packed message, enforcing the schema's total bit range.
    pub fn new(value: u64) -> Result<Self, CodecError> {
        if value >= 1u64 << SCHEMA_BITS {
            return Err(CodecError::ValueOutOfSchemaRange(value));
        }
        Ok(Self(value as u32))
    }

    /// The raw packed integer.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u64> for PackedMessage {
    type Error = CodecError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PackedMessage> for u32 {
    fn from(m: PackedMessage) -> u32 {
        m.0
    }
}

impl std::str::FromStr for PackedMessage {
    type Err = CodecError;

    /// Parse the human-entered raw-integer input path: decimal digits only,
    /// then the same range guard as [`PackedMessage::new()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: u64 = trimmed
            .parse()
            .map_err(|_| CodecError::InvalidMessageValue(s.to_string()))?;
        Self::new(value)
    }
}

impl std::fmt::Display for PackedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The structured tuple of field values fed to the encoder, each already
/// reduced to its small-integer wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    /// Action code, `0..=63`.
    pub action: u8,
    /// Target code, `0..=63`.
    pub target: u8,
    /// Hour of day, `0..=23`.
    pub hour: u8,
    /// Minute, `0..=59`.
    pub minute: u8,
    /// Location code, `0..=15`.
    pub location: u8,
    /// Flag code, `0..=1`.
    pub flags: u8,
    /// Time-modifier code, `0..=3`.
    pub modifier: u8,
}

impl FieldValues {
    /// Field values with the default flag (`stealth`) and modifier (`exact`).
    pub fn new(action: u8, target: u8, hour: u8, minute: u8, location: u8) -> Self {
        Self {
            action,
            target,
            hour,
            minute,
            location,
            flags: 0,
            modifier: 0,
        }
    }

    /// Build field values from typed vocabulary variants. Infallible for
    /// the enumerable fields; hour and minute are still range-checked by
    /// the encoder.
    pub fn from_parts(
        action: Action,
        target: Target,
        hour: u8,
        minute: u8,
        location: Location,
        flags: Flag,
        modifier: Modifier,
    ) -> Self {
        Self {
            action: action.code(),
            target: target.code(),
            hour,
            minute,
            location: location.code(),
            flags: flags.code(),
            modifier: modifier.code(),
        }
    }
}

/// A decoded message: the structured record produced by [`decode()`].
///
/// Constructed only by the decoder, consumed for display. Re-encoding a
/// decoded message requires going back through [`encode()`] with explicit
/// field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedMessage {
    /// Action label.
    pub action: String,
    /// Target label.
    pub target: String,
    /// `HH:MM`, optionally prefixed by a non-exact modifier label.
    pub when: String,
    /// Location label.
    #[serde(rename = "where")]
    pub location: String,
    /// Flag labels. Width 1 today, so always a singleton, but kept as a
    /// sequence for wire-shape stability.
    pub flags: Vec<String>,
}

impl std::fmt::Display for DecodedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render(Some(self)))
    }
}

fn check(field: Field, value: u32, max: u32) -> Result<(), CodecError> {
    if value > max {
        return Err(CodecError::FieldOutOfRange { field, value, max });
    }
    Ok(())
}

/// Encode field values into a packed message.
///
/// Each precondition is checked independently and fails fast with a
/// field-specific [`CodecError::FieldOutOfRange`] before any bits are
/// written. The final range assertion is a consistency check on the schema
/// itself; the per-field bounds make it unreachable, but it must hold for
/// every value handed to the encryption layer.
pub fn encode(fields: &FieldValues) -> Result<PackedMessage, CodecError> {
    check(Field::Hour, fields.hour.into(), 23)?;
    check(Field::Minute, fields.minute.into(), 59)?;
    check(Field::Action, fields.action.into(), ACTION.max_code())?;
    check(Field::Target, fields.target.into(), TARGET.max_code())?;
    check(Field::Where, fields.location.into(), WHERE.max_code())?;
    check(Field::Flags, fields.flags.into(), FLAGS.max_code())?;
    check(Field::Modifier, fields.modifier.into(), MODIFIER.max_code())?;

    let when = HOUR.place(fields.hour.into())
        | MINUTE.place(fields.minute.into())
        | MODIFIER.place(fields.modifier.into());

    let packed = ACTION.place(fields.action.into())
        | TARGET.place(fields.target.into())
        | WHEN.place(when)
        | WHERE.place(fields.location.into())
        | FLAGS.place(fields.flags.into());

    PackedMessage::new(packed.into())
}

/// Decode a packed message into its structured record.
///
/// Never fails: the range guard already ran in [`PackedMessage::new()`],
/// and field-level anomalies degrade per field — hour and minute clamp to
/// their documented maxima, unmapped codes render as `unknown(<code>)`.
pub fn decode(message: PackedMessage) -> DecodedMessage {
    let v = message.value();

    let action = ACTION.extract(v);
    let target = TARGET.extract(v);
    let when = WHEN.extract(v);
    let location = WHERE.extract(v);
    let flags = FLAGS.extract(v);

    let hour = HOUR.extract(when).min(23);
    let minute = MINUTE.extract(when).min(59);
    let modifier = MODIFIER.extract(when);

    let mut when_str = format!("{hour:02}:{minute:02}");
    if modifier > 0 {
        // Suppression keys on the label, not the code: a modifier whose
        // label reads "exact" never prefixes the time.
        if let Some(label) = label(Field::Modifier, modifier) {
            if label != Modifier::Exact.as_str() {
                when_str = format!("{label} {when_str}");
            }
        }
    }

    DecodedMessage {
        action: label_or_unknown(Field::Action, action),
        target: label_or_unknown(Field::Target, target),
        when: when_str,
        location: label_or_unknown(Field::Where, location),
        flags: vec![label_or_unknown(Field::Flags, flags)],
    }
}

/// Render a decoded message for display.
///
/// Joins the present components in fixed order with `" | "`. An absent
/// message, or a message with no components at all, renders as the fixed
/// [`INVALID_FORMAT`] placeholder. Pure formatting; no validation.
pub fn render(decoded: Option<&DecodedMessage>) -> String {
    let Some(d) = decoded else {
        return INVALID_FORMAT.to_string();
    };

    let mut parts = vec![
        format!("Action: {}", d.action),
        format!("Target: {}", d.target),
        format!("When: {}", d.when),
        format!("Where: {}", d.location),
    ];
    if !d.flags.is_empty() {
        parts.push(format!("Flags: {}", d.flags.join(", ")));
    }

    if parts.is_empty() {
        INVALID_FORMAT.to_string()
    } else {
        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_message_range() {
        assert!(PackedMessage::new(0).is_ok());
        assert!(PackedMessage::new((1 << 30) - 1).is_ok());
        assert_eq!(
            PackedMessage::new(1 << 30),
            Err(CodecError::ValueOutOfSchemaRange(1 << 30))
        );
    }

    #[test]
    fn test_packed_message_parse() {
        let m: PackedMessage = " 42 ".parse().unwrap();
        assert_eq!(m.value(), 42);
        assert!(matches!(
            "not-a-number".parse::<PackedMessage>(),
            Err(CodecError::InvalidMessageValue(_))
        ));
        assert!(matches!(
            "-5".parse::<PackedMessage>(),
            Err(CodecError::InvalidMessageValue(_))
        ));
        assert!(matches!(
            "1073741824".parse::<PackedMessage>(),
            Err(CodecError::ValueOutOfSchemaRange(_))
        ));
    }

    #[test]
    fn test_packed_message_serde() {
        let m = PackedMessage::new(99).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "99");
        let back: PackedMessage = serde_json::from_str("99").unwrap();
        assert_eq!(back, m);
        assert!(serde_json::from_str::<PackedMessage>("1073741824").is_err());
    }

    #[test]
    fn test_encode_known_vector() {
        let fields = FieldValues {
            action: 1,
            target: 8,
            hour: 15,
            minute: 30,
            location: 0,
            flags: 1,
            modifier: 0,
        };
        let expected = (1u32 << 24) | (8 << 18) | (((15 << 8) | (30 << 2)) << 5) | 1;
        assert_eq!(encode(&fields).unwrap().value(), expected);
    }

    #[test]
    fn test_encode_rejects_each_field_independently() {
        let good = FieldValues::new(1, 8, 15, 30, 0);

        let cases: [(Field, FieldValues, u32, u32); 7] = [
            (Field::Hour, FieldValues { hour: 24, ..good }, 24, 23),
            (Field::Minute, FieldValues { minute: 60, ..good }, 60, 59),
            (Field::Action, FieldValues { action: 64, ..good }, 64, 63),
            (Field::Target, FieldValues { target: 64, ..good }, 64, 63),
            (Field::Where, FieldValues { location: 16, ..good }, 16, 15),
            (Field::Flags, FieldValues { flags: 2, ..good }, 2, 1),
            (Field::Modifier, FieldValues { modifier: 4, ..good }, 4, 3),
        ];

        for (field, fields, value, max) in cases {
            assert_eq!(
                encode(&fields),
                Err(CodecError::FieldOutOfRange { field, value, max }),
                "expected {field} violation"
            );
        }
    }

    #[test]
    fn test_minute_sixty_names_minute() {
        let err = encode(&FieldValues::new(0, 0, 0, 60, 0)).unwrap_err();
        assert_eq!(
            err,
            CodecError::FieldOutOfRange {
                field: Field::Minute,
                value: 60,
                max: 59
            }
        );
        assert!(err.to_string().contains("minute"));
    }

    #[test]
    fn test_decode_concrete_scenario() {
        let fields = FieldValues {
            action: 1,
            target: 8,
            hour: 15,
            minute: 30,
            location: 0,
            flags: 1,
            modifier: 0,
        };
        let decoded = decode(encode(&fields).unwrap());
        assert_eq!(decoded.action, "activate");
        assert_eq!(decoded.target, "beacon");
        assert_eq!(decoded.when, "15:30");
        assert_eq!(decoded.location, "HQ");
        assert_eq!(decoded.flags, vec!["urgent".to_string()]);
        assert_eq!(
            render(Some(&decoded)),
            "Action: activate | Target: beacon | When: 15:30 | Where: HQ | Flags: urgent"
        );
    }

    #[test]
    fn test_decode_clamps_hour_31() {
        // hour = 31 is a representable 5-bit pattern the encoder never
        // produces; the decoder clamps instead of failing.
        let when = (31u32 << 8) | (10 << 2);
        let raw = (2u32 << 24) | (5 << 18) | (when << 5);
        let decoded = decode(PackedMessage::new(raw.into()).unwrap());
        assert_eq!(decoded.when, "23:10");
    }

    #[test]
    fn test_decode_clamps_minute_63() {
        let when = (12u32 << 8) | (63 << 2);
        let raw = when << 5;
        let decoded = decode(PackedMessage::new(raw.into()).unwrap());
        assert_eq!(decoded.when, "12:59");
    }

    #[test]
    fn test_decode_modifier_prefix() {
        for (modifier, expected) in [
            (Modifier::Exact, "07:05"),
            (Modifier::Before, "before 07:05"),
            (Modifier::After, "after 07:05"),
            (Modifier::Approximate, "approximate 07:05"),
        ] {
            let fields = FieldValues {
                modifier: modifier.code(),
                ..FieldValues::new(0, 0, 7, 5, 3)
            };
            let decoded = decode(encode(&fields).unwrap());
            assert_eq!(decoded.when, expected);
        }
    }

    #[test]
    fn test_decode_zero_message() {
        let decoded = decode(PackedMessage::new(0).unwrap());
        assert_eq!(decoded.action, "acknowledge");
        assert_eq!(decoded.target, "access key");
        assert_eq!(decoded.when, "00:00");
        assert_eq!(decoded.location, "HQ");
        assert_eq!(decoded.flags, vec!["stealth".to_string()]);
    }

    #[test]
    fn test_render_absent_message() {
        assert_eq!(render(None), INVALID_FORMAT);
    }

    #[test]
    fn test_render_empty_flags_omits_component() {
        let mut decoded = decode(PackedMessage::new(0).unwrap());
        decoded.flags.clear();
        let rendered = render(Some(&decoded));
        assert!(!rendered.contains("Flags"));
        assert!(rendered.contains("Action: acknowledge"));
    }

    #[test]
    fn test_display_matches_render() {
        let decoded = decode(PackedMessage::new(12345).unwrap());
        assert_eq!(decoded.to_string(), render(Some(&decoded)));
    }
}
