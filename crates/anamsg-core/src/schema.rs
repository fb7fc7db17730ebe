//! # Schema Registry — Single Source of Truth for the Wire Layout
//!
//! Defines the bit layout of the 30-bit packed message: one [`FieldSpec`]
//! per field, with every shift and mask derived from that spec. The encoder
//! and decoder both consult this table; neither carries its own numeric
//! constants, so a width change cannot desynchronize the two directions.
//!
//! ## Layout
//!
//! Packed most-significant-field-first into a 30-bit unsigned integer:
//!
//! ```text
//! action[29:24]  target[23:18]  when[17:5]  where[4:1]  flags[0]
//! ```
//!
//! The `when` field is compound — its 13 bits subdivide, MSB to LSB, into
//! `hour` (5 bits), `minute` (6 bits), and `modifier` (2 bits).
//!
//! ## Invariants
//!
//! - Field widths sum to exactly [`SCHEMA_BITS`].
//! - No two top-level fields overlap; the same holds for the `when`
//!   sub-fields within their 13-bit span.
//! - The registry is immutable: label tables are closed enums in
//!   [`crate::vocab`], fully populated at compile time. There is no
//!   post-construction mutation of shared schema state.

use serde_json::{json, Map, Value};

use crate::vocab::{Action, Flag, Location, Modifier, Target};

/// Total bit width of the packed message. A packed value always lies in
/// `[0, 2^SCHEMA_BITS - 1]`.
pub const SCHEMA_BITS: u32 = 30;

/// The fields of the packed message, including the `when` sub-fields.
///
/// Top-level fields occupy a slice of the 30-bit integer; `Hour`, `Minute`,
/// and `Modifier` occupy slices of the 13-bit `When` span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// What to do (6 bits).
    Action,
    /// What to act on (6 bits).
    Target,
    /// Compound time-and-modifier value (13 bits).
    When,
    /// Hour sub-field of `When` (5 bits).
    Hour,
    /// Minute sub-field of `When` (6 bits).
    Minute,
    /// Time-qualifier sub-field of `When` (2 bits).
    Modifier,
    /// Where to act (4 bits).
    Where,
    /// Message flags (1 bit).
    Flags,
}

impl Field {
    /// Returns the lowercase field name used in error messages and the
    /// schema document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Target => "target",
            Self::When => "when",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Modifier => "modifier",
            Self::Where => "where",
            Self::Flags => "flags",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, fixed-width, fixed-position slice of a packed integer.
///
/// `offset` is the position of the field's least-significant bit within its
/// containing integer — the full 30-bit message for top-level fields, the
/// 13-bit `when` value for sub-fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field this spec describes.
    pub field: Field,
    /// Width in bits (positive).
    pub bits: u32,
    /// Offset of the least-significant bit.
    pub offset: u32,
}

impl FieldSpec {
    /// The width-derived mask, right-aligned: `2^bits - 1`.
    pub const fn mask(&self) -> u32 {
        (1u32 << self.bits) - 1
    }

    /// The largest code representable in this field.
    pub const fn max_code(&self) -> u32 {
        self.mask()
    }

    /// Extract this field's bits from a packed value.
    pub const fn extract(&self, packed: u32) -> u32 {
        (packed >> self.offset) & self.mask()
    }

    /// Place a code into this field's position. The code must already be
    /// bounds-checked; masking here is the schema-consistency backstop.
    pub const fn place(&self, code: u32) -> u32 {
        (code & self.mask()) << self.offset
    }
}

/// `action` — bits 29:24.
pub const ACTION: FieldSpec = FieldSpec { field: Field::Action, bits: 6, offset: 24 };
/// `target` — bits 23:18.
pub const TARGET: FieldSpec = FieldSpec { field: Field::Target, bits: 6, offset: 18 };
/// `when` — bits 17:5 (compound).
pub const WHEN: FieldSpec = FieldSpec { field: Field::When, bits: 13, offset: 5 };
/// `where` — bits 4:1.
pub const WHERE: FieldSpec = FieldSpec { field: Field::Where, bits: 4, offset: 1 };
/// `flags` — bit 0.
pub const FLAGS: FieldSpec = FieldSpec { field: Field::Flags, bits: 1, offset: 0 };

/// `hour` — top 5 bits of the 13-bit `when` span.
pub const HOUR: FieldSpec = FieldSpec { field: Field::Hour, bits: 5, offset: 8 };
/// `minute` — middle 6 bits of the `when` span.
pub const MINUTE: FieldSpec = FieldSpec { field: Field::Minute, bits: 6, offset: 2 };
/// `modifier` — bottom 2 bits of the `when` span.
pub const MODIFIER: FieldSpec = FieldSpec { field: Field::Modifier, bits: 2, offset: 0 };

/// All top-level fields in MSB-first order.
pub const TOP_LEVEL_FIELDS: [FieldSpec; 5] = [ACTION, TARGET, WHEN, WHERE, FLAGS];

/// The `when` sub-fields in MSB-first order within their 13-bit span.
pub const WHEN_SUBFIELDS: [FieldSpec; 3] = [HOUR, MINUTE, MODIFIER];

/// Look up the display label for a code in an enumerable field's table.
///
/// Returns `None` for codes with no registry entry and for the numeric
/// sub-fields (`hour`, `minute`) and the compound `when`, which carry no
/// label tables.
pub fn label(field: Field, code: u32) -> Option<&'static str> {
    let code = u8::try_from(code).ok()?;
    match field {
        Field::Action => Action::from_code(code).map(|a| a.as_str()),
        Field::Target => Target::from_code(code).map(|t| t.as_str()),
        Field::Where => Location::from_code(code).map(|w| w.as_str()),
        Field::Flags => Flag::from_code(code).map(|f| f.as_str()),
        Field::Modifier => Modifier::from_code(code).map(|m| m.as_str()),
        Field::When | Field::Hour | Field::Minute => None,
    }
}

/// Look up a label, degrading to `unknown(<code>)` for unmapped codes.
///
/// This is the decoder's lookup path: an unmapped code must not fail the
/// decode — it degrades per field instead.
pub fn label_or_unknown(field: Field, code: u32) -> String {
    match label(field, code) {
        Some(l) => l.to_string(),
        None => format!("unknown({code})"),
    }
}

/// Export the registry as the declarative schema document consumed by the
/// interpretation subsystem.
///
/// The document enumerates `schema_bits` and, per field, its bit width and
/// `entries` (code → label), with the compound time field carrying a nested
/// `subfields.modifier.entries` map. Encoder bounds and decoder labels both
/// derive from the same tables this export reads, so the document cannot
/// diverge from the codec.
pub fn schema_json() -> Value {
    json!({
        "schema_bits": SCHEMA_BITS,
        "fields": {
            "action": {
                "bits": ACTION.bits,
                "entries": entries(Action::all().iter().map(|a| (a.code(), a.as_str()))),
            },
            "target": {
                "bits": TARGET.bits,
                "entries": entries(Target::all().iter().map(|t| (t.code(), t.as_str()))),
            },
            "when": {
                "bits": WHEN.bits,
                "subfields": {
                    "hour": { "bits": HOUR.bits },
                    "minute": { "bits": MINUTE.bits },
                    "modifier": {
                        "bits": MODIFIER.bits,
                        "entries": entries(Modifier::all().iter().map(|m| (m.code(), m.as_str()))),
                    },
                },
            },
            "where": {
                "bits": WHERE.bits,
                "entries": entries(Location::all().iter().map(|w| (w.code(), w.as_str()))),
            },
            "flags": {
                "bits": FLAGS.bits,
                "entries": entries(Flag::all().iter().map(|f| (f.code(), f.as_str()))),
            },
        },
    })
}

/// Build a string-keyed code → label map (the document's `entries` shape).
fn entries(pairs: impl Iterator<Item = (u8, &'static str)>) -> Value {
    let map: Map<String, Value> = pairs
        .map(|(code, label)| (code.to_string(), Value::String(label.to_string())))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_sum_to_schema_bits() {
        let total: u32 = TOP_LEVEL_FIELDS.iter().map(|s| s.bits).sum();
        assert_eq!(total, SCHEMA_BITS);
    }

    #[test]
    fn test_top_level_fields_disjoint_and_covering() {
        let mut occupied = 0u32;
        for spec in TOP_LEVEL_FIELDS {
            let range = spec.mask() << spec.offset;
            assert_eq!(occupied & range, 0, "{} overlaps another field", spec.field);
            occupied |= range;
        }
        assert_eq!(occupied, (1u32 << SCHEMA_BITS) - 1);
    }

    #[test]
    fn test_when_subfields_disjoint_and_covering() {
        let mut occupied = 0u32;
        for spec in WHEN_SUBFIELDS {
            let range = spec.mask() << spec.offset;
            assert_eq!(occupied & range, 0, "{} overlaps another sub-field", spec.field);
            occupied |= range;
        }
        assert_eq!(occupied, WHEN.mask());
    }

    #[test]
    fn test_extract_place_roundtrip() {
        for spec in TOP_LEVEL_FIELDS {
            for code in [0, 1, spec.max_code()] {
                assert_eq!(spec.extract(spec.place(code)), code);
            }
        }
    }

    #[test]
    fn test_label_full_coverage() {
        for code in 0..64 {
            assert!(label(Field::Action, code).is_some(), "action {code}");
            assert!(label(Field::Target, code).is_some(), "target {code}");
        }
        for code in 0..16 {
            assert!(label(Field::Where, code).is_some(), "where {code}");
        }
        for code in 0..2 {
            assert!(label(Field::Flags, code).is_some(), "flags {code}");
        }
        for code in 0..4 {
            assert!(label(Field::Modifier, code).is_some(), "modifier {code}");
        }
    }

    #[test]
    fn test_label_unmapped_code() {
        assert_eq!(label(Field::Action, 64), None);
        assert_eq!(label(Field::Where, 16), None);
        assert_eq!(label(Field::Flags, 2), None);
        assert_eq!(label(Field::Hour, 0), None);
    }

    #[test]
    fn test_label_or_unknown_fallback() {
        assert_eq!(label_or_unknown(Field::Action, 1), "activate");
        assert_eq!(label_or_unknown(Field::Action, 99), "unknown(99)");
        assert_eq!(label_or_unknown(Field::Where, 500), "unknown(500)");
    }

    #[test]
    fn test_schema_json_shape() {
        let doc = schema_json();
        assert_eq!(doc["schema_bits"], 30);
        assert_eq!(doc["fields"]["action"]["bits"], 6);
        assert_eq!(doc["fields"]["action"]["entries"]["1"], "activate");
        assert_eq!(doc["fields"]["target"]["entries"]["8"], "beacon");
        assert_eq!(doc["fields"]["when"]["subfields"]["modifier"]["entries"]["0"], "exact");
        assert_eq!(doc["fields"]["where"]["entries"]["0"], "HQ");
        assert_eq!(doc["fields"]["flags"]["entries"]["1"], "urgent");
        assert_eq!(
            doc["fields"]["action"]["entries"].as_object().unwrap().len(),
            64
        );
        assert_eq!(
            doc["fields"]["target"]["entries"].as_object().unwrap().len(),
            64
        );
        assert_eq!(
            doc["fields"]["where"]["entries"].as_object().unwrap().len(),
            16
        );
    }
}
