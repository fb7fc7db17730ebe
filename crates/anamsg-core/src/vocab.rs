//! # Field Vocabularies — Closed Enumerations
//!
//! One enum per enumerable field, each a closed, exhaustive set of named
//! variants with an associated small-integer wire code and display label.
//! Every table is defined by a single (code, variant, label) listing; the
//! `vocabulary!` macro derives code lookup, label lookup, parsing, and
//! serde from that one listing, so the three views cannot drift apart.
//!
//! Adding or renaming an entry happens in exactly one place, and the
//! bijection between codes and `[0, 2^bit_width)` is checked by tests.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::schema::Field;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident ($field:expr, $fname:literal) {
            $($code:literal => $variant:ident = $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// All variants in wire-code order.
            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            /// The small-integer wire code for this variant.
            pub fn code(&self) -> u8 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            /// Look up a variant by wire code.
            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Strict code lookup, failing with the unmapped code.
            pub fn try_from_code(code: u8) -> Result<Self, CodecError> {
                Self::from_code(code).ok_or(CodecError::UnknownCode {
                    field: $field,
                    code: code as u32,
                })
            }

            /// The display label for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(CodecError::UnknownLabel {
                        field: $fname,
                        label: other.to_string(),
                    }),
                }
            }
        }
    };
}

vocabulary! {
    /// What the message instructs the recipient to do. Covers all 64 codes
    /// of the 6-bit `action` field.
    Action (Field::Action, "action") {
        0 => Acknowledge = "acknowledge",
        1 => Activate = "activate",
        2 => Alert = "alert",
        3 => Assemble = "assemble",
        4 => Authorize = "authorize",
        5 => Backup = "backup",
        6 => Broadcast = "broadcast",
        7 => Cancel = "cancel",
        8 => Capture = "capture",
        9 => Check = "check",
        10 => Collect = "collect",
        11 => Command = "command",
        12 => Compromise = "compromise",
        13 => Confirm = "confirm",
        14 => Connect = "connect",
        15 => Contact = "contact",
        16 => Continue = "continue",
        17 => Copy = "copy",
        18 => Decrypt = "decrypt",
        19 => Deploy = "deploy",
        20 => Disable = "disable",
        21 => Disconnect = "disconnect",
        22 => Disrupt = "disrupt",
        23 => Download = "download",
        24 => Enable = "enable",
        25 => Encrypt = "encrypt",
        26 => Engage = "engage",
        27 => Escalate = "escalate",
        28 => Evacuate = "evacuate",
        29 => Execute = "execute",
        30 => Extract = "extract",
        31 => Forward = "forward",
        32 => Gather = "gather",
        33 => Hide = "hide",
        34 => Hold = "hold",
        35 => Identify = "identify",
        36 => Initiate = "initiate",
        37 => Inspect = "inspect",
        38 => Intercept = "intercept",
        39 => Locate = "locate",
        40 => Lock = "lock",
        41 => Log = "log",
        42 => Maintain = "maintain",
        43 => Meet = "meet",
        44 => Move = "move",
        45 => Monitor = "monitor",
        46 => Neutralize = "neutralize",
        47 => Observe = "observe",
        48 => Override = "override",
        49 => Pause = "pause",
        50 => Ping = "ping",
        51 => Prepare = "prepare",
        52 => Reboot = "reboot",
        53 => Record = "record",
        54 => Redirect = "redirect",
        55 => Report = "report",
        56 => Request = "request",
        57 => Rescue = "rescue",
        58 => Reset = "reset",
        59 => Restart = "restart",
        60 => Retrieve = "retrieve",
        61 => Revoke = "revoke",
        62 => Scan = "scan",
        63 => Send = "send",
    }
}

vocabulary! {
    /// What the action applies to. Covers all 64 codes of the 6-bit
    /// `target` field.
    Target (Field::Target, "target") {
        0 => AccessKey = "access key",
        1 => Account = "account",
        2 => ActivationCode = "activation code",
        3 => Agent = "agent",
        4 => AntennaArray = "antenna array",
        5 => Asset = "asset",
        6 => AuthorizationRequest = "authorization request",
        7 => BackupDrive = "backup drive",
        8 => Beacon = "beacon",
        9 => Blueprint = "blueprint",
        10 => Checkpoint = "checkpoint",
        11 => CovertAsset = "covert asset",
        12 => DataCache = "data cache",
        13 => DataStream = "data stream",
        14 => Device = "device",
        15 => DigitalWallet = "digital wallet",
        16 => Drone = "drone",
        17 => EmergencyContact = "emergency contact",
        18 => EncryptedFile = "encrypted file",
        19 => EntryPoint = "entry point",
        20 => EscapePlan = "escape plan",
        21 => File = "file",
        22 => Firewall = "firewall",
        23 => Flag = "flag",
        24 => Footage = "footage",
        25 => Gateway = "gateway",
        26 => GeoCoordinate = "geo coordinate",
        27 => Guard = "guard",
        28 => Handshake = "handshake",
        29 => InjectionScript = "injection script",
        30 => Journal = "journal",
        31 => KeyMaterial = "key material",
        32 => Laptop = "laptop",
        33 => Location = "location",
        34 => LogEntry = "log entry",
        35 => Manifest = "manifest",
        36 => MeetingRequest = "meeting request",
        37 => Message = "message",
        38 => MissionLog = "mission log",
        39 => Node = "node",
        40 => Objective = "objective",
        41 => OperationDirective = "operation directive",
        42 => Passphrase = "passphrase",
        43 => Payload = "payload",
        44 => PersonalToken = "personal token",
        45 => Report = "report",
        46 => RescueCode = "rescue code",
        47 => Route = "route",
        48 => Satellite = "satellite",
        49 => Scan = "scan",
        50 => Server = "server",
        51 => Signal = "signal",
        52 => Software = "software",
        53 => SupplyCrate = "supply crate",
        54 => Team = "team",
        55 => Terminal = "terminal",
        56 => ThreatSignature = "threat signature",
        57 => TrackingBeacon = "tracking beacon",
        58 => Transport = "transport",
        59 => Unit = "unit",
        60 => Vault = "vault",
        61 => Vehicle = "vehicle",
        62 => SafeHouse = "safe house",
        63 => RelayNode = "relay node",
    }
}

vocabulary! {
    /// Where the action takes place. Covers all 16 codes of the 4-bit
    /// `where` field.
    Location (Field::Where, "where") {
        0 => Hq = "HQ",
        1 => FieldCamp = "Field Camp",
        2 => Zone1 = "Zone 1",
        3 => Zone2 = "Zone 2",
        4 => Zone3 = "Zone 3",
        5 => SafeHouse = "Safe House",
        6 => ExtractionPoint = "Extraction Point",
        7 => Embassy = "Embassy",
        8 => Airport = "Airport",
        9 => Seaport = "Seaport",
        10 => Bridge = "Bridge",
        11 => Tunnel = "Tunnel",
        12 => UrbanArea = "Urban Area",
        13 => RuralArea = "Rural Area",
        14 => MountainPass = "Mountain Pass",
        15 => Desert = "Desert",
    }
}

vocabulary! {
    /// The single-bit message flag.
    Flag (Field::Flags, "flags") {
        0 => Stealth = "stealth",
        1 => Urgent = "urgent",
    }
}

vocabulary! {
    /// Qualifier for the time value: exact, or a fuzzier relation to it.
    /// The `exact` label is suppressed when rendering.
    Modifier (Field::Modifier, "modifier") {
        0 => Exact = "exact",
        1 => Before = "before",
        2 => After = "after",
        3 => Approximate = "approximate",
    }
}
