//! Pin classification.
//!
//! Maps raw pin identifier strings (as printed on a board or defined by a
//! component template) to semantic roles. Matching is case-insensitive and
//! substring-based: `GPIO5_TX` is both a digital pin and a signal pin.

use serde::{Deserialize, Serialize};

/// Substrings that mark a pin as a power rail.
const POWER_TOKENS: &[&str] = &["5V", "3V3", "3.3V", "VIN", "VCC"];

/// Substrings that mark a pin as ground.
const GROUND_TOKENS: &[&str] = &["GND", "GROUND"];

/// Substrings that mark a pin as a signal or bus line.
const SIGNAL_TOKENS: &[&str] = &["SIG", "SIGNAL", "PWM", "TX", "RX", "SCL", "SDA"];

/// Prefixes that, followed by at least one digit, mark a digital pin
/// (D0, GPIO5, PIN13).
const GPIO_PREFIXES: &[&str] = &["D", "GPIO", "PIN"];

/// Semantic flags for a single pin identifier.
///
/// Flags are deliberately not mutually exclusive: `VCC_GND` classifies as
/// both power and ground, and the rule engine relies on the overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinClass {
    pub power: bool,
    pub ground: bool,
    pub gpio: bool,
    pub analog: bool,
    pub signal: bool,
}

impl PinClass {
    /// Collapse the flags into a single display role, first match wins.
    pub fn role(&self) -> PinRole {
        if self.power {
            PinRole::Power
        } else if self.ground {
            PinRole::Ground
        } else if self.gpio {
            PinRole::Digital
        } else if self.analog {
            PinRole::Analog
        } else if self.signal {
            PinRole::Signal
        } else {
            PinRole::Unknown
        }
    }

    pub fn is_unknown(&self) -> bool {
        !(self.power || self.ground || self.gpio || self.analog || self.signal)
    }
}

/// Display-only collapse of [`PinClass`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinRole {
    Power,
    Ground,
    Digital,
    Analog,
    Signal,
    Unknown,
}

impl std::fmt::Display for PinRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PinRole::Power => "power",
            PinRole::Ground => "ground",
            PinRole::Digital => "digital",
            PinRole::Analog => "analog",
            PinRole::Signal => "signal",
            PinRole::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Classify a raw pin identifier. Total: unmatched identifiers come back
/// with every flag false rather than an error.
pub fn classify(pin: &str) -> PinClass {
    let upper = pin.to_uppercase();
    PinClass {
        power: contains_any(&upper, POWER_TOKENS),
        ground: contains_any(&upper, GROUND_TOKENS),
        gpio: GPIO_PREFIXES.iter().any(|p| has_numbered(&upper, p)),
        // Substring match: any `A` followed by a digit qualifies, so GPA3
        // counts as analog. Matches the upstream matcher exactly.
        analog: has_numbered(&upper, "A"),
        signal: contains_any(&upper, SIGNAL_TOKENS),
    }
}

fn contains_any(haystack: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| haystack.contains(t))
}

/// True if `prefix` occurs anywhere in `haystack` immediately followed by
/// an ASCII digit.
fn has_numbered(haystack: &str, prefix: &str) -> bool {
    let bytes = haystack.as_bytes();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(prefix) {
        let after = from + pos + prefix.len();
        if bytes.get(after).map_or(false, |b| b.is_ascii_digit()) {
            return true;
        }
        from += pos + 1;
    }
    false
}
