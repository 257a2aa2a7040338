//! FDI tooth numbering, tooth surfaces, and code validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_CODE_LEN;
use crate::errors::{PayloadError, ValidationError};

/// One of the five canonical faces of a tooth.
///
/// Variants are declared in code order so the derived `Ord` sorts surfaces
/// the same way their one-letter codes sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Surface {
    #[serde(rename = "D")]
    Distal,
    #[serde(rename = "L")]
    Lingual,
    #[serde(rename = "M")]
    Mesial,
    #[serde(rename = "O")]
    Occlusal,
    #[serde(rename = "V")]
    Vestibular,
}

impl Surface {
    pub fn as_code(&self) -> &'static str {
        match self {
            Surface::Distal => "D",
            Surface::Lingual => "L",
            Surface::Mesial => "M",
            Surface::Occlusal => "O",
            Surface::Vestibular => "V",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Surface {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(Surface::Distal),
            "L" => Ok(Surface::Lingual),
            "M" => Ok(Surface::Mesial),
            "O" => Ok(Surface::Occlusal),
            "V" => Ok(Surface::Vestibular),
            other => Err(PayloadError::InvalidSurface(other.to_string())),
        }
    }
}

/// Validate an FDI two-digit tooth code.
///
/// Quadrants 1–4 are permanent teeth (1–8 per quadrant), quadrants 5–8 are
/// primary teeth (1–5 per quadrant).
pub fn validate_fdi_tooth(tooth_id: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidToothId(tooth_id.to_string());
    let bytes = tooth_id.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    let quadrant = bytes[0] - b'0';
    let position = bytes[1] - b'0';
    let max_position = match quadrant {
        1..=4 => 8,
        5..=8 => 5,
        _ => return Err(invalid()),
    };
    if position == 0 || position > max_position {
        return Err(invalid());
    }
    Ok(())
}

/// Validate a whole-tooth or surface code: 1..=32 ASCII alphanumerics, `_` or `-`.
pub fn validate_code(code: &str) -> Result<(), PayloadError> {
    let ok = !code.is_empty()
        && code.len() <= MAX_CODE_LEN
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(PayloadError::InvalidCode(code.to_string()))
    }
}
