use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A discovered dependency together with its license file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Library {
    pub name: String,
    /// Path of the license file, relative to the directory that was scanned.
    pub license_path: String,
    pub license_type: LicenseType,
    /// Full license text, trimmed.
    pub license_text: String,
}

/// Closed set of recognised license families.
///
/// Declaration order is the classification precedence: when a text contains
/// phrases from several families, the first listed family wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseType {
    #[serde(rename = "BSD")]
    Bsd,
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "ISC")]
    Isc,
    Zlib,
    Apache,
    #[serde(rename = "AGPL")]
    Agpl,
    #[serde(rename = "LGPL")]
    Lgpl,
    #[serde(rename = "GPL")]
    Gpl,
    #[serde(rename = "unknown")]
    Unknown,
}

impl LicenseType {
    /// Every family, in classification order, `Unknown` last.
    pub const ALL: [LicenseType; 9] = [
        LicenseType::Bsd,
        LicenseType::Mit,
        LicenseType::Isc,
        LicenseType::Zlib,
        LicenseType::Apache,
        LicenseType::Agpl,
        LicenseType::Lgpl,
        LicenseType::Gpl,
        LicenseType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseType::Bsd => "BSD",
            LicenseType::Mit => "MIT",
            LicenseType::Isc => "ISC",
            LicenseType::Zlib => "Zlib",
            LicenseType::Apache => "Apache",
            LicenseType::Agpl => "AGPL",
            LicenseType::Lgpl => "LGPL",
            LicenseType::Gpl => "GPL",
            LicenseType::Unknown => "unknown",
        }
    }

    /// Names of all families, used for "did you mean" hints.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl std::fmt::Display for LicenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string names no license family.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownLicenseType(pub String);

impl std::fmt::Display for UnknownLicenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown license family '{}'", self.0)
    }
}

impl std::error::Error for UnknownLicenseType {}

impl FromStr for LicenseType {
    type Err = UnknownLicenseType;

    /// Case-insensitive lookup by family name (`"gpl"`, `"Zlib"`, `"UNKNOWN"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLicenseType(trimmed.to_string()))
    }
}
