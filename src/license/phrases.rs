use crate::models::LicenseType;

/// Literal phrases identifying a license family.
///
/// Phrases are matched case-insensitively against whitespace-collapsed text,
/// so each phrase must itself use single spaces. `Unknown` has none.
pub fn match_phrases(license: LicenseType) -> &'static [&'static str] {
    match license {
        LicenseType::Bsd => &[
            "BSD License",
            "Redistribution and use in source and binary forms, with or without modification",
            "THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS \"AS IS\" AND ANY EXPRESS OR",
        ],
        LicenseType::Mit => &[
            "The MIT License",
            "Permission is hereby granted, free of charge, to any person",
            "THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR",
        ],
        LicenseType::Isc => {
            &["Permission to use, copy, modify, and/or distribute this software for any"]
        }
        LicenseType::Zlib => {
            &["Altered source versions must be plainly marked as such, and must not be"]
        }
        LicenseType::Apache => &["Apache License"],
        LicenseType::Agpl => &["GNU AFFERO GENERAL PUBLIC LICENSE"],
        LicenseType::Lgpl => &["GNU LESSER GENERAL PUBLIC LICENSE"],
        LicenseType::Gpl => &["GNU GENERAL PUBLIC LICENSE"],
        LicenseType::Unknown => &[],
    }
}
