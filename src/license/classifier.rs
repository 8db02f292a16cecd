use once_cell::sync::Lazy;
use regex::Regex;

use crate::license::phrases::match_phrases;
use crate::models::LicenseType;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Classify raw license text into a license family.
///
/// Families are tried in [`LicenseType::ALL`] order and the first one with any
/// matching phrase wins, so a dual-license notice resolves to the earlier
/// family. Text matching no family is [`LicenseType::Unknown`].
pub fn classify(text: &str) -> LicenseType {
    let preprocessed = preprocess(text);
    LicenseType::ALL
        .iter()
        .copied()
        .filter(|t| *t != LicenseType::Unknown)
        .find(|t| matches_preprocessed(*t, &preprocessed))
        .unwrap_or(LicenseType::Unknown)
}

fn matches_preprocessed(license: LicenseType, preprocessed: &str) -> bool {
    match_phrases(license)
        .iter()
        .any(|phrase| preprocessed.contains(&phrase.to_lowercase()))
}

/// Lowercase and collapse every run of whitespace (newlines included) to one space.
fn preprocess(text: &str) -> String {
    WHITESPACE.replace_all(&text.to_lowercase(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIT_TEXT: &str = "MIT License\n\nCopyright (c) 2020 Someone\n\n\
        Permission is hereby granted, free of charge, to any person obtaining a copy\n\
        of this software and associated documentation files (the \"Software\")";

    #[test]
    fn test_mit() {
        assert_eq!(classify(MIT_TEXT), LicenseType::Mit);
        assert_eq!(
            classify("Permission is hereby granted, free of charge, to any person"),
            LicenseType::Mit
        );
    }

    #[test]
    fn test_phrase_split_across_lines() {
        let text = "Permission is hereby granted,\n   free of charge,\r\n\tto any   person";
        assert_eq!(classify(text), LicenseType::Mit);
    }

    #[test]
    fn test_gpl_is_not_agpl_or_lgpl() {
        assert_eq!(classify("GNU GENERAL PUBLIC LICENSE\nVersion 3"), LicenseType::Gpl);
        assert_eq!(
            classify("GNU LESSER GENERAL PUBLIC LICENSE Version 2.1"),
            LicenseType::Lgpl
        );
        assert_eq!(
            classify("GNU Affero General Public License v3"),
            LicenseType::Agpl
        );
    }

    #[test]
    fn test_dual_license_resolves_to_first_family() {
        // MIT precedes Apache in classification order
        let text = "Licensed under the Apache License, Version 2.0 or The MIT License";
        assert_eq!(classify(text), LicenseType::Mit);

        // BSD precedes MIT
        let text = "BSD License. Permission is hereby granted, free of charge, to any person";
        assert_eq!(classify(text), LicenseType::Bsd);
    }

    #[test]
    fn test_other_families() {
        assert_eq!(
            classify("Permission to use, copy, modify, and/or distribute this software for any purpose"),
            LicenseType::Isc
        );
        assert_eq!(
            classify("2. Altered source versions must be plainly marked as such, and must not be\n misrepresented"),
            LicenseType::Zlib
        );
        assert_eq!(classify("Apache License\nVersion 2.0, January 2004"), LicenseType::Apache);
        assert_eq!(
            classify("Redistribution and use in source and binary forms, with or without\nmodification, are permitted"),
            LicenseType::Bsd
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify(""), LicenseType::Unknown);
        assert_eq!(classify("All rights reserved. Do not copy."), LicenseType::Unknown);
    }
}
