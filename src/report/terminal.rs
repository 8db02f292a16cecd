use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Library, LicenseType};

/// Print the library list.
///
/// `quiet` prints plain aligned columns suitable for piping; otherwise a
/// table followed by a one-line summary.
pub fn render(libraries: &[Library], quiet: bool) {
    if quiet {
        println!("{}", plain(libraries));
        return;
    }

    if libraries.is_empty() {
        println!(" No libraries found.");
        return;
    }

    println!("{}", table(libraries));

    let unknown = libraries
        .iter()
        .filter(|l| l.license_type == LicenseType::Unknown)
        .count();
    println!(
        "\n {} libraries, {} with unrecognized license",
        libraries.len().to_string().bold(),
        if unknown > 0 {
            unknown.to_string().yellow()
        } else {
            unknown.to_string().green()
        }
    );
}

/// `name  type  path` per line, columns padded to the widest entry.
pub fn plain(libraries: &[Library]) -> String {
    let name_width = libraries
        .iter()
        .map(|l| l.name.chars().count())
        .max()
        .unwrap_or(0);
    libraries
        .iter()
        .map(|l| {
            format!(
                "{:<name_width$}  {:<7}  {}",
                l.name,
                l.license_type.as_str(),
                l.license_path,
                name_width = name_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table(libraries: &[Library]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Path").add_attribute(Attribute::Bold),
        ]);

    for library in libraries {
        table.add_row(vec![
            Cell::new(&library.name),
            Cell::new(library.license_type.as_str()).fg(license_color(library.license_type)),
            Cell::new(&library.license_path),
        ]);
    }

    table
}

fn license_color(license: LicenseType) -> Color {
    match license {
        LicenseType::Bsd
        | LicenseType::Mit
        | LicenseType::Isc
        | LicenseType::Zlib
        | LicenseType::Apache => Color::Green,
        LicenseType::Lgpl => Color::Yellow,
        LicenseType::Agpl | LicenseType::Gpl => Color::Red,
        LicenseType::Unknown => Color::DarkGrey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(name: &str, license_type: LicenseType) -> Library {
        Library {
            name: name.to_string(),
            license_path: format!("{}/LICENSE", name),
            license_type,
            license_text: String::new(),
        }
    }

    #[test]
    fn test_plain_columns_align() {
        let out = plain(&[
            library("Alamofire", LicenseType::Mit),
            library("Yams", LicenseType::Unknown),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Alamofire  MIT      Alamofire/LICENSE");
        assert_eq!(lines[1], "Yams       unknown  Yams/LICENSE");
    }

    #[test]
    fn test_plain_empty() {
        assert_eq!(plain(&[]), "");
    }

    #[test]
    fn test_table_has_a_row_per_library() {
        let t = table(&[library("A", LicenseType::Gpl), library("B", LicenseType::Bsd)]);
        assert_eq!(t.row_iter().count(), 2);
    }
}
