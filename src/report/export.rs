use std::borrow::Cow;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;

use crate::models::{Library, LicenseType};

/// Output format of an exported licenses file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Xml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Text, Format::Json, Format::Xml];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Format::as_str).collect()
    }

    /// Pick a format from an output file extension, defaulting to text.
    pub fn infer(path: &Path) -> Format {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            Some(ext) if ext.eq_ignore_ascii_case("xml") => Format::Xml,
            _ => Format::Text,
        }
    }

    /// Guess the format a template produces from its first non-blank character.
    pub fn infer_from_template(template: &Template) -> Format {
        match template.raw.trim_start().chars().next() {
            Some('<') => Format::Xml,
            Some('{') | Some('[') => Format::Json,
            _ => Format::Text,
        }
    }

    /// Make a library field safe to splice into a document of this format.
    fn escape<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Format::Text => Cow::Borrowed(value),
            Format::Xml => escape(value),
            Format::Json => {
                let quoted = serde_json::Value::from(value).to_string();
                Cow::Owned(quoted[1..quoted.len() - 1].to_string())
            }
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// User-supplied export layout.
///
/// Everything before `$start` is the header and everything after `$end` the
/// footer. The part in between is repeated once per library with `$name`,
/// `$type` and `$text` filled in. Text following `$separator` inside that
/// part is emitted between two libraries rather than after each one.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    raw: String,
}

impl Template {
    pub fn new(raw: impl Into<String>) -> Self {
        Template { raw: raw.into() }
    }

    /// `value` is used as the template itself when it contains `$name`,
    /// otherwise it is read as the path of a template file.
    pub fn load(value: &str) -> Result<Self> {
        if value.contains("$name") {
            return Ok(Template::new(value));
        }
        let raw = std::fs::read_to_string(value)
            .with_context(|| format!("Unable to read template file at {}.", value))?;
        Ok(Template::new(raw))
    }

    pub fn render(&self, libraries: &[Library], format: Format) -> String {
        let (header, rest) = self.raw.split_once("$start").unwrap_or(("", self.raw.as_str()));
        let (repeated, footer) = rest.split_once("$end").unwrap_or((rest, ""));
        let (body, separator) = repeated.split_once("$separator").unwrap_or((repeated, ""));

        let bodies: Vec<String> = libraries
            .iter()
            .map(|l| {
                body.replace("$name", &format.escape(&l.name))
                    .replace("$type", l.license_type.as_str())
                    .replace("$text", &format.escape(&l.license_text))
            })
            .collect();

        format!("{}{}{}", header, bodies.join(separator), footer)
    }
}

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    license_type: LicenseType,
    text: &'a str,
}

/// Render libraries as an attribution document.
pub fn render(libraries: &[Library], format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(render_text(libraries)),
        Format::Json => render_json(libraries),
        Format::Xml => render_xml(libraries),
    }
}

fn render_text(libraries: &[Library]) -> String {
    let sections: Vec<String> = libraries
        .iter()
        .map(|l| format!("{} ({})\n\n{}", l.name, l.license_type, l.license_text))
        .collect();
    let mut out = sections.join("\n\n---\n\n");
    out.push('\n');
    out
}

fn render_json(libraries: &[Library]) -> Result<String> {
    let entries: Vec<Entry> = libraries
        .iter()
        .map(|l| Entry {
            name: &l.name,
            license_type: l.license_type,
            text: &l.license_text,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

fn render_xml(libraries: &[Library]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("licenses")))?;

    for library in libraries {
        let start = BytesStart::new("license").with_attributes([
            ("name", library.name.as_str()),
            ("type", library.license_type.as_str()),
        ]);
        writer.write_event(Event::Start(start))?;
        writer.write_event(Event::Text(BytesText::new(&library.license_text)))?;
        writer.write_event(Event::End(BytesEnd::new("license")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("licenses")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn libraries() -> Vec<Library> {
        vec![
            Library {
                name: "Alamofire".to_string(),
                license_path: "checkouts/Alamofire/LICENSE".to_string(),
                license_type: LicenseType::Mit,
                license_text: "Permission is hereby granted & <more>".to_string(),
            },
            Library {
                name: "Yams".to_string(),
                license_path: "checkouts/Yams/LICENSE".to_string(),
                license_type: LicenseType::Apache,
                license_text: "Apache License".to_string(),
            },
        ]
    }

    #[test]
    fn test_format_parse_and_infer() {
        assert_eq!("JSON".parse::<Format>(), Ok(Format::Json));
        assert!("yaml".parse::<Format>().is_err());
        assert_eq!(Format::infer(Path::new("out/LICENSES.xml")), Format::Xml);
        assert_eq!(Format::infer(Path::new("Credits.JSON")), Format::Json);
        assert_eq!(Format::infer(Path::new("Acknowledgements")), Format::Text);
    }

    #[test]
    fn test_text() {
        let out = render(&libraries(), Format::Text).unwrap();
        assert!(out.starts_with("Alamofire (MIT)\n\nPermission"));
        assert!(out.contains("\n\n---\n\nYams (Apache)\n\nApache License\n"));
    }

    #[test]
    fn test_json() {
        let out = render(&libraries(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "Alamofire");
        assert_eq!(value[0]["type"], "MIT");
        assert_eq!(value[1]["text"], "Apache License");
    }

    #[test]
    fn test_template_sections() {
        let template = Template::new("Credits:\n$start- $name ($type)$separator\n$end\nThanks.");
        let out = template.render(&libraries(), Format::Text);
        assert_eq!(out, "Credits:\n- Alamofire (MIT)\n- Yams (Apache)\nThanks.");
    }

    #[test]
    fn test_template_without_markers_repeats_whole_text() {
        let template = Template::new("$name;");
        assert_eq!(template.render(&libraries(), Format::Text), "Alamofire;Yams;");
    }

    #[test]
    fn test_template_escapes_for_format() {
        let template = Template::new("<ul>$start<li>$text</li>$end</ul>");
        assert_eq!(Format::infer_from_template(&template), Format::Xml);
        let out = template.render(&libraries(), Format::Xml);
        assert!(out.contains("<li>Permission is hereby granted &amp; &lt;more&gt;</li>"));

        let template = Template::new("[$start{\"name\": \"$name\", \"text\": \"$text\"}$separator, $end]");
        assert_eq!(Format::infer_from_template(&template), Format::Json);
        let mut libraries = libraries();
        libraries[1].license_text = "line one\n\"quoted\"".to_string();
        let out = template.render(&libraries, Format::Json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[1]["text"], "line one\n\"quoted\"");
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_template_load() {
        let inline = Template::load("$name: $type").unwrap();
        assert_eq!(inline, Template::new("$name: $type"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"# Licenses\n$start## $name\n$end").unwrap();
        let loaded = Template::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            loaded.render(&libraries(), Format::Text),
            "# Licenses\n## Alamofire\n## Yams\n"
        );

        let err = Template::load("no/such/template.txt").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to read template file at no/such/template.txt."
        );
    }

    #[test]
    fn test_xml_escapes_text() {
        let out = render(&libraries(), Format::Xml).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(out.contains("<license name=\"Alamofire\" type=\"MIT\">"));
        assert!(out.contains("granted &amp; &lt;more&gt;"));
        assert!(out.trim_end().ends_with("</licenses>"));
    }
}
