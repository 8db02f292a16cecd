use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::ScanArgs;
use crate::config::Config;
use crate::discovery::{discover, Exclusions};
use crate::models::{Library, LicenseType};
use crate::report::export::{render as render_export, Format, Template};
use crate::suggest::did_you_mean;

/// Scan settings merged from the config file and the command line.
pub struct Scan {
    root: PathBuf,
    exclude: Vec<String>,
    /// Lowercased.
    skip: Vec<String>,
    cache_dir: Option<PathBuf>,
    quiet: bool,
}

impl Scan {
    /// Command-line lists extend the config lists; `--spmcache` overrides the config.
    pub fn new(root: &Path, args: &ScanArgs, config: &Config, quiet: bool) -> Self {
        let exclude = config
            .scan
            .exclude
            .iter()
            .chain(&args.exclude)
            .cloned()
            .collect();
        let skip = config
            .scan
            .skip
            .iter()
            .chain(&args.skip)
            .map(|s| s.to_lowercase())
            .collect();
        let cache_dir = args
            .spm_cache
            .clone()
            .or_else(|| config.scan.spm_cache.clone());

        Scan {
            root: root.to_path_buf(),
            exclude,
            skip,
            cache_dir,
            quiet,
        }
    }

    /// Discover libraries, validate the skip list against them, and drop skipped ones.
    fn libraries(&self) -> Result<Vec<Library>> {
        let exclusions = Exclusions::new(&self.exclude).context("Invalid --exclude pattern.")?;

        let spinner = if self.quiet {
            None
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
            pb.set_message(format!("Scanning {}", self.root.display()));
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        };

        let found = discover(&self.root, &exclusions, self.cache_dir.as_deref(), true);

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        let libraries = found?;

        if !self.quiet {
            eprintln!("  {} {} libraries found", "→".cyan(), libraries.len());
        }

        ensure_known(&self.skip, &libraries)?;
        Ok(libraries
            .into_iter()
            .filter(|l| !self.skip.contains(&l.name.to_lowercase()))
            .collect())
    }
}

/// Fail on the first name that matches no discovered library, suggesting a close one.
fn ensure_known(names: &[String], libraries: &[Library]) -> Result<()> {
    let known: Vec<String> = libraries.iter().map(|l| l.name.to_lowercase()).collect();
    if let Some(name) = names
        .iter()
        .map(|n| n.to_lowercase())
        .find(|n| !known.contains(n))
    {
        bail!("Unknown library '{}'.{}", name, did_you_mean(&name, &known));
    }
    Ok(())
}

fn parse_family(name: &str) -> Result<LicenseType> {
    name.parse::<LicenseType>().map_err(|_| {
        anyhow!(
            "Unknown license '{}'.{}",
            name,
            did_you_mean(name, &LicenseType::names())
        )
    })
}

/// Libraries found in the project, after skipping.
pub fn list(scan: &Scan) -> Result<Vec<Library>> {
    scan.libraries()
}

/// Render attribution data, to `output` when given, otherwise returned for stdout.
///
/// A library with an unrecognized license must be named in `allow` (or skipped).
/// `template` is an inline template or the path of a template file; without
/// `format` the output format is inferred from the template, then from `output`.
pub fn export(
    scan: &Scan,
    allow: &[String],
    format: Option<&str>,
    template: Option<&str>,
    output: Option<&Path>,
) -> Result<String> {
    let template = template.map(Template::load).transpose()?;
    let format = match format {
        Some(raw) => raw.parse::<Format>().map_err(|_| {
            anyhow!(
                "Unsupported output format '{}'.{}",
                raw,
                did_you_mean(raw, &Format::names())
            )
        })?,
        None => match &template {
            Some(template) => Format::infer_from_template(template),
            None => output.map(Format::infer).unwrap_or(Format::Text),
        },
    };

    let libraries = scan.libraries()?;
    let allow: Vec<String> = allow.iter().map(|a| a.to_lowercase()).collect();
    ensure_known(&allow, &libraries)?;

    if let Some(library) = libraries.iter().find(|l| {
        l.license_type == LicenseType::Unknown && !allow.contains(&l.name.to_lowercase())
    }) {
        let name = library.name.to_lowercase();
        let escaped = if name.contains(' ') {
            format!("\"{}\"", name)
        } else {
            name
        };
        bail!(
            "Unrecognized license at {}. Use '--allow {}' or '--skip {}' to bypass.",
            library.license_path,
            escaped,
            escaped
        );
    }

    let rendered = match &template {
        Some(template) => template.render(&libraries, format),
        None => render_export(&libraries, format)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Unable to write output to {}.", path.display()))?;
            Ok(format!(
                "License data successfully written to {}.",
                path.display()
            ))
        }
        None => Ok(rendered),
    }
}

/// Verify that `licenses_file` mentions every library by name.
pub fn check(scan: &Scan, licenses_file: &Path) -> Result<String> {
    let libraries = scan.libraries()?;

    let content = std::fs::read_to_string(licenses_file).with_context(|| {
        format!(
            "Unable to read licenses file at {}.",
            licenses_file.display()
        )
    })?;
    let content = content.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(library) = libraries.iter().find(|l| !content.contains(&l.name)) {
        bail!(
            "License for '{}' is missing from licenses file.",
            library.name
        );
    }

    Ok("Licenses file is up-to-date.".to_string())
}

/// Families rejected by `check-unsupported`. A non-empty `--unsupported`
/// replaces the configured list instead of extending it.
pub fn unsupported_families<'a>(cli: &'a [String], config: &'a Config) -> &'a [String] {
    if cli.is_empty() {
        &config.policy.unsupported
    } else {
        cli
    }
}

/// Fail when any library has an unrecognized license or one of the `unsupported` families.
pub fn check_unsupported(scan: &Scan, unsupported: &[String]) -> Result<String> {
    let families = unsupported
        .iter()
        .map(|name| parse_family(name))
        .collect::<Result<Vec<_>>>()?;

    let libraries = scan.libraries()?;

    let unknown: Vec<&str> = libraries
        .iter()
        .filter(|l| l.license_type == LicenseType::Unknown)
        .map(|l| l.name.as_str())
        .collect();
    if !unknown.is_empty() {
        bail!(
            "Libraries with unrecognized licenses:\n  {}",
            unknown.join("\n  ")
        );
    }

    let rejected: Vec<String> = libraries
        .iter()
        .filter(|l| families.contains(&l.license_type))
        .map(|l| format!("{} -> {}", l.name, l.license_type))
        .collect();
    if !rejected.is_empty() {
        bail!(
            "Libraries with unsupported licenses:\n  {}",
            rejected.join("\n  ")
        );
    }

    Ok("All licenses are supported.".to_string())
}
