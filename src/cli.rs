//! Minimal CLI: signature → (typename | report)
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, Args};
use colored::Colorize;
use tracing::{info, warn};

use crate::report::{Entry, Report, SignatureList, resolve_all};
use crate::signature::SignatureParser;
use crate::typename::TypenameConfig;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// resolve D-Bus type signatures to the C++ typenames used by generated bindings
#[derive(Parser, Debug)]
#[command(name = "dbus-typename", version)]
pub struct CommandLineInterface {
    #[command(flatten)]
    settings: ParserSettings,

    /// raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// resolve signatures given on the command line
    Parse(ParseOut),
    /// resolve signature lists from JSON files into a JSON report
    Batch(BatchOut),
}

#[derive(Args, Debug, Clone)]
struct ParserSettings {
    /// JSON config file, e.g. {"object_path": "ObjectPathType"}
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// typename emitted for object paths ('o'); overrides the config file
    #[arg(long, global = true)]
    object_path_typename: Option<String>,

    /// reject input left over after the first complete type
    #[arg(long, default_value_t = false, global = true)]
    strict: bool,
}

#[derive(clap::Parser, Debug)]
struct ParseOut {
    /// signatures to resolve, e.g. 'a{sv}'
    #[arg(required = true)]
    signatures: Vec<String>,

    /// print a JSON report instead of one line per signature
    #[arg(long)]
    json: bool,
}

#[derive(clap::Parser, Debug)]
struct BatchOut {
    /// one or more JSON files: literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl ParserSettings {
    fn load_parser(&self) -> Result<SignatureParser> {
        let config = match self.config.as_ref() {
            Some(path) => crate::path_de::from_file_with_path::<TypenameConfig>(path)?,
            None => TypenameConfig::default(),
        };
        let mut parser = SignatureParser::with_config(config);
        if let Some(name) = self.object_path_typename.as_ref() {
            parser.set_object_path_typename(name.clone());
        }
        Ok(parser)
    }
}

impl BatchOut {
    fn load_signatures(&self) -> Result<Vec<String>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut signatures = Vec::new();
        for source_path in source_paths {
            let list = crate::path_de::from_file_with_path::<SignatureList>(&source_path)?;
            let list = list.into_signatures();
            info!(path = %source_path.display(), count = list.len(), "loaded signatures");
            signatures.extend(list);
        }
        Ok(signatures)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    /// Number of signatures that failed to resolve.
    pub fn run(&self) -> Result<usize> {
        let parser = self.settings.load_parser()?;
        let strict = self.settings.strict;
        match &self.cmd {
            Command::Parse(target) => {
                let report = resolve_all(&parser, &target.signatures, strict);
                if target.json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print_lines(&report);
                }
                Ok(report.rejected())
            }
            Command::Batch(target) => {
                let signatures = target.load_signatures()?;
                let report = resolve_all(&parser, &signatures, strict);
                let rejected = report.rejected();
                if rejected > 0 {
                    warn!(rejected, total = report.entries.len(), "some signatures failed to resolve");
                }
                let report_src = serde_json::to_string_pretty(&report)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &report_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    info!(path = %out.display(), "wrote report");
                } else {
                    println!("{report_src}");
                }
                Ok(rejected)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn print_lines(report: &Report) {
    for (signature, entry) in &report.entries {
        match entry {
            Entry::Resolved { typename } => {
                println!("{} {signature} -> {typename}", "ok".green().bold());
            }
            Entry::Rejected { message, .. } => {
                println!("{} {signature:?}: {message}", "error".red().bold());
            }
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        CommandLineInterface::command().debug_assert();
    }

    #[test]
    fn global_settings_reach_the_parser() {
        let cli = CommandLineInterface::try_parse_from([
            "dbus-typename", "parse", "o", "--object-path-typename", "Path", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbosity(), 2);
        let parser = cli.settings.load_parser().unwrap();
        assert_eq!(parser.config(), &TypenameConfig::with_object_path("Path"));
    }

    #[test]
    fn flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"object_path": "FromFile"}"#).unwrap();
        let config_arg = config.to_string_lossy().to_string();

        let cli = CommandLineInterface::try_parse_from([
            "dbus-typename", "--config", &config_arg, "parse", "ao",
        ])
        .unwrap();
        let parser = cli.settings.load_parser().unwrap();
        assert_eq!(parser.parse("ao").as_deref(), Ok("std::vector<FromFile>"));

        let cli = CommandLineInterface::try_parse_from([
            "dbus-typename", "--config", &config_arg, "--object-path-typename", "FromFlag", "parse", "o",
        ])
        .unwrap();
        let parser = cli.settings.load_parser().unwrap();
        assert_eq!(parser.config().object_path.as_deref(), Some("FromFlag"));
        assert_eq!(parser.parse("o").as_deref(), Ok("FromFlag"));
    }

    #[test]
    fn batch_reads_globbed_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), r#"["as", "a{s"]"#).unwrap();
        std::fs::write(dir.path().join("b.json"), r#"{"signatures": ["ay"]}"#).unwrap();
        let out = dir.path().join("out").join("report.json");
        let pattern = dir.path().join("*.json").to_string_lossy().to_string();
        let out_arg = out.to_string_lossy().to_string();

        let cli = CommandLineInterface::try_parse_from([
            "dbus-typename", "batch", "-i", &pattern, "--out", &out_arg,
        ])
        .unwrap();
        assert_eq!(cli.run().unwrap(), 1);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["as"]["typename"], "std::vector<std::string>");
        assert_eq!(written["a{s"]["error"], "unclosed-map-entry");
        assert_eq!(written["ay"]["typename"], "std::vector<uint8_t>");
    }

    #[test]
    fn missing_glob_matches_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("*.json").to_string_lossy().to_string();
        assert!(resolve_file_path_patterns([pattern]).is_err());
    }
}
