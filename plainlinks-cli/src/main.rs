//! plainlinks - plain-text link synthesis CLI
//!
//! Loads a JSON page fixture into the in-memory engine and runs link
//! synthesis or underline checks on it.
//!
//! Usage:
//!   plainlinks links doc.json                 Synthesize links on every page
//!   plainlinks links doc.json --page 2 --json Synthesize links on one page, JSON output
//!   plainlinks underline doc.json --page 0 --char 12 --config cfg.json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdfium_plainlinks::{
    is_character_underlined_with_limit, load_document, synthesize_and_enumerate_links,
    EngineSession, LinkRect, LinkSynthesisConfig, MemoryLibrary, MemoryPage, Page, SyntheticLink,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "plainlinks")]
#[command(about = "Turn plain-text URLs on PDF pages into link annotations")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize links and list every link on the page(s)
    Links {
        /// Document fixture (JSON)
        fixture: PathBuf,
        /// Only process this page
        #[arg(short, long)]
        page: Option<usize>,
        /// Substring that starts a link
        #[arg(short, long)]
        target: Option<String>,
        /// Box-edge tolerance for run boundaries
        #[arg(long)]
        threshold: Option<f64>,
        /// Load synthesis settings from a JSON file (flags override it)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report whether a character is underlined
    Underline {
        /// Document fixture (JSON)
        fixture: PathBuf,
        /// Page index
        #[arg(short, long)]
        page: usize,
        /// Character index on the page
        #[arg(short = 'c', long = "char")]
        char_index: usize,
        /// Attachment quads examined per annotation
        #[arg(long)]
        max_quads: Option<usize>,
        /// Load settings from a JSON file (flags override it)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct PageReport {
    page: usize,
    created: Vec<SyntheticLink>,
    links: Vec<LinkReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<String>,
}

#[derive(Serialize)]
struct LinkReport {
    uri: Option<String>,
    rect: Option<LinkRect>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut session = EngineSession::new(MemoryLibrary::default());
    session.acquire();
    let result = run(cli.command);
    session.release()?;
    result
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Links {
            fixture,
            page,
            target,
            threshold,
            config,
            json,
        } => {
            let config = build_config(config.as_deref(), target, threshold, None)?;
            cmd_links(&fixture, page, &config, json)
        }
        Commands::Underline {
            fixture,
            page,
            char_index,
            max_quads,
            config,
        } => {
            let config = build_config(config.as_deref(), None, None, max_quads)?;
            cmd_underline(&fixture, page, char_index, config.max_quads_per_annotation())
        }
    }
}

fn build_config(
    path: Option<&Path>,
    target: Option<String>,
    threshold: Option<f64>,
    max_quads: Option<usize>,
) -> Result<LinkSynthesisConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => LinkSynthesisConfig::default(),
    };
    if let Some(target) = target {
        config = config.set_target(target);
    }
    if let Some(threshold) = threshold {
        config = config.set_discontinuity_threshold(threshold);
    }
    if let Some(max_quads) = max_quads {
        config = config.set_max_quads_per_annotation(max_quads);
    }
    config.validate()?;
    Ok(config)
}

fn cmd_links(
    fixture: &Path,
    page: Option<usize>,
    config: &LinkSynthesisConfig,
    json: bool,
) -> Result<()> {
    let doc = load_document(fixture)
        .with_context(|| format!("Failed to load fixture: {}", fixture.display()))?;

    let pages: Vec<(usize, MemoryPage)> = match page {
        Some(index) => vec![(index, doc.page(index)?.clone())],
        None => doc.into_pages().into_iter().enumerate().collect(),
    };

    // Each worker owns its page; no page is shared between scans.
    let reports = pages
        .into_par_iter()
        .map(|(index, mut page)| scan_page(index, &mut page, config))
        .collect::<Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!(
            "Page {}: {} created, {} total",
            report.page,
            report.created.len(),
            report.links.len()
        );
        for link in &report.links {
            let uri = link.uri.as_deref().unwrap_or("<no uri>");
            match link.rect {
                Some(r) => println!(
                    "  {} at ({:.1}, {:.1}) - ({:.1}, {:.1})",
                    uri, r.left, r.bottom, r.right, r.top
                ),
                None => println!("  {}", uri),
            }
        }
        if let Some(diagnostic) = &report.diagnostic {
            println!("  warning: scan stopped early: {}", diagnostic);
        }
    }
    Ok(())
}

fn scan_page(
    index: usize,
    page: &mut MemoryPage,
    config: &LinkSynthesisConfig,
) -> Result<PageReport> {
    let synthesis = synthesize_and_enumerate_links(page, config)?;
    info!(
        page = index,
        created = synthesis.created.len(),
        total = synthesis.links.len(),
        "Page scanned"
    );

    let links = synthesis
        .links
        .iter()
        .map(|&link| LinkReport {
            uri: page.link_uri(link),
            rect: page.link_rect(link),
        })
        .collect();

    Ok(PageReport {
        page: index,
        created: synthesis.created,
        links,
        diagnostic: synthesis.diagnostic.map(|e| e.to_string()),
    })
}

fn cmd_underline(fixture: &Path, page: usize, char_index: usize, max_quads: usize) -> Result<()> {
    let doc = load_document(fixture)
        .with_context(|| format!("Failed to load fixture: {}", fixture.display()))?;
    let underlined = is_character_underlined_with_limit(doc.page(page)?, char_index, max_quads)?;
    println!(
        "page {} char {}: {}",
        page,
        char_index,
        if underlined { "underlined" } else { "not underlined" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn json_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_file_sets_quad_limit() {
        let file = json_file(r#"{ "max_quads_per_annotation": 3 }"#);
        let config = build_config(Some(file.path()), None, None, None).unwrap();
        assert_eq!(config.max_quads_per_annotation(), 3);
        assert_eq!(config.target(), "http");
    }

    #[test]
    fn test_flags_override_json_file() {
        let file = json_file(r#"{ "target": "www.", "max_quads_per_annotation": 3 }"#);
        let target = Some("ftp".to_string());
        let config = build_config(Some(file.path()), target, Some(20.0), Some(12)).unwrap();
        assert_eq!(config.target(), "ftp");
        assert_eq!(config.discontinuity_threshold(), 20.0);
        assert_eq!(config.max_quads_per_annotation(), 12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let file = json_file(r#"{ "target": "" }"#);
        assert!(build_config(Some(file.path()), None, None, None).is_err());
    }

    #[test]
    fn test_underline_uses_config_quad_limit() {
        let fixture = json_file(
            r#"{ "pages": [{
                "lines": [{ "text": "abc", "x": 72, "y": 700 }],
                "annotations": [{
                    "subtype": "underline",
                    "quads": [
                        { "x1": 0, "y1": 0, "x3": 1, "y3": 1 },
                        { "x1": 72, "y1": 700, "x3": 90, "y3": 710 }
                    ]
                }]
            }] }"#,
        );
        let doc = load_document(fixture.path()).unwrap();

        let page = doc.page(0).unwrap();

        let one = build_config(None, None, None, Some(1)).unwrap();
        let underlined =
            is_character_underlined_with_limit(page, 0, one.max_quads_per_annotation()).unwrap();
        assert!(!underlined);

        let file = json_file(r#"{ "max_quads_per_annotation": 2 }"#);
        let two = build_config(Some(file.path()), None, None, None).unwrap();
        let underlined =
            is_character_underlined_with_limit(page, 0, two.max_quads_per_annotation()).unwrap();
        assert!(underlined);
    }
}
