//! PAGE-XML Validator
//!
//! Opens PAGE-XML files and reports their structure: region and line counts,
//! reading order length and reading order ids without a matching region.
//!
//! Usage:
//!   cargo run --bin validate_pagexml -- page1.xml page2.xml
//!   cargo run --bin validate_pagexml -- --relaxed --json report.json pages/*.xml
//!   cargo run --bin validate_pagexml -- --verbose page.xml

use pagexml::{Depth, PageType, PageXml, ParserOptions, Query};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
struct PageValidationResult {
    filename: String,
    success: bool,
    error: Option<String>,
    regions: usize,
    lines: usize,
    words: usize,
    reading_order: usize,
    dangling_ids: Vec<String>,
    parse_time_ms: u128,
}

#[derive(Debug, Serialize)]
struct ValidationSummary {
    total_files: usize,
    successful: usize,
    failed: usize,
    total_time_ms: u128,
    results: Vec<PageValidationResult>,
}

struct ValidatorConfig {
    files: Vec<PathBuf>,
    json_output: Option<PathBuf>,
    relaxed: bool,
    verbose: bool,
}

impl ValidatorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut files = Vec::new();
        let mut json_output = None;
        let mut relaxed = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--json" => {
                    i += 1;
                    if i < args.len() {
                        json_output = Some(PathBuf::from(&args[i]));
                    }
                },
                "--relaxed" => {
                    relaxed = true;
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other => files.push(PathBuf::from(other)),
            }
            i += 1;
        }

        Self {
            files,
            json_output,
            relaxed,
            verbose,
        }
    }
}

fn validate_file(path: &PathBuf, options: &ParserOptions) -> PageValidationResult {
    let filename = path.display().to_string();
    let start = Instant::now();

    match PageXml::open(path, options) {
        Ok(page) => {
            let count = |page_type| {
                page.find_all(&Query::new().with_type(page_type).with_depth(Depth::Unlimited))
                    .len()
            };
            let region_ids: Vec<String> = page
                .regions()
                .into_iter()
                .filter_map(|r| page.element(r).and_then(|e| e.id()).map(str::to_string))
                .collect();
            let dangling_ids = page
                .reading_order()
                .into_iter()
                .filter(|id| !region_ids.contains(id))
                .collect();

            PageValidationResult {
                filename,
                success: true,
                error: None,
                regions: page.regions().len(),
                lines: count(PageType::TextLine),
                words: count(PageType::Word),
                reading_order: page.reading_order().len(),
                dangling_ids,
                parse_time_ms: start.elapsed().as_millis(),
            }
        },
        Err(e) => PageValidationResult {
            filename,
            success: false,
            error: Some(e.to_string()),
            regions: 0,
            lines: 0,
            words: 0,
            reading_order: 0,
            dangling_ids: Vec::new(),
            parse_time_ms: start.elapsed().as_millis(),
        },
    }
}

fn main() {
    env_logger::init();

    let config = ValidatorConfig::from_args();
    if config.files.is_empty() {
        eprintln!("Usage: validate_pagexml [--relaxed] [--json FILE] [--verbose] FILES...");
        std::process::exit(2);
    }

    let options = if config.relaxed {
        ParserOptions::relaxed()
    } else {
        ParserOptions::strict()
    };

    let start_time = Instant::now();
    let mut results = Vec::with_capacity(config.files.len());
    for (i, path) in config.files.iter().enumerate() {
        let result = validate_file(path, &options);
        if result.success {
            println!(
                "[{}/{}] ✓ {} ({} regions, {} lines, {} words)",
                i + 1,
                config.files.len(),
                result.filename,
                result.regions,
                result.lines,
                result.words
            );
            if !result.dangling_ids.is_empty() {
                println!("    reading order ids without region: {}", result.dangling_ids.join(", "));
            }
            if config.verbose {
                println!(
                    "    reading order: {} entries, parsed in {} ms",
                    result.reading_order, result.parse_time_ms
                );
            }
        } else {
            println!(
                "[{}/{}] ✗ {}: {}",
                i + 1,
                config.files.len(),
                result.filename,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        results.push(result);
    }

    let successful = results.iter().filter(|r| r.success).count();
    let summary = ValidationSummary {
        total_files: results.len(),
        successful,
        failed: results.len() - successful,
        total_time_ms: start_time.elapsed().as_millis(),
        results,
    };

    println!("\n{} of {} files valid", summary.successful, summary.total_files);

    if let Some(path) = &config.json_output {
        let written = serde_json::to_string_pretty(&summary)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                File::create(path)
                    .and_then(|mut file| file.write_all(json.as_bytes()))
                    .map_err(|e| e.to_string())
            });
        match written {
            Ok(()) => println!("Report written to {}", path.display()),
            Err(e) => {
                eprintln!("Failed to write report: {}", e);
                std::process::exit(1);
            },
        }
    }

    if summary.failed > 0 {
        std::process::exit(1);
    }
}
