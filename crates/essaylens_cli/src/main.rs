//! Command-line probe for the essay feedback pipeline.
//!
//! # Responsibility
//! - Run the core parsers over local files and print JSON results.
//! - Keep output deterministic for quick local sanity checks.
//!
//! # Environment
//! - `ESSAYLENS_LOG_DIR`: absolute directory enabling file logs.
//! - `ESSAYLENS_LOG_LEVEL`: log level, defaults to the build-mode default.
//! - `ESSAYLENS_PARSE_CONFIG`: JSON file overriding parser thresholds.

use essaylens_core::{
    core_version, default_log_level, init_logging, load_import_file, segment_essay,
    FeedbackExtractor, ParseConfig, WorkCache,
};
use log::info;
use serde::Serialize;
use std::process::ExitCode;

const USAGE: &str = "usage: essaylens_cli <version | essay FILE | feedback FILE | import FILE>";

fn main() -> ExitCode {
    if let Err(err) = init_logging_from_env() {
        eprintln!("warning: logging disabled: {err}");
    }

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<String, String> {
    match args {
        [command] if command == "version" => {
            Ok(format!("essaylens_core version={}", core_version()))
        }
        [command, path] if command == "essay" => {
            let text = read_text(path)?;
            to_json(&segment_essay(&text))
        }
        [command, path] if command == "feedback" => {
            let text = read_text(path)?;
            to_json(&extractor_from_env()?.extract(&text))
        }
        [command, path] if command == "import" => {
            let bundle = load_import_file(path).map_err(|err| err.to_string())?;
            let mut cache = WorkCache::with_extractor(extractor_from_env()?);
            cache.parse_all(&bundle.student_works);
            let works = (0..bundle.student_works.len())
                .filter_map(|index| cache.get(index))
                .collect::<Vec<_>>();
            info!("event=cli_import module=cli status=ok works={}", works.len());
            to_json(&works)
        }
        _ => Err(USAGE.to_string()),
    }
}

fn init_logging_from_env() -> Result<(), String> {
    let Ok(log_dir) = std::env::var("ESSAYLENS_LOG_DIR") else {
        return Ok(());
    };
    let level =
        std::env::var("ESSAYLENS_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level, &log_dir)
}

fn extractor_from_env() -> Result<FeedbackExtractor, String> {
    let Ok(path) = std::env::var("ESSAYLENS_PARSE_CONFIG") else {
        return Ok(FeedbackExtractor::default());
    };
    let raw = read_text(&path)?;
    let config = ParseConfig::from_json_str(&raw).map_err(|err| err.to_string())?;
    Ok(FeedbackExtractor::new(config))
}

fn read_text(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("failed to read `{path}`: {err}"))
}

fn to_json(value: &impl Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("failed to encode output: {err}"))
}
