//! Human-readable output for the `mnemo` binary.

use mnemo_rs_config::{ConfigError, ValidationFailure, Validator};
use mnemo_rs_protocol::{
    EmbedderProvider, GraphStoreProvider, HistoryStoreProvider, LlmProvider, MemoryConfig,
    VectorStoreProvider,
};
use std::path::PathBuf;

/// What happened to one config source, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Valid,
    Invalid,
    /// The source could not be read, parsed, or rendered.
    Failed,
}

impl Outcome {
    /// Process exit code for the worst outcome of a run.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Valid => 0,
            Self::Invalid => 1,
            Self::Failed => 2,
        }
    }
}

/// Load and report every file on its own; a bad file never stops the rest.
pub fn check_files(validator: &Validator, files: &[PathBuf], print: bool) -> Vec<Outcome> {
    files
        .iter()
        .map(|file| {
            let source = file.display().to_string();
            report_result(&source, validator.load_from_path(file), print)
        })
        .collect()
}

/// Print the outcome for one source. Validation failures go to stdout, load
/// errors to stderr.
pub fn report_result(
    source: &str,
    result: Result<MemoryConfig, ConfigError>,
    print: bool,
) -> Outcome {
    match result {
        Ok(config) => {
            println!("{source}: ok");
            if print {
                match serde_json::to_string_pretty(&config) {
                    Ok(json) => println!("{json}"),
                    Err(err) => {
                        eprintln!("{source}: failed to render config: {err}");
                        return Outcome::Failed;
                    }
                }
            }
            Outcome::Valid
        }
        Err(ConfigError::Invalid { failure, .. }) => {
            println!("{}", render_failure(source, &failure));
            Outcome::Invalid
        }
        Err(err) => {
            let err = anyhow::Error::from(err).context(format!("failed to load {source}"));
            eprintln!("{err:#}");
            Outcome::Failed
        }
    }
}

/// One line per issue, `path: message`, under a header naming the source.
pub fn render_failure(source: &str, failure: &ValidationFailure) -> String {
    let header = format!("{source}: invalid ({} issue(s))", failure.issues().len());
    std::iter::once(header)
        .chain(failure.issues().iter().map(|issue| format!("  {issue}")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Accepted provider names per config section.
pub fn provider_table() -> String {
    let rows: [(&str, &[&str]); 6] = [
        ("embedder", EmbedderProvider::NAMES),
        ("vectorStore", VectorStoreProvider::NAMES),
        ("llm", LlmProvider::NAMES),
        ("graphStore", GraphStoreProvider::NAMES),
        ("graphStore.llm", LlmProvider::NAMES),
        ("historyStore", HistoryStoreProvider::NAMES),
    ];
    let width = rows.iter().map(|(section, _)| section.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(section, names)| format!("{section:<width$}  {}", names.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
