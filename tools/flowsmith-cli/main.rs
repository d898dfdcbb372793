use clap::Parser;
use flowsmith::prelude::*;
use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// --- JSON Deserialization Structs (Input Format Specific) ---
// The request file accepts the field names used by the web form as well as
// a few shorter aliases.

#[derive(Deserialize)]
struct RawRequest {
    #[serde(alias = "workflowName", alias = "name")]
    workflow_name: Option<String>,
    #[serde(alias = "description")]
    prompt: Option<String>,
    timezone: Option<String>,
    #[serde(alias = "includeNotes", alias = "notes")]
    include_notes: Option<bool>,
}

impl IntoRequest for RawRequest {
    fn into_request(self) -> Result<GenerationRequest, RequestConversionError> {
        let name = self
            .workflow_name
            .ok_or(RequestConversionError::MissingField("workflowName"))?;
        let prompt = self
            .prompt
            .ok_or(RequestConversionError::MissingField("prompt"))?;
        let mut request = GenerationRequest::new(name, prompt);
        if let Some(timezone) = self.timezone {
            request = request.with_timezone(timezone);
        }
        if let Some(include_notes) = self.include_notes {
            request = request.with_notes(include_notes);
        }
        Ok(request)
    }
}

/// Generate importable n8n workflows from plain-English descriptions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The workflow description
    prompt: Option<String>,

    /// Read the description from a file instead
    #[arg(long, conflicts_with = "prompt")]
    prompt_file: Option<PathBuf>,

    /// Workflow name
    #[arg(short, long)]
    name: Option<String>,

    /// Timezone written into the workflow settings
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// Omit the per-node notes
    #[arg(long)]
    no_notes: bool,

    /// Read the whole request from a JSON file
    #[arg(long, conflicts_with_all = ["prompt", "prompt_file", "name"])]
    request: Option<PathBuf>,

    /// Write `<workflow-name>.json` into this directory instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print one summary line per node after generating
    #[arg(long)]
    summary: bool,

    /// Print the workflow graph outline instead of the JSON document
    #[arg(long)]
    explain: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing("warn");

    let request = if cli.human {
        read_interactive_request()
    } else {
        read_request(&cli)
    };
    run_generation(&cli, request);
}

/// Initialize the tracing subscriber, logging to stderr so stdout stays
/// valid JSON.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn read_request(cli: &Cli) -> GenerationRequest {
    if let Some(path) = &cli.request {
        let json = fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to read request file '{}': {}",
                path.display(),
                e
            ))
        });
        let raw: RawRequest = serde_json::from_str(&json)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse request JSON: {}", e)));
        return raw
            .into_request()
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid request: {}", e)));
    }

    let prompt = match (&cli.prompt, &cli.prompt_file) {
        (Some(prompt), _) => prompt.clone(),
        (None, Some(path)) => fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to read prompt file '{}': {}",
                path.display(),
                e
            ))
        }),
        (None, None) => exit_with_error("A prompt is required in non-interactive mode."),
    };
    let name = cli
        .name
        .clone()
        .unwrap_or_else(|| exit_with_error("A workflow name is required (--name)."));

    GenerationRequest::new(name, prompt)
        .with_timezone(cli.timezone.clone())
        .with_notes(!cli.no_notes)
}

fn read_interactive_request() -> GenerationRequest {
    println!("--- Flowsmith Interactive Mode ---");

    let name = prompt_for_input("Workflow name", Some("My Workflow"));
    let prompt = prompt_for_input("Describe the workflow", None);

    println!("\nAvailable timezones:");
    for (i, zone) in Timezone::ALL.iter().enumerate() {
        println!("  {}: {}", i + 1, zone);
    }
    let timezone = loop {
        let choice = prompt_for_input("Enter choice", Some("1"));
        match choice.parse::<usize>().ok().and_then(|n| Timezone::ALL.get(n.wrapping_sub(1))) {
            Some(zone) => break *zone,
            None => println!("Invalid choice. Please enter 1-{}.", Timezone::ALL.len()),
        }
    };
    let notes = prompt_for_input("Include notes? (y/n)", Some("y"));

    GenerationRequest::new(name, prompt)
        .with_timezone(timezone.as_str())
        .with_notes(!notes.eq_ignore_ascii_case("n"))
}

fn run_generation(cli: &Cli, request: GenerationRequest) {
    let start = Instant::now();
    let generator = Generator::new()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to initialise generator: {}", e)));

    if cli.explain {
        let outline = generator
            .explain(&request)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        print!("{}", outline);
        return;
    }

    let workflow = generator
        .generate(&request)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let duration = start.elapsed();

    match &cli.output {
        Some(dir) => {
            let path = dir.join(workflow.file_name());
            fs::write(&path, &workflow.document).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path.display(), e))
            });
            eprintln!(
                "Wrote {} ({} nodes) in {:?}",
                path.display(),
                workflow.node_summaries.len(),
                duration
            );
        }
        None => println!("{}", workflow.document),
    }

    if cli.summary || cli.human {
        eprintln!("\n--- Nodes ---");
        for node in &workflow.node_summaries {
            eprintln!("  {:<22} {}", node.name, node.summary);
        }
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }
    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read input: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
