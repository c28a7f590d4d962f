//! Wirecheck CLI - circuit validation and export from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;

use wirecheck::pins::{classify, PinRole};
use wirecheck::serializer::{to_compact, to_json};
use wirecheck::{RuleEngine, Severity, ValidationResult, WirecheckCore};

#[derive(Parser)]
#[command(name = "wirecheck")]
#[command(about = "Circuit connection validation tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a circuit description file
    Check {
        /// Path to a circuit description (structured JSON form)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if findings exist at this severity or higher
        #[arg(long, value_enum)]
        fail_on: Option<FailOn>,
    },

    /// Print a serialized form of a circuit description file
    Export {
        /// Path to a circuit description (structured JSON form)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Serialization to print
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Summarize a circuit: counts, pin roles, isolated components
    Summary {
        /// Path to a circuit description (structured JSON form)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the validation rules
    Rules {
        /// Show rule descriptions
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for CI/CD
    Json,
}

#[derive(Clone, ValueEnum)]
enum ExportFormat {
    /// Structured JSON form
    Json,
    /// Compact line-oriented form
    Toon,
}

#[derive(Clone, ValueEnum)]
enum FailOn {
    Error,
    Warning,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Check {
            file,
            format,
            fail_on,
        } => handle_check(&file, format, fail_on),
        Commands::Export { file, format } => handle_export(&file, format),
        Commands::Summary { file } => handle_summary(&file),
        Commands::Rules { verbose } => {
            handle_rules(verbose);
            0
        }
    };

    process::exit(exit_code);
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERROR",
        Severity::Warning => "WARN",
        Severity::Info => "INFO",
    }
}

fn handle_check(file: &Path, format: OutputFormat, fail_on: Option<FailOn>) -> i32 {
    let circuit = match WirecheckCore::load_circuit(file) {
        Ok(circuit) => circuit,
        Err(e) => {
            eprintln!("Error: {e}");
            return 2;
        }
    };

    let result = WirecheckCore::validate(&circuit);

    match format {
        OutputFormat::Human => print_human(file, &result),
        OutputFormat::Json => print_json(file, &result),
    }

    let failed = match fail_on {
        Some(FailOn::Error) => result.stats.errors > 0,
        Some(FailOn::Warning) => result.stats.errors + result.stats.warnings > 0,
        None => false,
    };
    if failed {
        1
    } else {
        0
    }
}

fn print_human(file: &Path, result: &ValidationResult) {
    println!("Validation results for: {}", file.display());
    println!(
        "{} finding(s): {} error(s), {} warning(s), {} info",
        result.total(),
        result.stats.errors,
        result.stats.warnings,
        result.stats.infos
    );
    for item in &result.feedback {
        println!("  [{}] {}", severity_tag(item.severity), item.message);
        if let Some(ref recommendation) = item.recommendation {
            println!("    -> {recommendation}");
        }
    }
}

fn print_json(file: &Path, result: &ValidationResult) {
    let report = serde_json::json!({
        "file": file.display().to_string(),
        "feedback": result.feedback,
        "stats": result.stats,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(out) => println!("{out}"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn handle_export(file: &Path, format: ExportFormat) -> i32 {
    let description = match WirecheckCore::load_description(file) {
        Ok(description) => description,
        Err(e) => {
            eprintln!("Error: {e}");
            return 2;
        }
    };

    match format {
        ExportFormat::Json => println!("{}", to_json(&description)),
        ExportFormat::Toon => print!("{}", to_compact(&description)),
    }
    0
}

fn handle_summary(file: &Path) -> i32 {
    let circuit = match WirecheckCore::load_circuit(file) {
        Ok(circuit) => circuit,
        Err(e) => {
            eprintln!("Error: {e}");
            return 2;
        }
    };

    println!(
        "{} components, {} wires",
        circuit.component_count(),
        circuit.connection_count()
    );

    let mut role_counts: Vec<(PinRole, usize)> = Vec::new();
    let pins = circuit
        .connections()
        .iter()
        .flat_map(|c| [c.source_pin.as_str(), c.target_pin.as_str()]);
    for pin in pins {
        let role = classify(pin).role();
        match role_counts.iter_mut().find(|(r, _)| *r == role) {
            Some((_, count)) => *count += 1,
            None => role_counts.push((role, 1)),
        }
    }
    if !role_counts.is_empty() {
        println!("Wired pin roles:");
        for (role, count) in &role_counts {
            println!("  {role}: {count}");
        }
    }

    let connectivity = circuit.connectivity();
    let isolated = connectivity.isolated();
    if isolated.is_empty() {
        println!("No isolated components.");
    } else {
        println!("Isolated components ({}):", isolated.len());
        for id in isolated {
            let label = circuit
                .component(id)
                .map(|c| c.display_label().to_string())
                .unwrap_or_else(|| id.to_string());
            println!("  {id} ({label})");
        }
    }
    0
}

fn handle_rules(verbose: bool) {
    let engine = RuleEngine::with_default_rules();

    println!("Edge rules (evaluated in order):");
    for rule in engine.edge_rules() {
        if verbose {
            println!(
                "  {} [{}] - {}",
                rule.id(),
                severity_tag(rule.severity()),
                rule.description()
            );
        } else {
            println!("  {} [{}]", rule.id(), severity_tag(rule.severity()));
        }
    }

    println!("Component rules:");
    for rule in engine.component_rules() {
        if verbose {
            println!("  {} ({}) - {}", rule.id(), rule.kind(), rule.description());
        } else {
            println!("  {} ({})", rule.id(), rule.kind());
        }
    }
}
