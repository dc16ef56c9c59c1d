use clap::Parser;
use std::fs;
use std::time::Instant;
use tracing::Level;
use waribiki::prelude::*;

/// Compiles a promotion rule graph exported by the editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the editor's graph export (JSON with `nodes` and `connections`)
    graph_path: String,

    /// Optional path to a rule metadata JSON file (name, salience, stackable, ...)
    #[arg(short, long)]
    metadata: Option<String>,

    /// Additional subtype names, as `editorName=builtin-subtype`
    #[arg(short, long = "alias", value_name = "NAME=SUBTYPE")]
    aliases: Vec<String>,

    /// Run the pre-submission validation on the compiled rule
    #[arg(long)]
    validate: bool,

    /// Print the gate that guards each action
    #[arg(long)]
    gates: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();

    // --- 1. Loading ---
    let graph_json = fs::read_to_string(&cli.graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read graph file '{}': {}",
            &cli.graph_path, e
        ))
    });
    let raw_graph: RawGraph = serde_json::from_str(&graph_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));

    let metadata = match &cli.metadata {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read metadata file '{}': {}", path, e))
            });
            serde_json::from_str::<RuleMetadata>(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Invalid metadata: {}", e)))
        }
        None => RuleMetadata::default(),
    };

    // --- 2. Compilation ---
    let mut builder = Compiler::builder();
    for alias in &cli.aliases {
        let (user, builtin) = alias.split_once('=').unwrap_or_else(|| {
            exit_with_error(&format!("Alias '{}' must look like NAME=SUBTYPE", alias))
        });
        if Subtype::from_name(user).is_some() {
            exit_with_error(&format!(
                "Alias '{}' would shadow the built-in subtype '{}'",
                alias, user
            ));
        }
        if Subtype::from_name(builtin).is_none() {
            exit_with_error(&format!("Alias '{}' targets unknown subtype '{}'", alias, builtin));
        }
        builder = builder.with_subtype_alias(user, builtin);
    }
    let compiler = builder.build();

    let rule = compiler
        .compile_raw(raw_graph, &metadata)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    tracing::info!("Compiled in {:?}", start.elapsed());

    // --- 3. Validation ---
    if cli.validate {
        if let Err(e) = rule.validate() {
            exit_with_error(&e.to_string());
        }
    }

    // --- 4. Output ---
    let json = serde_json::to_string_pretty(&rule)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode rule: {}", e)));
    println!("{}", json);

    if cli.gates {
        let action_gates =
            gates(&rule).unwrap_or_else(|e| exit_with_error(&format!("Invalid wiring: {}", e)));
        for action in &action_gates {
            eprintln!("\nAction '{}':", action.action_id);
            eprint!(
                "{}",
                GateDisplay {
                    gate: &action.gate,
                    rule: &rule,
                }
            );
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
