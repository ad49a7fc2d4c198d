use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinship_analyzer::{
    config::Config,
    lineage::{algebra, AncestorDiagram, KinshipAnalyzer},
    reports::{report_rows, CsvExporter, ReportGenerator},
    types::CommonAncestor,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kinship")]
#[command(about = "Kinship relationship analyzer for lineage-encoded person IDs")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the relationship between two person IDs
    Analyze {
        /// First person ID (e.g. 1-1-4-6)
        id1: String,

        /// Second person ID (e.g. 1-1-5-3)
        id2: String,

        /// Output format (json, markdown, text); defaults to the configured format
        #[arg(short, long)]
        output: Option<String>,

        /// Output file path (defaults to stdout)
        #[arg(short = 'f', long)]
        output_file: Option<PathBuf>,
    },

    /// Render the ancestor tree of one person ID as Graphviz DOT
    Tree {
        /// Person ID
        id: String,
    },

    /// Export relationship records for ID pairs as CSV
    Export {
        /// ID pair in the form ID1,ID2 (repeatable)
        #[arg(short, long)]
        pair: Vec<String>,

        /// Output file path (defaults to stdout)
        #[arg(short = 'f', long)]
        output_file: Option<PathBuf>,
    },

    /// Interactive query session reading ID pairs from stdin
    Interactive,

    /// Validate a person ID and show its parsed generation path
    Validate {
        /// Person ID
        id: String,
    },

    /// Initialize configuration file
    Init {
        /// Configuration file path
        #[arg(short = 'F', long, default_value = "kinship.yml")]
        config_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(&cli.log_level)?;

    info!("Starting kinship analyzer");

    // Load configuration
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Analyze {
            id1,
            id2,
            output,
            output_file,
        } => {
            analyze_pair(&id1, &id2, output, output_file, config)?;
        }

        Commands::Tree { id } => {
            render_tree(&id)?;
        }

        Commands::Export { pair, output_file } => {
            export_pairs(&pair, output_file, config)?;
        }

        Commands::Interactive => {
            interactive_session(config)?;
        }

        Commands::Validate { id } => {
            validate_identifier(&id)?;
        }

        Commands::Init { config_file } => {
            init_config(&config_file)?;
        }
    }

    Ok(())
}

/// Initialize tracing with the specified log level
fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .context("Failed to create env filter")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(env_filter)
        .init();

    Ok(())
}

/// Load configuration from file, environment, or defaults
fn load_config(config_path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        if path.exists() {
            info!("Loading configuration from: {:?}", path);
            let config = Config::load_from_file(path)
                .with_context(|| format!("Failed to load config file: {:?}", path))?;
            config.validate().context("Invalid configuration")?;
            return Ok(config);
        } else {
            warn!("Configuration file not found: {:?}. Using defaults.", path);
        }
    }

    Ok(Config::load_from_env()?)
}

/// Analyze one identifier pair and emit the report
fn analyze_pair(
    id1: &str,
    id2: &str,
    output: Option<String>,
    output_file: Option<PathBuf>,
    config: Config,
) -> Result<()> {
    let format = output.unwrap_or_else(|| config.output.format.clone());
    let output_file = output_file.or(config.output.file);

    let analyzer = KinshipAnalyzer::with_spouse_links(config.spouse_links);
    let report = analyzer
        .analyze_pair(id1, id2)
        .context("Failed to analyze identifier pair")?;

    let content = ReportGenerator::new().generate(&report, &format)?;

    if let Some(path) = output_file {
        std::fs::write(&path, &content)
            .with_context(|| format!("Failed to write output to: {:?}", path))?;
        info!("Report written to: {:?}", path);
    } else {
        println!("{}", content);
    }

    Ok(())
}

/// Print the DOT ancestor tree for one identifier
fn render_tree(id: &str) -> Result<()> {
    let diagram = AncestorDiagram::from_identifier(id)
        .with_context(|| format!("Cannot render a tree for '{}'", id))?;
    println!("{}", diagram.to_dot());
    Ok(())
}

/// Analyze ID pairs and export them as CSV
fn export_pairs(pairs: &[String], output_file: Option<PathBuf>, config: Config) -> Result<()> {
    if pairs.is_empty() {
        warn!("No pairs given; nothing to export");
        return Ok(());
    }

    let mut parsed_pairs = Vec::new();
    for pair in pairs {
        let (id1, id2) = pair
            .split_once(',')
            .with_context(|| format!("Pair '{}' is not in the form ID1,ID2", pair))?;
        parsed_pairs.push((id1.trim().to_string(), id2.trim().to_string()));
    }

    let analyzer = KinshipAnalyzer::with_spouse_links(config.spouse_links);
    let reports = analyzer
        .analyze_pairs(&parsed_pairs)
        .context("Failed to analyze identifier pairs")?;

    let rows = report_rows(&reports);
    let exporter = CsvExporter::new();

    if let Some(path) = output_file {
        exporter.export_to_file(&path, &rows)?;
        println!("Exported {} relationship records to {:?}", reports.len(), path);
    } else {
        print!("{}", exporter.render(&rows));
    }

    Ok(())
}

/// Interactive query form: read two IDs, show the relationship and
/// both ancestor trees, repeat until empty input or EOF
fn interactive_session(config: Config) -> Result<()> {
    let analyzer = KinshipAnalyzer::with_spouse_links(config.spouse_links);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Kinship Analyzer");
    println!("Empty input exits.\n");

    loop {
        let Some(id1) = prompt_id(&mut lines, "Enter first person ID (e.g. 1-1-4-6): ")? else {
            break;
        };
        let Some(id2) = prompt_id(&mut lines, "Enter second person ID (e.g. 1-1-5-3): ")? else {
            break;
        };

        // validate both up front so one bad ID never aborts the session
        let mut valid = true;
        if let Err(err) = algebra::parse_id(&id1) {
            println!("First ID is invalid: {}", err);
            valid = false;
        }
        if let Err(err) = algebra::parse_id(&id2) {
            println!("Second ID is invalid: {}", err);
            valid = false;
        }
        if !valid {
            println!();
            continue;
        }

        let ancestor_label = match algebra::common_ancestor(&id1, &id2)? {
            CommonAncestor::Shared(path) => path.to_string(),
            CommonAncestor::Disjoint => "none (lines diverge at the root)".to_string(),
            CommonAncestor::EmptyInput => "none (empty generation path)".to_string(),
        };

        println!();
        println!("Common Ancestor: {}", ancestor_label);
        println!(
            "Generational Distance: {}",
            algebra::relationship_distance(&id1, &id2)?
        );
        println!("Consanguinity Level: {}", algebra::classify(&id1, &id2)?);
        if let Some(spouse) = analyzer.spouse_of(&id1) {
            println!("Spouse on record for {}: {}", id1, spouse);
        }

        println!("\nAncestor Tree of Person 1");
        println!("{}", AncestorDiagram::from_identifier(&id1)?.to_dot());
        println!("Ancestor Tree of Person 2");
        println!("{}", AncestorDiagram::from_identifier(&id2)?.to_dot());
    }

    Ok(())
}

/// Prompt for one identifier; None on empty input or EOF
fn prompt_id(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    match lines.next() {
        Some(line) => {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        None => Ok(None),
    }
}

/// Validate one identifier and show its parsed path
fn validate_identifier(id: &str) -> Result<()> {
    match algebra::parse_id(id) {
        Ok(path) if path.is_empty() => {
            println!("⚠️  '{}' parses to an empty generation path", id);
        }
        Ok(path) => {
            println!("✅ '{}' is a valid identifier", id);
            println!("  Canonical form: {}", path);
            println!("  Generation depth: {}", path.depth());
            println!("  Birth order: {}", algebra::birth_order(id)?);
        }
        Err(err) => {
            println!("❌ {}", err);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Initialize configuration file
fn init_config(config_file: &PathBuf) -> Result<()> {
    info!("Initializing configuration file: {:?}", config_file);

    if config_file.exists() {
        warn!("Configuration file already exists: {:?}", config_file);
        print!("Overwrite existing file? (y/N): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().to_lowercase().starts_with('y') {
            info!("Configuration initialization cancelled");
            return Ok(());
        }
    }

    let default_config = r#"# Kinship Analyzer Configuration

# Output settings
output:
  format: text
  file: null

# Affinity links: person ID -> spouse ID
spouse_links: {}
"#;

    std::fs::write(config_file, default_config)
        .with_context(|| format!("Failed to write configuration file: {:?}", config_file))?;

    info!("Configuration file created successfully: {:?}", config_file);
    println!("Configuration file created: {:?}", config_file);
    println!("Edit this file to customize output defaults and spouse links.");

    Ok(())
}
