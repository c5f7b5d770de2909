use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pathtrace")]
#[command(about = "PathTrace - interprocedural path and dependency analysis for auditing")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate raw call edges into a deduplicated, visibility-annotated snapshot
    Callgraph {
        /// Raw caller/callee edge list (JSON)
        #[arg(long)]
        edges: PathBuf,

        #[arg(short, long)]
        out: PathBuf,

        /// File with one package prefix per line; callers outside every prefix are dropped
        #[arg(short = 'p', long)]
        package_prefix: Option<PathBuf>,

        /// Keep edges whose caller is library code
        #[arg(long)]
        include_library: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Enumerate per-procedure paths, predicates, and DDGs along call-graph chains
    Chains {
        /// Program model with per-procedure CFGs (JSON)
        #[arg(long)]
        program: PathBuf,

        /// Ordered procedure-signature chains (JSON)
        #[arg(long)]
        chains: PathBuf,

        #[arg(short, long)]
        out: PathBuf,

        /// Print a per-chain summary to stdout after writing the artifact
        #[arg(long)]
        summary: bool,

        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Callgraph {
            edges,
            out,
            package_prefix,
            include_library,
            verbose,
        } => cmd_callgraph(edges, out, package_prefix, include_library, verbose),
        Commands::Chains {
            program,
            chains,
            out,
            summary,
            verbose,
        } => cmd_chains(program, chains, out, summary, verbose),
    }
}

fn cmd_callgraph(
    edges: PathBuf,
    out: PathBuf,
    package_prefix: Option<PathBuf>,
    include_library: bool,
    verbose: bool,
) -> Result<()> {
    use colored::*;
    use pathtrace_core::{CallEdge, CallGraphFilter, CallGraphIndex};
    use pathtrace_emit::{write_json_pretty, CallGraphReportEmitter, EmitContext, Emitter};
    use std::time::Instant;

    let start = Instant::now();

    let raw = std::fs::read_to_string(&edges)
        .with_context(|| format!("reading edge list {}", edges.display()))?;
    let edge_list: Vec<CallEdge> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing edge list {}", edges.display()))?;

    let package_prefixes = match package_prefix {
        Some(path) => load_package_prefixes(&path)?,
        None => Vec::new(),
    };

    let filter = CallGraphFilter {
        application_only: !include_library,
        package_prefixes,
    };
    let mut index = CallGraphIndex::new(filter);
    index.ingest(&edge_list);
    let snapshot = index.snapshot();

    write_json_pretty(&out, &snapshot)?;

    if verbose {
        println!("{}", "PathTrace call graph".bright_blue().bold());
        println!("  raw edges: {}", edge_list.len());
        let mut context = EmitContext::new();
        let mut stdout = std::io::stdout();
        CallGraphReportEmitter.emit(&snapshot, &mut stdout, &mut context)?;
        println!("\nwrote {} in {:.2?}", out.display(), start.elapsed());
    }

    Ok(())
}

fn cmd_chains(
    program: PathBuf,
    chains: PathBuf,
    out: PathBuf,
    summary: bool,
    verbose: bool,
) -> Result<()> {
    use colored::*;
    use pathtrace_core::{ChainAnalyzer, Program};
    use pathtrace_emit::{write_json_pretty, ChainReportEmitter, EmitContext, Emitter};
    use std::time::Instant;

    let start = Instant::now();

    let model: Program = serde_json::from_str(
        &std::fs::read_to_string(&program)
            .with_context(|| format!("reading program model {}", program.display()))?,
    )
    .with_context(|| format!("parsing program model {}", program.display()))?;
    model
        .validate()
        .with_context(|| format!("validating program model {}", program.display()))?;

    let chain_list: Vec<Vec<String>> = serde_json::from_str(
        &std::fs::read_to_string(&chains)
            .with_context(|| format!("reading chain list {}", chains.display()))?,
    )
    .with_context(|| format!("parsing chain list {}", chains.display()))?;

    let mut analyzer = ChainAnalyzer::new(&model);
    let results = analyzer.analyze(&chain_list);

    write_json_pretty(&out, &results)?;

    if summary {
        let mut context = EmitContext::new();
        let mut stdout = std::io::stdout();
        ChainReportEmitter.emit(&results, &mut stdout, &mut context)?;
    }

    if verbose {
        let stats = analyzer.cache_statistics();
        println!("{}", "PathTrace chain analysis".bright_blue().bold());
        println!("  procedures: {}", model.len());
        println!("  chains analyzed: {}", results.len());
        println!(
            "  cache: {} hits / {} misses ({:.0}% hit rate)",
            stats.hits,
            stats.misses,
            100.0 * stats.hits as f64 / (stats.hits + stats.misses).max(1) as f64
        );
        println!("  wrote {} in {:.2?}", out.display(), start.elapsed());
    }

    Ok(())
}

/// One prefix per line, blank lines ignored.
fn load_package_prefixes(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading package prefix file {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
