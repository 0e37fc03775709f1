//! Linkrank CLI: rank the pages of an HTML corpus
//!
//! Loads every `*.html` file of a directory, runs the sampling estimator and
//! the iterative solver, and prints both rankings side by side.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use comfy_table::{ContentArrangement, Table};
use linkrank::{crawl, Method, RankReport, Ranker, RankerConfig};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linkrank", version, about = "Rank the pages of an HTML corpus with PageRank")]
struct Cli {
    /// Directory containing the .html pages
    corpus: PathBuf,

    /// YAML config file; flags below override its values
    #[arg(long, env = "LINKRANK_CONFIG")]
    config: Option<PathBuf>,

    /// Probability of following a link rather than jumping
    #[arg(long)]
    damping: Option<f64>,

    /// Pages visited by the sampling estimator
    #[arg(long)]
    samples: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Independent sampling chains
    #[arg(long)]
    chains: Option<usize>,

    /// Convergence threshold of the iterative solver
    #[arg(long)]
    epsilon: Option<f64>,

    /// Iteration cap of the iterative solver
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Compute solver updates in parallel
    #[arg(long, overrides_with = "no_parallel")]
    parallel: bool,

    /// Compute solver updates sequentially, even if the config enables parallel
    #[arg(long, overrides_with = "parallel")]
    no_parallel: bool,

    /// Which algorithms to run
    #[arg(long, value_enum, default_value = "both")]
    method: MethodArg,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Both,
    Sample,
    Iterate,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Both => Method::Both,
            MethodArg::Sample => Method::Sample,
            MethodArg::Iterate => Method::Iterate,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Table,
    Json,
    Csv,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    debug!("Using {:?}", config);

    let graph = crawl(&cli.corpus)
        .with_context(|| format!("failed to load corpus {}", cli.corpus.display()))?;
    let report = Ranker::new(config).run(&graph, cli.method.into())?;

    match cli.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => print_csv(&report),
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<RankerConfig> {
    let mut config = match &cli.config {
        Some(path) => RankerConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RankerConfig::default(),
    };

    if let Some(damping) = cli.damping {
        config.damping_factor = damping;
    }
    if let Some(samples) = cli.samples {
        config.samples = samples;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(chains) = cli.chains {
        config.chains = chains;
    }
    if let Some(epsilon) = cli.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.max_iterations = max_iterations;
    }
    if cli.parallel {
        config.parallel = true;
    } else if cli.no_parallel {
        config.parallel = false;
    }

    config.validate()?;
    Ok(config)
}

fn print_text(report: &RankReport<String>) {
    if let (Some(samples), Some(ranks)) = (report.samples, &report.sampled) {
        println!("PageRank Results from Sampling (n = {})", samples);
        for (page, rank) in ranks.sorted_by_page() {
            println!("  {}: {:.4}", page, rank);
        }
    }
    if let Some(ranks) = &report.iterated {
        println!("PageRank Results from Iteration");
        for (page, rank) in ranks.sorted_by_page() {
            println!("  {}: {:.4}", page, rank);
        }
    }
}

fn print_table(report: &RankReport<String>) {
    let rows = report.rows();
    if rows.is_empty() {
        println!("(no pages)");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Page", "Sampled", "Iterated"]);

    for row in &rows {
        table.add_row(vec![
            row.page.clone(),
            format_rank(row.sampled),
            format_rank(row.iterated),
        ]);
    }

    println!("{}", table);
    println!("{} page(s)", rows.len());
    if let Some(divergence) = report.max_divergence() {
        println!("Max divergence between methods: {:.4}", divergence);
    }
}

fn print_csv(report: &RankReport<String>) {
    println!("page,sampled,iterated");
    for row in report.rows() {
        println!(
            "{},{},{}",
            format_csv_value(&row.page),
            row.sampled.map(|r| r.to_string()).unwrap_or_default(),
            row.iterated.map(|r| r.to_string()).unwrap_or_default()
        );
    }
}

fn format_rank(rank: Option<f64>) -> String {
    rank.map(|r| format!("{:.4}", r)).unwrap_or_else(|| "-".to_string())
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
