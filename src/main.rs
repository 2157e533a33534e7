use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use segregation_rank::algorithm::segregation::{RankingSummary, lookup_report};
use segregation_rank::prompt::prompt_selector;
use segregation_rank::{
    ComparisonMode, DistrictLookup, RankingConfig, SegregationPipeline, SizeThreshold,
    read_school_table, write_outputs,
};

/// Rank school districts by high-school segregation between two groups
#[derive(Parser, Debug)]
#[command(name = "segregation-rank", version, about)]
struct Args {
    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input school table (.csv or .parquet)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for the result tables
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Comparison mode: hispanic_v_non, white_v_non, asian_v_non, brown_v_non,
    /// asian_v_hispanic or white_v_hispanic
    #[arg(short, long)]
    mode: Option<String>,

    /// Size threshold: small, medium or large
    #[arg(short, long)]
    size: Option<String>,

    /// State for the regional view
    #[arg(long)]
    state: Option<String>,

    /// File name label for the regional view
    #[arg(long)]
    region_label: Option<String>,

    /// Skip the regional view
    #[arg(long, conflicts_with = "state")]
    no_region: bool,

    /// Also write results as JSON
    #[arg(long)]
    json: bool,

    /// Report the rank of a district, as ID=NAME (repeatable)
    #[arg(long = "lookup", value_name = "ID=NAME")]
    lookups: Vec<String>,

    /// Prompt for the comparison mode and size threshold
    #[arg(long)]
    interactive: bool,
}

fn build_config(args: &Args) -> anyhow::Result<RankingConfig> {
    let mut config = match &args.config {
        Some(path) => RankingConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => RankingConfig::default(),
    };

    if let Some(input) = &args.input {
        config.input_path = input.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(mode) = &args.mode {
        config.comparison_mode = Some(mode.parse::<ComparisonMode>()?);
    }
    if let Some(size) = &args.size {
        config.size_threshold = Some(size.parse::<SizeThreshold>()?);
    }
    if args.no_region {
        config.region_state = None;
    }
    if let Some(state) = &args.state {
        config.region_state = Some(state.clone());
    }
    if let Some(label) = &args.region_label {
        config.region_label = label.clone();
    }
    if args.json {
        config.write_json = true;
    }
    for lookup in &args.lookups {
        config.lookups.push(DistrictLookup::parse(lookup)?);
    }

    config.validate()?;
    Ok(config)
}

fn resolve_selectors(
    config: &RankingConfig,
    interactive: bool,
) -> anyhow::Result<(ComparisonMode, SizeThreshold)> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let mode = match config.comparison_mode {
        Some(mode) if !interactive => mode,
        _ => prompt_selector(&mut input, &mut output).context("Failed to select comparison mode")?,
    };
    let size = match config.size_threshold {
        Some(size) if !interactive => size,
        _ => prompt_selector(&mut input, &mut output).context("Failed to select size threshold")?,
    };

    Ok((mode, size))
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let (mode, size) = resolve_selectors(&config, args.interactive)?;
    let start = Instant::now();

    info!("{config}");
    info!("Comparison mode: {mode}, size threshold: {size}");

    let rows = read_school_table(&config.input_path, &config.columns).with_context(|| {
        format!("Failed to read school table {}", config.input_path.display())
    })?;

    let outcome = SegregationPipeline::new(mode, size)
        .run(&rows)
        .context("Failed to rank districts")?;
    info!("{}", outcome.stats);

    let written = write_outputs(&config, mode, size, &outcome.ranked)
        .context("Failed to write ranking tables")?;
    for path in &written {
        info!("Wrote {}", path.display());
    }

    match RankingSummary::from_ranked(&outcome.ranked) {
        Some(summary) => println!("{}", summary.report()),
        None => warn!("No district met the ranking criteria"),
    }

    let lookups = config
        .lookups
        .iter()
        .map(|l| (l.district_id.as_str(), l.name.as_str()));
    for line in lookup_report(&outcome.ranked, lookups) {
        println!("{line}");
    }

    info!("Ranking completed in {:?}", start.elapsed());
    Ok(())
}
