use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, ValueEnum};
use dslo_algo::{
    extract_dense_subgraphs, Engine, ExtractionMode, ExtractionReport, LpOracle, RunConfig,
};
use dslo_core::provenance::{RunProvenance, SchemaVersion};
use dslo_core::report::LogReporter;
use dslo_graph::{canonical_hash, DerivationMode};
use log::info;
use serde::Serialize;

use super::GraphArgs;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    NaiveDensest,
    NaiveApprox,
    ExactMinAndRemove,
    ApproxMinAndRemove,
}

impl From<ModeArg> for ExtractionMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::NaiveDensest => ExtractionMode::NaiveDensest,
            ModeArg::NaiveApprox => ExtractionMode::NaiveApprox,
            ModeArg::ExactMinAndRemove => ExtractionMode::ExactMinAndRemove,
            ModeArg::ApproxMinAndRemove => ExtractionMode::ApproxMinAndRemove,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DerivationArg {
    Induced,
    Complement,
}

impl From<DerivationArg> for DerivationMode {
    fn from(value: DerivationArg) -> Self {
        match value {
            DerivationArg::Induced => DerivationMode::Induced,
            DerivationArg::Complement => DerivationMode::Complement,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
    /// Optional YAML run configuration; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Extraction control loop.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
    /// Maximum number of subgraphs.
    #[arg(long)]
    pub k: Option<usize>,
    /// Overlap fraction in [0, 1].
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Derivation used by the overlap-limiting pass.
    #[arg(long, value_enum)]
    pub derivation: Option<DerivationArg>,
    /// Master seed for random node choices.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Only write the summary lines to the result file.
    #[arg(long)]
    pub no_subgraphs: bool,
    /// Output directory for the result file and summary.json.
    #[arg(long, default_value = "result")]
    pub out: PathBuf,
}

#[derive(Debug, Serialize)]
struct SubgraphSummary {
    rank: usize,
    nodes: Vec<u64>,
    node_count: usize,
    edge_count: usize,
    density: f64,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    mode: ExtractionMode,
    k: usize,
    alpha: f64,
    derivation: DerivationMode,
    subgraphs: Vec<SubgraphSummary>,
    total_density: f64,
    elapsed_seconds: f64,
    provenance: RunProvenance,
}

pub fn run(args: &ExtractArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    config.validate()?;
    let started = Instant::now();
    let graph = args.graph.load(config.load_options())?;
    info!(
        "running {} on {} nodes and {} edges with k = {}, alpha = {:.6}",
        config.mode,
        graph.node_count(),
        graph.edge_count(),
        config.k,
        config.alpha
    );

    let reporter = LogReporter;
    let mut engine = Engine::new(LpOracle, config.seed, &reporter);
    let report = extract_dense_subgraphs(&mut engine, &graph, &config.extract_params())?;
    let elapsed = started.elapsed().as_secs_f64();
    info!("Total value is {:.6}.", report.total_density());

    fs::create_dir_all(&args.out)?;
    let result_path = args.out.join(result_file_name(&args.graph.nodes, &config));
    write_result_file(&result_path, &report, &config, elapsed)?;

    let provenance = RunProvenance {
        schema_version: SchemaVersion::default(),
        graph_hash: canonical_hash(&graph),
        inputs: args.graph.inputs(),
        seed: config.seed,
        tool_versions: BTreeMap::from([(
            "dslo".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )]),
    };
    let summary = summarize(&report, &config, elapsed, provenance);
    fs::write(args.out.join("summary.json"), serde_json::to_string_pretty(&summary)?)?;
    info!("results written to {}", result_path.display());
    Ok(())
}

fn resolve_config(args: &ExtractArgs) -> Result<RunConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(k) = args.k {
        config.k = k;
    }
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(derivation) = args.derivation {
        config.derivation = derivation.into();
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.graph.unweighted {
        config.unweighted = true;
    }
    if args.no_subgraphs {
        config.write_subgraphs = false;
    }
    Ok(config)
}

/// `<stem>_[<Mode>(<code>)]_k=<k>`, plus alpha and derivation for overlap modes.
fn result_file_name(nodes: &Path, config: &RunConfig) -> String {
    let stem = nodes
        .file_name()
        .map(|name| name.to_string_lossy().replace('.', "_"))
        .unwrap_or_else(|| "graph".to_string());
    let mut name = format!("{stem}_[{}]_k={}", config.mode, config.k);
    if !config.mode.is_naive() {
        name.push_str(&format!(
            "_alpha={:.6}_removalway={}",
            config.alpha,
            config.derivation.label()
        ));
    }
    name
}

fn write_result_file(
    path: &Path,
    report: &ExtractionReport,
    config: &RunConfig,
    elapsed: f64,
) -> Result<(), Box<dyn Error>> {
    let mut file = fs::File::create(path)?;
    if config.write_subgraphs {
        for subgraph in &report.subgraphs {
            writeln!(file, "{subgraph}Density: {:.6};", subgraph.density())?;
            writeln!(file)?;
        }
    }
    writeln!(file, "Total value is {:.6}.", report.total_density())?;
    writeln!(file, "Elapsed time: {elapsed:.6} sec.")?;
    Ok(())
}

fn summarize(
    report: &ExtractionReport,
    config: &RunConfig,
    elapsed: f64,
    provenance: RunProvenance,
) -> RunSummary {
    let subgraphs = report
        .subgraphs
        .iter()
        .enumerate()
        .map(|(idx, subgraph)| SubgraphSummary {
            rank: idx + 1,
            nodes: subgraph.node_ids().iter().map(|node| node.as_raw()).collect(),
            node_count: subgraph.node_count(),
            edge_count: subgraph.edge_count(),
            density: subgraph.density(),
        })
        .collect();
    RunSummary {
        mode: config.mode,
        k: config.k,
        alpha: config.alpha,
        derivation: config.derivation,
        subgraphs,
        total_density: report.total_density(),
        elapsed_seconds: elapsed,
        provenance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_names_follow_mode_family() {
        let naive = RunConfig {
            mode: ExtractionMode::NaiveApprox,
            k: 4,
            ..RunConfig::default()
        };
        assert_eq!(
            result_file_name(Path::new("data/contact.nodes.txt"), &naive),
            "contact_nodes_txt_[NaiveApprox(1)]_k=4"
        );

        let overlap = RunConfig {
            alpha: 0.25,
            derivation: DerivationMode::Complement,
            ..RunConfig::default()
        };
        assert_eq!(
            result_file_name(Path::new("nodes"), &overlap),
            "nodes_[MinAndRemove(2)]_k=10_alpha=0.250000_removalway=2"
        );
    }

    #[test]
    fn summary_only_result_file_has_two_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result");
        let config = RunConfig {
            write_subgraphs: false,
            ..RunConfig::default()
        };
        write_result_file(&path, &ExtractionReport::default(), &config, 0.5).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Total value is 0.000000.\nElapsed time: 0.500000 sec.\n");
    }
}
