use std::error::Error;

use clap::Args;
use dslo_algo::{check_uniqueness, Engine, LpOracle, Uniqueness};
use dslo_core::report::LogReporter;

use super::GraphArgs;

#[derive(Args, Debug)]
pub struct UniqueArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
    /// Seed for the random node choice.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

pub fn run(args: &UniqueArgs) -> Result<(), Box<dyn Error>> {
    let graph = args.graph.load(args.graph.options())?;
    let reporter = LogReporter;
    let mut engine = Engine::new(LpOracle, args.seed, &reporter);
    let verdict = check_uniqueness(&mut engine, &graph)?;
    println!("{}", render(&verdict));
    Ok(())
}

fn render(verdict: &Uniqueness) -> String {
    match verdict {
        Uniqueness::Unique { certificate } => format!(
            "unique: {} nodes, density = {:.6}",
            certificate.node_count(),
            certificate.density()
        ),
        Uniqueness::NotUnique { reason } => format!("not unique: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use dslo_algo::NonUniqueReason;

    use super::*;

    #[test]
    fn verdicts_render_on_one_line() {
        let text = render(&Uniqueness::NotUnique {
            reason: NonUniqueReason::AlternativeOptimum,
        });
        assert_eq!(text, "not unique: a smaller subgraph attains the same density");
    }
}
