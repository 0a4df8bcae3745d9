use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use twskill_cli::context::AppContext;
use twskill_cli::format::{self, RecommendFormat};
use twskill_cli::{init_tracing, parse_package};
use twskill_core::Package;
use twskill_recommend::{Recommender, RuleBook};

#[derive(Parser, Debug)]
#[command(
    name = "twskill-recommend",
    version,
    about = "Recommend a Taiwan invoice or payment provider from a requirement description",
    after_help = "Examples:\n  twskill-recommend \"電商 高交易量 穩定\"\n  twskill-recommend \"簡單整合 快速上線\" -f json\n  twskill-recommend \"LINE Pay 行動支付\" -p payment"
)]
struct Cli {
    /// Requirement keywords, separated by spaces
    query: String,

    /// Skill package: invoice, logistics or payment (defaults to the configured one)
    #[arg(short, long, value_parser = parse_package)]
    package: Option<Package>,

    #[arg(short, long, value_enum, default_value_t = RecommendFormat::Ascii)]
    format: RecommendFormat,

    /// Root directory of the knowledge tables
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::resolve(cli.package, cli.data_dir.clone())?;
    let rules = RuleBook::builtin(ctx.package)
        .ok_or_else(|| anyhow!("package '{}' has no provider recommendations", ctx.package))?;
    let recommender = Recommender::new(ctx.catalog.clone(), rules, ctx.tables());

    let out = match (recommender.recommend(&cli.query), cli.format) {
        (rec, RecommendFormat::Json) => format::json(&rec)?,
        (None, _) => format::no_recommendation(&cli.query),
        (Some(rec), RecommendFormat::Simple) => format::recommendation_simple(&rec),
        (Some(rec), RecommendFormat::Ascii) => format::recommendation_ascii(&rec),
    };
    println!("{out}");
    Ok(())
}
