use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use twskill_cli::context::AppContext;
use twskill_cli::format::{self, OutputFormat};
use twskill_cli::{init_tracing, parse_package};
use twskill_core::{KnowledgeSearch, Package};

#[derive(Parser, Debug)]
#[command(
    name = "twskill-search",
    version,
    about = "BM25 search over Taiwan e-commerce knowledge tables",
    after_help = "Examples:\n  twskill-search \"ecpay B2C\"\n  twskill-search \"10000016\" -d error\n  twskill-search \"7-11 取貨\" -p logistics\n  twskill-search \"ECPay\" --all -f markdown\n  twskill-search --list"
)]
struct Cli {
    /// Free-text query
    query: Option<String>,

    /// Skill package: invoice, logistics or payment (defaults to the configured one)
    #[arg(short, long, value_parser = parse_package)]
    package: Option<Package>,

    /// Domain to search (auto-detected when omitted)
    #[arg(short, long)]
    domain: Option<String>,

    /// Maximum results per domain
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Search every domain
    #[arg(short, long)]
    all: bool,

    /// List available domains
    #[arg(short, long)]
    list: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

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
    let engine = ctx.search_engine();

    if cli.list {
        let infos: Vec<_> = engine.available_domains().into_iter().filter_map(|d| engine.domain_info(d)).collect();
        println!("{}", format::domain_list(&infos, &ctx.catalog.title));
        return Ok(());
    }

    let Some(query) = cli.query.as_deref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if cli.all {
        let max = cli.max_results.unwrap_or(ctx.settings.max_per_domain);
        let results = engine.search_all(query, max);
        let out = match cli.format {
            OutputFormat::Json => format::json(&results)?,
            OutputFormat::Markdown => format::markdown_all(&results, query, &ctx.catalog.title),
            OutputFormat::Simple => format::simple_all(&results, query),
            OutputFormat::Ascii => format::ascii_all(&results, query),
        };
        println!("{out}");
        return Ok(());
    }

    let domain = match cli.domain.as_deref() {
        Some(d) if ctx.catalog.domain(d).is_none() => {
            let valid = ctx.catalog.domain_names().join(", ");
            Cli::command()
                .error(ErrorKind::InvalidValue, format!("unknown domain '{d}' (choose from: {valid})"))
                .exit()
        }
        Some(d) => d,
        None => {
            let detected = engine.detect_domain(query);
            if matches!(cli.format, OutputFormat::Ascii | OutputFormat::Simple) {
                println!("[Auto-detected domain: {detected}]");
            }
            detected
        }
    };

    let max = cli.max_results.unwrap_or(ctx.settings.max_results);
    let results = engine.search(query, Some(domain), max);
    let out = match cli.format {
        OutputFormat::Json => format::json(&results)?,
        OutputFormat::Markdown => format::markdown_domain(&results, domain, query),
        OutputFormat::Simple => format::simple(&results, query),
        OutputFormat::Ascii => format::ascii_domain(&results, domain, query),
    };
    println!("{out}");
    Ok(())
}
