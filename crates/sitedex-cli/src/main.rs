//! CLI entry point: loads the declarative configuration, resolves runtime
//! overrides, and drives one crawl run. Mirrors the teacher's
//! `sws-cli::main` (a `clap` subcommand wrapping a YAML-configured async
//! run), trimmed to the single `crawl` action this design needs.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use sitedex_crawler::RunOptions;

#[derive(Debug, Parser)]
#[clap(name = "sitedex", version, about = "Site-indexing crawler")]
struct Args {
    #[clap(subcommand)]
    cmd: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
enum SubCommand {
    /// Crawl every configured site and index the documents it finds
    Crawl(CrawlArgs),
    #[clap(hide = true)]
    Completion,
}

#[derive(Debug, clap::Args)]
struct CrawlArgs {
    /// Path to the declarative configuration file
    config: PathBuf,

    /// Restrict this run to a single URL within a configured site
    url: Option<String>,

    /// Override the converter (tika) base URL
    #[clap(long, value_name = "TIKA_URL")]
    tika: Option<String>,

    /// Override the index (solr) base URL
    #[clap(long, value_name = "SOLR_URL")]
    solr: Option<String>,

    /// Ignore freshness checks and always re-fetch every URL
    #[clap(short, long)]
    force: bool,
}

fn crawl(args: CrawlArgs) -> anyhow::Result<()> {
    let config = sitedex_config::load(&args.config, args.tika, args.solr)?;
    let options = RunOptions::new()
        .with_force(args.force)
        .with_url_filter(args.url);

    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    rt.block_on(sitedex_crawler::run(&config, &options))?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.cmd {
        SubCommand::Crawl(args) => crawl(args),
        SubCommand::Completion => {
            generate(Shell::Bash, &mut Args::command(), "sitedex", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
