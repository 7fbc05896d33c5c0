use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use witr::ancestry::{AncestryProvider, ProcAncestry};
use witr::cli::{Cli, OutputFormat};
use witr::config::WitrConfig;
use witr::file_context::{FileContextEvaluator, ProcfsReader};
use witr::output;
use witr::process::process_exists_in;
use witr::report::Diagnoser;
use witr::source::DetectorChain;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.pid <= 0 {
        anyhow::bail!("Invalid value for --pid: {} (must be > 0)", args.pid);
    }

    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => WitrConfig::from_file(path)?,
        None => WitrConfig::default(),
    };

    if !process_exists_in(&config.proc_root, args.pid) {
        anyhow::bail!("Process {} not found", args.pid);
    }

    let ancestry = ProcAncestry::new(&config.proc_root)
        .ancestry(args.pid)
        .with_context(|| format!("Failed to read ancestry of process {}", args.pid))?;

    let diagnoser = Diagnoser::new(
        DetectorChain::from_config(&config.source)?,
        FileContextEvaluator::new(
            ProcfsReader::new(&config.proc_root),
            config.file_context.clone(),
        ),
    );
    let diagnosis = diagnoser.diagnose(args.pid, ancestry);

    match args.format {
        OutputFormat::Text => print!("{}", output::render_text(&diagnosis)),
        OutputFormat::Json => println!("{}", output::render_json(&diagnosis)?),
    }

    Ok(())
}
