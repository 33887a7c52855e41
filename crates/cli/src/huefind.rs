//! huefind - find the named colors nearest to a color code
//!
//! Accepts `FF0000`, `#ff0000`, `0xFF0000` or `255 0 0` and prints the
//! closest entries of a color catalog, ranked by RGB distance.

mod render;

use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use huefind_core::ParseError;
use huefind_core::api::{DEFAULT_LIMIT, SearchController, SearchOutcome, SearchServiceBuilder};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use render::{OutputFormat, render_state};

/// Environment variable holding a tracing filter, e.g. `huefind_core=debug`.
const LOG_ENV: &str = "HUEFIND_LOG";

/// Find the named colors nearest to a color code.
#[derive(Parser, Debug)]
#[command(name = "huefind")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Color code: FF0000, #ff0000, 0xFF0000 or 255 0 0
    #[arg(required_unless_present = "interactive")]
    query: Vec<String>,

    /// JSON catalog file (array of {"id", "name", "rgb": [r, g, b]});
    /// the builtin CSS color names are used when omitted
    #[arg(short = 'c', long)]
    catalog: Option<PathBuf>,

    /// Maximum number of matches to print
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Never print color swatches (they are only printed to terminals)
    #[arg(long = "no-swatch", action = ArgAction::SetTrue)]
    no_swatch: bool,

    /// Read one color code per line from stdin
    #[arg(short = 'i', long, action = ArgAction::SetTrue)]
    interactive: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
    if result.is_err() {
        eprintln!("huefind: tracing subscriber failed to initialize");
    }
}

fn build_runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

fn build_controller(args: &Args) -> SearchController {
    let mut builder = SearchServiceBuilder::new().limit(args.limit);
    if let Some(path) = &args.catalog {
        builder = builder.catalog_path(path);
    }
    SearchController::new(builder.build())
}

/// Search a single query given on the command line.
fn run_once<W: Write>(
    args: &Args,
    runtime: &Runtime,
    controller: &SearchController,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        return Err(huefind_core::Error::from(ParseError::Empty).into());
    }

    runtime.block_on(controller.start())?;
    let outcome = runtime.block_on(controller.search(&query));
    tracing::debug!(query = %query, ?outcome, "search finished");
    let state = controller.snapshot();
    if let Some(message) = state.error {
        return Err(message.into());
    }

    let swatches = !args.no_swatch && io::stdout().is_terminal();
    render_state(out, &state, args.format, swatches, true)?;
    Ok(())
}

/// Search every line of stdin; errors are reported and the loop continues.
fn run_interactive<W: Write>(
    args: &Args,
    runtime: &Runtime,
    controller: &SearchController,
    out: &mut W,
) -> io::Result<()> {
    if let Err(err) = runtime.block_on(controller.start()) {
        eprintln!("huefind: {err}");
        controller.dismiss_error();
    }

    let swatches = !args.no_swatch && io::stdout().is_terminal();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let outcome = runtime.block_on(controller.search(&line));
        tracing::debug!(query = %line.trim(), ?outcome, "search finished");
        if outcome == SearchOutcome::Ignored {
            continue;
        }
        let state = controller.snapshot();
        if let Some(message) = &state.error {
            eprintln!("huefind: {message}");
            controller.dismiss_error();
            continue;
        }
        render_state(out, &state, args.format, swatches, false)?;
        out.flush()?;
    }
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.debug);

    tracing::debug!(?args, "starting");

    let runtime = build_runtime()?;
    let controller = build_controller(&args);
    let mut output = BufWriter::new(io::stdout().lock());

    if args.interactive {
        run_interactive(&args, &runtime, &controller, &mut output)?;
    } else if let Err(e) = run_once(&args, &runtime, &controller, &mut output) {
        eprintln!("huefind: {e}");
        std::process::exit(1);
    }

    output.flush()?;
    Ok(())
}
