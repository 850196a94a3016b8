//! Startup shared by the indexer, querier and crawler programs.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Log to stderr, `info` unless `RUST_LOG` says otherwise. Stdout is left for program output.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Parse the process arguments. Usage errors exit with status 1; `--help` and `--version` exit 0.
pub fn parse_args<P: Parser>() -> P {
    P::try_parse().unwrap_or_else(|e| {
        if exit_code(&e) != 0 {
            let _ = e.print();
            std::process::exit(exit_code(&e));
        }
        e.exit()
    })
}

fn exit_code(e: &clap::Error) -> i32 { if e.use_stderr() { 1 } else { 0 } }
