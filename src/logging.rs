use tracing_subscriber::EnvFilter;

/// Initialize tracing for the `heatmap` binary.
///
/// Verbosity maps 0 → warn, 1 → info, 2 → debug, 3+ → trace for this crate.
/// `RUST_LOG` overrides the flag when set. Output goes to stderr so SVG and
/// JSON written to stdout stay clean.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let default_filter = format!("{}={level}", env!("CARGO_CRATE_NAME"));
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Embedders and tests may already own the global subscriber; keep theirs.
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}
