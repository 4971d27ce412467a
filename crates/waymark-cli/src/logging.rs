//! stderr logging through `tracing-subscriber`.
//!
//! `RUST_LOG` wins when set; otherwise `-v` raises the level for the waymark
//! crates, starting from `warn`.

use tracing_subscriber::EnvFilter;

/// Filter directives for a given `-v` count.
pub fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,waymark_core=info,waymark_data=info,waymark_cli=info",
        2 => "warn,waymark_core=debug,waymark_data=debug,waymark_cli=debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
