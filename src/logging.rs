use tracing_subscriber::filter::EnvFilter;

static CRATE_NAME: &str = std::env!("CARGO_CRATE_NAME");

/// Log to stderr so stdout only carries the account summary. `RUST_LOG` wins over `verbosity`.
pub fn set_up(verbosity: u8) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new("warn")?
            .add_directive(format!("{}={}", CRATE_NAME, max_level(verbosity)).parse()?),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(true)
        .init();

    Ok(())
}

fn max_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
