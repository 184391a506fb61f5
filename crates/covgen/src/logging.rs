/// stderr logging. `RUST_LOG` wins; otherwise `--verbose` raises the default from `warn`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "covgen=debug,info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
