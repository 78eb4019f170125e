use anyhow::Result;
use testgen::cli;
use testgen::config::GeneratorConfig;

fn main() -> Result<()> {
    // Per-declaration skip diagnostics are warnings; show them by default.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::parse_args();
    let config = GeneratorConfig::from_cli(cli)?;
    let summary = testgen::driver::run(&config)?;

    eprintln!(
        "generated {} scaffold(s), skipped {} declaration(s)",
        summary.scaffolds, summary.skipped
    );
    Ok(())
}
