use creature_battle::{run, CliOptions};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--catalog catalog.json] [--config config.json] \
[--battles N] [--seed SEED] [--trace]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut catalog_path = None;
    let mut config_path = None;
    let mut battles = 100usize;
    let mut seed = 0u64;
    let mut trace = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => {
                catalog_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--catalog requires a path (e.g. --catalog catalog.json)")
                })?);
            }
            "--config" => {
                config_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--config requires a path (e.g. --config config.json)")
                })?);
            }
            "--battles" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--battles requires a number"))?;
                battles = val.parse()?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--trace" => trace = true,
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        catalog_path,
        config_path,
        battles,
        seed,
        trace,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = parse_args()?;
    run(opts)
}
