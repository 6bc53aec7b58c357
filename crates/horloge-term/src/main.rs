use std::io;

use anyhow::Context;
use horloge_term::{logging, run_until};

fn run() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    runtime.block_on(run_until(&mut out, tokio::signal::ctrl_c()))
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
