use yarhs_content::{config, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config file from the first argument, ./config.toml otherwise
    let cfg = match std::env::args().nth(1) {
        Some(path) => config::Config::load_from(&path)?,
        None => config::Config::load()?,
    };
    logger::init(&cfg)?;

    // Worker count from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(server::run(cfg))
}
