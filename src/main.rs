use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use launch_dash::cli::{self, Mode};
use launch_dash::data::columns::ColumnMapping;
use launch_dash::data::loader;
use launch_dash::{app, server};

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::parse();
    log::debug!("{args:?}");

    let mapping = match &args.columns {
        Some(path) => ColumnMapping::from_json_file(path)?,
        None => ColumnMapping::default(),
    };

    let dataset = match loader::load_file(&args.data, &mapping) {
        Ok(ds) => Arc::new(ds),
        Err(e) => {
            log::error!("Failed to load {}: {e}", args.data.display());
            return Err(e).with_context(|| format!("loading {}", args.data.display()));
        }
    };

    match args.mode {
        Mode::Desktop => app::run(dataset).map_err(|e| anyhow!("dashboard window failed: {e}")),
        Mode::Web => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to start async runtime")?
            .block_on(server::serve(&args, dataset)),
    }
}
