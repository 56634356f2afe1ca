use clap::Parser;

use sortiment_api::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sortiment_observability::init();
    run(Cli::parse()).await
}
