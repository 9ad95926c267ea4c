use anyhow::Result;
use clap::Args;

use crate::{aws, config};

#[derive(Debug, Clone, Args)]
pub struct WebCommand {}

impl WebCommand {
    pub async fn execute(self, profile: &str) -> Result<()> {
        let config = config::load(profile).await?;
        aws::console::open_console(profile, &config.resolve_region()).await
    }
}
