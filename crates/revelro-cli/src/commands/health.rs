//! Health command - check that the gateway is up

use anyhow::Result;
use revelro_client::RevelroClient;

use crate::output::{OutputContext, OutputFormat};

pub async fn health(client: &RevelroClient, ctx: &OutputContext) -> Result<()> {
    let health = client.health().await?;

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&health),
        OutputFormat::Table => {
            ctx.print_kv(&[
                ("Server", client.base_url().to_string()),
                ("Status", health.status),
                ("Message", health.message),
            ]);
        }
    }
    Ok(())
}
