//! Test-credentials command - run the provider account check

use anyhow::Result;
use revelro_client::RevelroClient;

use crate::output::{OutputContext, OutputFormat};

pub async fn test_credentials(
    client: &RevelroClient,
    show_response: bool,
    ctx: &OutputContext,
) -> Result<()> {
    let mut check = client.test_credentials().await?;

    if ctx.format == OutputFormat::Json {
        if !show_response {
            check.response.clear();
        }
        ctx.print_json(&check);
        return Ok(());
    }

    ctx.print_kv(&[
        ("Status", check.status.to_string()),
        ("Username", check.username.clone()),
    ]);

    if check.appears_valid() {
        ctx.success(&check.message);
    } else {
        ctx.warn(&check.message);
    }

    if show_response {
        println!();
        println!("{}", check.response);
    }
    Ok(())
}
