//! Lookup command - fetch the record for a registration number

use anyhow::{bail, Result};
use revelro_client::{RevelroClient, RevelroClientError};

use crate::output::{flatten, OutputContext, OutputFormat};

/// Look up one registration and print the provider record
pub async fn lookup(client: &RevelroClient, registration: &str, ctx: &OutputContext) -> Result<()> {
    let history = match client.vehicle_history(registration).await {
        Ok(history) => history,
        Err(e) if e.is_not_found() => bail!("No vehicle data found for {}", registration),
        Err(RevelroClientError::Api {
            error,
            details: Some(details),
            ..
        }) => bail!("{}: {}", error, details),
        Err(e) => return Err(e.into()),
    };

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&history),
        OutputFormat::Table => {
            if !ctx.quiet {
                ctx.print_kv(&[
                    ("Vehicle", history.vehicle_number.clone()),
                    ("Fetched", history.timestamp.clone()),
                ]);
                println!();
            }
            ctx.print_table(&flatten(&history.raw_data));
        }
    }
    Ok(())
}
