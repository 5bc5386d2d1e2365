//! Upstream connectivity diagnostics.

use storefront_catalog::CatalogClient;
use storefront_core::AppConfig;

pub(crate) async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let client = CatalogClient::new(
        &config.catalog_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    println!("probing {}", config.catalog_base_url);
    match client.probe().await {
        Ok(report) => {
            let verdict = if report.ok { "ok" } else { "not ok" };
            println!("  status:       {} ({verdict})", report.status);
            println!(
                "  content-type: {}",
                report.content_type.as_deref().unwrap_or("(none)")
            );
            println!("  body length:  {}", report.body_length);
            println!("  preview:      {}", report.body_preview);
        }
        Err(error) => {
            println!("  no response: {error}");
        }
    }

    Ok(())
}
