//! Scripted cart sessions.
//!
//! Additions apply first (in the order given), then removals, then an
//! optional clear, with a summary printed after each phase. Unknown product
//! ids abort the session rather than being skipped silently.

use clap::Args;
use storefront_cart::CartStore;
use storefront_catalog::CatalogError;
use storefront_core::{AppConfig, CachePolicy};
use tracing::info;

#[derive(Debug, Args)]
pub(crate) struct CartArgs {
    /// Product id to add; repeat the flag to add several units
    #[arg(long = "add", value_name = "ID")]
    pub(crate) add: Vec<u32>,

    /// Product id to remove (the whole entry) after the additions
    #[arg(long = "remove", value_name = "ID")]
    pub(crate) remove: Vec<u32>,

    /// Empty the cart at the end of the session
    #[arg(long)]
    pub(crate) clear: bool,

    /// Override the configured cache policy for this invocation
    #[arg(long)]
    pub(crate) policy: Option<CachePolicy>,
}

pub(crate) async fn run(config: &AppConfig, args: &CartArgs) -> anyhow::Result<()> {
    let provider = crate::build_provider(config, args.policy)?;
    let store = CartStore::new();
    info!(session_id = %store.session_id(), "cart session started");

    for id in &args.add {
        match provider.product_by_id(*id).await {
            Ok(product) => store.add(product),
            Err(CatalogError::NotFound { id }) => {
                anyhow::bail!(
                    "cannot add product {id}: not found in the live catalog or the fallback dataset"
                )
            }
            Err(error) => return Err(error.into()),
        }
    }
    print_summary("after additions", &store);

    if !args.remove.is_empty() {
        for id in &args.remove {
            store.remove(*id);
        }
        print_summary("after removals", &store);
    }

    if args.clear {
        store.clear();
        print_summary("after clear", &store);
    }

    Ok(())
}

fn print_summary(phase: &str, store: &CartStore) {
    println!(
        "{phase}: {} distinct, {} items, total ${}",
        store.len(),
        store.count(),
        store.total()
    );
    for entry in store.entries() {
        let line_total = format!("${}", entry.line_total());
        let unit_price = format!("${}", entry.product.price);
        println!(
            "  {:>4}  {} x{}  {line_total} ({unit_price} each)",
            entry.product.id, entry.product.title, entry.quantity
        );
    }
}
