//! Catalog browsing commands.

use storefront_catalog::CatalogError;
use storefront_core::{AppConfig, CachePolicy, Product};

/// Widest title column before truncation kicks in.
const TITLE_WIDTH: usize = 58;

pub(crate) async fn list(
    config: &AppConfig,
    category: Option<&str>,
    policy: Option<CachePolicy>,
) -> anyhow::Result<()> {
    let provider = crate::build_provider(config, policy)?;

    if let Some(label) = category {
        let products = provider.products_by_category(label).await;
        if products.is_empty() {
            println!("no products in category '{label}'");
            return Ok(());
        }
        println!("{} products in category '{label}'", products.len());
        for product in &products {
            print_row(product);
        }
    } else {
        let snapshot = provider.snapshot().await;
        println!(
            "{} products ({} data, resolved {})",
            snapshot.len(),
            snapshot.origin,
            snapshot.resolved_at.to_rfc3339()
        );
        for product in snapshot.products() {
            print_row(product);
        }
    }

    Ok(())
}

pub(crate) async fn show(
    config: &AppConfig,
    id: u32,
    policy: Option<CachePolicy>,
) -> anyhow::Result<()> {
    let provider = crate::build_provider(config, policy)?;

    match provider.product_by_id(id).await {
        Ok(product) => {
            println!("{}", product.title);
            println!("  id:        {}", product.id);
            println!("  price:     ${}", product.price);
            println!("  category:  {}", product.category);
            println!("  image:     {}", product.image);
            if !product.description.is_empty() {
                println!();
                println!("  {}", product.description);
            }
            Ok(())
        }
        Err(CatalogError::NotFound { id }) => {
            anyhow::bail!("product {id} not found in the live catalog or the fallback dataset")
        }
        Err(error) => Err(error.into()),
    }
}

pub(crate) async fn categories(
    config: &AppConfig,
    policy: Option<CachePolicy>,
) -> anyhow::Result<()> {
    let provider = crate::build_provider(config, policy)?;
    for label in provider.categories().await {
        println!("{label}");
    }
    Ok(())
}

fn print_row(product: &Product) {
    let price = format!("${}", product.price);
    println!(
        "{:>4}  {:<TITLE_WIDTH$}  {price:>9}  {}",
        product.id,
        truncate(&product.title, TITLE_WIDTH),
        product.category
    );
}

/// Truncates to `max` characters, ending in an ellipsis when shortened.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut shortened: String = text.chars().take(max.saturating_sub(3)).collect();
    shortened.push_str("...");
    shortened
}
