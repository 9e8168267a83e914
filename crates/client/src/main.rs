use std::sync::Arc;

use anyhow::Context;

use finprod_client::{ClientConfig, HttpProductStore, ProductListController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    finprod_observability::init_with(config.log_format);

    let search = std::env::args().nth(1);

    let store = Arc::new(HttpProductStore::new(config.clone()));
    let mut list = ProductListController::new(store, &config);

    tracing::info!(api_url = %config.api_url, "loading products");
    list.load().await;
    if let Some(message) = list.error_message() {
        anyhow::bail!("could not load products: {message}");
    }

    if let Some(term) = search.as_deref() {
        list.search(term);
    }

    for product in list.paginated_products() {
        let line = serde_json::to_string(product).context("failed to encode product")?;
        println!("{line}");
    }

    match list.showing_range() {
        Some((first, last, total)) => println!(
            "{first}-{last} of {total} (page {} of {})",
            list.current_page(),
            list.total_pages()
        ),
        None => println!("no products"),
    }

    Ok(())
}
