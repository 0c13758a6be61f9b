use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slate_admin::chrome::Chrome;
use slate_admin::templates;
use slate_admin::{LogPrompter, Page, SelectControl, Tab};
use slate_client::EntityClient;
use slate_common::{Config, KNOWN_MASTERS};
use slate_sync::SharedStorage;

/// One-shot snapshot of a master category: opens a tab against the real
/// backend, refreshes everything the way a page load does, and prints the
/// rendered page to stdout.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("slate=info".parse()?))
        .init();

    let category = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "branch".to_string());

    let config = Config::from_env();
    info!(api_base = %config.api_base, %category, "Opening admin snapshot");

    let client = Arc::new(EntityClient::from_config(&config));
    let storage = SharedStorage::new();

    let mut page = Page::new(&format!("/master/{category}"))
        .with_chrome(Chrome::new().with_masters_menu());
    for master in KNOWN_MASTERS {
        page = page.with_select(SelectControl::new(master));
    }

    let mut tab = Tab::open(page, client, Arc::new(LogPrompter), storage.context()).await;
    tab.refresh_master_list(&category).await;

    for select in tab.page().selects() {
        info!(
            category = select.name(),
            options = select.options().len(),
            selected = select.value().unwrap_or("-"),
            "Dropdown state"
        );
    }

    let list = tab.page().list_html().unwrap_or_default().to_string();
    println!(
        "{}",
        templates::master_page(&category, tab.page().chrome(), &list)
    );

    Ok(())
}
