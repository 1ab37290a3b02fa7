mod api;
mod form;
mod models;
mod state;

use api::HttpBackend;
use models::DataSource;
use state::{load_listings, reduce, Action, AppState};
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Property Desk - marketplace listings");
    info!("========================================");
    info!("");

    let backend = HttpBackend::from_env()?;
    info!("Backend: {}", backend.base_url());

    let mut app = AppState::default();
    load_listings(&mut app, &backend).await;

    if app.data_source == DataSource::Sample {
        info!("Backend unreachable, showing the built-in sample listings");
    }

    // Optional free-text filter over title/city from the command line
    if let Some(term) = std::env::args().nth(1) {
        reduce(&mut app, Action::SearchChanged(term));
    }

    let visible = app.filtered_listings();
    info!("\n✅ Showing {} of {} listings\n", visible.len(), app.listings.len());

    for (i, listing) in visible.iter().enumerate() {
        println!(
            "{}. {} ({:.2} PLN, {})",
            i + 1,
            listing.title,
            listing.price,
            listing.property_type.label()
        );
        match &listing.street {
            Some(street) => println!("   {}, {}", listing.city, street),
            None => println!("   {}", listing.city),
        }
        let rooms = listing
            .room_count
            .map(|n| format!("{n} rooms"))
            .unwrap_or_else(|| "rooms n/a".to_string());
        println!("   {} m², {}", listing.area_sqm, rooms);
        println!("   ID: {}", listing.id);
        if !listing.images.is_empty() {
            println!("   Images: {}", listing.images.len());
        }
        println!();
    }

    // Save the fetched set for inspection
    let json = serde_json::to_string_pretty(&app.listings)?;
    tokio::fs::write("listings.json", json).await?;
    info!("💾 Saved {} listings to listings.json", app.listings.len());

    Ok(())
}
