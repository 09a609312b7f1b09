//! Demo catalog seeding.
//!
//! Inserts a small demo catalog through the admin backend client so local
//! environments have something to browse. Uses the same configuration as
//! the admin binary.

use rust_decimal::Decimal;

use dala_admin::config::SupabaseConfig;
use dala_admin::supabase::{AdminClient, ProductWrite};

const DEMO_CATEGORIES: &[&str] = &["tops", "bottoms", "shoes", "accessories"];

/// Insert `count` demo products.
///
/// # Errors
///
/// Returns an error if configuration is missing or an insert fails.
pub async fn run(count: u32) -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = SupabaseConfig::from_env()?;
    let client = AdminClient::new(&config);

    for i in 1..=count {
        let category = DEMO_CATEGORIES
            .get(i as usize % DEMO_CATEGORIES.len())
            .copied()
            .unwrap_or("tops");

        let write = ProductWrite {
            name: Some(format!("Demo product {i}")),
            price: Some(Decimal::from(990 + i * 500)),
            stock: Some(i64::from(10 + i % 5)),
            category: Some(category.to_owned()),
            description: Some(format!("Seeded demo product number {i}.")),
            sizes: Some(vec!["S".to_owned(), "M".to_owned(), "L".to_owned()]),
            images: Some(Vec::new()),
        };

        let product = client.create_product(&write).await?;
        tracing::info!("seeded product {} ({})", product.name, product.id);
    }

    tracing::info!("seeded {count} demo products");
    Ok(())
}
