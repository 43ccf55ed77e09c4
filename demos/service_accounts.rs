//! Service accounts walkthrough
//!
//! Lists the workplace's service accounts, then creates, renames and deletes a
//! throwaway one.
//!
//! Run with: DOPPLER_TOKEN=dp.pt.xxx cargo run --example service_accounts

use doppler_sdk::{ClientBuilder, Error, ServiceAccountBodyParams, WorkplaceRoleObject};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("doppler_sdk=debug".parse()?))
        .init();

    let client = ClientBuilder::from_env()
        .user_agent_extra("demo/0.1")
        .build()?;

    println!("📋 Listing service accounts...");
    let mut page = 1;
    loop {
        let accounts = client.list_service_accounts(Some(page), Some(20)).await?;
        for account in &accounts.service_accounts {
            println!(
                "  {} ({}) role={} created={}",
                account.name, account.slug, account.workplace_role.identifier, account.created_at
            );
        }
        if accounts.service_accounts.len() < 20 {
            break;
        }
        page += 1;
    }

    // Roles typically come from user input with two optional fields
    let role = WorkplaceRoleObject::from_parts(Some("viewer".to_string()), None)?;
    let mut params = ServiceAccountBodyParams::new("demo-service-account");
    params.workplace_role = role;

    println!("📝 Creating service account...");
    let created = client.create_service_account(&params).await?;
    let slug = created.service_account.slug;
    println!("  ✅ Created {}", slug);

    println!("✏️  Renaming...");
    let updated = client
        .update_service_account(&slug, &ServiceAccountBodyParams::new("demo-service-account-renamed"))
        .await?;
    println!("  ✅ Now named {}", updated.service_account.name);

    println!("🗑️  Deleting...");
    let body = client.delete_service_account(&slug).await?;
    println!("  ✅ Deleted (response: {:?})", body);

    match client.retrieve_service_account(&slug).await {
        Err(Error::Http { status: 404, .. }) => println!("  ✅ Confirmed gone"),
        Ok(_) => println!("  ⚠️  Still present"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
