use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coffee_app::{config, db, seed, server};

#[derive(Parser, Debug)]
#[command(name = "coffee-app")]
#[command(about = "Coffee shop catalogue, orders and deliveries over REST", long_about = None)]
struct Args {
    /// Profile name; selects coffee_app_<profile>.db unless DATABASE_URL is set
    #[arg(long)]
    profile: Option<String>,

    /// Load the demo catalogue on start-up
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coffee_app=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = match args.profile {
        Some(profile) => config::Config::for_profile(profile),
        None => config::Config::from_env(),
    };
    tracing::debug!("Using profile '{}' ({})", config.profile, config.database_url);

    // Initialize database
    let db = db::init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        if let Err(e) = seed::ensure_admin_user(&db, username, password).await {
            tracing::error!("Failed to create staff user: {}", e);
        }
    }

    // Check for seed flag
    if args.seed || std::env::var("SEED_DEMO").is_ok() {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        } else {
            tracing::info!("Demo data seeded successfully.");
        }
    }

    server::serve(&config, db)
        .await
        .expect("Failed to start server");
}
