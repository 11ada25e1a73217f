use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use seeder::{
    GeoDbClient,
    geodb::DEFAULT_HOST,
    seeders::{
        admin::{AdminOutcome, AdminSeed, seed_admin},
        cities::CitySeeder,
        locations,
    },
};
use storage::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "deporty-seed")]
#[command(about = "Deporty database seeding tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Built-in countries and their main cities
    Locations {
        #[arg(long)]
        dry_run: bool,
    },
    /// Cities of every stored country from the GeoDB API
    Cities {
        #[arg(long, env = "RAPIDAPI_KEY", hide_env_values = true)]
        api_key: String,

        #[arg(long, env = "RAPIDAPI_HOST", default_value = DEFAULT_HOST)]
        api_host: String,

        /// Restrict the import to these country codes
        #[arg(short, long = "country")]
        countries: Vec<String>,

        #[arg(long)]
        dry_run: bool,
    },
    /// Administrator account
    Admin {
        #[arg(long, env = "ADMIN_EMAIL")]
        email: String,

        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long, env = "ADMIN_FIRST_NAME", default_value = "Admin")]
        first_name: String,

        #[arg(long, env = "ADMIN_LAST_NAME", default_value = "Deporty")]
        last_name: String,

        /// Overwrite the password and role of an existing account
        #[arg(long)]
        reset: bool,
    },
}

async fn connect(database_url: Option<&str>) -> anyhow::Result<Database> {
    let url = database_url.context("DATABASE_URL is not set")?;
    let db = Database::new(url)
        .await
        .context("Failed to connect to the database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    Ok(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("deporty_seed={log_level},seeder={log_level},storage={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Locations { dry_run } => {
            if dry_run {
                let report = locations::dry_run();
                tracing::info!(
                    "Dry run: {} countries, {} cities",
                    report.countries,
                    report.cities_inserted
                );
                return Ok(());
            }

            let db = connect(cli.database_url.as_deref()).await?;
            let report = locations::seed_locations(db.pool())
                .await
                .context("Location seed failed")?;
            tracing::info!(
                "Seed complete: {} countries, {} new cities ({} already present)",
                report.countries,
                report.cities_inserted,
                report.cities_skipped
            );
        }
        Commands::Cities {
            api_key,
            api_host,
            countries,
            dry_run,
        } => {
            let db = connect(cli.database_url.as_deref()).await?;
            let client = GeoDbClient::new(api_key, api_host).context("Failed to build GeoDB client")?;
            let seeder = CitySeeder::new(db.pool(), &client, dry_run);

            let targets = seeder.target_countries(&countries).await?;
            if targets.is_empty() {
                bail!("No countries to import; run `deporty-seed locations` first");
            }

            let outcomes = seeder.run(&targets).await;
            let failed: Vec<&str> = outcomes
                .iter()
                .filter(|o| o.error.is_some())
                .map(|o| o.country_code.as_str())
                .collect();
            if !failed.is_empty() {
                tracing::warn!("Countries with errors: {}", failed.join(", "));
            }
        }
        Commands::Admin {
            email,
            password,
            first_name,
            last_name,
            reset,
        } => {
            let admin = AdminSeed {
                email,
                password,
                first_name,
                last_name,
            };
            admin.validate()?;

            let db = connect(cli.database_url.as_deref()).await?;
            match seed_admin(db.pool(), &admin, reset).await? {
                AdminOutcome::Created(user) => tracing::info!("Admin user created: {}", user.email),
                AdminOutcome::Updated(user) => tracing::info!("Admin user updated: {}", user.email),
                AdminOutcome::AlreadyExists => {
                    tracing::info!("Admin user already exists; pass --reset to overwrite it")
                }
            }
        }
    }

    Ok(())
}
