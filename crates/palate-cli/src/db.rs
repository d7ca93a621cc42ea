//! `db` sub-commands: migrations, connectivity and seeding.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use palate_core::{RestaurantSeed, RestaurantStore, StoreBackend};
use palate_resolver::ResolutionService;

use crate::store::{connect_pool, ConfiguredStore};

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Apply pending migrations to the Postgres store
    Migrate,
    /// Check connectivity of the configured store
    Ping,
    /// Import restaurants from a YAML seed file, skipping ones that already match
    Seed {
        /// Seed file to read instead of `PALATE_SEED_PATH`
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Counts reported at the end of `db seed`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SeedSummary {
    pub created: usize,
    pub matched: usize,
    pub failed: usize,
}

pub(crate) async fn run(command: DbCommands) -> anyhow::Result<()> {
    let config = palate_core::load_app_config()?;

    match command {
        DbCommands::Migrate => {
            if config.store_backend != StoreBackend::Postgres {
                anyhow::bail!(
                    "migrations only apply to the postgres store (PALATE_STORE={})",
                    config.store_backend
                );
            }
            let pool = connect_pool(&config).await?;
            let applied = palate_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Ping => {
            let store = ConfiguredStore::connect(&config).await?;
            store.ping().await?;
            println!("{} store: ok", store.backend_name());
        }
        DbCommands::Seed { path } => {
            let path = crate::seed_path(path, &config);
            let seed_file = palate_core::load_seed_file(&path)?;
            let store = ConfiguredStore::connect(&config).await?;
            let resolver = ResolutionService::new(Arc::new(store))
                .with_timeout(Duration::from_secs(config.resolve_timeout_secs));

            let summary = seed_restaurants(&resolver, &seed_file.restaurants).await;
            println!(
                "seeded {} restaurant(s) from {}: {} created, {} already present, {} failed",
                seed_file.restaurants.len(),
                path.display(),
                summary.created,
                summary.matched,
                summary.failed
            );
            if summary.failed > 0 {
                anyhow::bail!("{} restaurant(s) failed to import", summary.failed);
            }
        }
    }

    Ok(())
}

/// Import every seed through the resolver so re-running a seed file is a no-op.
///
/// A failed import is logged and counted; the remaining seeds still run.
pub(crate) async fn seed_restaurants<S: RestaurantStore>(
    resolver: &ResolutionService<S>,
    seeds: &[RestaurantSeed],
) -> SeedSummary {
    let mut summary = SeedSummary::default();

    for seed in seeds {
        match resolver.import(seed.to_new_restaurant()).await {
            Ok(outcome) if outcome.created => summary.created += 1,
            Ok(outcome) => {
                tracing::debug!(
                    title = %seed.title,
                    match_type = %outcome.match_type,
                    "seed already present"
                );
                summary.matched += 1;
            }
            Err(e) => {
                tracing::warn!(title = %seed.title, error = %e, "seed import failed");
                summary.failed += 1;
            }
        }
    }

    summary
}
