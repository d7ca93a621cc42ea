//! `match` command: resolve one place and print the wire payload.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use palate_core::{MatchPayload, MatchRequest, RestaurantStore};
use palate_resolver::{InMemoryStore, ResolutionService};

use crate::store::ConfiguredStore;

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// External place id to look up exactly
    #[arg(long)]
    pub place_id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    /// Formatted address; only the part before the first comma is matched
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Resolve against restaurants loaded from this YAML file instead of the configured store
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

impl MatchArgs {
    pub(crate) fn to_request(&self) -> MatchRequest {
        MatchRequest {
            place_id: self.place_id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            latitude: self.lat,
            longitude: self.lng,
        }
    }
}

pub(crate) async fn run(args: MatchArgs) -> anyhow::Result<()> {
    let (store, timeout_secs) = if let Some(fixture) = &args.fixture {
        let seed_file = palate_core::load_seed_file(fixture)?;
        tracing::info!(
            fixture = %fixture.display(),
            restaurants = seed_file.restaurants.len(),
            "loaded fixture store"
        );
        (
            ConfiguredStore::Memory(InMemoryStore::from_seeds(&seed_file.restaurants)),
            None,
        )
    } else {
        let config = palate_core::load_app_config()?;
        (
            ConfiguredStore::connect(&config).await?,
            Some(config.resolve_timeout_secs),
        )
    };

    let mut resolver = ResolutionService::new(Arc::new(store));
    if let Some(secs) = timeout_secs {
        resolver = resolver.with_timeout(Duration::from_secs(secs));
    }

    let payload = resolve_payload(&resolver, args.to_request()).await?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub(crate) async fn resolve_payload<S: RestaurantStore>(
    resolver: &ResolutionService<S>,
    request: MatchRequest,
) -> anyhow::Result<MatchPayload> {
    let result = resolver.resolve(request).await?;
    Ok(MatchPayload::from(result))
}
