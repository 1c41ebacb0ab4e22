//! Run loop
//!
//! One full pass: authenticate, fetch crossings, decide and act per
//! candidate, tally the outcomes.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::api::client::SessionClient;
use crate::config::Config;
use crate::engine::{self, Decision};
use crate::store::LikeStore;

/// Outcome counts for one pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub liked: usize,
    pub disliked: usize,
    pub no_action: usize,
}

impl RunSummary {
    fn record(&mut self, decision: Decision) {
        self.processed += 1;
        match decision {
            Decision::Like => self.liked += 1,
            Decision::Dislike => self.disliked += 1,
            Decision::NoAction => self.no_action += 1,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "processed {} crossings: {} liked, {} disliked, {} untouched",
            self.processed, self.liked, self.disliked, self.no_action
        )
    }
}

/// Run one full pass. `limit` and `likes_file` override the configured
/// crossings limit and like-store path for this run only.
pub async fn run_once(
    config: &Config,
    limit: Option<u32>,
    likes_file: Option<PathBuf>,
) -> Result<RunSummary> {
    let creds = config.api_credentials()?;
    let mut client = SessionClient::new(&config.api.root_url, config.api.timeout())
        .context("Failed to build API client")?;
    client.authenticate(&creds).await?;
    let self_id = client
        .me()
        .map(|me| me.id.clone())
        .context("Authenticated session has no profile")?;

    let likes_path = match likes_file {
        Some(path) => path,
        None => config.store.likes_path()?,
    };
    let mut store = LikeStore::load(&likes_path)?;
    tracing::info!(
        path = %likes_path.display(),
        entries = store.len(),
        "loaded like-store"
    );

    let limit = limit.unwrap_or(config.api.crossings_limit);
    let crossings = client.fetch_crossings(&self_id, Some(limit)).await?;
    tracing::info!(count = crossings.len(), "fetched crossings");

    let mut summary = RunSummary::default();
    for crossing in &crossings {
        let decision =
            engine::determine_action(&client, &mut store, &crossing.id, crossing.nb_times).await?;
        match decision {
            Decision::Like => {
                client.like(&self_id, &crossing.id).await?;
                tracing::info!(id = %crossing.id, nb_times = crossing.nb_times, "liked");
            }
            Decision::Dislike => {
                client.dislike(&self_id, &crossing.id).await?;
                tracing::info!(id = %crossing.id, "disliked");
            }
            Decision::NoAction => {}
        }
        summary.record(decision);
    }

    Ok(summary)
}
