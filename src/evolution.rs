use crate::client::{Endpoints, Fetcher};
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::fanout::join_bounded;
use crate::pokemon::{ChainLink, Pokemon};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionStage {
    pub species_name: String,
    pub sprite_url: Option<String>,
}

pub type EvolutionChain = Vec<EvolutionStage>;

/// Species names from the base form to the final form.
///
/// Only the first child is followed at each fork; sibling branches (Eevee's
/// evolutions, for instance) are not part of the result.
pub fn linear_path(root: &ChainLink) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(root);
    while let Some(link) = current {
        path.push(link.species.name.clone());
        current = link.evolves_to.first();
    }
    path
}

/// Flattens the chain and resolves a sprite for every stage.
///
/// Sprite lookups run concurrently. A failed lookup leaves that stage without
/// a sprite and is reported to `sink`; the walk itself never fails.
pub async fn walk_chain<F: Fetcher>(
    fetcher: &Arc<F>,
    endpoints: &Endpoints,
    root: &ChainLink,
    limit: usize,
    sink: &dyn DiagnosticSink,
) -> EvolutionChain {
    let jobs: Vec<_> = linear_path(root)
        .into_iter()
        .map(|species_name| {
            let fetcher = Arc::clone(fetcher);
            let url = endpoints.pokemon(&species_name);
            async move {
                let result = fetcher.get_json::<Pokemon>(&url).await;
                (species_name, url, result)
            }
        })
        .collect();

    join_bounded(jobs, limit)
        .await
        .into_iter()
        .map(|(species_name, url, result)| {
            let sprite_url = match result {
                Ok(pokemon) => pokemon.sprites.front_default,
                Err(e) => {
                    tracing::warn!("Sprite lookup failed for {}: {}", species_name, e);
                    sink.record(Diagnostic::new(DiagnosticKind::EvolutionSprite, url, e));
                    None
                }
            };
            EvolutionStage {
                species_name,
                sprite_url,
            }
        })
        .collect()
}
