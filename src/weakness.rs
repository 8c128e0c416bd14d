use crate::client::{Endpoints, Fetcher};
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::fanout::join_bounded;
use crate::pokemon::{DamageRelations, Pokemon, TypeRecord};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Type names that deal double damage to a creature, sorted and deduplicated.
pub type WeaknessSet = BTreeSet<String>;

pub fn union_weaknesses<'a, I>(relations: I) -> WeaknessSet
where
    I: IntoIterator<Item = &'a DamageRelations>,
{
    relations
        .into_iter()
        .flat_map(|r| r.double_damage_from.iter())
        .map(|t| t.name.clone())
        .collect()
}

/// Type record URLs for a creature, falling back to a by-name lookup when
/// upstream left the reference empty.
pub fn type_lookup_urls(pokemon: &Pokemon, endpoints: &Endpoints) -> Vec<String> {
    pokemon
        .types
        .iter()
        .filter_map(|t| t.r#type.as_ref())
        .map(|t| {
            if t.url.is_empty() {
                endpoints.type_record(&t.name)
            } else {
                t.url.clone()
            }
        })
        .collect()
}

/// Fetches every type record concurrently and unions their weaknesses.
///
/// A failed lookup is reported to `sink` and skipped, so the set holds the
/// weaknesses of whichever types did resolve.
pub async fn aggregate_weaknesses<F: Fetcher>(
    fetcher: &Arc<F>,
    type_urls: &[String],
    limit: usize,
    sink: &dyn DiagnosticSink,
) -> WeaknessSet {
    let jobs: Vec<_> = type_urls
        .iter()
        .map(|url| {
            let fetcher = Arc::clone(fetcher);
            let url = url.clone();
            async move {
                let result = fetcher.get_json::<TypeRecord>(&url).await;
                (url, result)
            }
        })
        .collect();

    let mut relations = Vec::with_capacity(type_urls.len());
    for (url, result) in join_bounded(jobs, limit).await {
        match result {
            Ok(record) => relations.push(record.damage_relations),
            Err(e) => {
                tracing::warn!("Weakness lookup failed for {}: {}", url, e);
                sink.record(Diagnostic::new(DiagnosticKind::WeaknessLookup, url, e));
            }
        }
    }

    let weaknesses = union_weaknesses(&relations);
    tracing::debug!("Aggregated {} weaknesses from {} types", weaknesses.len(), relations.len());
    weaknesses
}
