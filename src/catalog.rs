use crate::client::{Endpoints, Fetcher};
use crate::config::PokemonConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::AppError;
use crate::fanout::join_bounded;
use crate::ids::{artwork_url, extract_id};
use crate::pokemon::{Pokemon, PokemonPage};
use crate::types::{TypeFilter, card_color};
use serde::Serialize;
use std::sync::Arc;

/// A list entry enriched with its identifier and types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatureSummary {
    pub id: String,
    pub name: String,
    pub sprite_url: String,
    pub types: Vec<String>,
}

impl CreatureSummary {
    pub fn card_color(&self) -> &'static str {
        card_color(&self.types)
    }
}

pub struct CatalogLoader<F: Fetcher> {
    fetcher: Arc<F>,
    endpoints: Endpoints,
    page_size: u32,
    max_in_flight: usize,
    sink: Arc<dyn DiagnosticSink>,
}

impl<F: Fetcher> CatalogLoader<F> {
    pub fn new(fetcher: Arc<F>, config: &PokemonConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            fetcher,
            endpoints: Endpoints::new(&config.api_url),
            page_size: config.page_size,
            max_in_flight: config.max_in_flight,
            sink,
        }
    }

    /// Fetches one page of the listing and looks up every entry's types.
    ///
    /// The listing itself is required. An entry whose lookup fails is
    /// dropped from the result and reported to the sink; the rest keep
    /// listing order.
    pub async fn load(&self) -> Result<Vec<CreatureSummary>, AppError> {
        let page: PokemonPage = self
            .fetcher
            .get_json(&self.endpoints.listing(self.page_size))
            .await
            .map_err(|e| {
                tracing::error!("Failed to load the creature listing: {}", e);
                e
            })?;
        tracing::debug!("Listing returned {} entries", page.results.len());

        let jobs: Vec<_> = page
            .results
            .into_iter()
            .map(|entry| {
                let fetcher = Arc::clone(&self.fetcher);
                let id = extract_id(&entry.url);
                let key = if id.is_empty() { entry.name.clone() } else { id.clone() };
                let url = self.endpoints.pokemon(&key);
                async move {
                    let result = fetcher.get_json::<Pokemon>(&url).await.map(|detail| {
                        let id = if id.is_empty() { detail.id.to_string() } else { id };
                        CreatureSummary {
                            sprite_url: artwork_url(&id),
                            id,
                            name: entry.name,
                            types: detail.type_names(),
                        }
                    });
                    (url, result)
                }
            })
            .collect();

        let mut summaries = Vec::with_capacity(jobs.len());
        for (url, result) in join_bounded(jobs, self.max_in_flight).await {
            match result {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    tracing::warn!("Skipping list entry {}: {}", url, e);
                    self.sink
                        .record(Diagnostic::new(DiagnosticKind::ListEntry, url, e));
                }
            }
        }
        Ok(summaries)
    }
}

pub fn filter_by_type<'a>(list: &'a [CreatureSummary], filter: &TypeFilter) -> Vec<&'a CreatureSummary> {
    list.iter().filter(|c| filter.matches(&c.types)).collect()
}

/// Case-insensitive substring match on the name. An empty query keeps everything.
pub fn search_by_name<'a>(list: &'a [CreatureSummary], query: &str) -> Vec<&'a CreatureSummary> {
    let needle = query.trim().to_lowercase();
    list.iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::testing::{BASE, FakeFetcher, listing_entry_url, pokemon_json, pokemon_url};
    use crate::types::TypeName;
    use serde_json::json;

    fn summary(id: &str, name: &str, types: &[&str]) -> CreatureSummary {
        CreatureSummary {
            id: id.to_string(),
            name: name.to_string(),
            sprite_url: artwork_url(id),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn config(page_size: u32) -> PokemonConfig {
        PokemonConfig {
            api_url: BASE.to_string(),
            timeout: 0,
            page_size,
            max_in_flight: 3,
        }
    }

    fn listing_world() -> FakeFetcher {
        FakeFetcher::default()
            .with(
                format!("{}/pokemon?limit=3", BASE),
                json!({
                    "count": 1302,
                    "results": [
                        {"name": "bulbasaur", "url": listing_entry_url(1)},
                        {"name": "squirtle", "url": listing_entry_url(7)},
                        {"name": "pidgey", "url": listing_entry_url(16)}
                    ]
                }),
            )
            .with(pokemon_url("1"), pokemon_json(1, "bulbasaur", &["grass", "poison"]))
            .with(pokemon_url("7"), pokemon_json(7, "squirtle", &["water"]))
            .with(pokemon_url("16"), pokemon_json(16, "pidgey", &["normal", "flying"]))
    }

    #[tokio::test]
    async fn test_load_enriches_in_listing_order() {
        let sink = Arc::new(MemorySink::default());
        let loader = CatalogLoader::new(Arc::new(listing_world()), &config(3), sink.clone());

        let list = loader.load().await.unwrap();
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "squirtle", "pidgey"]);
        assert_eq!(list[1].id, "7");
        assert_eq!(list[1].types, vec!["water"]);
        assert!(list[2].sprite_url.ends_with("/official-artwork/16.png"));
        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn test_failed_entry_is_skipped() {
        let sink = Arc::new(MemorySink::default());
        let fetcher = listing_world().failing(pokemon_url("7"));
        let loader = CatalogLoader::new(Arc::new(fetcher), &config(3), sink.clone());

        let list = loader.load().await.unwrap();
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "pidgey"]);
        assert_eq!(sink.kinds(), vec![DiagnosticKind::ListEntry]);
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal() {
        let sink = Arc::new(MemorySink::default());
        let loader = CatalogLoader::new(Arc::new(listing_world()), &config(200), sink);
        assert!(matches!(loader.load().await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_filtering_makes_no_requests() {
        let fetcher = Arc::new(listing_world());
        let loader = CatalogLoader::new(fetcher.clone(), &config(3), Arc::new(MemorySink::default()));
        let list = loader.load().await.unwrap();
        let before = fetcher.requests().len();

        let _ = filter_by_type(&list, &TypeFilter::Only(TypeName::Water));
        let _ = search_by_name(&list, "pid");
        assert_eq!(fetcher.requests().len(), before);
    }

    #[test]
    fn test_filter_by_type() {
        let list = vec![summary("4", "charmander", &["fire"]), summary("130", "gyarados", &["water", "flying"])];
        let water = filter_by_type(&list, &TypeFilter::Only(TypeName::Water));
        assert_eq!(water, vec![&list[1]]);
        assert_eq!(filter_by_type(&list, &TypeFilter::All).len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let list = vec![summary("25", "pikachu", &["electric"]), summary("26", "raichu", &["electric"])];
        assert_eq!(search_by_name(&list, "ra"), vec![&list[1]]);
        assert_eq!(search_by_name(&list, "RA"), vec![&list[1]]);
        assert_eq!(search_by_name(&list, "").len(), 2);
        assert!(search_by_name(&list, "mew").is_empty());
    }

    #[test]
    fn test_card_helpers() {
        let card = summary("4", "charmander", &["fire"]);
        assert_eq!(card.card_color(), "#F08030");
    }
}
