use crate::client::{Endpoints, Fetcher};
use crate::config::PokemonConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::AppError;
use crate::evolution::{EvolutionChain, walk_chain};
use crate::pokemon::{EvolutionChainRecord, Pokemon, PokemonSpecies};
use crate::weakness::{WeaknessSet, aggregate_weaknesses, type_lookup_urls};
use serde::Serialize;
use std::sync::Arc;

const GENUS_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureProfile {
    pub id: String,
    pub name: String,
    pub height_decimeters: u32,
    pub weight_hectograms: u32,
    pub base_experience: Option<u32>,
    pub abilities: Vec<String>,
    pub stats: Vec<StatValue>,
    pub types: Vec<String>,
    pub category: String,
    pub capture_rate: Option<u32>,
    pub base_happiness: Option<u32>,
    pub growth_rate: String,
    pub artwork_url: Option<String>,
}

impl CreatureProfile {
    pub fn from_records(pokemon: &Pokemon, species: &PokemonSpecies) -> Self {
        Self {
            id: pokemon.id.to_string(),
            name: pokemon.name.clone(),
            height_decimeters: pokemon.height,
            weight_hectograms: pokemon.weight,
            base_experience: pokemon.base_experience,
            abilities: pokemon.abilities.iter().filter_map(|a| a.ability.as_ref()).fold(
                Vec::new(),
                |mut names, ability| {
                    if !names.contains(&ability.name) {
                        names.push(ability.name.clone());
                    }
                    names
                },
            ),
            stats: pokemon
                .stats
                .iter()
                .filter_map(|s| {
                    s.stat.as_ref().map(|stat| StatValue {
                        name: stat.name.clone(),
                        base_stat: s.base_stat,
                    })
                })
                .collect(),
            types: pokemon.type_names(),
            category: species.genus(GENUS_LANGUAGE).unwrap_or_default().to_string(),
            capture_rate: species.capture_rate,
            base_happiness: species.base_happiness,
            growth_rate: species
                .growth_rate
                .as_ref()
                .map(|g| g.name.clone())
                .unwrap_or_default(),
            artwork_url: pokemon.artwork_url(),
        }
    }

    pub fn stat(&self, name: &str) -> Option<i32> {
        self.stats.iter().find(|s| s.name == name).map(|s| s.base_stat)
    }

    pub fn height_meters(&self) -> f64 {
        self.height_decimeters as f64 / 10.0
    }

    pub fn weight_kilograms(&self) -> f64 {
        self.weight_hectograms as f64 / 10.0
    }

    /// "medium-slow" reads as "medium slow".
    pub fn growth_rate_label(&self) -> String {
        self.growth_rate.replacen('-', " ", 1)
    }
}

/// One base stat, kept in upstream order (hp first, speed last).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatValue {
    pub name: String,
    pub base_stat: i32,
}

/// Normalizes a creature name or id for use as a URL path segment.
///
/// Upstream names are lower-case ASCII letters, digits and `-`; anything else
/// (`/`, `?`, `#`, `..`, whitespace) is rejected before a request is built.
pub fn lookup_key(name: &str) -> Result<String, AppError> {
    let key = name.trim().to_lowercase();
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(key)
    } else {
        tracing::warn!("Rejected creature lookup key {:?}", name);
        Err(AppError::InvalidInput(format!("not a creature name: {:?}", name)))
    }
}

/// Everything the detail view renders for one creature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureDetail {
    pub profile: CreatureProfile,
    pub weaknesses: WeaknessSet,
    pub evolution: EvolutionChain,
}

pub struct DetailAggregator<F: Fetcher> {
    fetcher: Arc<F>,
    endpoints: Endpoints,
    max_in_flight: usize,
    sink: Arc<dyn DiagnosticSink>,
}

impl<F: Fetcher> DetailAggregator<F> {
    pub fn new(fetcher: Arc<F>, config: &PokemonConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            fetcher,
            endpoints: Endpoints::new(&config.api_url),
            max_in_flight: config.max_in_flight,
            sink,
        }
    }

    /// Loads a creature's profile, weaknesses and evolution chain.
    ///
    /// Base data and species data are required: if either fails the whole
    /// load fails. The evolution chain and the weaknesses are optional and
    /// come back empty (with a diagnostic) when their lookups fail.
    pub async fn load(&self, name: &str) -> Result<CreatureDetail, AppError> {
        let key = lookup_key(name)?;
        let pokemon: Pokemon = self
            .fetcher
            .get_json(&self.endpoints.pokemon(&key))
            .await
            .map_err(|e| {
                tracing::error!("Failed to load base data for {}: {}", key, e);
                e
            })?;
        tracing::debug!("Loaded base data for {} (ID: {})", pokemon.name, pokemon.id);

        let type_urls = type_lookup_urls(&pokemon, &self.endpoints);
        let (species_and_chain, weaknesses) = tokio::join!(
            self.species_and_evolution(&pokemon),
            aggregate_weaknesses(&self.fetcher, &type_urls, self.max_in_flight, self.sink.as_ref()),
        );
        let (species, evolution) = species_and_chain?;

        Ok(CreatureDetail {
            profile: CreatureProfile::from_records(&pokemon, &species),
            weaknesses,
            evolution,
        })
    }

    async fn species_and_evolution(
        &self,
        pokemon: &Pokemon,
    ) -> Result<(PokemonSpecies, EvolutionChain), AppError> {
        let species_url = match pokemon.species.as_ref() {
            Some(species) if !species.url.is_empty() => species.url.clone(),
            _ => self.endpoints.species(pokemon.id),
        };
        let species: PokemonSpecies = self.fetcher.get_json(&species_url).await.map_err(|e| {
            tracing::error!("Failed to load species data for {}: {}", pokemon.name, e);
            e
        })?;

        let Some(chain_ref) = species.evolution_chain.as_ref().filter(|c| !c.url.is_empty()) else {
            tracing::debug!("{} has no evolution chain", species.name);
            return Ok((species, Vec::new()));
        };

        let evolution = match self
            .fetcher
            .get_json::<EvolutionChainRecord>(&chain_ref.url)
            .await
        {
            Ok(record) => {
                walk_chain(
                    &self.fetcher,
                    &self.endpoints,
                    &record.chain,
                    self.max_in_flight,
                    self.sink.as_ref(),
                )
                .await
            }
            Err(e) => {
                tracing::warn!("Evolution chain lookup failed for {}: {}", species.name, e);
                self.sink.record(Diagnostic::new(
                    DiagnosticKind::EvolutionChain,
                    chain_ref.url.clone(),
                    e,
                ));
                Vec::new()
            }
        };

        Ok((species, evolution))
    }
}
