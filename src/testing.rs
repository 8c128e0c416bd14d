// In-memory fetcher and upstream-shaped fixtures for unit tests.

use crate::client::Fetcher;
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) const BASE: &str = "https://pokeapi.test/api/v2";

#[derive(Default)]
pub(crate) struct FakeFetcher {
    responses: HashMap<String, Value>,
    failing: HashSet<String>,
    latency: Option<Duration>,
    requests: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn with(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), body);
        self
    }

    pub(crate) fn failing(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    /// Every request sleeps this long before answering.
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// URLs requested so far, answered or not.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// URLs whose request ran to the end.
    pub(crate) fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

impl Fetcher for FakeFetcher {
    async fn get_json<T>(&self, url: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.completed.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) {
            return Err(AppError::NetworkError(format!("connection reset: {}", url)));
        }
        match self.responses.get(url) {
            Some(body) => serde_json::from_value(body.clone())
                .map_err(|e| AppError::ParseError(e.to_string())),
            None => Err(AppError::NotFound(url.to_string())),
        }
    }
}

pub(crate) fn pokemon_url(name_or_id: &str) -> String {
    format!("{}/pokemon/{}", BASE, name_or_id)
}

pub(crate) fn listing_entry_url(id: u32) -> String {
    format!("{}/pokemon/{}/", BASE, id)
}

pub(crate) fn species_url(id: u32) -> String {
    format!("{}/pokemon-species/{}/", BASE, id)
}

pub(crate) fn chain_url(id: u32) -> String {
    format!("{}/evolution-chain/{}/", BASE, id)
}

pub(crate) fn type_url(name: &str) -> String {
    format!("{}/type/{}/", BASE, name)
}

pub(crate) fn sprite_url(id: u32) -> String {
    format!("https://img.test/{}.png", id)
}

pub(crate) fn pokemon_json(id: u32, name: &str, types: &[&str]) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t, "url": type_url(t)}}))
        .collect();
    json!({
        "id": id,
        "name": name,
        "base_experience": 62,
        "height": 6,
        "weight": 85,
        "abilities": [
            {"is_hidden": false, "slot": 1, "ability": {"name": "blaze", "url": ""}},
            {"is_hidden": true, "slot": 3, "ability": {"name": "solar-power", "url": ""}}
        ],
        "species": {"name": name, "url": species_url(id)},
        "sprites": {
            "front_default": sprite_url(id),
            "other": {"official-artwork": {"front_default": format!("https://art.test/{}.png", id)}}
        },
        "stats": [
            {"base_stat": 39, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 52, "effort": 0, "stat": {"name": "attack", "url": ""}},
            {"base_stat": 65, "effort": 1, "stat": {"name": "speed", "url": ""}}
        ],
        "types": types
    })
}

pub(crate) fn species_json(id: u32, name: &str, chain: Option<u32>) -> Value {
    let evolution_chain = chain.map(|c| json!({"url": chain_url(c)}));
    json!({
        "id": id,
        "name": name,
        "capture_rate": 45,
        "base_happiness": 50,
        "growth_rate": {"name": "medium-slow", "url": ""},
        "genera": [
            {"genus": "Pokémon Lézard", "language": {"name": "fr", "url": ""}},
            {"genus": "Lizard Pokémon", "language": {"name": "en", "url": ""}}
        ],
        "evolution_chain": evolution_chain
    })
}

pub(crate) fn link(name: &str, evolves_to: Vec<Value>) -> Value {
    json!({"species": {"name": name, "url": ""}, "evolves_to": evolves_to})
}

pub(crate) fn chain_json(id: u32, root: Value) -> Value {
    json!({"id": id, "chain": root})
}

pub(crate) fn type_json(name: &str, double_damage_from: &[&str]) -> Value {
    let from: Vec<Value> = double_damage_from
        .iter()
        .map(|t| json!({"name": t, "url": type_url(t)}))
        .collect();
    json!({"id": 1, "name": name, "damage_relations": {"double_damage_from": from}})
}

/// Charmander's line plus the fire and flying type records.
pub(crate) fn charmander_world() -> FakeFetcher {
    FakeFetcher::default()
        .with(pokemon_url("charmander"), pokemon_json(4, "charmander", &["fire"]))
        .with(pokemon_url("charmeleon"), pokemon_json(5, "charmeleon", &["fire"]))
        .with(pokemon_url("charizard"), pokemon_json(6, "charizard", &["fire", "flying"]))
        .with(species_url(4), species_json(4, "charmander", Some(2)))
        .with(species_url(6), species_json(6, "charizard", Some(2)))
        .with(
            chain_url(2),
            chain_json(
                2,
                link("charmander", vec![link("charmeleon", vec![link("charizard", vec![])])]),
            ),
        )
        .with(type_url("fire"), type_json("fire", &["water", "ground", "rock"]))
        .with(type_url("flying"), type_json("flying", &["electric", "ice", "rock"]))
}
