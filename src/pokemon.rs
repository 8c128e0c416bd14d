// pokemon.rs
// Upstream PokeAPI records. Every struct is lenient: fields missing from a
// response deserialize to their defaults instead of failing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    pub abilities: Vec<PokemonAbility>,
    pub species: Option<NamedAPIResource>,
    pub sprites: PokemonSprites,
    pub stats: Vec<PokemonStat>,
    pub types: Vec<PokemonType>,
}

impl Pokemon {
    pub fn type_names(&self) -> Vec<String> {
        self.types
            .iter()
            .filter_map(|t| t.r#type.as_ref())
            .map(|t| t.name.clone())
            .collect()
    }

    pub fn artwork_url(&self) -> Option<String> {
        self.sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.clone())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NamedAPIResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct APIResource {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PokemonAbility {
    pub is_hidden: bool,
    pub slot: i32,
    pub ability: Option<NamedAPIResource>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PokemonStat {
    pub base_stat: i32,
    pub effort: i32,
    pub stat: Option<NamedAPIResource>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PokemonType {
    pub slot: i32,
    pub r#type: Option<NamedAPIResource>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PokemonSprites {
    pub front_default: Option<String>,
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<OfficialArtwork>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OfficialArtwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PokemonSpecies {
    pub id: u32,
    pub name: String,
    pub capture_rate: Option<u32>,
    pub base_happiness: Option<u32>,
    pub growth_rate: Option<NamedAPIResource>,
    pub genera: Vec<Genus>,
    pub evolution_chain: Option<APIResource>,
}

impl PokemonSpecies {
    /// The genus ("Lizard Pokémon") in the given language, if upstream has one.
    pub fn genus(&self, language: &str) -> Option<&str> {
        self.genera
            .iter()
            .find(|g| g.language.name == language)
            .map(|g| g.genus.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Genus {
    pub genus: String,
    pub language: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EvolutionChainRecord {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ChainLink {
    pub species: NamedAPIResource,
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TypeRecord {
    pub id: u32,
    pub name: String,
    pub damage_relations: DamageRelations,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DamageRelations {
    pub double_damage_from: Vec<NamedAPIResource>,
}

/// One page of the `pokemon?limit=N` listing.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PokemonPage {
    pub count: u32,
    pub results: Vec<NamedAPIResource>,
}
