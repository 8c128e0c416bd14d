use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const UNKNOWN_TYPE_ICON: &str = "❓";
pub const DEFAULT_TYPE_COLOR: &str = "#A8A878";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeName {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl TypeName {
    pub const ALL: [TypeName; 18] = [
        TypeName::Normal,
        TypeName::Fire,
        TypeName::Water,
        TypeName::Grass,
        TypeName::Electric,
        TypeName::Ice,
        TypeName::Fighting,
        TypeName::Poison,
        TypeName::Ground,
        TypeName::Flying,
        TypeName::Psychic,
        TypeName::Bug,
        TypeName::Rock,
        TypeName::Ghost,
        TypeName::Dragon,
        TypeName::Dark,
        TypeName::Steel,
        TypeName::Fairy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Normal => "normal",
            TypeName::Fire => "fire",
            TypeName::Water => "water",
            TypeName::Grass => "grass",
            TypeName::Electric => "electric",
            TypeName::Ice => "ice",
            TypeName::Fighting => "fighting",
            TypeName::Poison => "poison",
            TypeName::Ground => "ground",
            TypeName::Flying => "flying",
            TypeName::Psychic => "psychic",
            TypeName::Bug => "bug",
            TypeName::Rock => "rock",
            TypeName::Ghost => "ghost",
            TypeName::Dragon => "dragon",
            TypeName::Dark => "dark",
            TypeName::Steel => "steel",
            TypeName::Fairy => "fairy",
        }
    }

    /// Badge glyph shown next to the type name.
    pub fn icon(&self) -> &'static str {
        match self {
            TypeName::Normal => "⚪",
            TypeName::Fire => "🔥",
            TypeName::Water => "💧",
            TypeName::Grass => "🍃",
            TypeName::Electric => "⚡",
            TypeName::Ice => "❄️",
            TypeName::Fighting => "🥊",
            TypeName::Poison => "☠️",
            TypeName::Ground => "🌍",
            TypeName::Flying => "🕊️",
            TypeName::Psychic => "🔮",
            TypeName::Bug => "🐞",
            TypeName::Rock => "🪨",
            TypeName::Ghost => "👻",
            TypeName::Dragon => "🐉",
            TypeName::Dark => "🌑",
            TypeName::Steel => "🔩",
            TypeName::Fairy => "🧚",
        }
    }

    /// Card background colour.
    pub fn color(&self) -> &'static str {
        match self {
            TypeName::Normal => "#A8A878",
            TypeName::Fire => "#F08030",
            TypeName::Water => "#6890F0",
            TypeName::Grass => "#78C850",
            TypeName::Electric => "#F8D030",
            TypeName::Ice => "#98D8D8",
            TypeName::Fighting => "#C03028",
            TypeName::Poison => "#A040A0",
            TypeName::Ground => "#E0C068",
            TypeName::Flying => "#A890F0",
            TypeName::Psychic => "#F85888",
            TypeName::Bug => "#A8B820",
            TypeName::Rock => "#B8A038",
            TypeName::Ghost => "#705898",
            TypeName::Dragon => "#7038F8",
            TypeName::Dark => "#705848",
            TypeName::Steel => "#B8B8D0",
            TypeName::Fairy => "#EE99AC",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TypeName::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown type: {}", s)))
    }
}

/// Icon for an upstream type name, with a fallback for names outside the vocabulary.
pub fn badge_icon(name: &str) -> &'static str {
    name.parse::<TypeName>()
        .map(|t| t.icon())
        .unwrap_or(UNKNOWN_TYPE_ICON)
}

pub fn badge_color(name: &str) -> &'static str {
    name.parse::<TypeName>()
        .map(|t| t.color())
        .unwrap_or(DEFAULT_TYPE_COLOR)
}

/// Card colour keyed on a creature's primary type.
pub fn card_color(types: &[String]) -> &'static str {
    types
        .first()
        .map(|t| badge_color(t))
        .unwrap_or(DEFAULT_TYPE_COLOR)
}

/// Type-membership predicate used by the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TypeName),
}

impl TypeFilter {
    pub fn matches(&self, types: &[String]) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => types.iter().any(|t| t == wanted.as_str()),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("todos")
        {
            return Ok(TypeFilter::All);
        }
        trimmed.parse::<TypeName>().map(TypeFilter::Only)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeBadge {
    pub name: TypeName,
    pub icon: &'static str,
    pub color: &'static str,
}

pub fn type_badges() -> Vec<TypeBadge> {
    TypeName::ALL
        .into_iter()
        .map(|name| TypeBadge {
            name,
            icon: name.icon(),
            color: name.color(),
        })
        .collect()
}
