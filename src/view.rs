// JSON shapes handed to the front-end: raw records plus the values the
// screens display (badges, card colour, `#004`, metres, kilograms).

use crate::catalog::CreatureSummary;
use crate::detail::{CreatureDetail, CreatureProfile};
use crate::evolution::EvolutionChain;
use crate::ids::display_number;
use crate::types::{badge_color, badge_icon, card_color};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeLabel {
    pub name: String,
    pub icon: &'static str,
    pub color: &'static str,
}

impl TypeLabel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: badge_icon(name),
            color: badge_color(name),
        }
    }
}

fn labels<'a, I>(names: I) -> Vec<TypeLabel>
where
    I: IntoIterator<Item = &'a String>,
{
    names.into_iter().map(|n| TypeLabel::new(n)).collect()
}

/// One card in the list and search screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: String,
    pub number: String,
    pub name: String,
    pub sprite_url: String,
    pub color: &'static str,
    pub types: Vec<TypeLabel>,
}

impl From<&CreatureSummary> for CardView {
    fn from(summary: &CreatureSummary) -> Self {
        Self {
            id: summary.id.clone(),
            number: display_number(&summary.id),
            name: summary.name.clone(),
            sprite_url: summary.sprite_url.clone(),
            color: summary.card_color(),
            types: labels(&summary.types),
        }
    }
}

/// Display values for the detail header and "About" tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDisplay {
    pub number: String,
    pub color: &'static str,
    pub types: Vec<TypeLabel>,
    pub height_m: f64,
    pub weight_kg: f64,
    pub growth_rate_label: String,
}

impl From<&CreatureProfile> for ProfileDisplay {
    fn from(profile: &CreatureProfile) -> Self {
        Self {
            number: display_number(&profile.id),
            color: card_color(&profile.types),
            types: labels(&profile.types),
            height_m: profile.height_meters(),
            weight_kg: profile.weight_kilograms(),
            growth_rate_label: profile.growth_rate_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub profile: CreatureProfile,
    pub display: ProfileDisplay,
    pub weaknesses: Vec<TypeLabel>,
    pub evolution: EvolutionChain,
}

impl From<CreatureDetail> for DetailView {
    fn from(detail: CreatureDetail) -> Self {
        Self {
            display: ProfileDisplay::from(&detail.profile),
            weaknesses: labels(&detail.weaknesses),
            profile: detail.profile,
            evolution: detail.evolution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::artwork_url;
    use serde_json::json;

    #[test]
    fn test_card_view_json() {
        let summary = CreatureSummary {
            id: "130".to_string(),
            name: "gyarados".to_string(),
            sprite_url: artwork_url("130"),
            types: vec!["water".to_string(), "flying".to_string()],
        };
        let value = serde_json::to_value(CardView::from(&summary)).unwrap();
        assert_eq!(value["number"], json!("#130"));
        assert_eq!(value["color"], json!("#6890F0"));
        assert_eq!(value["types"][1], json!({"name": "flying", "icon": "🕊️", "color": "#A890F0"}));
    }

    #[test]
    fn test_unknown_type_label_falls_back() {
        let label = TypeLabel::new("stellar");
        assert_eq!(label.icon, "❓");
        assert_eq!(label.color, "#A8A878");
    }
}
