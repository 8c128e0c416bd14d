// Resource URLs look like `https://pokeapi.co/api/v2/pokemon/25/`.
pub const ARTWORK_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// Returns the second-to-last `/` segment of a resource URL.
///
/// Input is expected to come from the API itself, so there is no validation:
/// a URL without the trailing slash yields the wrong segment, and one with no
/// `/` at all yields an empty string.
pub fn extract_id(url: &str) -> String {
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() < 2 {
        return String::new();
    }
    parts[parts.len() - 2].to_string()
}

pub fn artwork_url(id: &str) -> String {
    format!("{}/{}.png", ARTWORK_BASE_URL, id)
}

/// `#004` style label shown on cards and the detail header.
pub fn display_number(id: &str) -> String {
    format!("#{:0>3}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_id() {
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/25/"), "25");
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon-species/1/"), "1");
    }

    #[test]
    fn test_extract_id_is_stable_on_rebuilt_url() {
        for n in ["1", "151", "1025"] {
            let id = extract_id(&format!("https://pokeapi.co/api/v2/pokemon/{}/", n));
            assert_eq!(id, n);
            let again = extract_id(&format!("https://pokeapi.co/api/v2/pokemon/{}/", id));
            assert_eq!(again, n);
        }
    }

    #[test]
    fn test_extract_id_malformed() {
        // no trailing slash: picks the resource name instead
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/25"), "pokemon");
        assert_eq!(extract_id("25"), "");
        assert_eq!(extract_id(""), "");
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number("4"), "#004");
        assert_eq!(display_number("151"), "#151");
        assert_eq!(display_number("1025"), "#1025");
    }

    #[test]
    fn test_artwork_url() {
        assert_eq!(
            artwork_url("4"),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/4.png"
        );
    }
}
