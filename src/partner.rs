//! Random-creature fetch for the daily partner decoration.
//!
//! The upstream API is best-effort: any failure degrades to
//! [`Fetched::Unavailable`] and the caller decides how to render that.
//! The ledger never sees these outcomes.

use serde::Deserialize;
use tracing::warn;

/// Outcome of an external fetch. `Unavailable` is an ordinary value, not
/// an error; the presentation layer renders a fallback for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Value(T),
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partner {
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCreature {
    name: String,
    sprites: ApiSprites,
}

#[derive(Debug, Deserialize)]
struct ApiSprites {
    other: ApiOtherSprites,
}

#[derive(Debug, Deserialize)]
struct ApiOtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: ApiArtwork,
}

#[derive(Debug, Deserialize)]
struct ApiArtwork {
    front_default: Option<String>,
}

pub async fn fetch_partner(client: &reqwest::Client, base: &str, id: u32) -> Fetched<Partner> {
    let url = format!("{base}/pokemon/{id}");
    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("partner fetch failed: {err}");
            return Fetched::Unavailable;
        }
    };
    if !response.status().is_success() {
        warn!("partner fetch returned {}", response.status());
        return Fetched::Unavailable;
    }
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => {
            warn!("partner fetch body read failed: {err}");
            return Fetched::Unavailable;
        }
    };
    match parse_creature(&body) {
        Some(partner) => Fetched::Value(partner),
        None => {
            warn!("partner response did not match the expected shape");
            Fetched::Unavailable
        }
    }
}

pub fn parse_creature(body: &[u8]) -> Option<Partner> {
    let creature: ApiCreature = serde_json::from_slice(body).ok()?;
    Some(Partner {
        name: display_name(&creature.name),
        image: creature.sprites.other.official_artwork.front_default,
    })
}

fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_artwork_url() {
        let body = br#"{
            "name": "pikachu",
            "sprites": {
                "other": {
                    "official-artwork": {
                        "front_default": "https://img.example/25.png"
                    }
                }
            }
        }"#;

        let partner = parse_creature(body).expect("should parse");
        assert_eq!(partner.name, "Pikachu");
        assert_eq!(partner.image.as_deref(), Some("https://img.example/25.png"));
    }

    #[test]
    fn missing_artwork_is_a_partner_without_image() {
        let body = br#"{
            "name": "ditto",
            "sprites": {
                "other": {
                    "official-artwork": { "front_default": null }
                }
            }
        }"#;

        let partner = parse_creature(body).expect("should parse");
        assert_eq!(partner.name, "Ditto");
        assert_eq!(partner.image, None);
    }

    #[test]
    fn unexpected_shape_is_rejected() {
        assert_eq!(parse_creature(b"{\"detail\":\"Not found.\"}"), None);
        assert_eq!(parse_creature(b"not json"), None);
    }
}
