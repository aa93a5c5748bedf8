//! Typed views over Forvo responses.
//!
//! # Design
//! The client returns the response body as an opaque `serde_json::Value`.
//! These types are an opt-in layer on top: `decode` turns that value into a
//! `Listing` of whichever item type the caller expects. Every field is
//! optional or defaulted, and numeric counters accept both numbers and
//! numeric strings because the service sends both.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode an opaque response body into a typed view.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(body)
}

/// The `{ attributes, items }` envelope every list action returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing<T> {
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Paging counters. Search actions fill all of them; other actions only
/// `total`, and `standard-pronunciation` none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub pagesize: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_pages: Option<u64>,
}

/// One recorded pronunciation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pronunciation {
    #[serde(deserialize_with = "required_u64")]
    pub id: u64,
    pub word: String,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Language code.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub langname: Option<String>,
    #[serde(default)]
    pub pathmp3: Option<String>,
    #[serde(default)]
    pub pathogg: Option<String>,
    #[serde(default)]
    pub rate: Option<i64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub num_votes: Option<u64>,
}

/// A language entry from `language-list` / `language-popular`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    /// English name of the language.
    #[serde(default)]
    pub en: Option<String>,
}

/// A word from the search and popularity actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(deserialize_with = "required_u64")]
    pub id: u64,
    pub word: String,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub num_pronunciations: Option<u64>,
    #[serde(default)]
    pub standard_pronunciation: Option<Pronunciation>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn parse_counter<E: serde::de::Error>(raw: NumberOrString) -> Result<u64, E> {
    match raw {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(E::custom),
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(raw) => parse_counter(raw).map(Some),
        None => Ok(None),
    }
}

fn required_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    parse_counter(NumberOrString::deserialize(deserializer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_pronunciation_listing() {
        let body = json!({
            "attributes": { "total": 2 },
            "items": [
                {
                    "id": 5943, "word": "apfel", "original": "Apfel", "username": "Bartleby",
                    "sex": "m", "country": "Germany", "code": "de", "langname": "German",
                    "pathmp3": "https://apifree.forvo.com/audio/a.mp3", "rate": 3, "num_votes": "4"
                },
                { "id": "5944", "word": "apfel" }
            ]
        });
        let listing: Listing<Pronunciation> = decode(body).unwrap();
        assert_eq!(listing.attributes.total, Some(2));
        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.items[0].code.as_deref(), Some("de"));
        assert_eq!(listing.items[0].num_votes, Some(4));
        assert_eq!(listing.items[1].id, 5944);
        assert!(listing.items[1].pathmp3.is_none());
    }

    #[test]
    fn standard_pronunciation_has_no_attributes() {
        let body = json!({ "items": [{ "id": 1, "word": "auf_wiederschauen" }] });
        let listing: Listing<Pronunciation> = decode(body).unwrap();
        assert_eq!(listing.attributes, Attributes::default());
        assert_eq!(listing.items[0].word, "auf_wiederschauen");
    }

    #[test]
    fn decodes_search_paging() {
        let body = json!({
            "attributes": { "page": 1, "pagesize": 20, "total_pages": 7, "total": 121 },
            "items": [{
                "id": 20945, "word": "aus", "original": "aus", "num_pronunciations": "4",
                "standard_pronunciation": { "id": 7, "word": "aus" }
            }]
        });
        let listing: Listing<Word> = decode(body).unwrap();
        assert_eq!(listing.attributes.total_pages, Some(7));
        assert_eq!(listing.items[0].num_pronunciations, Some(4));
        assert_eq!(
            listing.items[0].standard_pronunciation.as_ref().map(|p| p.id),
            Some(7)
        );
    }

    #[test]
    fn decodes_languages() {
        let body = json!({ "items": [{ "code": "abq", "en": "Abaza" }, { "code": "de" }] });
        let listing: Listing<Language> = decode(body).unwrap();
        assert_eq!(listing.items[0].en.as_deref(), Some("Abaza"));
        assert!(listing.items[1].en.is_none());
    }

    #[test]
    fn rejects_non_numeric_counter() {
        let body = json!({ "attributes": { "total": "many" }, "items": [] });
        assert!(decode::<Listing<Language>>(body).is_err());
    }
}
