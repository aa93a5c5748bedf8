//! In-memory stand-in for the Forvo path-segment API.
//!
//! Serves `/key/{key}/format/json/action/{action}/{name}/{value}...` from a
//! small fixed catalog so client tests can run over real HTTP.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// Key accepted by `app()`.
pub const DEFAULT_KEY: &str = "test-api-key";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub id: u64,
    pub word: String,
    pub original: String,
    pub username: String,
    pub sex: String,
    pub country: String,
    pub code: String,
    pub langname: String,
    pub pathmp3: String,
    pub rate: i64,
    pub num_votes: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub en: String,
}

#[derive(Clone, Debug)]
struct Entry {
    id: u64,
    word: String,
    original: String,
    code: String,
    hits: u64,
    pronunciations: Vec<Pronunciation>,
}

#[derive(Debug)]
struct AppState {
    key: String,
    languages: Vec<Language>,
    entries: Vec<Entry>,
}

type Pairs = [(String, String)];

pub fn app() -> Router {
    app_with_key(DEFAULT_KEY)
}

pub fn app_with_key(key: &str) -> Router {
    let state = Arc::new(AppState::seeded(key));
    Router::new()
        .route("/key/{key}/format/{format}/action/{action}", get(call_bare))
        .route(
            "/key/{key}/format/{format}/action/{action}/{*params}",
            get(call_with_params),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_key(listener: TcpListener, key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(key)).await
}

async fn call_bare(
    State(state): State<Arc<AppState>>,
    Path((key, format, action)): Path<(String, String, String)>,
) -> Result<Json<Value>, StatusCode> {
    dispatch(&state, &key, &format, &action, "")
}

async fn call_with_params(
    State(state): State<Arc<AppState>>,
    Path((key, format, action, params)): Path<(String, String, String, String)>,
) -> Result<Json<Value>, StatusCode> {
    dispatch(&state, &key, &format, &action, &params)
}

fn dispatch(
    state: &AppState,
    key: &str,
    format: &str,
    action: &str,
    raw_params: &str,
) -> Result<Json<Value>, StatusCode> {
    if key != state.key {
        debug!(action, "rejected: bad key");
        return Err(StatusCode::FORBIDDEN);
    }
    if format != "json" {
        debug!(action, format, "rejected: unsupported format");
        return Err(StatusCode::BAD_REQUEST);
    }
    let params = parse_params(raw_params)?;
    let body = match action {
        "word-pronunciations" => state.word_pronunciations(&params)?,
        "standard-pronunciation" => state.standard_pronunciation(&params)?,
        "language-list" => state.language_list(&params)?,
        "language-popular" => state.popular_languages(&params)?,
        "pronounced-words-search" => state.search(&params, true)?,
        "words-search" => state.search(&params, false)?,
        "popular-pronounced-words" => state.popular_pronounced_words(&params)?,
        _ => {
            debug!(action, "rejected: unknown action");
            return Err(StatusCode::NOT_FOUND);
        }
    };
    Ok(Json(body))
}

/// Split `name/value/name/value` into pairs; an odd count is a bad request.
fn parse_params(raw: &str) -> Result<Vec<(String, String)>, StatusCode> {
    let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() % 2 != 0 {
        debug!(raw, "rejected: unpaired parameter segment");
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(segments
        .chunks(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect())
}

fn param<'a>(params: &'a Pairs, name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

fn required<'a>(params: &'a Pairs, name: &str) -> Result<&'a str, StatusCode> {
    param(params, name).ok_or(StatusCode::BAD_REQUEST)
}

fn number(params: &Pairs, name: &str) -> Result<Option<u64>, StatusCode> {
    param(params, name)
        .map(|v| v.parse::<u64>().map_err(|_| StatusCode::BAD_REQUEST))
        .transpose()
}

impl AppState {
    fn seeded(key: &str) -> Self {
        let languages = [
            ("abq", "Abaza"),
            ("de", "German"),
            ("en", "English"),
            ("fr", "French"),
        ]
        .into_iter()
        .map(|(code, en)| Language {
            code: code.to_string(),
            en: en.to_string(),
        })
        .collect();

        let mut next_id = 100;
        let mut pron = |word: &str, original: &str, code: &str, user: &str, sex: &str, rate: i64| {
            next_id += 1;
            Pronunciation {
                id: next_id,
                word: word.to_string(),
                original: original.to_string(),
                username: user.to_string(),
                sex: sex.to_string(),
                country: match code {
                    "de" => "Germany",
                    "fr" => "France",
                    _ => "United Kingdom",
                }
                .to_string(),
                code: code.to_string(),
                langname: match code {
                    "de" => "German",
                    "fr" => "French",
                    _ => "English",
                }
                .to_string(),
                pathmp3: format!("https://apifree.forvo.com/audio/{word}_{next_id}.mp3"),
                rate,
                num_votes: rate.unsigned_abs(),
            }
        };

        let entries = vec![
            Entry {
                id: 1,
                word: "apple".into(),
                original: "apple".into(),
                code: "en".into(),
                hits: 900,
                pronunciations: vec![
                    pron("apple", "apple", "en", "alice", "f", 3),
                    pron("apple", "apple", "en", "bob", "m", 5),
                ],
            },
            Entry {
                id: 2,
                word: "apfel".into(),
                original: "Apfel".into(),
                code: "de".into(),
                hits: 700,
                pronunciations: vec![
                    pron("apfel", "Apfel", "de", "bartleby", "m", 2),
                    pron("apfel", "Apfel", "de", "greta", "f", 4),
                ],
            },
            Entry {
                id: 3,
                word: "aus".into(),
                original: "aus".into(),
                code: "de".into(),
                hits: 300,
                pronunciations: vec![pron("aus", "aus", "de", "greta", "f", 1)],
            },
            Entry {
                id: 4,
                word: "aus_dem_weg_gehen".into(),
                original: "aus dem Weg gehen".into(),
                code: "de".into(),
                hits: 50,
                pronunciations: vec![pron(
                    "aus_dem_weg_gehen",
                    "aus dem Weg gehen",
                    "de",
                    "bartleby",
                    "m",
                    0,
                )],
            },
            Entry {
                id: 5,
                word: "ausgang".into(),
                original: "Ausgang".into(),
                code: "de".into(),
                hits: 10,
                pronunciations: Vec::new(),
            },
            Entry {
                id: 6,
                word: "auf_wiederschauen".into(),
                original: "auf Wiederschauen".into(),
                code: "de".into(),
                hits: 400,
                pronunciations: vec![pron(
                    "auf_wiederschauen",
                    "auf Wiederschauen",
                    "de",
                    "greta",
                    "f",
                    6,
                )],
            },
            Entry {
                id: 7,
                word: "bonjour".into(),
                original: "bonjour".into(),
                code: "fr".into(),
                hits: 800,
                pronunciations: vec![pron("bonjour", "bonjour", "fr", "claire", "f", 7)],
            },
        ];

        Self {
            key: key.to_string(),
            languages,
            entries,
        }
    }

    fn entry(&self, word: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.word == word)
    }

    fn pronunciation_count(&self, code: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.code == code)
            .map(|e| e.pronunciations.len())
            .sum()
    }

    fn word_pronunciations(&self, params: &Pairs) -> Result<Value, StatusCode> {
        let word = required(params, "word")?;
        let min_rate = param(params, "rate")
            .map(|v| v.parse::<i64>().map_err(|_| StatusCode::BAD_REQUEST))
            .transpose()?;
        let limit = number(params, "limit")?;

        let mut items: Vec<&Pronunciation> = self
            .entry(word)
            .map(|e| e.pronunciations.iter().collect())
            .unwrap_or_default();
        for (name, value) in params {
            match name.as_str() {
                "language" => items.retain(|p| p.code == *value),
                "sex" => items.retain(|p| p.sex == *value),
                "username" => items.retain(|p| p.username == *value),
                _ => {}
            }
        }
        if let Some(min) = min_rate {
            items.retain(|p| p.rate >= min);
        }
        match param(params, "order") {
            Some("rate-desc") => items.sort_by(|a, b| b.rate.cmp(&a.rate)),
            Some("rate-asc") => items.sort_by_key(|p| p.rate),
            Some("date-desc") => items.sort_by(|a, b| b.id.cmp(&a.id)),
            _ => {}
        }
        if let Some(limit) = limit {
            items.truncate(limit as usize);
        }
        Ok(json!({ "attributes": { "total": items.len() }, "items": items }))
    }

    fn standard_pronunciation(&self, params: &Pairs) -> Result<Value, StatusCode> {
        let word = required(params, "word")?;
        let language = param(params, "language");
        let best = self.entry(word).and_then(|e| {
            e.pronunciations
                .iter()
                .filter(|p| language.map_or(true, |code| p.code == code))
                .max_by_key(|p| p.rate)
        });
        let items: Vec<&Pronunciation> = best.into_iter().collect();
        Ok(json!({ "items": items }))
    }

    fn language_list(&self, params: &Pairs) -> Result<Value, StatusCode> {
        let min = number(params, "min-pronunciations")?.unwrap_or(0) as usize;
        let mut items: Vec<&Language> = self
            .languages
            .iter()
            .filter(|l| self.pronunciation_count(&l.code) >= min)
            .collect();
        match param(params, "order") {
            Some("code") => items.sort_by(|a, b| a.code.cmp(&b.code)),
            _ => items.sort_by(|a, b| a.en.cmp(&b.en)),
        }
        Ok(json!({ "attributes": { "total": items.len() }, "items": items }))
    }

    fn popular_languages(&self, params: &Pairs) -> Result<Value, StatusCode> {
        let limit = number(params, "limit")?.unwrap_or(10) as usize;
        let mut items: Vec<&Language> = self.languages.iter().collect();
        match param(params, "order") {
            Some("name") => items.sort_by(|a, b| a.en.cmp(&b.en)),
            Some("code") => items.sort_by(|a, b| a.code.cmp(&b.code)),
            _ => items.sort_by_key(|l| std::cmp::Reverse(self.pronunciation_count(&l.code))),
        }
        items.truncate(limit);
        Ok(json!({ "attributes": { "total": items.len() }, "items": items }))
    }

    fn search(&self, params: &Pairs, pronounced_only: bool) -> Result<Value, StatusCode> {
        let search = required(params, "search")?;
        let language = param(params, "language");
        let pagesize = number(params, "pagesize")?.unwrap_or(20).clamp(1, 100) as usize;
        let page = number(params, "page")?.unwrap_or(1).max(1) as usize;

        let mut matches: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| e.word.starts_with(search))
            .filter(|e| language.map_or(true, |code| e.code == code))
            .filter(|e| !pronounced_only || !e.pronunciations.is_empty())
            .collect();
        matches.sort_by(|a, b| a.word.cmp(&b.word));

        let total = matches.len();
        let total_pages = total.div_ceil(pagesize);
        let items: Vec<Value> = matches
            .iter()
            .skip((page - 1).saturating_mul(pagesize))
            .take(pagesize)
            .map(|e| {
                let mut item = word_item(e);
                if pronounced_only {
                    item["standard_pronunciation"] =
                        json!(e.pronunciations.iter().max_by_key(|p| p.rate));
                }
                item
            })
            .collect();
        Ok(json!({
            "attributes": {
                "page": page,
                "pagesize": pagesize,
                "total_pages": total_pages,
                "total": total,
            },
            "items": items,
        }))
    }

    fn popular_pronounced_words(&self, params: &Pairs) -> Result<Value, StatusCode> {
        let language = param(params, "language");
        let limit = number(params, "limit")?.unwrap_or(1000) as usize;
        let mut matches: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| !e.pronunciations.is_empty())
            .filter(|e| language.map_or(true, |code| e.code == code))
            .collect();
        matches.sort_by_key(|e| std::cmp::Reverse(e.hits));
        matches.truncate(limit);
        let items: Vec<Value> = matches.iter().map(|e| word_item(e)).collect();
        Ok(json!({ "attributes": { "total": items.len() }, "items": items }))
    }
}

// The live service reports counts as strings.
fn word_item(entry: &Entry) -> Value {
    json!({
        "id": entry.id,
        "word": entry.word,
        "original": entry.original,
        "num_pronunciations": entry.pronunciations.len().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_params_pairs_segments() {
        let params = parse_params("word/apple/other-param/1").unwrap();
        assert_eq!(
            params,
            vec![
                ("word".to_string(), "apple".to_string()),
                ("other-param".to_string(), "1".to_string()),
            ]
        );
        assert!(parse_params("").unwrap().is_empty());
    }

    #[test]
    fn parse_params_rejects_unpaired_segment() {
        assert_eq!(parse_params("word/apple/limit"), Err(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn number_rejects_garbage() {
        let params = vec![("limit".to_string(), "ten".to_string())];
        assert_eq!(number(&params, "limit"), Err(StatusCode::BAD_REQUEST));
        assert_eq!(number(&params, "page"), Ok(None));
    }

    #[test]
    fn seeded_catalog_counts_pronunciations() {
        let state = AppState::seeded(DEFAULT_KEY);
        assert_eq!(state.pronunciation_count("de"), 5);
        assert_eq!(state.pronunciation_count("abq"), 0);
    }

    #[test]
    fn pronunciation_serializes_to_json() {
        let state = AppState::seeded(DEFAULT_KEY);
        let p = &state.entry("bonjour").unwrap().pronunciations[0];
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["word"], "bonjour");
        assert_eq!(json["code"], "fr");
        assert_eq!(json["rate"], 7);
    }
}
