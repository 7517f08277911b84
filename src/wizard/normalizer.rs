use serde_json::{Map, Value};
use tracing::warn;

use super::types::Judgement;

/// Repeated when the model returns no translations at all
pub const UNCLEAR_TRANSLATION: &str = "By the ancient scrolls, the message remains unclear.";

pub const TRANSLATION_FALLBACK: [&str; 3] = [
    "By the ancient scrolls, I sense a disturbance in the magical flow.",
    "Hark! The ethereal translation incantation seems to have faltered.",
    "As the stars foretold, our mystical communication has encountered a barrier.",
];

pub const DEFAULT_SCORE: i64 = 5;

pub const JUDGEMENT_FALLBACK_FEEDBACK: &str =
    "Your speech has some wizardly qualities, but the ancient magic prevents a full assessment.";

pub const JUDGEMENT_FALLBACK_SUGGESTIONS: [&str; 2] =
    ["Add more arcane references", "Use more antiquated language"];

const PREVIEW_CHARS: usize = 200;

/// Outcome of reading the model's reply
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Ok(T),
    /// The reply was not a JSON object
    Fallback,
}

impl<T> Parsed<T> {
    pub fn unwrap_or_else<F: FnOnce() -> T>(self, fallback: F) -> T {
        match self {
            Parsed::Ok(value) => value,
            Parsed::Fallback => fallback(),
        }
    }
}

/// Drop a surrounding Markdown code fence, if any
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };
    // Skip the info string, e.g. ```json
    match inner.split_once('\n') {
        Some((info, body))
            if !info.trim().contains(char::is_whitespace)
                && !info.trim_start().starts_with(|c: char| c == '{' || c == '[') =>
        {
            body.trim()
        }
        _ => inner.trim(),
    }
}

fn parse_object(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(strip_code_fence(raw)) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) | Err(_) => {
            let preview: String = raw.chars().take(PREVIEW_CHARS).collect();
            warn!("Failed to parse JSON response: {}", preview);
            None
        }
    }
}

/// Keep strings, stringify scalars, drop everything else
fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

/// Integer score from a number or numeric string, truncating fractions
fn score_value(value: Option<&Value>) -> Option<i64> {
    let from_float = |f: f64| f.is_finite().then(|| f.trunc() as i64);
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(from_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(from_float))
        }
        _ => None,
    }
}

pub fn parse_translations(raw: &str) -> Parsed<Vec<String>> {
    match parse_object(raw) {
        Some(map) => Parsed::Ok(string_list(map.get("translations"))),
        None => Parsed::Fallback,
    }
}

/// Pad with the last element (or the unclear placeholder) and cut to three
pub fn fit_to_three(mut translations: Vec<String>) -> [String; 3] {
    translations.truncate(3);
    while translations.len() < 3 {
        let filler = translations
            .last()
            .cloned()
            .unwrap_or_else(|| UNCLEAR_TRANSLATION.to_string());
        translations.push(filler);
    }
    let mut items = translations.into_iter();
    let mut next = || items.next().unwrap_or_default();
    [next(), next(), next()]
}

pub fn translation_fallback() -> [String; 3] {
    TRANSLATION_FALLBACK.map(str::to_string)
}

pub fn normalize_translations(raw: &str) -> [String; 3] {
    match parse_translations(raw) {
        Parsed::Ok(translations) => fit_to_three(translations),
        Parsed::Fallback => translation_fallback(),
    }
}

pub fn parse_judgement(raw: &str) -> Parsed<Judgement> {
    let Some(map) = parse_object(raw) else {
        return Parsed::Fallback;
    };
    Parsed::Ok(Judgement {
        score: score_value(map.get("score")).unwrap_or(DEFAULT_SCORE),
        feedback: map
            .get("feedback")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        suggestions: string_list(map.get("suggestions")),
    })
}

pub fn judgement_fallback() -> Judgement {
    Judgement {
        score: DEFAULT_SCORE,
        feedback: JUDGEMENT_FALLBACK_FEEDBACK.to_string(),
        suggestions: JUDGEMENT_FALLBACK_SUGGESTIONS.map(str::to_string).to_vec(),
    }
}

pub fn normalize_judgement(raw: &str) -> Judgement {
    parse_judgement(raw).unwrap_or_else(judgement_fallback)
}
