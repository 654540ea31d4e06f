/// Translation lookup
///
/// Lookup order for a key: custom `key_sport`, custom `key`, language `key_sport`,
/// language `key`, then the built-in English table, then the key itself. Keys may be
/// dotted paths into nested tables (`countries.Brazil`).
use std::sync::OnceLock;

use anyhow::{bail, Context};
use serde_json::Value;
use tracing::error;

use crate::data_provider::DataAccess;
use crate::types::Sport;

const EN_TABLE: &str = include_str!("i18n/en.json");
const PT_TABLE: &str = include_str!("i18n/pt.json");

static EN: OnceLock<Value> = OnceLock::new();
static PT: OnceLock<Value> = OnceLock::new();

fn parse_table(name: &str, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        error!("I18N: Built-in table {} is invalid: {}", name, e);
        Value::Null
    })
}

fn builtin_table(language: &str) -> Option<&'static Value> {
    match language {
        "en" => Some(EN.get_or_init(|| parse_table("en", EN_TABLE))),
        "pt" => Some(PT.get_or_init(|| parse_table("pt", PT_TABLE))),
        _ => None,
    }
}

/// Resolve a dotted path to a non-empty string
fn lookup<'a>(table: &'a Value, path: &str) -> Option<&'a str> {
    let mut current = table;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
    }
    current.as_str().filter(|s| !s.is_empty())
}

/// Normalize a language tag to its two-letter lowercase prefix
pub fn language_code(lang: &str) -> String {
    lang.chars().take(2).collect::<String>().to_lowercase()
}

/// Language code of a custom translation file, from its base name
///
/// The last two characters of the name without extension:
/// `https://cdn.test/i18n/translations_fr.json` is `fr`. An empty name is `en`.
pub fn language_from_url(url: &str) -> String {
    let base = url.rsplit('/').next().unwrap_or_default();
    let stem = base.split('.').next().unwrap_or_default();
    let skip = stem.chars().count().saturating_sub(2);
    let code: String = stem.chars().skip(skip).collect();
    if code.is_empty() {
        "en".to_string()
    } else {
        code
    }
}

/// Fetch a custom translation file
pub async fn load_custom_language(data: &DataAccess, url: &str) -> anyhow::Result<Value> {
    let table = data
        .translation_file(url)
        .await
        .with_context(|| format!("Failed to load language file: {}", url))?;
    if !table.is_object() {
        bail!("Language file {} is not a JSON object", url);
    }
    Ok(table)
}

#[derive(Debug, Clone)]
pub struct Translator {
    language: String,
    sport: Sport,
    custom: Value,
}

impl Translator {
    pub fn new(language: &str, sport: Sport) -> Self {
        Self {
            language: language_code(language),
            sport,
            custom: Value::Object(Default::default()),
        }
    }

    pub fn with_custom(mut self, custom: Value) -> Self {
        self.custom = custom;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language_code(language);
    }

    pub fn custom(&self) -> &Value {
        &self.custom
    }

    pub fn set_custom(&mut self, custom: Value) {
        self.custom = custom;
    }

    pub fn translate(&self, key: &str) -> String {
        let sport_key = format!("{}_{}", key, self.sport);
        let tables = [Some(&self.custom), builtin_table(&self.language), builtin_table("en")];

        tables
            .into_iter()
            .flatten()
            .find_map(|table| lookup(table, &sport_key).or_else(|| lookup(table, key)))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// Localized country name, or the name itself when untranslated
    pub fn translate_country(&self, country: &str) -> String {
        if country.is_empty() {
            return String::new();
        }
        let key = format!("countries.{}", country);
        let translated = self.translate(&key);
        if translated == key {
            country.to_string()
        } else {
            translated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_code_truncates_and_lowercases() {
        assert_eq!(language_code("pt-BR"), "pt");
        assert_eq!(language_code("EN"), "en");
        assert_eq!(language_code(""), "");
    }

    #[test]
    fn test_language_from_url() {
        assert_eq!(language_from_url("https://cdn.test/i18n/fr.json"), "fr");
        assert_eq!(language_from_url("https://cdn.test/i18n/translations_fr.json"), "fr");
        assert_eq!(language_from_url("https://cdn.test/i18n/lang-de.json?v=2"), "de");
        assert_eq!(language_from_url("https://cdn.test/i18n/x.json"), "x");
        assert_eq!(language_from_url("https://cdn.test/"), "en");
    }

    #[test]
    fn test_builtin_language_table() {
        let t = Translator::new("pt-BR", Sport::Football);
        assert_eq!(t.translate("today"), "Hoje");
    }

    #[test]
    fn test_sport_specific_key_wins() {
        let t = Translator::new("pt", Sport::F1);
        assert_eq!(t.translate("no_games_available"), "Nenhuma corrida disponível");

        let t = Translator::new("pt", Sport::Hockey);
        assert_eq!(t.translate("no_games_available"), "Nenhum jogo disponível");
    }

    #[test]
    fn test_custom_translations_take_precedence() {
        let t = Translator::new("pt", Sport::Basketball).with_custom(json!({
            "today": "Aujourd'hui",
            "goals_basketball": "Paniers"
        }));
        assert_eq!(t.translate("today"), "Aujourd'hui");
        assert_eq!(t.translate("goals"), "Paniers");
        assert_eq!(t.translate("squad"), "Elenco");
    }

    #[test]
    fn test_custom_generic_key_beats_language_sport_key() {
        let t = Translator::new("pt", Sport::F1)
            .with_custom(json!({"no_games_available": "Rien"}));
        assert_eq!(t.translate("no_games_available"), "Rien");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english_then_key() {
        let t = Translator::new("fr", Sport::Football);
        assert_eq!(t.translate("today"), "Today");
        assert_eq!(t.translate("totally_unknown"), "totally_unknown");
    }

    #[test]
    fn test_dotted_paths() {
        let t = Translator::new("en", Sport::Football)
            .with_custom(json!({"tabs": {"stats": "Numbers"}}));
        assert_eq!(t.translate("tabs.stats"), "Numbers");
        assert_eq!(t.translate("tabs"), "tabs");
    }

    #[test]
    fn test_translate_country() {
        let pt = Translator::new("pt", Sport::Football);
        assert_eq!(pt.translate_country("Brazil"), "Brasil");
        assert_eq!(pt.translate_country("Narnia"), "Narnia");

        let en = Translator::new("en", Sport::Football);
        assert_eq!(en.translate_country("Brazil"), "Brazil");
    }
}
