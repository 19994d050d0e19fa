//! Two-locale string tables.
//!
//! Tables are nested JSON objects addressed by dotted key paths such as
//! `modalTitles.about`. A missing key never falls back to the other
//! locale: [`text`] renders the bracketed path instead so the gap is
//! visible on screen and in the console.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Tr];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }

    /// Name shown in the language menu, always in its own language.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Türkçe",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const EN_JSON: &str = include_str!("../assets/i18n/en.json");
const TR_JSON: &str = include_str!("../assets/i18n/tr.json");

struct Tables {
    en: Value,
    tr: Value,
}

fn parse_table(lang: Language, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("translation table {lang} is malformed: {e}");
        Value::Null
    })
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| Tables {
        en: parse_table(Language::En, EN_JSON),
        tr: parse_table(Language::Tr, TR_JSON),
    })
}

fn table(lang: Language) -> &'static Value {
    let t = tables();
    match lang {
        Language::En => &t.en,
        Language::Tr => &t.tr,
    }
}

/// Resolves `path` in the table for `lang`. Only string leaves resolve.
pub fn lookup(lang: Language, path: &str) -> Option<&'static str> {
    path.split('.')
        .try_fold(table(lang), |node, key| node.get(key))?
        .as_str()
}

/// Like [`lookup`] but always yields something printable.
pub fn text(lang: Language, path: &str) -> Cow<'static, str> {
    match lookup(lang, path) {
        Some(s) => Cow::Borrowed(s),
        None => {
            log::warn!("missing translation {lang}:{path}");
            Cow::Owned(format!("[{path}]"))
        }
    }
}

/// Every string leaf in a locale's table, as dotted paths.
pub fn key_paths(lang: Language) -> Vec<String> {
    fn walk(prefix: &str, node: &Value, out: &mut Vec<String>) {
        match node {
            Value::Object(map) => {
                for (k, v) in map {
                    let path = if prefix.is_empty() { k.clone() } else { format!("{prefix}.{k}") };
                    walk(&path, v, out);
                }
            }
            Value::String(_) => out.push(prefix.to_string()),
            _ => {}
        }
    }
    let mut out = Vec::new();
    walk("", table(lang), &mut out);
    out.sort();
    out
}
