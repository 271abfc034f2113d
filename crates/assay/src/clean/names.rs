//! Column-name normalization and synonym renaming.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::Result;
use crate::table::{DataTable, dedup_names};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static UNDERSCORE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Rewrite a raw column name into canonical form: accent-free lowercase
/// ASCII with underscores for whitespace, restricted to `[a-z0-9_]`.
///
/// The rewrite is idempotent: a name already in canonical form comes back
/// unchanged.
pub fn normalize_name(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii())
        .collect();
    let lower = folded.to_lowercase();
    let underscored = WHITESPACE_RE.replace_all(&lower, "_");
    let substituted = underscored.replace('@', "a").replace('/', "_");
    let kept: String = substituted
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
        .collect();
    let collapsed = UNDERSCORE_RUN_RE.replace_all(&kept, "_");
    collapsed.trim_matches('_').to_string()
}

/// Normalizes every column name in a table, then applies a synonym rename
/// map for known field aliases.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    rename_map: IndexMap<String, String>,
}

impl NameNormalizer {
    /// Create a normalizer with a synonym map. Keys are matched against the
    /// normalized form of each name; absent keys are a no-op.
    pub fn new(rename_map: IndexMap<String, String>) -> Self {
        Self { rename_map }
    }

    /// Rewrite all column names in place.
    ///
    /// Names that collapse to nothing get positional `column_n` names, and
    /// collisions are resolved with `_2`, `_3`, ... suffixes so the table
    /// never holds two columns under one name.
    pub fn apply(&self, table: &mut DataTable) -> Result<()> {
        let names: Vec<String> = table
            .names()
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                let mut name = normalize_name(raw);
                if name.is_empty() {
                    name = format!("column_{}", idx + 1);
                }
                if let Some(target) = self.rename_map.get(&name) {
                    name = target.clone();
                }
                name
            })
            .collect();
        table.rename_columns(dedup_names(names))
    }
}

#[cfg(test)]
mod tests {
    use crate::table::{Column, Value};

    use super::*;

    fn default_map() -> IndexMap<String, String> {
        crate::clean::CleanConfig::default().rename_map
    }

    #[test]
    fn test_normalize_lowercase_and_underscores() {
        assert_eq!(normalize_name("Nombre Cliente"), "nombre_cliente");
        assert_eq!(normalize_name("  Fecha   Registro  "), "fecha_registro");
    }

    #[test]
    fn test_normalize_strips_special_characters() {
        assert_eq!(normalize_name("Monto $$"), "monto");
        assert_eq!(normalize_name("Es Fraude?"), "es_fraude");
    }

    #[test]
    fn test_normalize_folds_accents() {
        assert_eq!(normalize_name("Teléfono"), "telefono");
        assert_eq!(normalize_name("Año de Registro"), "ano_de_registro");
    }

    #[test]
    fn test_normalize_at_and_slash() {
        assert_eq!(normalize_name("user@host"), "userahost");
        assert_eq!(normalize_name("notes/comments"), "notes_comments");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["Monto $$", "Teléfono", "notes/comments", "  a  b  "] {
            let once = normalize_name(raw);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn test_apply_renames_synonyms() {
        let mut table = DataTable::from_columns(vec![
            Column::new("Score 15", vec![Value::Int(1)]),
            Column::new("Es Fraude", vec![Value::Int(0)]),
            Column::new("Notes/Comments", vec![Value::Null]),
        ])
        .unwrap();

        NameNormalizer::new(default_map()).apply(&mut table).unwrap();

        assert_eq!(table.names(), vec!["score", "fraude", "comentarios"]);
    }

    #[test]
    fn test_apply_skips_absent_synonyms() {
        let mut table =
            DataTable::from_columns(vec![Column::new("Edad", vec![Value::Int(30)])]).unwrap();

        NameNormalizer::new(default_map()).apply(&mut table).unwrap();

        assert_eq!(table.names(), vec!["edad"]);
    }

    #[test]
    fn test_apply_resolves_collisions() {
        let mut table = DataTable::from_columns(vec![
            Column::new("Monto $$", vec![Value::Int(1)]),
            Column::new("monto", vec![Value::Int(2)]),
        ])
        .unwrap();

        NameNormalizer::new(default_map()).apply(&mut table).unwrap();

        assert_eq!(table.names(), vec!["monto", "monto_2"]);
    }

    #[test]
    fn test_apply_names_empty_results_positionally() {
        let mut table =
            DataTable::from_columns(vec![Column::new("$$$", vec![Value::Null])]).unwrap();

        NameNormalizer::new(default_map()).apply(&mut table).unwrap();

        assert_eq!(table.names(), vec!["column_1"]);
    }
}
