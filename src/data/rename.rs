use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SampleError};

use super::model::Dataset;

/// Gaia DR3 columns whose hyphens are replaced by underscores.
const GAIA_HEADER_MAP: [(&str, &str); 8] = [
    ("BP-RP", "BR_RP"),
    ("BP-G", "BP_G"),
    ("G-RP", "G_RP"),
    ("Lum-Flame", "Lum_Flame"),
    ("Mass-Flame", "Mass_Flame"),
    ("Age-Flame", "Age_Flame"),
    ("z-Flame", "z_Flame"),
    ("SpType-ELS", "SpType_ELS"),
];

/// Old column name → new column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameMap(BTreeMap<String, String>);

impl Default for RenameMap {
    fn default() -> Self {
        GAIA_HEADER_MAP
            .iter()
            .map(|(old, new)| (old.to_string(), new.to_string()))
            .collect()
    }
}

impl FromIterator<(String, String)> for RenameMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        RenameMap(iter.into_iter().collect())
    }
}

impl RenameMap {
    pub fn get(&self, old: &str) -> Option<&str> {
        self.0.get(old).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Rename columns in place. Strict: every key of `map` must name an existing
/// column, otherwise nothing is renamed and all missing keys are reported.
///
/// Renames are applied simultaneously, so `a → b, b → a` swaps the two.
/// Row values and row order are untouched.
pub fn rename_columns(dataset: &mut Dataset, map: &RenameMap) -> Result<()> {
    let missing: Vec<String> = map
        .iter()
        .filter(|(old, _)| dataset.column_index(old).is_none())
        .map(|(old, _)| old.to_string())
        .collect();
    if !missing.is_empty() {
        log::error!("rename keys missing from dataset: {missing:?}");
        return Err(SampleError::Schema { missing });
    }

    for col in &mut dataset.columns {
        if let Some(new) = map.get(&col.name) {
            log::debug!("renaming column {:?} -> {:?}", col.name, new);
            col.name = new.to_string();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(names: &[&str]) -> Dataset {
        let row: Vec<String> = (0..names.len()).map(|i| i.to_string()).collect();
        Dataset::from_records(names.iter().map(|s| s.to_string()).collect(), vec![row])
    }

    fn map(pairs: &[(&str, &str)]) -> RenameMap {
        pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn default_map_covers_gaia_columns() {
        let mut ds = dataset(&[
            "Source", "BP-RP", "BP-G", "G-RP", "Teff", "Lum-Flame", "Mass-Flame",
            "Age-Flame", "z-Flame", "SpType-ELS",
        ]);
        rename_columns(&mut ds, &RenameMap::default()).unwrap();

        let names: Vec<&str> = ds.column_names().collect();
        assert_eq!(
            names,
            vec![
                "Source", "BR_RP", "BP_G", "G_RP", "Teff", "Lum_Flame", "Mass_Flame",
                "Age_Flame", "z_Flame", "SpType_ELS",
            ]
        );
        assert_eq!(ds.rows[0].fields[1], "1");
    }

    #[test]
    fn missing_keys_fail_without_renaming() {
        let mut ds = dataset(&["BP-G", "G-RP"]);
        let before = ds.clone();

        let err = rename_columns(&mut ds, &map(&[("BP-RP", "BR_RP"), ("BP-G", "BP_G")])).unwrap_err();
        match err {
            SampleError::Schema { missing } => assert_eq!(missing, vec!["BP-RP"]),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ds, before);
    }

    #[test]
    fn renaming_twice_is_a_schema_error() {
        let mut ds = dataset(&["BP-RP"]);
        let m = map(&[("BP-RP", "BR_RP")]);
        rename_columns(&mut ds, &m).unwrap();
        assert!(matches!(
            rename_columns(&mut ds, &m),
            Err(SampleError::Schema { .. })
        ));
    }

    #[test]
    fn renames_are_simultaneous() {
        let mut ds = dataset(&["a", "b"]);
        rename_columns(&mut ds, &map(&[("a", "b"), ("b", "a")])).unwrap();
        let names: Vec<&str> = ds.column_names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn deserializes_from_json_object() {
        let m: RenameMap = serde_json::from_str(r#"{"G-RP": "G_RP"}"#).unwrap();
        assert_eq!(m.get("G-RP"), Some("G_RP"));
        assert_eq!(m.len(), 1);
    }
}
