//! Derives the renderer parameter set for one plant record.

use super::config::{
    ENABLE_HANGING_HOLES, LABEL_HEIGHT, LABEL_WIDTH, LIGHT_TYPE, NICKNAME, PLANT_NAME,
    RenderConfig, RenderParameterSet, SCIENTIFIC_NAME, SHOW_DRY_SOIL_SYMBOL, SPIKE_ENABLED,
    WATER_DROPS,
};
use super::nickname::extract_nickname;
use super::value::ParamValue;
use crate::record::PlantRecord;

/// Name and nickname as printed on the label.
///
/// An explicit nickname is used as-is with the common name untouched;
/// otherwise the nickname is pulled out of quotes in the common name.
pub fn label_names(record: &PlantRecord) -> (String, String) {
    if record.nickname.is_empty() {
        extract_nickname(&record.common_name)
    } else {
        (record.common_name.clone(), record.nickname.clone())
    }
}

/// Build the full parameter set for a record.
///
/// Starts from the configured globals and then writes the record's identity
/// and care values, which always win for those keys. Pure: the same record
/// and config give the same set.
pub fn derive(record: &PlantRecord, config: &RenderConfig) -> RenderParameterSet {
    let mut params = config.base().clone();
    let (plant_name, nickname) = label_names(record);

    params.insert(PLANT_NAME, ParamValue::Text(plant_name));
    params.insert(
        SCIENTIFIC_NAME,
        ParamValue::Text(record.scientific_name.clone()),
    );
    params.insert(NICKNAME, ParamValue::Text(nickname));
    params.insert(WATER_DROPS, ParamValue::Integer(i64::from(record.water_level)));
    params.insert(LIGHT_TYPE, ParamValue::Integer(i64::from(record.light_level)));
    params.insert(
        SHOW_DRY_SOIL_SYMBOL,
        ParamValue::Bool(record.dry_between_waterings),
    );
    params.insert(SPIKE_ENABLED, ParamValue::Bool(record.has_spike));
    params.insert(ENABLE_HANGING_HOLES, ParamValue::Bool(record.has_holes));
    params.insert(LABEL_WIDTH, ParamValue::Number(record.width_mm));
    params.insert(LABEL_HEIGHT, ParamValue::Number(record.height_mm));

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(common_name: &str, nickname: &str) -> PlantRecord {
        PlantRecord {
            row: 1,
            common_name: common_name.to_string(),
            scientific_name: "Maranta leuconeura".to_string(),
            nickname: nickname.to_string(),
            water_level: 3,
            light_level: 2,
            dry_between_waterings: true,
            has_spike: false,
            has_holes: true,
            width_mm: 80.0,
            height_mm: 30.0,
        }
    }

    fn text(value: &str) -> ParamValue {
        ParamValue::Text(value.to_string())
    }

    #[test]
    fn test_derive_from_quoted_name() {
        let params = derive(&record("Maranta 'Lemon Lime'", ""), &RenderConfig::new());

        assert_eq!(params.get(PLANT_NAME), Some(&text("Maranta")));
        assert_eq!(params.get(NICKNAME), Some(&text("Lemon Lime")));
        assert_eq!(params.get(WATER_DROPS), Some(&ParamValue::Integer(3)));
        assert_eq!(params.get(LIGHT_TYPE), Some(&ParamValue::Integer(2)));
        assert_eq!(params.get(SHOW_DRY_SOIL_SYMBOL), Some(&ParamValue::Bool(true)));
        assert_eq!(params.get(SPIKE_ENABLED), Some(&ParamValue::Bool(false)));
        assert_eq!(params.get(ENABLE_HANGING_HOLES), Some(&ParamValue::Bool(true)));
        assert_eq!(params.get(LABEL_WIDTH), Some(&ParamValue::Number(80.0)));
        assert_eq!(params.get(LABEL_HEIGHT), Some(&ParamValue::Number(30.0)));
    }

    #[test]
    fn test_explicit_nickname_keeps_common_name() {
        let params = derive(&record("Maranta 'Lemon Lime'", "Lemony"), &RenderConfig::new());

        assert_eq!(params.get(PLANT_NAME), Some(&text("Maranta 'Lemon Lime'")));
        assert_eq!(params.get(NICKNAME), Some(&text("Lemony")));
    }

    #[test]
    fn test_record_values_beat_overrides() {
        let config = RenderConfig::builder()
            .set(LABEL_WIDTH, ParamValue::Number(120.0))
            .set(SPIKE_ENABLED, ParamValue::Bool(true))
            .set("font", text("Arial"))
            .build()
            .unwrap();
        let params = derive(&record("Fern", ""), &config);

        assert_eq!(params.get(LABEL_WIDTH), Some(&ParamValue::Number(80.0)));
        assert_eq!(params.get(SPIKE_ENABLED), Some(&ParamValue::Bool(false)));
        assert_eq!(params.get("font"), Some(&text("Arial")));
    }

    #[test]
    fn test_derive_is_deterministic() {
        let config = RenderConfig::new();
        let rec = record("Pothos \"Marble Queen\"", "");
        assert_eq!(derive(&rec, &config), derive(&rec, &config));
        assert_eq!(derive(&rec, &config).len(), config.base().len());
    }
}
