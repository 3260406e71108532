use wasm_bindgen::prelude::*;
use watershed_core::{parse_elevation_map, watersheds_with, BasinReport, WatershedConfig};

/// Parse inputs and resolve basins; shared by the JS entry point and tests.
fn report_from_json(elevation_json: &str, config_json: Option<&str>) -> anyhow::Result<BasinReport<f64>> {
    let config = match config_json {
        Some(json) => WatershedConfig::from_json(json)?,
        None => WatershedConfig::default(),
    };
    let rows = parse_elevation_map(elevation_json)?;
    Ok(watersheds_with(&rows, &config)?.report())
}

/// Label the drainage basins of a JSON elevation map (array of rows).
///
/// Returns `{ width, height, labels, basins }`; rendering is up to the page.
/// `config_json` is an optional `WatershedConfig`, e.g. `{"label_policy":"alphabet"}`.
#[wasm_bindgen]
pub fn watersheds(elevation_json: &str, config_json: Option<String>) -> Result<JsValue, JsValue> {
    let report = report_from_json(elevation_json, config_json.as_deref())
        .map_err(|e| JsValue::from_str(&format!("Error: {e}")))?;
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}
