use contrib_heatmap::layout_dump::LayoutDump;
use contrib_heatmap::{HeatmapConfig, compute_layout, parse_data, resolve_theme};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Options accepted from JS. Field names follow the config file, plus
/// `today` as a shorthand for `referenceDate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeatmapRenderOptions {
    #[serde(flatten)]
    config: HeatmapConfig,
    today: Option<String>,
}

fn build_config(options_json: Option<&str>) -> Result<HeatmapConfig, String> {
    let Some(raw_options) = options_json else {
        return Ok(HeatmapConfig::default());
    };
    let options = serde_json::from_str::<HeatmapRenderOptions>(raw_options)
        .map_err(|error| error.to_string())?;
    let mut config = options.config;
    if let Some(today) = options.today {
        let date = today
            .parse()
            .map_err(|error| format!("invalid `today` {today:?}: {error}"))?;
        config.reference_date = Some(date);
    }
    Ok(config)
}

fn render(data_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let config = build_config(options_json)?;
    let data = parse_data(data_json).map_err(|error| error.to_string())?;
    contrib_heatmap::render_heatmap_svg(&data, &config).map_err(|error| error.to_string())
}

fn layout_json(data_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let config = build_config(options_json)?;
    let data = parse_data(data_json).map_err(|error| error.to_string())?;
    let theme = resolve_theme(&config).map_err(|error| error.to_string())?;
    let layout = compute_layout(&data, &theme, &config).map_err(|error| error.to_string())?;
    serde_json::to_string(&LayoutDump::from_layout(&layout, &theme)).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn render_heatmap_svg(data_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    render(data_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}

/// Render model as JSON, for callers that draw the grid themselves.
#[wasm_bindgen]
pub fn layout_heatmap_json(data_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_json(data_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}
