use std::path::Path;

use refract_core::{deserialize, generate_json_schema, Element};

use crate::commands::refract::convert_file;
use crate::load_json;

fn render(element: &Element) -> Result<serde_json::Value, String> {
    generate_json_schema(element).map_err(|e| format!("schema generation failed: {}", e))
}

pub(crate) fn cmd_schema(file: &Path) -> Result<serde_json::Value, String> {
    let element = deserialize(&load_json(file)?)
        .map_err(|e| format!("invalid Refract element in '{}': {}", file.display(), e))?;
    render(&element)
}

pub(crate) fn cmd_convert_schema(file: &Path) -> Result<serde_json::Value, String> {
    render(&convert_file(file)?)
}
