use std::path::Path;

use refract_core::mson::DataStructure;
use refract_core::{data_structure_to_refract, serialize, Element};

use crate::load_json;

/// Read an MSON data structure from `file`.
pub(crate) fn load_data_structure(file: &Path) -> Result<DataStructure, String> {
    serde_json::from_value(load_json(file)?)
        .map_err(|e| format!("invalid MSON data structure in '{}': {}", file.display(), e))
}

pub(crate) fn convert_file(file: &Path) -> Result<Element, String> {
    let ds = load_data_structure(file)?;
    data_structure_to_refract(&ds).map_err(|e| format!("conversion failed: {}", e))
}

pub(crate) fn cmd_refract(file: &Path) -> Result<serde_json::Value, String> {
    convert_file(file).map(|element| serialize(&element))
}
