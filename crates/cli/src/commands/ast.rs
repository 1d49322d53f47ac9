use std::path::Path;

use refract_core::blueprint::Blueprint;
use refract_core::wrap_blueprint;

use crate::load_json;

pub(crate) fn cmd_ast(file: &Path) -> Result<serde_json::Value, String> {
    let blueprint: Blueprint = serde_json::from_value(load_json(file)?)
        .map_err(|e| format!("invalid blueprint in '{}': {}", file.display(), e))?;
    wrap_blueprint(&blueprint).map_err(|e| format!("serialization failed: {}", e))
}
