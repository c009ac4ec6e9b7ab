//! Saving and loading the export document to the drawings file.

use std::path::Path;

use bevy::prelude::*;

use super::events::LineToolAfterEdit;
use crate::api::LineToolsApi;
use crate::config::EngineConfig;
use crate::serialization::parse_import;

#[derive(Message)]
pub struct SaveDrawingsRequest;

#[derive(Message)]
pub struct LoadDrawingsRequest;

/// Last save/load failure, shown to the user until dismissed
#[derive(Resource, Default)]
pub struct DrawingsError {
    pub message: Option<String>,
}

/// Write the export document, creating the parent directory if needed.
pub fn write_drawings(path: &Path, json: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
}

/// Replace every tool with the contents of `json`. Nothing changes when the
/// document is not a valid export.
pub fn replace_drawings(api: &mut LineToolsApi, json: &str) -> Result<usize, String> {
    parse_import(json).map_err(|e| e.to_string())?;
    api.remove_all_line_tools();
    api.import_line_tools(json);
    Ok(api.tools().len())
}

pub fn request_initial_load(mut load_events: MessageWriter<LoadDrawingsRequest>) {
    load_events.write(LoadDrawingsRequest);
}

pub fn save_drawings_system(
    mut events: MessageReader<SaveDrawingsRequest>,
    api: Res<LineToolsApi>,
    config: Res<EngineConfig>,
    mut error: ResMut<DrawingsError>,
) {
    // Several requests in one frame write the same document once
    if events.read().count() == 0 {
        return;
    }

    let path = config.data.drawings_path();
    match write_drawings(&path, &api.export_line_tools()) {
        Ok(()) => info!("Saved {} drawing(s) to {:?}", api.tools().len(), path),
        Err(e) => {
            error!("Failed to save drawings to {:?}: {}", path, e);
            error.message = Some(format!("Could not save drawings: {}", e));
        }
    }
}

pub fn load_drawings_system(
    mut events: MessageReader<LoadDrawingsRequest>,
    mut api: ResMut<LineToolsApi>,
    config: Res<EngineConfig>,
    mut error: ResMut<DrawingsError>,
) {
    if events.read().count() == 0 {
        return;
    }

    let path = config.data.drawings_path();
    if !path.exists() {
        info!("No drawings file at {:?}", path);
        return;
    }

    let result = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| replace_drawings(&mut api, &json));
    match result {
        Ok(count) => info!("Loaded {} drawing(s) from {:?}", count, path),
        Err(e) => {
            warn!("Failed to load drawings from {:?}: {}", path, e);
            error.message = Some(format!("Could not load drawings: {}", e));
        }
    }
}

/// Save after finished edits when autosave is on.
pub fn autosave_system(
    mut edits: MessageReader<LineToolAfterEdit>,
    config: Res<EngineConfig>,
    mut save_events: MessageWriter<SaveDrawingsRequest>,
) {
    if edits.read().count() > 0 && config.data.autosave {
        save_events.write(SaveDrawingsRequest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogicalPoint;

    #[test]
    fn test_write_drawings_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!("chart-line-tools-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("drawings.json");
        write_drawings(&path, "[]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_replace_drawings_swaps_the_whole_set() {
        let mut source = LineToolsApi::default();
        source.add_line_tool("HorizontalLine", vec![LogicalPoint::new(1.0, 100.0)], None);
        let json = source.export_line_tools();

        let mut api = LineToolsApi::default();
        api.add_line_tool("VerticalLine", vec![LogicalPoint::new(2.0, 5.0)], None);
        assert_eq!(replace_drawings(&mut api, &json), Ok(1));
        assert_eq!(api.export_line_tools(), json);
    }

    #[test]
    fn test_invalid_document_keeps_existing_tools() {
        let mut api = LineToolsApi::default();
        api.add_line_tool("VerticalLine", vec![LogicalPoint::new(2.0, 5.0)], None);
        assert!(replace_drawings(&mut api, "{ \"not\": \"an array\" }").is_err());
        assert_eq!(api.tools().len(), 1);
    }
}
