//! WebAssembly bindings for the mini-program page builder.
//!
//! The hosting web UI drives a [`MiniappEditor`]: it issues mutations as the
//! user drags and edits components, then calls `generate()` to obtain the
//! uni-app bundle.
//!
//! ## Example
//!
//! ```js
//! import { MiniappEditor } from 'miniapp-wasm';
//!
//! const editor = new MiniappEditor();
//! editor.addPage({ name: 'Home', route: '/pages/index/index' });
//! const text = editor.addComponent({ type: 'text', name: 'Title', props: { content: 'Hi' }, style: {} });
//! editor.setSelectedComponent(text.id);
//!
//! const bundle = editor.generate();
//! console.log(bundle.pages[0].document);
//! ```

use miniapp_codegen::{CodegenOptions, GeneratedBundle};
use miniapp_core::{ComponentTemplate, PageDraft, Palette};
use miniapp_store::{ComponentPatch, EditorStore, StoreConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

mod types;

pub use types::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    // Plain objects rather than ES Maps for prop/style maps.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// The editor store exposed to JavaScript.
#[wasm_bindgen]
pub struct MiniappEditor {
    store: EditorStore,
    palette: Palette,
}

#[wasm_bindgen]
impl MiniappEditor {
    /// Create an editor with the default empty project.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            store: EditorStore::default(),
            palette: Palette::builtin().unwrap_or_default(),
        }
    }

    /// Create an editor from a store configuration object.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<MiniappEditor, JsError> {
        let config: StoreConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
        Ok(Self {
            store: EditorStore::new(config),
            ..Self::new()
        })
    }

    /// Get the version of the bindings.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// The whole project.
    #[wasm_bindgen(getter)]
    pub fn project(&self) -> Result<JsValue, JsError> {
        to_js(self.store.project())
    }

    /// Selection, hover and current page.
    #[wasm_bindgen(getter, js_name = editorState)]
    pub fn editor_state(&self) -> Result<JsValue, JsError> {
        to_js(self.store.editor_state())
    }

    #[wasm_bindgen(getter, js_name = dragState)]
    pub fn drag_state(&self) -> Result<JsValue, JsError> {
        to_js(&DragStateJs::from(self.store.drag_state()))
    }

    #[wasm_bindgen(getter, js_name = currentPage)]
    pub fn current_page(&self) -> Result<JsValue, JsError> {
        to_js(&self.store.current_page())
    }

    #[wasm_bindgen(getter, js_name = currentPageComponents)]
    pub fn current_page_components(&self) -> Result<JsValue, JsError> {
        to_js(self.store.current_page_components())
    }

    #[wasm_bindgen(getter, js_name = selectedComponent)]
    pub fn selected_component(&self) -> Result<JsValue, JsError> {
        to_js(&self.store.selected_component())
    }

    /// Find a component on the current page; `null` when absent.
    #[wasm_bindgen(js_name = findComponent)]
    pub fn find_component(&self, id: &str) -> Result<JsValue, JsError> {
        to_js(&self.store.find_component(id))
    }

    /// Add a page from a partial page object (`name`, `route`, ...).
    #[wasm_bindgen(js_name = addPage)]
    pub fn add_page(&mut self, draft: JsValue) -> Result<JsValue, JsError> {
        let draft: PageDraft = if draft.is_undefined() || draft.is_null() {
            PageDraft::default()
        } else {
            serde_wasm_bindgen::from_value(draft)
                .map_err(|e| JsError::new(&format!("Invalid page: {}", e)))?
        };
        to_js(self.store.add_page(draft))
    }

    /// Add a page from a JSON string. Returns the new page id.
    #[wasm_bindgen(js_name = addPageFromString)]
    pub fn add_page_from_string(&mut self, json: &str) -> Result<String, JsError> {
        let draft: PageDraft = serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Invalid JSON: {}", e)))?;
        Ok(self.store.add_page(draft).id.clone())
    }

    /// Remove a page. Returns whether it existed.
    #[wasm_bindgen(js_name = deletePage)]
    pub fn delete_page(&mut self, page_id: &str) -> bool {
        self.store.delete_page(page_id).is_some()
    }

    #[wasm_bindgen(js_name = setCurrentPage)]
    pub fn set_current_page(&mut self, page_id: &str) {
        self.store.set_current_page(page_id);
    }

    /// Insert a component built from a template object. Returns the new
    /// component, or `null` when nothing was inserted.
    #[wasm_bindgen(js_name = addComponent)]
    pub fn add_component(
        &mut self,
        template: JsValue,
        parent_id: Option<String>,
    ) -> Result<JsValue, JsError> {
        let template: ComponentTemplate = serde_wasm_bindgen::from_value(template)
            .map_err(|e| JsError::new(&format!("Invalid component: {}", e)))?;
        to_js(&self.store.add_component(template, parent_id.as_deref()))
    }

    /// Insert a component from a JSON template. Returns the new id.
    #[wasm_bindgen(js_name = addComponentFromString)]
    pub fn add_component_from_string(
        &mut self,
        json: &str,
        parent_id: Option<String>,
    ) -> Result<Option<String>, JsError> {
        let template: ComponentTemplate = serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Invalid JSON: {}", e)))?;
        Ok(self
            .store
            .add_component(template, parent_id.as_deref())
            .map(|component| component.id.clone()))
    }

    /// Insert the palette's default template for a component type.
    #[wasm_bindgen(js_name = addFromPalette)]
    pub fn add_from_palette(
        &mut self,
        kind: &str,
        parent_id: Option<String>,
    ) -> Result<Option<String>, JsError> {
        let template = self
            .palette
            .get(kind)
            .map(|definition| definition.template())
            .ok_or_else(|| JsError::new(&format!("Unknown component type: {}", kind)))?;
        Ok(self
            .store
            .add_component(template, parent_id.as_deref())
            .map(|component| component.id.clone()))
    }

    /// Remove a component and its subtree. Returns whether it existed.
    #[wasm_bindgen(js_name = deleteComponent)]
    pub fn delete_component(&mut self, component_id: &str) -> bool {
        self.store.delete_component(component_id).is_some()
    }

    /// Apply a partial update object. Returns whether the component exists.
    #[wasm_bindgen(js_name = updateComponent)]
    pub fn update_component(&mut self, component_id: &str, patch: JsValue) -> Result<bool, JsError> {
        let patch: ComponentPatch = serde_wasm_bindgen::from_value(patch)
            .map_err(|e| JsError::new(&format!("Invalid update: {}", e)))?;
        Ok(self.store.update_component(component_id, patch).is_some())
    }

    /// Apply a partial update given as JSON.
    #[wasm_bindgen(js_name = updateComponentFromString)]
    pub fn update_component_from_string(&mut self, component_id: &str, json: &str) -> Result<bool, JsError> {
        let patch: ComponentPatch = serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Invalid JSON: {}", e)))?;
        Ok(self.store.update_component(component_id, patch).is_some())
    }

    #[wasm_bindgen(js_name = setSelectedComponent)]
    pub fn set_selected_component(&mut self, component_id: Option<String>) {
        self.store.set_selected_component(component_id);
    }

    #[wasm_bindgen(js_name = setHoveredComponent)]
    pub fn set_hovered_component(&mut self, component_id: Option<String>) {
        self.store.set_hovered_component(component_id);
    }

    /// Begin a drag of type `component` or `move`.
    #[wasm_bindgen(js_name = startDrag)]
    pub fn start_drag(&mut self, drag_type: &str, data: JsValue) -> Result<(), JsError> {
        let kind = parse_drag_kind(drag_type)
            .ok_or_else(|| JsError::new(&format!("Unknown drag type: {}", drag_type)))?;
        let data: serde_json::Value = if data.is_undefined() {
            serde_json::Value::Null
        } else {
            serde_wasm_bindgen::from_value(data)
                .map_err(|e| JsError::new(&format!("Invalid drag data: {}", e)))?
        };
        self.store.start_drag(kind, data);
        Ok(())
    }

    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) {
        self.store.end_drag();
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.store.drag_state().is_dragging()
    }

    /// Export the project as pretty-printed JSON.
    #[wasm_bindgen(js_name = exportProject)]
    pub fn export_project(&self) -> Result<String, JsError> {
        self.store
            .export_project()
            .map_err(|e| JsError::new(&format!("Export error: {}", e)))
    }

    /// Replace the project with one parsed from JSON. On failure nothing
    /// changes.
    #[wasm_bindgen(js_name = importProject)]
    pub fn import_project(&mut self, json: &str) -> Result<(), JsError> {
        self.store
            .import_project(json)
            .map_err(|e| JsError::new(&format!("Import error: {}", e)))
    }

    /// The component palette grouped by category.
    #[wasm_bindgen]
    pub fn palette(&self) -> Result<JsValue, JsError> {
        to_js(&self.palette.by_category())
    }

    /// Generate the uni-app bundle for the current project.
    #[wasm_bindgen]
    pub fn generate(&self) -> Result<JsValue, JsError> {
        to_js(&self.bundle())
    }

    /// Generate the bundle laid out as `{ path, content }` files.
    #[wasm_bindgen(js_name = generateFiles)]
    pub fn generate_files(&self, options: JsValue) -> Result<JsValue, JsError> {
        let options: CodegenOptions = if options.is_undefined() || options.is_null() {
            CodegenOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?
        };
        let files = self
            .bundle()
            .files(&options)
            .map_err(|e| JsError::new(&format!("Codegen error: {}", e)))?;
        to_js(&files)
    }

    /// Generate the bundle as a JSON string.
    #[wasm_bindgen(js_name = generateToString)]
    pub fn generate_to_string(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.bundle())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

impl MiniappEditor {
    fn bundle(&self) -> GeneratedBundle {
        miniapp_codegen::generate(self.store.project())
    }

    /// The underlying store.
    pub fn store(&self) -> &EditorStore {
        &self.store
    }
}

impl Default for MiniappEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a bundle from an exported project JSON string.
#[wasm_bindgen(js_name = generateProject)]
pub fn generate_project(json: &str) -> Result<String, JsError> {
    let project: miniapp_core::Project = serde_json::from_str(json)
        .map_err(|e| JsError::new(&format!("Invalid project: {}", e)))?;
    serde_json::to_string(&miniapp_codegen::generate(&project))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get the bindings version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniapp_store::{DragKind, DragState};
    use serde_json::json;

    #[test]
    fn test_editor_new() {
        let editor = MiniappEditor::new();
        assert!(editor.store().project().pages.is_empty());
        assert_eq!(editor.palette.len(), 8);
    }

    #[test]
    fn test_string_api_round_trip() {
        let mut editor = MiniappEditor::new();
        let page_id = editor
            .add_page_from_string(r#"{"name": "Home", "route": "/pages/index/index"}"#)
            .unwrap();
        assert_eq!(editor.store().current_page_id(), Some(page_id.as_str()));

        let container = editor.add_from_palette("view", None).unwrap().unwrap();
        let child = editor
            .add_component_from_string(
                r#"{"type": "text", "name": "Title", "props": {"content": "Hi"}, "style": {}}"#,
                Some(container.clone()),
            )
            .unwrap()
            .unwrap();
        assert!(editor.store().find_component(&child).is_some());

        assert!(editor
            .update_component_from_string(&child, r#"{"name": "Heading"}"#)
            .unwrap());
        assert_eq!(editor.store().find_component(&child).unwrap().name, "Heading");

        let exported = editor.export_project().unwrap();
        let mut other = MiniappEditor::new();
        other.import_project(&exported).unwrap();
        assert_eq!(other.store().project(), editor.store().project());
    }

    #[test]
    fn test_dangling_parent_inserts_nothing() {
        let mut editor = MiniappEditor::new();
        editor.add_page_from_string("{}").unwrap();
        let added = editor
            .add_component_from_string(r#"{"type": "text", "name": "T"}"#, Some("missing".into()))
            .unwrap();
        assert!(added.is_none());
        assert!(editor.store().current_page_components().is_empty());
    }

    #[test]
    fn test_delete_and_flags() {
        let mut editor = MiniappEditor::new();
        let page = editor.add_page_from_string("{}").unwrap();
        let id = editor.add_from_palette("button", None).unwrap().unwrap();
        editor.set_selected_component(Some(id.clone()));
        assert!(editor.delete_component(&id));
        assert!(!editor.delete_component(&id));
        assert!(editor.store().editor_state().selected_component_id.is_none());
        assert!(editor.delete_page(&page));
        assert!(!editor.delete_page(&page));
        editor.end_drag();
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_generate_to_string() {
        let mut editor = MiniappEditor::new();
        editor
            .add_page_from_string(r#"{"name": "Home", "route": "/pages/index/index"}"#)
            .unwrap();
        let bundle: serde_json::Value = serde_json::from_str(&editor.generate_to_string().unwrap()).unwrap();
        assert_eq!(bundle["pagesJson"]["pages"][0]["path"], "pages/index/index");
        assert_eq!(bundle["manifest"]["name"], "微信小程序项目");
    }

    #[test]
    fn test_generate_project_standalone() {
        let project = json!({
            "id": "p",
            "name": "Demo",
            "pages": [{"id": "a", "name": "A", "route": "/a", "components": []}]
        });
        let out = generate_project(&project.to_string()).unwrap();
        assert!(out.contains("\"route\":\"/a\""));
    }

    #[test]
    fn test_drag_state_shape() {
        assert_eq!(parse_drag_kind("move"), Some(DragKind::Move));
        assert_eq!(parse_drag_kind("resize"), None);

        let idle = DragStateJs::from(&DragState::Idle);
        assert!(!idle.is_dragging);
        assert_eq!(idle.drag_type, None);

        let dragging = DragStateJs::from(&DragState::Dragging {
            kind: DragKind::Component,
            data: json!({"type": "text"}),
        });
        assert_eq!(
            serde_json::to_value(&dragging).unwrap(),
            json!({"isDragging": true, "dragType": "component", "dragData": {"type": "text"}})
        );
    }

    #[test]
    fn test_version() {
        assert!(!MiniappEditor::version().is_empty());
    }
}
