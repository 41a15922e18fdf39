//! The component palette: selectable component kinds and their editable-field schemas.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::model::{ComponentKind, ComponentTemplate, PropMap, StyleMap};

const BUILTIN_PALETTE: &str = include_str!("palette.json");

/// Form control used to edit a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Input,
    Textarea,
    Number,
    Switch,
    Select,
    Color,
    Upload,
}

/// One choice of a `select` control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

/// Describes one editable property of a component kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSchema {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub control: ControlKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// A palette entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub category: String,
    #[serde(default)]
    pub default_props: PropMap,
    #[serde(default)]
    pub default_style: StyleMap,
    #[serde(default)]
    pub prop_schema: Vec<PropSchema>,
}

impl ComponentDefinition {
    /// Build the insertion template carrying this entry's defaults.
    pub fn template(&self) -> ComponentTemplate {
        ComponentTemplate {
            kind: self.kind.clone(),
            name: self.name.clone(),
            props: self.default_props.clone(),
            style: self.default_style.clone(),
            children: None,
        }
    }

    /// Schema entry for a property key.
    pub fn schema(&self, key: &str) -> Option<&PropSchema> {
        self.prop_schema.iter().find(|s| s.key == key)
    }
}

/// An ordered catalog of component definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    definitions: Vec<ComponentDefinition>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// The palette shipped with the builder.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_PALETTE)
    }

    /// Parse a palette from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<ComponentDefinition> = serde_json::from_str(json)?;
        Ok(Self { definitions })
    }

    /// Register a definition, replacing any entry with the same id.
    pub fn register(&mut self, definition: ComponentDefinition) {
        match self.definitions.iter_mut().find(|d| d.id == definition.id) {
            Some(slot) => *slot = definition,
            None => self.definitions.push(definition),
        }
    }

    /// First definition whose type matches.
    pub fn get(&self, kind: &str) -> Option<&ComponentDefinition> {
        self.definitions.iter().find(|d| d.kind.as_str() == kind)
    }

    /// Definitions grouped by category, categories in first-seen order.
    pub fn by_category(&self) -> IndexMap<&str, Vec<&ComponentDefinition>> {
        let mut groups: IndexMap<&str, Vec<&ComponentDefinition>> = IndexMap::new();
        for definition in &self.definitions {
            groups
                .entry(definition.category.as_str())
                .or_default()
                .push(definition);
        }
        groups
    }

    /// Iterate definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.iter()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_palette_covers_all_kinds() {
        let palette = Palette::builtin().unwrap();
        assert_eq!(palette.len(), 8);
        for kind in ["view", "text", "image", "button", "input", "navigator", "video", "map"] {
            let definition = palette.get(kind).unwrap();
            assert_eq!(definition.kind.as_str(), kind);
            assert!(!matches!(definition.kind, ComponentKind::Unknown(_)));
        }
    }

    #[test]
    fn test_categories_keep_catalog_order() {
        let palette = Palette::builtin().unwrap();
        let groups = palette.by_category();
        let names: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(names, ["基础组件", "表单组件", "导航组件", "媒体组件"]);
        assert_eq!(groups["基础组件"].len(), 3);
        assert_eq!(groups["媒体组件"].len(), 2);
    }

    #[test]
    fn test_template_carries_defaults() {
        let palette = Palette::builtin().unwrap();
        let template = palette.get("input").unwrap().template();
        assert_eq!(template.kind, ComponentKind::Input);
        assert_eq!(template.props["maxlength"], json!(140));
        assert_eq!(template.style["height"], json!("40px"));
        assert!(template.children.is_none());
    }

    #[test]
    fn test_schema_lookup() {
        let palette = Palette::builtin().unwrap();
        let button = palette.get("button").unwrap();
        let schema = button.schema("type").unwrap();
        assert_eq!(schema.control, ControlKind::Select);
        assert_eq!(schema.options.len(), 3);
        assert!(button.schema("missing").is_none());
    }

    #[test]
    fn test_register_replaces_by_id() {
        let mut palette = Palette::builtin().unwrap();
        let mut text = palette.get("text").unwrap().clone();
        text.name = "Label".into();
        palette.register(text);
        assert_eq!(palette.len(), 8);
        assert_eq!(palette.get("text").unwrap().name, "Label");
    }

    #[test]
    fn test_invalid_palette_json() {
        assert!(Palette::from_json("{not json").is_err());
        assert!(Palette::from_json("[]").unwrap().is_empty());
    }
}
