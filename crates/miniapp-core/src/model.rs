//! Project, page and component data model.
//!
//! The serialized shape matches the editor's project file format: camelCase
//! field names, `type` as the component discriminator, and optional fields
//! omitted when absent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Component properties: semantic content and behavior flags.
pub type PropMap = IndexMap<String, Value>;

/// Visual style keys (camelCase) mapped to string or numeric values.
pub type StyleMap = IndexMap<String, Value>;

/// The kind of a component node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    /// Container (`view`), the only kind that holds children.
    View,
    Text,
    Image,
    Button,
    Input,
    /// Navigation link (`navigator`).
    Navigator,
    Video,
    Map,
    /// Any type string outside the built-in set, kept verbatim.
    Unknown(String),
}

impl ComponentKind {
    /// The type string used in project files and as the markup tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::View => "view",
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Input => "input",
            Self::Navigator => "navigator",
            Self::Video => "video",
            Self::Map => "map",
            Self::Unknown(name) => name,
        }
    }

    /// Whether nodes of this kind render their children.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::View)
    }
}

impl From<&str> for ComponentKind {
    fn from(value: &str) -> Self {
        match value {
            "view" => Self::View,
            "text" => Self::Text,
            "image" => Self::Image,
            "button" => Self::Button,
            "input" => Self::Input,
            "navigator" => Self::Navigator,
            "video" => Self::Video,
            "map" => Self::Map,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ComponentKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Unknown(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a page's UI tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Unique across the whole project.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub name: String,
    #[serde(default)]
    pub props: PropMap,
    #[serde(default)]
    pub style: StyleMap,
    /// Child nodes, present once a child sequence has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
    /// Back reference to the parent. The tree structure is authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Component {
    /// Create a new component with empty props and style.
    pub fn new(id: impl Into<String>, kind: ComponentKind) -> Self {
        let kind_name = kind.as_str().to_string();
        Self {
            id: id.into(),
            kind,
            name: kind_name,
            props: PropMap::new(),
            style: StyleMap::new(),
            children: None,
            parent_id: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a property.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Add a style entry.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Append a child, creating the child sequence if needed.
    pub fn with_child(mut self, mut child: Component) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Children as a slice (empty when no child sequence exists).
    pub fn children(&self) -> &[Component] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Get a property value.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Whether the component carries any style entries.
    pub fn has_style(&self) -> bool {
        !self.style.is_empty()
    }
}

/// Depth-first, parent-before-children iterator over a component forest.
pub struct Walk<'a> {
    stack: Vec<std::slice::Iter<'a, Component>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(component) => {
                    self.stack.push(component.children().iter());
                    return Some(component);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Walk a forest in depth-first pre-order, siblings in order.
pub fn walk(forest: &[Component]) -> Walk<'_> {
    Walk {
        stack: vec![forest.iter()],
    }
}

/// Insertion input for a new component, usually taken from a palette entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTemplate {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub name: String,
    #[serde(default)]
    pub props: PropMap,
    #[serde(default)]
    pub style: StyleMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
}

impl ComponentTemplate {
    /// Create a template for the given kind, named after the kind.
    pub fn new(kind: ComponentKind) -> Self {
        let name = kind.as_str().to_string();
        Self {
            kind,
            name,
            props: PropMap::new(),
            style: StyleMap::new(),
            children: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a property.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Add a style entry.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Turn the template into a component with the given identity.
    pub fn into_component(self, id: String, parent_id: Option<String>) -> Component {
        Component {
            id,
            kind: self.kind,
            name: self.name,
            props: self.props,
            style: self.style,
            children: self.children,
            parent_id,
        }
    }
}

/// One screen of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    /// Route path, with or without a leading `/`.
    pub route: String,
    #[serde(default)]
    pub components: Vec<Component>,
    /// Page-level style overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_style: Option<StyleMap>,
}

impl Page {
    /// Create an empty page.
    pub fn new(id: impl Into<String>, name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            route: route.into(),
            components: Vec::new(),
            global_style: None,
        }
    }

    /// Append a root-level component.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Set the page-level style overrides.
    pub fn with_global_style(mut self, style: StyleMap) -> Self {
        self.global_style = Some(style);
        self
    }
}

/// Partial page configuration accepted by `add_page`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub components: Option<Vec<Component>>,
    #[serde(default)]
    pub global_style: Option<StyleMap>,
}

/// Project-wide colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// The whole application being authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Project {
    /// Create an empty project.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            pages: Vec::new(),
            theme: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Append a page.
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// Look up a page by id.
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    /// Theme primary color, if set.
    pub fn primary_color(&self) -> Option<&str> {
        self.theme.as_ref().and_then(|t| t.primary_color.as_deref())
    }

    /// Theme background color, if set.
    pub fn background_color(&self) -> Option<&str> {
        self.theme.as_ref().and_then(|t| t.background_color.as_deref())
    }
}
