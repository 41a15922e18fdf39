//! The editor store: single owner of the project tree and editor state.

use miniapp_core::{
    walk, Component, ComponentKind, ComponentTemplate, Page, PageDraft, Project, PropMap, StyleMap,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, trace, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::index::{node_at, node_at_mut, ComponentIndex};
use crate::state::{DragKind, DragState, EditorState};

/// Find the first component with `id` in any forest, depth-first with
/// parents before children and siblings in order.
pub fn find_component<'a>(forest: &'a [Component], id: &str) -> Option<&'a Component> {
    walk(forest).find(|component| component.id == id)
}

/// Shallow update of a component's own fields.
///
/// Supplied maps replace the component's maps wholesale; nothing is merged
/// key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ComponentKind>,
    pub props: Option<PropMap>,
    pub style: Option<StyleMap>,
    pub children: Option<Vec<Component>>,
    pub parent_id: Option<String>,
}

impl ComponentPatch {
    /// Replace the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the kind.
    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Replace the whole prop map.
    pub fn with_props(mut self, props: PropMap) -> Self {
        self.props = Some(props);
        self
    }

    /// Replace the whole style map.
    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = Some(style);
        self
    }

    /// Replace the child sequence.
    pub fn with_children(mut self, children: Vec<Component>) -> Self {
        self.children = Some(children);
        self
    }
}

/// Owns the project being edited plus the editor's selection and drag state.
///
/// All views (`current_page`, `selected_component`, ...) are computed on
/// every call from the current state.
#[derive(Debug, Clone)]
pub struct EditorStore {
    project: Project,
    editor: EditorState,
    drag: DragState,
    index: ComponentIndex,
    next_id: u64,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl EditorStore {
    /// Create a store holding the empty project described by `config`.
    pub fn new(config: StoreConfig) -> Self {
        Self::from_project(config.into_project())
    }

    /// Create a store around an existing project. Its first page becomes current.
    pub fn from_project(project: Project) -> Self {
        let index = ComponentIndex::build(&project);
        let editor = EditorState {
            current_page_id: project.pages.first().map(|page| page.id.clone()),
            ..EditorState::default()
        };
        Self {
            project,
            editor,
            drag: DragState::Idle,
            index,
            next_id: 0,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn editor_state(&self) -> &EditorState {
        &self.editor
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn current_page_id(&self) -> Option<&str> {
        self.editor.current_page_id.as_deref()
    }

    /// The current page, if one is set.
    pub fn current_page(&self) -> Option<&Page> {
        self.project.page(self.current_page_id()?)
    }

    /// Root components of the current page (empty without a current page).
    pub fn current_page_components(&self) -> &[Component] {
        self.current_page()
            .map(|page| page.components.as_slice())
            .unwrap_or(&[])
    }

    /// The selected component, if the selection resolves on the current page.
    pub fn selected_component(&self) -> Option<&Component> {
        self.find_component(self.editor.selected_component_id.as_deref()?)
    }

    /// Look up a component anywhere in the current page's tree.
    pub fn find_component(&self, id: &str) -> Option<&Component> {
        let page = self.current_page()?;
        let path = self.index.path(page, id)?;
        node_at(&page.components, &path)
    }

    fn current_page_index(&self) -> Option<usize> {
        let id = self.current_page_id()?;
        self.project.pages.iter().position(|page| page.id == id)
    }

    fn generate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("comp_{}", self.next_id);
            if !self.index.contains(&id) && self.project.page(&id).is_none() {
                return id;
            }
        }
    }

    /// Re-identify a detached forest so copies never share ids with the tree.
    fn assign_fresh_ids(&mut self, forest: &mut [Component], parent_id: Option<&str>) {
        for component in forest {
            let id = self.generate_id();
            component.id = id.clone();
            component.parent_id = parent_id.map(str::to_string);
            if let Some(children) = component.children.as_mut() {
                self.assign_fresh_ids(children, Some(&id));
            }
        }
    }

    /// Append a new page. Missing name and route default to `页面{n}` and
    /// `/page{n}`, `n` being the new page count. The page becomes current
    /// when no page was current.
    pub fn add_page(&mut self, draft: PageDraft) -> &Page {
        let number = self.project.pages.len() + 1;
        let id = self.generate_id();
        let mut components = draft.components.unwrap_or_default();
        self.assign_fresh_ids(&mut components, None);
        let page = Page {
            id: id.clone(),
            name: draft.name.unwrap_or_else(|| format!("页面{number}")),
            route: draft.route.unwrap_or_else(|| format!("/page{number}")),
            components,
            global_style: draft.global_style,
        };
        self.index.insert_forest(&id, None, &page.components);
        self.project.pages.push(page);
        debug!(page = %id, route = %self.project.pages[number - 1].route, "added page");

        if self.editor.current_page_id.is_none() {
            self.set_current_page(&id);
        }
        &self.project.pages[number - 1]
    }

    /// Remove a page. If it was current, the first remaining page takes over.
    pub fn delete_page(&mut self, page_id: &str) -> Option<Page> {
        let position = self.project.pages.iter().position(|page| page.id == page_id)?;
        let page = self.project.pages.remove(position);

        self.clear_references(|index, id| index.get(id).is_some_and(|slot| slot.page == page_id));
        self.index.remove_forest(&page.components);

        if self.current_page_id() == Some(page_id) {
            self.editor.current_page_id = self.project.pages.first().map(|p| p.id.clone());
        }
        debug!(page = %page_id, "deleted page");
        Some(page)
    }

    /// Switch pages. The selection is always cleared; unknown page ids leave
    /// the current page unchanged.
    pub fn set_current_page(&mut self, page_id: &str) {
        self.editor.selected_component_id = None;
        if self.project.page(page_id).is_none() {
            warn!(page = %page_id, "ignoring switch to unknown page");
            return;
        }
        self.editor.current_page_id = Some(page_id.to_string());
    }

    /// Insert a component built from `template` on the current page.
    ///
    /// With a `parent_id` the component is appended to that parent's
    /// children. When the parent cannot be found the component is dropped
    /// and `None` is returned.
    pub fn add_component(
        &mut self,
        template: ComponentTemplate,
        parent_id: Option<&str>,
    ) -> Option<&Component> {
        let page_index = self.current_page_index()?;
        let page_id = self.project.pages[page_index].id.clone();

        let parent_path = match parent_id {
            Some(parent) => match self.index.path(&self.project.pages[page_index], parent) {
                Some(path) => Some(path),
                None => {
                    warn!(parent = %parent, "parent component not found, dropping new component");
                    return None;
                }
            },
            None => None,
        };

        let id = self.generate_id();
        let mut component = template.into_component(id.clone(), parent_id.map(str::to_string));
        if let Some(children) = component.children.as_mut() {
            self.assign_fresh_ids(children, Some(&id));
        }

        let roots = &mut self.project.pages[page_index].components;
        let siblings = match &parent_path {
            Some(path) => node_at_mut(roots, path)?.children.get_or_insert_with(Vec::new),
            None => roots,
        };
        siblings.push(component);
        let position = siblings.len() - 1;
        self.index.insert(&page_id, parent_id, &siblings[position]);

        let mut path = parent_path.unwrap_or_default();
        path.push(position);
        debug!(component = %id, parent = ?parent_id, "added component");
        node_at(&self.project.pages[page_index].components, &path)
    }

    /// Remove a component and its subtree from the current page.
    pub fn delete_component(&mut self, component_id: &str) -> Option<Component> {
        let page_index = self.current_page_index()?;
        let path = self.index.path(&self.project.pages[page_index], component_id)?;
        let (position, parent_path) = path.split_last()?;

        let roots = &mut self.project.pages[page_index].components;
        let siblings = if parent_path.is_empty() {
            roots
        } else {
            node_at_mut(roots, parent_path)?.children.as_mut()?
        };
        let removed = siblings.remove(*position);

        self.clear_references(|index, id| index.is_within(id, component_id));
        self.index.remove_forest(std::slice::from_ref(&removed));
        debug!(component = %component_id, "deleted component");
        Some(removed)
    }

    /// Apply a shallow patch to a component on the current page.
    pub fn update_component(
        &mut self,
        component_id: &str,
        patch: ComponentPatch,
    ) -> Option<&Component> {
        let page_index = self.current_page_index()?;
        let path = self.index.path(&self.project.pages[page_index], component_id)?;

        let page = &mut self.project.pages[page_index];
        let component = node_at_mut(&mut page.components, &path)?;
        if let Some(name) = patch.name {
            component.name = name;
        }
        if let Some(kind) = patch.kind {
            component.kind = kind;
        }
        if let Some(props) = patch.props {
            component.props = props;
        }
        if let Some(style) = patch.style {
            component.style = style;
        }
        if let Some(parent_id) = patch.parent_id {
            component.parent_id = Some(parent_id);
        }
        if let Some(children) = patch.children {
            if let Some(old) = component.children.take() {
                self.index.remove_forest(&old);
            }
            self.index.insert_forest(&page.id, Some(component_id), &children);
            component.children = Some(children);
        }
        trace!(component = %component_id, "updated component");

        node_at(&self.project.pages[page_index].components, &path)
    }

    pub fn set_selected_component(&mut self, component_id: Option<String>) {
        self.editor.selected_component_id = component_id;
    }

    pub fn set_hovered_component(&mut self, component_id: Option<String>) {
        self.editor.hovered_component_id = component_id;
    }

    /// Begin a drag, replacing any drag already in progress.
    pub fn start_drag(&mut self, kind: DragKind, data: Value) {
        trace!(?kind, "drag started");
        self.drag = DragState::Dragging { kind, data };
    }

    /// Finish or cancel the current drag.
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Serialize the project as pretty-printed JSON.
    pub fn export_project(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.project).map_err(StoreError::Export)
    }

    /// Replace the project with one parsed from `json`.
    ///
    /// On success the first imported page becomes current and the
    /// selection is cleared. On failure nothing changes.
    pub fn import_project(&mut self, json: &str) -> Result<()> {
        let project: Project = match serde_json::from_str(json) {
            Ok(project) => project,
            Err(err) => {
                error!(error = %err, "failed to import project");
                return Err(StoreError::Import(err));
            }
        };

        self.index = ComponentIndex::build(&project);
        self.editor.current_page_id = project.pages.first().map(|page| page.id.clone());
        self.editor.selected_component_id = None;
        self.editor.hovered_component_id = None;
        debug!(project = %project.id, pages = project.pages.len(), "imported project");
        self.project = project;
        Ok(())
    }

    /// Clear selection and hover when they point at doomed components.
    fn clear_references(&mut self, doomed: impl Fn(&ComponentIndex, &str) -> bool) {
        let index = &self.index;
        let editor = &mut self.editor;
        if editor
            .selected_component_id
            .as_deref()
            .is_some_and(|id| doomed(index, id))
        {
            editor.selected_component_id = None;
        }
        if editor
            .hovered_component_id
            .as_deref()
            .is_some_and(|id| doomed(index, id))
        {
            editor.hovered_component_id = None;
        }
    }
}
