//! Id index over the project's component trees.
//!
//! Each component is owned by its parent's child list (or a page's root
//! list). The index records, per id, the owning page and the structural
//! parent, so a lookup walks only the ancestor chain.

use std::collections::HashMap;

use miniapp_core::{walk, Component, Page, Project};

/// Where a component lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot {
    pub page: String,
    pub parent: Option<String>,
}

/// Mapping from component id to its slot.
#[derive(Debug, Clone, Default)]
pub(crate) struct ComponentIndex {
    slots: HashMap<String, Slot>,
}

impl ComponentIndex {
    /// Index every page of a project. The first depth-first occurrence of an id wins.
    pub fn build(project: &Project) -> Self {
        let mut index = Self::default();
        for page in &project.pages {
            index.insert_forest(&page.id, None, &page.components);
        }
        index
    }

    /// Index a forest attached under `parent` on `page`.
    pub fn insert_forest(&mut self, page: &str, parent: Option<&str>, forest: &[Component]) {
        for component in forest {
            self.insert(page, parent, component);
        }
    }

    /// Index a component and its descendants.
    pub fn insert(&mut self, page: &str, parent: Option<&str>, component: &Component) {
        self.slots.entry(component.id.clone()).or_insert_with(|| Slot {
            page: page.to_string(),
            parent: parent.map(str::to_string),
        });
        self.insert_forest(page, Some(&component.id), component.children());
    }

    /// Drop a forest and all its descendants from the index.
    pub fn remove_forest(&mut self, forest: &[Component]) {
        for component in walk(forest) {
            self.slots.remove(&component.id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Slot> {
        self.slots.get(id)
    }

    /// Child positions leading from `page`'s roots to `id`.
    pub fn path(&self, page: &Page, id: &str) -> Option<Vec<usize>> {
        let slot = self.slots.get(id)?;
        if slot.page != page.id {
            return None;
        }

        let mut chain = vec![id];
        let mut parent = slot.parent.as_deref();
        while let Some(parent_id) = parent {
            chain.push(parent_id);
            parent = self.slots.get(parent_id)?.parent.as_deref();
        }

        let mut path = Vec::with_capacity(chain.len());
        let mut forest = page.components.as_slice();
        for step in chain.iter().rev() {
            let position = forest.iter().position(|c| c.id == *step)?;
            path.push(position);
            forest = forest[position].children();
        }
        Some(path)
    }

    /// Whether `id` is `ancestor` or lies beneath it.
    pub fn is_within(&self, id: &str, ancestor: &str) -> bool {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.slots.get(candidate).and_then(|s| s.parent.as_deref());
        }
        false
    }
}

/// Resolve a path produced by [`ComponentIndex::path`].
pub(crate) fn node_at<'a>(forest: &'a [Component], path: &[usize]) -> Option<&'a Component> {
    let (first, rest) = path.split_first()?;
    let node = forest.get(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at(node.children(), rest)
    }
}

/// Mutable counterpart of [`node_at`].
pub(crate) fn node_at_mut<'a>(
    forest: &'a mut [Component],
    path: &[usize],
) -> Option<&'a mut Component> {
    let (first, rest) = path.split_first()?;
    let node = forest.get_mut(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at_mut(node.children.as_deref_mut()?, rest)
    }
}
