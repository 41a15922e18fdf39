//! Store configuration.

use miniapp_core::{Project, Theme};
use serde::{Deserialize, Serialize};

/// Initial project settings for a fresh store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    pub project_id: String,
    pub project_name: String,
    pub description: Option<String>,
    pub theme: Theme,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: "default-project".to_string(),
            project_name: "微信小程序项目".to_string(),
            description: Some("通过拖拽生成的微信小程序".to_string()),
            theme: Theme {
                primary_color: Some("#07c160".to_string()),
                background_color: Some("#ffffff".to_string()),
            },
        }
    }
}

impl StoreConfig {
    /// Build the empty project this configuration describes.
    pub fn into_project(self) -> Project {
        Project {
            id: self.project_id,
            name: self.project_name,
            description: self.description,
            pages: Vec::new(),
            theme: Some(self.theme),
        }
    }
}
