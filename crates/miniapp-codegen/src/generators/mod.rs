//! Code generators for mini-program targets.

mod manifest;
mod markup;
mod script;
mod style;
mod templates;

pub use manifest::{manifest, pages_json, route_path};
pub use markup::{component_markup, page_markup, style_binding_name};
pub use script::{css_object, page_script};
pub use style::{global_styles, page_style};
pub use templates::TemplateEngine;

use miniapp_core::{Page, Project};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{CodegenError, Result};

/// Common trait for code generators.
pub trait CodeGenerator {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Generate the source document for one page.
    fn generate_page(&self, page: &Page) -> GeneratedPage;

    /// Generate the full bundle for a project.
    fn generate(&self, project: &Project) -> GeneratedBundle;
}

/// Generator for uni-app single-file pages targeting WeChat mini-programs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniAppGenerator;

impl UniAppGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for UniAppGenerator {
    fn framework_name(&self) -> &'static str {
        "uni-app"
    }

    fn generate_page(&self, page: &Page) -> GeneratedPage {
        let document = format!(
            "<template>\n{}\n</template>\n\n<script>\n{}\n</script>\n\n<style>\n{}\n</style>",
            page_markup(page),
            page_script(page),
            page_style(page)
        );
        GeneratedPage {
            name: page.name.clone(),
            route: page.route.clone(),
            document,
        }
    }

    fn generate(&self, project: &Project) -> GeneratedBundle {
        debug!(
            framework = self.framework_name(),
            project = %project.id,
            pages = project.pages.len(),
            "generating bundle"
        );
        GeneratedBundle {
            manifest: manifest(project),
            pages_json: pages_json(project),
            pages: project.pages.iter().map(|page| self.generate_page(page)).collect(),
            global_styles: global_styles(project),
        }
    }
}

/// Generated source for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPage {
    pub name: String,
    pub route: String,
    /// Three-section single-file page: template, script, style.
    pub document: String,
}

/// Everything produced for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBundle {
    pub manifest: Value,
    pub pages_json: Value,
    pub pages: Vec<GeneratedPage>,
    pub global_styles: String,
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// File path relative to project root.
    pub path: String,
    /// File content.
    pub content: String,
}

/// Output file layout for [`GeneratedBundle::files`].
///
/// Each field is a Handlebars template. Page paths see `path` (the route
/// without its leading `/`), `route`, `name` and `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodegenOptions {
    pub manifest_path: String,
    pub pages_json_path: String,
    pub global_styles_path: String,
    pub page_path: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            manifest_path: "manifest.json".to_string(),
            pages_json_path: "pages.json".to_string(),
            global_styles_path: "common/global.css".to_string(),
            page_path: "{{path}}.vue".to_string(),
        }
    }
}

impl GeneratedBundle {
    /// Lay the bundle out as files.
    ///
    /// Fails when a path template is invalid or renders to a path that is
    /// empty, absolute, or climbs out of the output root.
    pub fn files(&self, options: &CodegenOptions) -> Result<Vec<GeneratedFile>> {
        let mut engine = TemplateEngine::new();
        engine.register_template("manifest", &options.manifest_path)?;
        engine.register_template("pages_json", &options.pages_json_path)?;
        engine.register_template("global_styles", &options.global_styles_path)?;
        engine.register_template("page", &options.page_path)?;

        let empty = json!({});
        let mut files = vec![
            GeneratedFile {
                path: checked_path(engine.render("manifest", &empty)?)?,
                content: serde_json::to_string_pretty(&self.manifest)?,
            },
            GeneratedFile {
                path: checked_path(engine.render("pages_json", &empty)?)?,
                content: serde_json::to_string_pretty(&self.pages_json)?,
            },
            GeneratedFile {
                path: checked_path(engine.render("global_styles", &empty)?)?,
                content: self.global_styles.clone(),
            },
        ];

        for (index, page) in self.pages.iter().enumerate() {
            let data = json!({
                "path": route_path(&page.route),
                "route": page.route,
                "name": page.name,
                "index": index,
            });
            files.push(GeneratedFile {
                path: checked_path(engine.render("page", &data)?)?,
                content: page.document.clone(),
            });
        }

        Ok(files)
    }
}

fn checked_path(path: String) -> Result<String> {
    let escapes = path.starts_with('/')
        || path.starts_with('\\')
        || path.split(['/', '\\']).any(|segment| segment == "..");
    if path.trim().is_empty() || escapes {
        return Err(CodegenError::InvalidPath(path));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniapp_core::{Component, ComponentKind, StyleMap, Theme};

    fn sample_project() -> Project {
        let mut page_style = StyleMap::new();
        page_style.insert("backgroundColor".into(), json!("#f5f5f5"));

        Project::new("proj", "Demo")
            .with_description("A demo")
            .with_theme(Theme {
                primary_color: Some("#07c160".into()),
                background_color: Some("#ffffff".into()),
            })
            .with_page(
                Page::new("p1", "首页", "/pages/index/index")
                    .with_global_style(page_style)
                    .with_component(
                        Component::new("comp_1", ComponentKind::Text)
                            .with_prop("content", "Hello")
                            .with_style("fontSize", "16px"),
                    )
                    .with_component(
                        Component::new("comp_2", ComponentKind::Button)
                            .with_prop("text", "Go")
                            .with_prop("type", "primary"),
                    ),
            )
            .with_page(Page::new("p2", "About", "pages/about/about"))
    }

    #[test]
    fn test_generate_bundle_shape() {
        let generator = UniAppGenerator::new();
        assert_eq!(generator.framework_name(), "uni-app");
        let bundle = generator.generate(&sample_project());
        assert_eq!(bundle.pages.len(), 2);
        assert_eq!(bundle.manifest["name"], "Demo");
        assert_eq!(bundle.pages_json["pages"][1]["path"], "pages/about/about");
        assert_eq!(bundle.pages[0].route, "/pages/index/index");
        assert!(bundle.global_styles.starts_with("/* 全局样式 */"));
    }

    #[test]
    fn test_page_document() {
        let project = sample_project();
        let page = UniAppGenerator::new().generate_page(&project.pages[0]);
        insta::assert_snapshot!(page.document, @r###"
        <template>
          <view class="page" :style="pageStyle">
            <text :style="component_comp_1_style">Hello</text>
            <button type="primary">Go</button>
          </view>
        </template>

        <script>
        export default {
          data() {
            return {
              pageStyle: {
              "background-color": "#f5f5f5"
        },
              component_comp_1_style: {
                "font-size": "16px"
        }
            }
          },
          onLoad() {
            console.log('页面加载')
          }
        }
        </script>

        <style>
        .page {
          min-height: 100vh;
        }

        /* 页面自定义样式 */
        </style>
        "###);
    }

    #[test]
    fn test_empty_page_document() {
        let page = UniAppGenerator::new().generate_page(&Page::new("p", "Blank", "/blank"));
        assert!(page
            .document
            .starts_with("<template>\n  <view class=\"page\">\n\n  </view>\n</template>"));
    }

    #[test]
    fn test_files_default_layout() {
        let bundle = UniAppGenerator::new().generate(&sample_project());
        let files = bundle.files(&CodegenOptions::default()).unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "manifest.json",
                "pages.json",
                "common/global.css",
                "pages/index/index.vue",
                "pages/about/about.vue"
            ]
        );
        assert!(files[0].content.starts_with("{\n  \"name\": \"Demo\""));
        assert_eq!(files[3].content, bundle.pages[0].document);
    }

    #[test]
    fn test_files_custom_page_template() {
        let bundle = UniAppGenerator::new().generate(&sample_project());
        let options = CodegenOptions {
            page_path: "src/{{path}}.vue".to_string(),
            ..CodegenOptions::default()
        };
        let files = bundle.files(&options).unwrap();
        assert_eq!(files[3].path, "src/pages/index/index.vue");
    }

    #[test]
    fn test_files_reject_escaping_paths() {
        let project = Project::new("p", "Demo").with_page(Page::new("a", "Evil", "/../../etc/x"));
        let bundle = UniAppGenerator::new().generate(&project);
        let err = bundle.files(&CodegenOptions::default()).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidPath(_)));

        let project = Project::new("p", "Demo").with_page(Page::new("a", "Root", "/"));
        let bundle = UniAppGenerator::new().generate(&project);
        assert!(bundle.files(&CodegenOptions::default()).is_ok());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: CodegenOptions = serde_json::from_str(r#"{"pagePath": "{{name}}.vue"}"#).unwrap();
        assert_eq!(options.page_path, "{{name}}.vue");
        assert_eq!(options.manifest_path, "manifest.json");
    }
}
