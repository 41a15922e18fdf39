//! Style sections: the per-page stylesheet and the shared global stylesheet.

use miniapp_core::{Page, Project};

use crate::value::non_empty;

const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Stylesheet for a single page. Identical for every page.
pub fn page_style(_page: &Page) -> String {
    ".page {\n  min-height: 100vh;\n}\n\n/* 页面自定义样式 */".to_string()
}

/// Shared stylesheet for the whole app.
pub fn global_styles(project: &Project) -> String {
    let background = non_empty(project.background_color()).unwrap_or(DEFAULT_BACKGROUND);
    format!(
        "/* 全局样式 */
page {{
  background-color: {background};
}}

/* 通用样式类 */
.container {{
  padding: 20px;
}}

.text-center {{
  text-align: center;
}}

.flex {{
  display: flex;
}}

.flex-center {{
  display: flex;
  justify-content: center;
  align-items: center;
}}"
    )
}
