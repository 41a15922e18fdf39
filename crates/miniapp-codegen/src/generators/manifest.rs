//! App-level descriptors: `manifest.json` and `pages.json`.

use miniapp_core::Project;
use serde_json::{json, Value};

use crate::value::non_empty;

const DEFAULT_PRIMARY: &str = "#007aff";
const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Page path as registered in `pages.json`: the route with one leading `/`
/// removed.
pub fn route_path(route: &str) -> &str {
    route.strip_prefix('/').unwrap_or(route)
}

/// Build the app manifest.
pub fn manifest(project: &Project) -> Value {
    json!({
        "name": project.name,
        "appid": "",
        "description": project.description.as_deref().unwrap_or(""),
        "versionName": "1.0.0",
        "versionCode": 1,
        "transformPx": false,
        "app-plus": {
            "usingComponents": true,
            "nvueStyleCompiler": "uni-app",
            "compilerVersion": 3,
            "splashscreen": {
                "alwaysShowBeforeRender": true,
                "waiting": true,
                "autoclose": true,
                "delay": 0
            },
            "modules": {},
            "distribute": {
                "android": {
                    "permissions": []
                },
                "ios": {},
                "sdkConfigs": {}
            }
        },
        "quickapp": {},
        "mp-weixin": {
            "appid": "",
            "setting": {
                "urlCheck": false,
                "es6": true,
                "enhance": true,
                "postcss": true,
                "preloadBackgroundData": false,
                "minified": true,
                "newFeature": true,
                "coverView": true,
                "nodeModules": false,
                "autoAudits": false,
                "showShadowRootInWxmlPanel": true,
                "scopeDataCheck": false,
                "uglifyFileName": false,
                "checkInvalidKey": true,
                "checkSiteMap": true,
                "uploadWithSourceMap": true,
                "compileHotReLoad": false,
                "lazyloadPlaceholderEnable": false,
                "useMultiFrameRuntime": true,
                "useApiHook": true,
                "useApiHostProcess": true,
                "babelSetting": {
                    "ignore": [],
                    "disablePlugins": [],
                    "outputPath": ""
                },
                "enableEngineNative": false,
                "useIsolateContext": true,
                "userConfirmedBundleSwitch": false,
                "packNpmManually": false,
                "packNpmRelationList": [],
                "minifyWXSS": true,
                "disableUseStrict": false,
                "minifyWXML": true,
                "showES6CompileOption": false,
                "useCompilerPlugins": false
            },
            "usingComponents": true
        },
        "vueVersion": "3"
    })
}

/// Build the page registry and window settings.
pub fn pages_json(project: &Project) -> Value {
    let primary = non_empty(project.primary_color()).unwrap_or(DEFAULT_PRIMARY);
    let background = non_empty(project.background_color()).unwrap_or(DEFAULT_BACKGROUND);

    let pages: Vec<Value> = project
        .pages
        .iter()
        .map(|page| {
            json!({
                "path": route_path(&page.route),
                "style": {
                    "navigationBarTitleText": page.name,
                    "backgroundColor": background,
                    "navigationBarBackgroundColor": primary
                }
            })
        })
        .collect();

    json!({
        "pages": pages,
        "globalStyle": {
            "navigationBarTextStyle": "black",
            "navigationBarTitleText": project.name,
            "navigationBarBackgroundColor": primary,
            "backgroundColor": background
        },
        "uniIdRouter": {},
        "easycom": {
            "autoscan": true,
            "custom": {}
        }
    })
}
