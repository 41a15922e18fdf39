//! Script section: the page's `data()` with one style object per styled
//! component.

use miniapp_core::{walk, Page, StyleMap};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value};

use super::markup::style_binding_name;
use crate::value::css_property_name;

/// Indentation for component style objects inside `data()`.
const COMPONENT_STYLE_INDENT: &[u8] = b"        ";
/// Indentation for the page style object.
const PAGE_STYLE_INDENT: &[u8] = b"      ";

/// Convert a style map into a CSS property object.
///
/// Keys are hyphenated, `null` and empty-string values are dropped, and
/// integral floats are written as integers.
pub fn css_object(style: &StyleMap) -> Map<String, Value> {
    style
        .iter()
        .filter(|(_, value)| !matches!(value, Value::Null) && !matches!(value, Value::String(s) if s.is_empty()))
        .map(|(key, value)| (css_property_name(key), integral(value)))
        .collect()
}

fn integral(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
                Value::Number(Number::from(f as i64))
            }
            _ => value.clone(),
        },
        other => other.clone(),
    }
}

/// Pretty-print with a fixed indent unit, starting at column zero.
fn pretty(value: &Map<String, Value>, indent: &[u8]) -> String {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    // Serializing a map of JSON values into memory cannot fail.
    if value.serialize(&mut ser).is_err() {
        return "{}".to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| "{}".to_string())
}

/// Render the script section for a page.
pub fn page_script(page: &Page) -> String {
    let component_styles = walk(&page.components)
        .filter(|component| component.has_style())
        .map(|component| {
            format!(
                "      {}: {}",
                style_binding_name(component),
                pretty(&css_object(&component.style), COMPONENT_STYLE_INDENT)
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    let page_style = page
        .global_style
        .as_ref()
        .map(|style| {
            format!(
                "      pageStyle: {},\n",
                pretty(&css_object(style), PAGE_STYLE_INDENT)
            )
        })
        .unwrap_or_default();

    let component_styles = if component_styles.is_empty() {
        component_styles
    } else {
        component_styles + "\n"
    };

    format!(
        "export default {{\n  data() {{\n    return {{\n{page_style}{component_styles}    }}\n  }},\n  onLoad() {{\n    console.log('页面加载')\n  }}\n}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniapp_core::{Component, ComponentKind};
    use serde_json::json;

    #[test]
    fn test_css_object_converts_and_filters() {
        let mut style = StyleMap::new();
        style.insert("backgroundColor".into(), json!("#fff"));
        style.insert("fontSize".into(), json!(14));
        style.insert("margin".into(), json!(""));
        style.insert("padding".into(), json!(null));
        style.insert("lineHeight".into(), json!(1.5));
        style.insert("zIndex".into(), json!(2.0));

        let css = css_object(&style);
        assert_eq!(
            Value::Object(css),
            json!({
                "background-color": "#fff",
                "font-size": 14,
                "line-height": 1.5,
                "z-index": 2
            })
        );
    }

    #[test]
    fn test_css_object_drops_unset_keys() {
        let mut style = StyleMap::new();
        style.insert("backgroundColor".into(), json!("#fff"));
        style.insert("color".into(), Value::Null);
        assert_eq!(
            serde_json::to_string(&css_object(&style)).unwrap(),
            r##"{"background-color":"#fff"}"##
        );
    }

    #[test]
    fn test_empty_page_script() {
        let page = Page::new("p", "Home", "/home");
        insta::assert_snapshot!(page_script(&page), @r###"
        export default {
          data() {
            return {
            }
          },
          onLoad() {
            console.log('页面加载')
          }
        }
        "###);
    }

    #[test]
    fn test_script_with_page_and_component_styles() {
        let mut page_style = StyleMap::new();
        page_style.insert("backgroundColor".into(), json!("#f5f5f5"));
        let page = Page::new("p", "Home", "/home")
            .with_global_style(page_style)
            .with_component(
                Component::new("c1", ComponentKind::Text)
                    .with_style("fontSize", "16px")
                    .with_style("color", "#333"),
            )
            .with_component(Component::new("c2", ComponentKind::Button));

        insta::assert_snapshot!(page_script(&page), @r###"
        export default {
          data() {
            return {
              pageStyle: {
              "background-color": "#f5f5f5"
        },
              component_c1_style: {
                "font-size": "16px",
                "color": "#333"
        }
            }
          },
          onLoad() {
            console.log('页面加载')
          }
        }
        "###);
    }

    #[test]
    fn test_nested_component_styles_are_included() {
        let page = Page::new("p", "Home", "/home").with_component(
            Component::new("outer", ComponentKind::View)
                .with_style("padding", "10px")
                .with_child(Component::new("inner", ComponentKind::Text).with_style("color", "red")),
        );
        let script = page_script(&page);
        let outer = script.find("component_outer_style").unwrap();
        let inner = script.find("component_inner_style").unwrap();
        assert!(outer < inner);
        assert!(script.contains("},\n      component_inner_style: {"));
    }

    #[test]
    fn test_styled_component_with_only_empty_values() {
        let page = Page::new("p", "Home", "/home")
            .with_component(Component::new("c", ComponentKind::Text).with_style("color", ""));
        assert!(page_script(&page).contains("      component_c_style: {}\n    }"));
    }
}
