//! Template (markup) section of a page document.

use miniapp_core::{Component, ComponentKind, Page, PropMap};
use serde_json::Value;

use crate::value::{is_number, is_str, is_truthy, js_string};

/// A literal default an attribute is compared against.
#[derive(Debug, Clone, Copy)]
enum Preset {
    Str(&'static str),
    Num(f64),
}

impl Preset {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Str(s) => is_str(value, s),
            Self::Num(n) => is_number(value, n),
        }
    }
}

/// How a prop turns into an attribute.
#[derive(Debug, Clone, Copy)]
enum Emit {
    /// `name="true"` when the prop is truthy.
    Flag,
    /// `name="false"` when the prop is falsy.
    InvertedFlag,
    /// `name="{value}"` when the prop is truthy.
    Value,
    /// `name="{value}"` when the prop is truthy and not the preset.
    ValueUnless(Preset),
}

#[derive(Debug, Clone, Copy)]
struct Attr {
    prop: &'static str,
    name: &'static str,
    emit: Emit,
}

const fn flag(prop: &'static str, name: &'static str) -> Attr {
    Attr { prop, name, emit: Emit::Flag }
}

const fn inverted(prop: &'static str, name: &'static str) -> Attr {
    Attr { prop, name, emit: Emit::InvertedFlag }
}

const fn value(prop: &'static str, name: &'static str) -> Attr {
    Attr { prop, name, emit: Emit::Value }
}

const fn unless_str(prop: &'static str, name: &'static str, preset: &'static str) -> Attr {
    Attr { prop, name, emit: Emit::ValueUnless(Preset::Str(preset)) }
}

const fn unless_num(prop: &'static str, name: &'static str, preset: f64) -> Attr {
    Attr { prop, name, emit: Emit::ValueUnless(Preset::Num(preset)) }
}

const TEXT_ATTRS: &[Attr] = &[flag("selectable", "selectable"), flag("decode", "decode")];

const IMAGE_ATTRS: &[Attr] = &[
    value("src", "src"),
    value("mode", "mode"),
    flag("lazyLoad", "lazy-load"),
    flag("showMenuByLongpress", "show-menu-by-longpress"),
];

const BUTTON_ATTRS: &[Attr] = &[
    unless_str("type", "type", "default"),
    unless_str("size", "size", "default"),
    flag("disabled", "disabled"),
    flag("loading", "loading"),
    value("formType", "form-type"),
    value("openType", "open-type"),
];

const INPUT_ATTRS: &[Attr] = &[
    unless_str("type", "type", "text"),
    value("placeholder", "placeholder"),
    value("value", "value"),
    flag("password", "password"),
    flag("disabled", "disabled"),
    unless_num("maxlength", "maxlength", 140.0),
    unless_str("confirmType", "confirm-type", "done"),
];

const NAVIGATOR_ATTRS: &[Attr] = &[
    value("url", "url"),
    unless_str("openType", "open-type", "navigate"),
];

const VIDEO_ATTRS: &[Attr] = &[
    value("src", "src"),
    value("poster", "poster"),
    flag("autoplay", "autoplay"),
    flag("loop", "loop"),
    flag("muted", "muted"),
    inverted("controls", "controls"),
    inverted("showFullscreenBtn", "show-fullscreen-btn"),
    inverted("showPlayBtn", "show-play-btn"),
    inverted("showCenterPlayBtn", "show-center-play-btn"),
];

const MAP_ATTRS: &[Attr] = &[
    value("longitude", "longitude"),
    value("latitude", "latitude"),
    unless_num("scale", "scale", 16.0),
    flag("showLocation", "show-location"),
    flag("showCompass", "show-compass"),
    flag("showScale", "show-scale"),
    flag("enableOverlooking", "enable-overlooking"),
    inverted("enableZoom", "enable-zoom"),
    inverted("enableScroll", "enable-scroll"),
    flag("enableRotate", "enable-rotate"),
];

fn render_attrs(props: &PropMap, attrs: &[Attr]) -> String {
    let mut out = String::new();
    for attr in attrs {
        let prop = props.get(attr.prop);
        let rendered = match attr.emit {
            Emit::Flag => is_truthy(prop).then(|| "true".to_string()),
            Emit::InvertedFlag => (!is_truthy(prop)).then(|| "false".to_string()),
            Emit::Value => prop.filter(|v| is_truthy(Some(*v))).map(js_string),
            Emit::ValueUnless(preset) => prop
                .filter(|v| is_truthy(Some(*v)) && !preset.matches(v))
                .map(js_string),
        };
        if let Some(rendered) = rendered {
            out.push_str(&format!(" {}=\"{}\"", attr.name, rendered));
        }
    }
    out
}

/// Truthy prop as text, or the placeholder.
fn text_or(props: &PropMap, key: &str, placeholder: &str) -> String {
    match props.get(key) {
        Some(v) if is_truthy(Some(v)) => js_string(v),
        _ => placeholder.to_string(),
    }
}

/// Name of the script-side data field holding a component's style object.
pub fn style_binding_name(component: &Component) -> String {
    format!("component_{}_style", component.id)
}

/// Render a page's markup: the page root view wrapping its components.
pub fn page_markup(page: &Page) -> String {
    let page_style = if page.global_style.is_some() {
        " :style=\"pageStyle\""
    } else {
        ""
    };
    let components = page
        .components
        .iter()
        .map(|component| component_markup(component, 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!("  <view class=\"page\"{page_style}>\n{components}\n  </view>")
}

/// Render one component at nesting level `indent` (two spaces per level,
/// plus one level for the page root).
pub fn component_markup(component: &Component, indent: usize) -> String {
    let spaces = "  ".repeat(indent + 1);
    let style = if component.has_style() {
        format!(" :style=\"{}\"", style_binding_name(component))
    } else {
        String::new()
    };
    let props = &component.props;

    match &component.kind {
        ComponentKind::View => {
            let children = component
                .children()
                .iter()
                .map(|child| component_markup(child, indent + 1))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{spaces}<view{style}>\n{children}\n{spaces}</view>")
        }
        ComponentKind::Text => format!(
            "{spaces}<text{}{style}>{}</text>",
            render_attrs(props, TEXT_ATTRS),
            text_or(props, "content", "文本内容")
        ),
        ComponentKind::Image => format!(
            "{spaces}<image{}{style}></image>",
            render_attrs(props, IMAGE_ATTRS)
        ),
        ComponentKind::Button => format!(
            "{spaces}<button{}{style}>{}</button>",
            render_attrs(props, BUTTON_ATTRS),
            text_or(props, "text", "按钮")
        ),
        ComponentKind::Input => format!(
            "{spaces}<input{}{style} />",
            render_attrs(props, INPUT_ATTRS)
        ),
        ComponentKind::Navigator => format!(
            "{spaces}<navigator{}{style}>{}</navigator>",
            render_attrs(props, NAVIGATOR_ATTRS),
            text_or(props, "text", "导航链接")
        ),
        ComponentKind::Video => format!(
            "{spaces}<video{}{style}></video>",
            render_attrs(props, VIDEO_ATTRS)
        ),
        ComponentKind::Map => format!(
            "{spaces}<map{}{style}></map>",
            render_attrs(props, MAP_ATTRS)
        ),
        ComponentKind::Unknown(name) => format!("{spaces}<!-- 未知组件类型: {name} -->"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniapp_core::StyleMap;
    use serde_json::json;

    fn markup(component: Component) -> String {
        component_markup(&component, 0)
    }

    #[test]
    fn test_text_defaults_and_flags() {
        let text = Component::new("t", ComponentKind::Text);
        assert_eq!(markup(text), "  <text>文本内容</text>");

        let text = Component::new("t", ComponentKind::Text)
            .with_prop("content", "Hi")
            .with_prop("selectable", true)
            .with_prop("decode", false);
        assert_eq!(markup(text), "  <text selectable=\"true\">Hi</text>");
    }

    #[test]
    fn test_style_binding_only_with_style() {
        let styled = Component::new("abc", ComponentKind::Image)
            .with_prop("src", "a.png")
            .with_style("width", "10px");
        assert_eq!(
            markup(styled),
            "  <image src=\"a.png\" :style=\"component_abc_style\"></image>"
        );
        let plain = Component::new("abc", ComponentKind::Image);
        assert_eq!(markup(plain), "  <image></image>");
    }

    #[test]
    fn test_button_skips_defaults() {
        let button = Component::new("b", ComponentKind::Button)
            .with_prop("type", "default")
            .with_prop("size", "mini")
            .with_prop("disabled", true)
            .with_prop("formType", "")
            .with_prop("openType", "share")
            .with_prop("text", "Go");
        assert_eq!(
            markup(button),
            "  <button size=\"mini\" disabled=\"true\" open-type=\"share\">Go</button>"
        );
        assert_eq!(
            markup(Component::new("b", ComponentKind::Button)),
            "  <button>按钮</button>"
        );
    }

    #[test]
    fn test_input_maxlength_default_is_omitted() {
        let default = Component::new("i", ComponentKind::Input).with_prop("maxlength", 140);
        assert_eq!(markup(default), "  <input />");

        let custom = Component::new("i", ComponentKind::Input)
            .with_prop("maxlength", 10)
            .with_prop("type", "number")
            .with_prop("confirmType", "done")
            .with_prop("placeholder", "Name");
        assert_eq!(
            markup(custom),
            "  <input type=\"number\" placeholder=\"Name\" maxlength=\"10\" />"
        );

        let stringly = Component::new("i", ComponentKind::Input).with_prop("maxlength", "140");
        assert_eq!(markup(stringly), "  <input maxlength=\"140\" />");
    }

    #[test]
    fn test_navigator() {
        let nav = Component::new("n", ComponentKind::Navigator)
            .with_prop("url", "/pages/a/a")
            .with_prop("openType", "navigate");
        assert_eq!(
            markup(nav),
            "  <navigator url=\"/pages/a/a\">导航链接</navigator>"
        );
        let redirect = Component::new("n", ComponentKind::Navigator)
            .with_prop("openType", "redirect")
            .with_prop("text", "Next");
        assert_eq!(
            markup(redirect),
            "  <navigator open-type=\"redirect\">Next</navigator>"
        );
    }

    #[test]
    fn test_video_inverted_flags() {
        let bare = Component::new("v", ComponentKind::Video);
        assert_eq!(
            markup(bare),
            "  <video controls=\"false\" show-fullscreen-btn=\"false\" show-play-btn=\"false\" show-center-play-btn=\"false\"></video>"
        );

        let controlled = Component::new("v", ComponentKind::Video)
            .with_prop("src", "v.mp4")
            .with_prop("autoplay", true)
            .with_prop("controls", true)
            .with_prop("showFullscreenBtn", true)
            .with_prop("showPlayBtn", true)
            .with_prop("showCenterPlayBtn", true);
        assert_eq!(
            markup(controlled),
            "  <video src=\"v.mp4\" autoplay=\"true\"></video>"
        );
    }

    #[test]
    fn test_map_attributes() {
        let map = Component::new("m", ComponentKind::Map)
            .with_prop("longitude", 116.397477)
            .with_prop("latitude", 39.909652)
            .with_prop("scale", 16)
            .with_prop("showCompass", true)
            .with_prop("enableZoom", true)
            .with_prop("enableScroll", false);
        assert_eq!(
            markup(map),
            "  <map longitude=\"116.397477\" latitude=\"39.909652\" show-compass=\"true\" enable-scroll=\"false\"></map>"
        );
        let zoomed = Component::new("m", ComponentKind::Map)
            .with_prop("scale", 12)
            .with_prop("enableZoom", true)
            .with_prop("enableScroll", true);
        assert_eq!(markup(zoomed), "  <map scale=\"12\"></map>");
    }

    #[test]
    fn test_unknown_kind_renders_comment() {
        let odd = Component::new("x", ComponentKind::Unknown("swiper".into()));
        assert_eq!(component_markup(&odd, 2), "      <!-- 未知组件类型: swiper -->");
    }

    #[test]
    fn test_container_nests_children_one_level_deeper() {
        let view = Component::new("root", ComponentKind::View)
            .with_child(Component::new("a", ComponentKind::Text).with_prop("content", "A"))
            .with_child(Component::new("b", ComponentKind::Button).with_prop("text", "B"));
        let expected = [
            "    <view>",
            "      <text>A</text>",
            "      <button>B</button>",
            "    </view>",
        ]
        .join("\n");
        assert_eq!(component_markup(&view, 1), expected);
    }

    #[test]
    fn test_empty_container() {
        let view = Component::new("root", ComponentKind::View).with_style("padding", "10px");
        assert_eq!(
            markup(view),
            "  <view :style=\"component_root_style\">\n\n  </view>"
        );
    }

    #[test]
    fn test_page_markup_wrapper() {
        let page = Page::new("p", "Home", "/home")
            .with_component(Component::new("t", ComponentKind::Text).with_prop("content", "x"));
        assert_eq!(
            page_markup(&page),
            "  <view class=\"page\">\n    <text>x</text>\n  </view>"
        );

        let mut style = StyleMap::new();
        style.insert("backgroundColor".into(), json!("#eee"));
        let styled = Page::new("p", "Home", "/home").with_global_style(style);
        assert_eq!(
            page_markup(&styled),
            "  <view class=\"page\" :style=\"pageStyle\">\n\n  </view>"
        );
    }
}
