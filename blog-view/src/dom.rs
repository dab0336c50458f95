use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement};

use crate::error::{js_error, ViewError};

/// 显示结果面板时添加的类名
pub const VISIBLE_CLASS: &str = "is-visible";
/// 隐藏"无结果"面板使用的类名
pub const HIDDEN_CLASS: &str = "d-none";

/// 当前页面
#[derive(Clone, Debug)]
pub struct Page {
    document: Document,
}

impl Page {
    pub fn current() -> Result<Self, ViewError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ViewError::NoDocument)?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// 按ID查找元素；不存在时记录并返回 None
    pub fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            debug!(id, "页面中没有该元素，跳过");
        }
        element
    }

    /// 必需的元素，不存在时返回错误
    pub fn require(&self, id: &str) -> Result<Element, ViewError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))
    }

    /// 必需的输入框
    pub fn require_input(&self, id: &str) -> Result<HtmlInputElement, ViewError> {
        self.require(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| ViewError::MissingElement(id.to_string()))
    }

    /// 读取 `<meta name="...">` 的 content
    pub fn meta_content(&self, name: &str) -> Option<String> {
        let selector = format!(r#"meta[name="{name}"]"#);
        self.document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|meta| meta.get_attribute("content"))
            .filter(|content| !content.is_empty())
    }
}

pub fn set_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

pub fn set_text(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// 添加或移除类名
pub fn set_class(element: &Element, class: &str, enabled: bool) {
    let classes = element.class_list();
    let result = if enabled {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        warn!(class, error = %js_error(&e), "修改类名失败");
    }
}

/// 结果面板的显示状态：同时切换 hidden 属性和可见类名
pub fn set_visible(element: &Element, visible: bool) {
    if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
        html_element.set_hidden(!visible);
    }
    set_class(element, VISIBLE_CLASS, visible);
}

/// 事件目标所在的元素
pub fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// 从事件目标向上查找匹配选择器的元素
pub fn closest(event: &Event, selector: &str) -> Option<Element> {
    event_element(event)?.closest(selector).ok().flatten()
}

/// 注册事件监听；监听器与页面同生命周期
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), ViewError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| ViewError::dom(&e))?;
    closure.forget();
    Ok(())
}
