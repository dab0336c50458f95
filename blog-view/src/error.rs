use blog_common::LoadError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// 页面层错误
#[derive(Debug, Error)]
pub enum ViewError {
    /// 页面缺少必需的元素
    #[error("页面中缺少元素 #{0}")]
    MissingElement(String),
    /// 不在浏览器环境中
    #[error("无法访问 window/document")]
    NoDocument,
    #[error("配置解析失败: {0}")]
    Config(String),
    #[error("DOM 操作失败: {0}")]
    Dom(String),
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl ViewError {
    pub fn dom(value: &JsValue) -> Self {
        Self::Dom(js_error(value))
    }
}

impl From<ViewError> for JsValue {
    fn from(err: ViewError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// 把 JS 异常转成可读文本
pub fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
