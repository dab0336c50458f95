use async_trait::async_trait;
use blog_common::{CatalogSource, FetchResponse, LoadError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::js_error;

/// 通过浏览器 fetch 读取 posts.json
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchSource;

#[async_trait(?Send)]
impl CatalogSource for FetchSource {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        let window = web_sys::window().ok_or_else(|| LoadError::fetch(path, "window 不可用"))?;

        let response = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|e| LoadError::fetch(path, js_error(&e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|e| LoadError::fetch(path, js_error(&e)))?;

        let status = response.status();
        if !response.ok() {
            return Ok(FetchResponse::new(status, ""));
        }

        let text = response.text().map_err(|e| LoadError::fetch(path, js_error(&e)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| LoadError::fetch(path, js_error(&e)))?;

        Ok(FetchResponse::new(status, body.as_string().unwrap_or_default()))
    }
}
