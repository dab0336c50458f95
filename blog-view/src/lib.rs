use blog_common::CatalogLoader;
use tracing::error;
use wasm_bindgen::prelude::*;

// 导出模块
pub mod api;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod render;
pub mod state;

pub use api::BlogCatalog;
pub use config::{ElementIds, ViewConfig};
pub use error::ViewError;

use dom::Page;
use fetch::FetchSource;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 初始化函数 - 设置错误处理和日志
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn prepare(options: JsValue) -> Result<(Page, CatalogLoader<FetchSource>, ViewConfig), ViewError> {
    let config = ViewConfig::from_js(options)?;
    let page = Page::current()?;
    let loader = CatalogLoader::new(FetchSource).with_paths(config.candidate_paths.clone());
    Ok((page, loader, config))
}

/// 挂载博客首页；失败只记录日志，不影响页面其他部分
#[wasm_bindgen(js_name = mountBlogIndex)]
pub async fn mount_blog_index(options: JsValue) {
    let result = match prepare(options) {
        Ok((page, loader, config)) => {
            controller::mount_blog_index(&page, &loader, &config).await
        }
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        error!(error = %e, "博客首页初始化失败");
    }
}

/// 挂载文章页
#[wasm_bindgen(js_name = mountPostPage)]
pub async fn mount_post_page(options: JsValue) {
    let search_enabled = cfg!(feature = "search");
    let result = match prepare(options) {
        Ok((page, loader, config)) => {
            controller::mount_post_page(&page, &loader, &config, search_enabled).await
        }
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        error!(error = %e, "文章页初始化失败");
    }
}

/// 挂载页脚最近文章
#[wasm_bindgen(js_name = mountFooter)]
pub async fn mount_footer(options: JsValue) {
    let result = match prepare(options) {
        Ok((page, loader, config)) => controller::mount_footer(&page, &loader, &config).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        error!(error = %e, "页脚初始化失败");
    }
}
