use blog_common::{Catalog, Post};
use blog_search::{SearchHit, SearchIndex};
use js_sys::Array;
use post_filter::{
    all_tags, distinct_categories, filter_posts, recent, related_posts, FilterParams,
    FilterResult, RelatedPost,
};
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;

/// 文章目录JS接口 - 提供给 JavaScript 直接调用的筛选与搜索API
#[wasm_bindgen]
pub struct BlogCatalog {
    catalog: Catalog,
    index: Option<SearchIndex>,
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
}

impl BlogCatalog {
    /// 由已加载的目录创建
    pub fn from_catalog(catalog: Catalog) -> Self {
        let index = match SearchIndex::build(catalog.posts()) {
            Ok(index) => Some(index),
            Err(e) => {
                warn!(error = %e, "搜索功能已禁用");
                None
            }
        };
        Self { catalog, index }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn category_list(&self) -> Vec<&str> {
        distinct_categories(&self.catalog)
    }

    pub fn tag_list(&self) -> Vec<&str> {
        all_tags(&self.catalog)
    }

    pub fn filter_with(&self, params: &FilterParams) -> FilterResult<'_> {
        filter_posts(self.catalog.posts(), params)
    }

    /// 搜索不可用时返回空列表
    pub fn search_hits(&self, query: &str) -> Vec<SearchHit> {
        match &self.index {
            Some(index) => index.search(query),
            None => Vec::new(),
        }
    }

    pub fn related_to(&self, id: &str, limit: usize) -> Vec<RelatedPost<'_>> {
        match self.catalog.find(id) {
            Some(current) => related_posts(current, &self.catalog, limit),
            None => Vec::new(),
        }
    }

    pub fn most_recent(&self, limit: usize) -> Vec<&Post> {
        recent(&self.catalog, limit)
    }
}

#[wasm_bindgen]
impl BlogCatalog {
    /// 从 posts.json 文本创建
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str) -> Result<BlogCatalog, JsValue> {
        let catalog =
            Catalog::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_catalog(catalog))
    }

    /// 文章数量
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.catalog.len()
    }

    /// 是否可以搜索
    #[wasm_bindgen(getter, js_name = searchAvailable)]
    pub fn search_available(&self) -> bool {
        self.index.is_some()
    }

    pub fn categories(&self) -> Array {
        self.category_list().into_iter().map(JsValue::from_str).collect()
    }

    pub fn tags(&self) -> Array {
        self.tag_list().into_iter().map(JsValue::from_str).collect()
    }

    /// 按 JSON 参数筛选文章
    pub fn filter(&self, params_json: &str) -> Result<JsValue, JsValue> {
        let params: FilterParams = serde_json::from_str(params_json)
            .map_err(|e| JsValue::from_str(&format!("解析参数失败: {}", e)))?;
        to_js(&self.filter_with(&params))
    }

    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        to_js(&self.search_hits(query))
    }

    pub fn related(&self, id: &str, limit: Option<u32>) -> Result<JsValue, JsValue> {
        to_js(&self.related_to(id, limit.map_or(3, |n| n as usize)))
    }

    pub fn recent(&self, limit: Option<u32>) -> Result<JsValue, JsValue> {
        to_js(&self.most_recent(limit.map_or(5, |n| n as usize)))
    }
}
