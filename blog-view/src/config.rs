use blog_common::DEFAULT_CANDIDATE_PATHS;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::ViewError;

/// 页面元素ID - 渲染层写入的位置
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    /// 首页文章网格
    pub blog_grid: String,
    /// 分类按钮容器
    pub category_filters: String,
    /// 首页搜索框
    pub blog_search: String,
    /// "无结果"面板
    pub no_results: String,
    /// 结果数量标签
    pub results_count: String,
    /// 文章页搜索框
    pub search_input: String,
    /// 文章页搜索结果容器
    pub search_results: String,
    /// 相关文章容器
    pub related_posts: String,
    /// 页脚最近文章容器
    pub footer_recent_posts: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            blog_grid: "blogGrid".to_string(),
            category_filters: "categoryFilters".to_string(),
            blog_search: "blogSearch".to_string(),
            no_results: "noResults".to_string(),
            results_count: "resultsCount".to_string(),
            search_input: "searchInput".to_string(),
            search_results: "searchResults".to_string(),
            related_posts: "related-posts".to_string(),
            footer_recent_posts: "footer-recent-posts".to_string(),
        }
    }
}

/// 前端配置 - 由 JS 传入，所有字段都有默认值
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewConfig {
    /// posts.json 候选路径，按顺序尝试
    pub candidate_paths: Vec<String>,
    /// 搜索输入的静默时间（毫秒）
    pub debounce_ms: u32,
    /// 相关文章数量上限
    pub related_limit: usize,
    /// 页脚最近文章数量
    pub recent_limit: usize,
    /// 页脚"全部文章"链接
    pub all_posts_href: String,
    /// 保存当前文章ID的 meta 名称
    pub post_id_meta: String,
    pub elements: ElementIds,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            candidate_paths: DEFAULT_CANDIDATE_PATHS.iter().map(|p| p.to_string()).collect(),
            debounce_ms: 300,
            related_limit: 3,
            recent_limit: 5,
            all_posts_href: "/blog/index.html".to_string(),
            post_id_meta: "post-id".to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl ViewConfig {
    /// 从 JS 对象读取配置；undefined/null 使用默认值
    pub fn from_js(value: JsValue) -> Result<Self, ViewError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| ViewError::Config(e.to_string()))
    }

    /// 从 JSON 文本读取配置
    pub fn from_json(json: &str) -> Result<Self, ViewError> {
        serde_json::from_str(json).map_err(|e| ViewError::Config(e.to_string()))
    }
}
