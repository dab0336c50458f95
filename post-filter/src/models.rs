use blog_common::Post;
use serde::{Deserialize, Serialize};

/// 表示"全部分类"的筛选值
pub const ALL_CATEGORIES: &str = "all";

/// 筛选状态 - 由博客首页控制器持有，用户操作时修改
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    /// 当前分类，默认 "all"
    pub category: String,
    /// 当前搜索词（小写）
    pub search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
        }
    }
}

impl FilterState {
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// 保存搜索词，统一转为小写
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_lowercase();
    }

    /// 是否没有任何筛选条件
    pub fn is_passthrough(&self) -> bool {
        self.category == ALL_CATEGORIES && self.search.is_empty()
    }
}

/// 筛选参数 - 客户端以 JSON 传递的筛选条件
#[derive(Deserialize, Debug, Default)]
pub struct FilterParams {
    /// 分类筛选 (可选, 默认 "all")
    pub category: Option<String>,
    /// 子串搜索 (可选)
    pub search: Option<String>,
    /// 标签筛选 (可选, 不区分大小写)
    pub tag: Option<String>,
    /// 排序方式: "newest" 按发布时间倒序，其余保持原始顺序 (可选)
    pub sort: Option<String>,
    /// 最多返回条数 (可选)
    pub limit: Option<usize>,
}

/// 筛选结果
#[derive(Serialize, Debug)]
pub struct FilterResult<'a> {
    /// 筛选后的文章列表
    pub posts: Vec<&'a Post>,
    /// 截断前的结果总数
    pub total: usize,
}

/// 相关文章 - 带有共同标签数
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RelatedPost<'a> {
    pub post: &'a Post,
    /// 共同标签数量
    pub score: usize,
    /// 共同的标签
    pub matching_tags: Vec<&'a str>,
}
