//! 渲染层 - 把文章列表投影成 HTML 片段
//!
//! 所有函数都是纯函数：相同输入得到相同输出，不接触 DOM。

use std::collections::HashMap;

use blog_common::Post;
use once_cell::sync::Lazy;

pub mod cards;
pub mod highlight;
pub mod results;

pub use cards::{
    category_filters, error_panel, footer_recent, post_card, post_grid, related_posts,
    results_count,
};
pub use highlight::highlight;
pub use results::{message, search_results, tag_not_found, tag_results};

/// 未知分类使用的颜色
pub const DEFAULT_CATEGORY_COLOR: &str = "#2563eb";

static CATEGORY_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("SEO", "#2563eb"),
        ("Digital Marketing", "#a55dadff"),
        ("Technical SEO", "#1a578dff"),
        ("Content Marketing", "#43e97b"),
        ("Web Development", "#fa709a"),
    ])
});

/// 分类徽章颜色
pub fn category_color(category: &str) -> &'static str {
    CATEGORY_COLORS
        .get(category)
        .copied()
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

/// 转义插入到 HTML 中的文本
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// 日期格式：`Mar 5, 2024`
pub fn format_date(post: &Post) -> String {
    match post.published() {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// 按数量选择单复数
pub(crate) fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
