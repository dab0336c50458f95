use blog_common::Post;

use super::{escape_html, highlight, plural};

pub const SEARCH_UNAVAILABLE: &str = "Search not available";
pub const NO_SEARCH_MATCHES: &str = "No posts found matching your search";
pub const POSTS_STILL_LOADING: &str = "Posts are still loading. Please try again.";

/// 简单提示
pub fn message(text: &str) -> String {
    format!(r#"<div class="no-results">{}</div>"#, escape_html(text))
}

fn result_header(summary: &str) -> String {
    format!(
        r##"<div class="search-header">
    <strong>{summary}</strong>
    <a href="#" class="search-clear" data-action="clear-search">Clear</a>
</div>"##
    )
}

fn tag_tokens(post: &Post) -> String {
    post.tags()
        .iter()
        .map(|tag| {
            let tag = escape_html(tag);
            format!(r#"<span class="tag" data-tag="{tag}">{tag}</span>"#)
        })
        .collect()
}

/// 搜索结果列表，标题和摘要中高亮查询词
pub fn search_results(posts: &[&Post], query: &str) -> String {
    let query = escape_html(query);
    let count = posts.len();
    let header = result_header(&format!(
        "{count} {} found",
        plural(count, "post", "posts")
    ));

    let items: String = posts
        .iter()
        .map(|post| {
            format!(
                r#"<div class="search-result-item">
    <h4><a href="{}">{}</a></h4>
    <p>{}</p>
    <div class="post-meta">
        <span class="tags">{}</span>
        <span class="read-time">{}</span>
    </div>
</div>"#,
                escape_html(&post.url),
                highlight(&escape_html(&post.title), &query),
                highlight(&escape_html(&post.excerpt), &query),
                tag_tokens(post),
                escape_html(&post.read_time),
            )
        })
        .collect();

    format!(r#"<div class="search-results-wrapper">{header}{items}</div>"#)
}

/// 按标签筛选的结果列表
pub fn tag_results(posts: &[&Post], tag: &str) -> String {
    let count = posts.len();
    let header = result_header(&format!(
        "{count} {} tagged with &quot;{}&quot;",
        plural(count, "post", "posts"),
        escape_html(tag)
    ));

    let items: String = posts
        .iter()
        .map(|post| {
            format!(
                r#"<div class="search-result-item">
    <h4><a href="{}">{}</a></h4>
    <p>{}</p>
    <div class="post-meta">
        <span class="category">{}</span>
        <span class="tags">{}</span>
        <span class="read-time">{}</span>
    </div>
</div>"#,
                escape_html(&post.url),
                escape_html(&post.title),
                escape_html(&post.excerpt),
                escape_html(&post.category),
                tag_tokens(post),
                escape_html(&post.read_time),
            )
        })
        .collect();

    format!(r#"<div class="search-results-wrapper">{header}{items}</div>"#)
}

/// 没有文章带有该标签时的提示，列出可用标签
pub fn tag_not_found(tag: &str, available: &[&str]) -> String {
    let available = available
        .iter()
        .map(|tag| escape_html(tag))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"<div class="no-results">
    <p>No posts found with tag "<strong>{}</strong>"</p>
    <p class="available-tags">Available tags: {available}</p>
</div>"#,
        escape_html(tag)
    )
}
