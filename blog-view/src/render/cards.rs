use blog_common::Post;
use post_filter::{RelatedPost, ALL_CATEGORIES};

use super::{category_color, escape_html, format_date, plural};

/// 卡片上最多显示的标签数
const CARD_TAG_LIMIT: usize = 3;

/// 单篇文章卡片
pub fn post_card(post: &Post) -> String {
    let title = escape_html(&post.title);
    let url = escape_html(&post.url);

    let image = match &post.image {
        Some(src) => format!(
            r#"<img src="{}" alt="{title}" class="blog-card-img" loading="eager">"#,
            escape_html(src)
        ),
        None => {
            let initial = post.initial().map(String::from).unwrap_or_default();
            format!(
                r#"<div class="blog-card-image-placeholder">{}</div>"#,
                escape_html(&initial)
            )
        }
    };

    let tags = post.tags();
    let mut tag_html: String = tags
        .iter()
        .take(CARD_TAG_LIMIT)
        .map(|tag| {
            let tag = escape_html(tag);
            format!(r#"<span class="blog-tag" data-tag="{tag}">{tag}</span>"#)
        })
        .collect();
    if tags.len() > CARD_TAG_LIMIT {
        tag_html.push_str(&format!(
            r#"<span class="blog-tag blog-tag-more">+{}</span>"#,
            tags.len() - CARD_TAG_LIMIT
        ));
    }

    format!(
        r#"<div class="col-lg-4 col-md-6">
    <div class="blog-card">
        <div class="blog-card-image-wrapper">{image}</div>
        <div class="blog-card-body">
            <span class="blog-category" style="background: {color};">{category}</span>
            <h2 class="blog-card-title therdH"><a href="{url}">{title}</a></h2>
            <p class="blog-card-excerpt">{excerpt}</p>
            <div class="blog-tags">{tag_html}</div>
            <div class="blog-card-meta">
                <div class="blog-meta-item"><i class="far fa-user"></i><span>{author}</span></div>
                <div class="blog-meta-item"><i class="far fa-calendar"></i><span>{date}</span></div>
                <div class="blog-meta-item"><i class="far fa-clock"></i><span>{read_time}</span></div>
            </div>
        </div>
    </div>
</div>"#,
        color = category_color(&post.category),
        category = escape_html(&post.category),
        excerpt = escape_html(&post.excerpt),
        author = escape_html(&post.author),
        date = format_date(post),
        read_time = escape_html(&post.read_time),
    )
}

/// 文章网格
pub fn post_grid(posts: &[&Post]) -> String {
    posts.iter().map(|post| post_card(post)).collect()
}

/// 分类筛选按钮，第一个为 "All"
pub fn category_filters(categories: &[&str], active: &str) -> String {
    std::iter::once(ALL_CATEGORIES)
        .chain(categories.iter().copied())
        .map(|category| {
            let label = if category == ALL_CATEGORIES {
                "All".to_string()
            } else {
                escape_html(category)
            };
            let class = if category == active {
                "filter-btn active"
            } else {
                "filter-btn"
            };
            format!(
                r#"<button class="{class}" data-category="{}">{label}</button>"#,
                escape_html(category)
            )
        })
        .collect()
}

/// 结果数量文本；没有结果时为空
pub fn results_count(count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    format!("Showing {count} {}", plural(count, "article", "articles"))
}

/// 加载失败时的错误面板
pub fn error_panel() -> String {
    r#"<div class="col-12">
    <div class="alert alert-danger">
        <i class="fas fa-exclamation-triangle"></i>
        Error loading blog posts. Please try again later.
    </div>
</div>"#
        .to_string()
}

/// 相关文章面板；没有相关文章时返回 None
pub fn related_posts(related: &[RelatedPost<'_>]) -> Option<String> {
    if related.is_empty() {
        return None;
    }

    let cards: String = related
        .iter()
        .map(|item| {
            let post = item.post;
            format!(
                r#"<div class="related-post-card">
    <h4><a href="{}">{}</a></h4>
    <p>{}</p>
    <div class="post-meta">
        <span class="category">{}</span>
        <span class="read-time">{}</span>
    </div>
</div>"#,
                escape_html(&post.url),
                escape_html(&post.title),
                escape_html(&post.excerpt),
                escape_html(&post.category),
                escape_html(&post.read_time),
            )
        })
        .collect();

    Some(format!(
        r#"<div class="related-posts-section">
    <h3>Related Articles</h3>
    <div class="related-posts-grid">{cards}</div>
</div>"#
    ))
}

/// 页脚最近文章列表，末尾固定链接到全部文章
pub fn footer_recent(posts: &[&Post], all_posts_href: &str) -> String {
    if posts.is_empty() {
        return "<p>No recent posts available</p>".to_string();
    }

    let items: String = posts
        .iter()
        .map(|post| {
            format!(
                r#"<li><a href="{}"><span class="post-title">{}</span></a></li>"#,
                escape_html(&post.url),
                escape_html(&post.title)
            )
        })
        .collect();

    format!(
        r#"<h2 class="fourthH">Recent Posts</h2>
<ul class="recent-posts-list">{items}<li><a href="{}"><span class="post-title">All Blog Posts</span></a></li></ul>"#,
        escape_html(all_posts_href)
    )
}
