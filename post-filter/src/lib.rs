use std::collections::HashSet;

use blog_common::Post;
use tracing::warn;

pub mod models;

pub use models::{FilterParams, FilterResult, FilterState, RelatedPost, ALL_CATEGORIES};

/// 按分类筛选；"all" 直接放行
pub fn filter_by_category<'a, I>(posts: I, category: &str) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    if category == ALL_CATEGORIES {
        return posts.into_iter().collect();
    }
    posts
        .into_iter()
        .filter(|post| post.category == category)
        .collect()
}

/// 不区分大小写的子串搜索，匹配标题、摘要、任一标签、分类或作者
pub fn filter_by_text<'a, I>(posts: I, term: &str) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    if term.is_empty() {
        return posts.into_iter().collect();
    }

    let needle = term.to_lowercase();
    posts
        .into_iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.excerpt.to_lowercase().contains(&needle)
                || post
                    .tags()
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
                || post.category.to_lowercase().contains(&needle)
                || post.author.to_lowercase().contains(&needle)
        })
        .collect()
}

/// 按标签筛选（不区分大小写）；没有标签数组的文章被排除
pub fn filter_by_tag<'a, I>(posts: I, tag: &str) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let wanted = tag.to_lowercase();
    posts
        .into_iter()
        .filter(|post| match &post.tags {
            Some(tags) => tags.iter().any(|t| t.to_lowercase() == wanted),
            None => {
                warn!(title = %post.title, "文章没有标签数组");
                false
            }
        })
        .collect()
}

/// 先按分类再按搜索词筛选
pub fn apply_filters<'a, I>(posts: I, state: &FilterState) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let by_category = filter_by_category(posts, &state.category);
    filter_by_text(by_category, &state.search)
}

/// 按发布时间倒序排列（稳定排序，无法解析日期的文章排在最后）
pub fn sort_by_recency(posts: &mut [&Post]) {
    posts.sort_by(|a, b| b.published().cmp(&a.published()));
}

/// 最近发布的 n 篇文章
pub fn recent<'a, I>(posts: I, limit: usize) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut sorted: Vec<&Post> = posts.into_iter().collect();
    sort_by_recency(&mut sorted);
    sorted.truncate(limit);
    sorted
}

/// 计算相关文章：共同标签数（区分大小写）> 0，按数量降序，取前 limit 篇
pub fn related_posts<'a, I>(current: &Post, posts: I, limit: usize) -> Vec<RelatedPost<'a>>
where
    I: IntoIterator<Item = &'a Post>,
{
    let Some(current_tags) = &current.tags else {
        warn!(title = %current.title, "当前文章没有标签数组，无法计算相关文章");
        return Vec::new();
    };

    let mut related: Vec<RelatedPost<'a>> = posts
        .into_iter()
        .filter(|post| post.id != current.id)
        .filter_map(|post| {
            let Some(tags) = &post.tags else {
                warn!(title = %post.title, "文章没有标签数组");
                return None;
            };
            let matching_tags: Vec<&str> = tags
                .iter()
                .filter(|tag| current_tags.contains(*tag))
                .map(String::as_str)
                .collect();
            if matching_tags.is_empty() {
                None
            } else {
                Some(RelatedPost {
                    post,
                    score: matching_tags.len(),
                    matching_tags,
                })
            }
        })
        .collect();

    related.sort_by(|a, b| b.score.cmp(&a.score));
    related.truncate(limit);
    related
}

/// 按首次出现顺序列出所有分类
pub fn distinct_categories<'a, I>(posts: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .map(|post| post.category.as_str())
        .filter(|category| seen.insert(*category))
        .collect()
}

/// 按首次出现顺序列出所有标签（去重）
pub fn all_tags<'a, I>(posts: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .flat_map(|post| post.tags().iter())
        .map(String::as_str)
        .filter(|tag| seen.insert(*tag))
        .collect()
}

/// 按客户端参数筛选：分类 -> 搜索词 -> 标签 -> 排序 -> 截断
pub fn filter_posts<'a>(posts: &'a [Post], params: &FilterParams) -> FilterResult<'a> {
    let category = params.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let mut filtered = filter_by_category(posts, category);

    if let Some(search) = params.search.as_deref() {
        filtered = filter_by_text(filtered, search);
    }

    if let Some(tag) = params.tag.as_deref().filter(|tag| !tag.is_empty()) {
        filtered = filter_by_tag(filtered, tag);
    }

    if params.sort.as_deref() == Some("newest") {
        sort_by_recency(&mut filtered);
    }

    let total = filtered.len();
    if let Some(limit) = params.limit {
        filtered.truncate(limit);
    }

    FilterResult {
        posts: filtered,
        total,
    }
}
