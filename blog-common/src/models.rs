use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::LoadError;

/// 文章 - posts.json 中的一条记录，加载后不再修改
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "RawPost", rename_all = "camelCase")]
pub struct Post {
    /// 文章唯一标识符
    pub id: String,
    /// 文章标题
    pub title: String,
    /// 文章摘要
    pub excerpt: String,
    /// 作者
    pub author: String,
    /// 分类
    pub category: String,
    /// 阅读时长，例如 "5 min read"
    pub read_time: String,
    /// 文章URL路径
    pub url: String,
    /// 原始日期字符串
    pub date: String,
    /// 封面图片，缺失时显示标题首字符
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// 标签列表；缺失或格式错误时为 None
    pub tags: Option<Vec<String>>,
    /// 解析后的发布时间
    #[serde(skip)]
    published: Option<NaiveDateTime>,
}

/// 反序列化中间结构 - 对各字段做宽松处理
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPost {
    #[serde(default, deserialize_with = "lenient_string")]
    id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    excerpt: String,
    #[serde(default, deserialize_with = "lenient_string")]
    author: String,
    #[serde(default, deserialize_with = "lenient_string")]
    category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    read_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    date: String,
    #[serde(default, deserialize_with = "lenient_image")]
    image: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    tags: Option<Vec<String>>,
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        let published = parse_date(&raw.date);
        Self {
            id: raw.id,
            title: raw.title,
            excerpt: raw.excerpt,
            author: raw.author,
            category: raw.category,
            read_time: raw.read_time,
            url: raw.url,
            date: raw.date,
            image: raw.image,
            tags: raw.tags,
            published,
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_image<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_tags<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// 解析日期字符串，支持 RFC 3339、`YYYY-MM-DDTHH:MM:SS` 与 `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.with_timezone(&Utc).naive_utc());
    }

    if let Ok(date_time) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(date_time);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

impl Post {
    /// 标签切片；格式错误的标签按空列表处理
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// 标签字段是否为合法数组
    pub fn has_tag_list(&self) -> bool {
        self.tags.is_some()
    }

    /// 发布时间，无法解析时为 None
    pub fn published(&self) -> Option<NaiveDateTime> {
        self.published
    }

    /// 占位图使用的标题首字符
    pub fn initial(&self) -> Option<char> {
        self.title.chars().next()
    }
}

/// 文章目录 - 单个页面加载得到的有序文章列表
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    posts: Vec<Post>,
}

impl Catalog {
    /// 由文章列表构建目录，重复的 id 只保留第一条
    pub fn from_posts(posts: Vec<Post>) -> Self {
        let mut seen = HashSet::new();
        let posts = posts
            .into_iter()
            .filter(|post| {
                if seen.insert(post.id.clone()) {
                    true
                } else {
                    warn!(id = %post.id, "文章 id 重复，已忽略后续条目");
                    false
                }
            })
            .collect();
        Self { posts }
    }

    /// 从 `{ "posts": [...] }` 文档中提取文章
    pub fn from_document(document: Value, origin: &str) -> Result<Self, LoadError> {
        let items = match document {
            Value::Object(mut map) => match map.remove("posts") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(LoadError::MissingPosts {
                        path: origin.to_string(),
                    })
                }
            },
            _ => {
                return Err(LoadError::MissingPosts {
                    path: origin.to_string(),
                })
            }
        };

        let mut posts = Vec::with_capacity(items.len());
        for (position, item) in items.into_iter().enumerate() {
            if !item.is_object() {
                warn!(position, "文章条目不是对象，已跳过");
                continue;
            }
            match serde_json::from_value::<Post>(item) {
                Ok(post) => {
                    if !post.has_tag_list() {
                        warn!(title = %post.title, "文章缺少标签数组");
                    }
                    posts.push(post);
                }
                Err(e) => warn!(position, error = %e, "文章条目解析失败，已跳过"),
            }
        }

        Ok(Self::from_posts(posts))
    }

    /// 从 JSON 文本解析目录
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let document: Value =
            serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;
        Self::from_document(document, "<inline>")
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_camel_case_fields() {
        let post: Post = serde_json::from_value(json!({
            "id": "seo-basics",
            "title": "SEO Basics",
            "excerpt": "Start here",
            "author": "Dana",
            "category": "SEO",
            "readTime": "5 min read",
            "url": "/blog/seo-basics.html",
            "date": "2024-03-05",
            "tags": ["SEO", "Beginners"]
        }))
        .unwrap();

        assert_eq!(post.read_time, "5 min read");
        assert_eq!(post.tags(), ["SEO", "Beginners"]);
        assert_eq!(
            post.published(),
            NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(post.image, None);
    }

    #[test]
    fn malformed_tags_become_none() {
        let post: Post = serde_json::from_value(json!({
            "id": 7,
            "title": "Numbers",
            "tags": "seo"
        }))
        .unwrap();

        assert_eq!(post.id, "7");
        assert!(!post.has_tag_list());
        assert!(post.tags().is_empty());
    }

    #[test]
    fn empty_image_uses_placeholder() {
        let post: Post = serde_json::from_value(json!({ "title": "Écrire", "image": "" })).unwrap();
        assert_eq!(post.image, None);
        assert_eq!(post.initial(), Some('É'));
    }

    #[test]
    fn parses_supported_date_formats() {
        assert!(parse_date("2024-01-15").is_some());
        assert!(parse_date("2024-01-15T08:30:00").is_some());
        assert!(parse_date("2024-01-15T08:30:00+02:00").is_some());
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn document_without_posts_is_rejected() {
        let err = Catalog::from_document(json!({ "items": [] }), "/posts.json").unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingPosts {
                path: "/posts.json".to_string()
            }
        );
    }

    #[test]
    fn skips_non_object_entries_and_duplicate_ids() {
        let catalog = Catalog::from_document(
            json!({ "posts": [
                { "id": "a", "title": "First" },
                "garbage",
                { "id": "a", "title": "Duplicate" },
                { "id": "b", "title": "Second" }
            ]}),
            "posts.json",
        )
        .unwrap();

        let titles: Vec<_> = catalog.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
        assert_eq!(catalog.find("b").map(|p| p.title.as_str()), Some("Second"));
    }
}
