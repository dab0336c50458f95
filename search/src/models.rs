use std::borrow::Cow;
use std::collections::BTreeMap;

use blog_common::Post;
use serde::Serialize;
use thiserror::Error;

/// 参与索引的字段
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Tags,
    Category,
    Excerpt,
    Author,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Tags,
        Field::Category,
        Field::Excerpt,
        Field::Author,
    ];

    /// 字段权重：标题 > 标签 > 分类 > 摘要 > 作者
    pub fn boost(self) -> f64 {
        match self {
            Field::Title => 10.0,
            Field::Tags => 8.0,
            Field::Category => 7.0,
            Field::Excerpt => 5.0,
            Field::Author => 1.0,
        }
    }

    /// 取出文章中该字段的文本，标签以空格拼接
    pub fn text(self, post: &Post) -> Cow<'_, str> {
        match self {
            Field::Title => Cow::Borrowed(&post.title),
            Field::Tags => Cow::Owned(post.tags().join(" ")),
            Field::Category => Cow::Borrowed(&post.category),
            Field::Excerpt => Cow::Borrowed(&post.excerpt),
            Field::Author => Cow::Borrowed(&post.author),
        }
    }
}

/// 倒排表条目 - 某词元在某篇文章某个字段中的出现次数
#[derive(Clone, Debug, PartialEq)]
pub struct Posting {
    pub doc: usize,
    pub field: Field,
    pub frequency: u32,
}

/// 词元索引项
#[derive(Clone, Debug, Default)]
pub struct TermEntry {
    /// 按文章顺序排列的倒排表
    pub postings: Vec<Posting>,
    /// 包含该词元的文章数
    pub document_count: usize,
}

/// 搜索索引 - 页面加载时构建一次，之后只读
#[derive(Debug)]
pub struct SearchIndex {
    /// 文章序号 -> 文章ID
    pub(crate) refs: Vec<String>,
    /// 词元 -> 索引项；有序以便做前缀扫描
    pub(crate) terms: BTreeMap<String, TermEntry>,
}

/// 搜索命中
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SearchHit {
    /// 文章ID
    pub id: String,
    /// 相关度分数
    pub score: f64,
}

/// 索引构建错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("无法构建索引: 没有文章数据")]
    NoPosts,
}
