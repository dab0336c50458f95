use std::cmp::Ordering;
use std::ops::Bound;

use blog_common::Post;
use tracing::debug;

pub mod builder;
pub mod models;

pub use builder::{tokenize, SearchBuilder};
pub use models::{Field, SearchError, SearchHit, SearchIndex};

/// 查询中长度不足该值的输入不触发搜索
pub const MIN_QUERY_CHARS: usize = 2;

/// 解析后的查询 - 每个词都按前缀匹配
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    /// 按空白和连字符切分，每个词清理后作为前缀；不去停用词
    pub fn parse(raw: &str) -> Self {
        let terms = builder::split_terms(raw).collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// 逆文档频率
fn idf(total_docs: usize, document_count: usize) -> f64 {
    let total = total_docs as f64;
    let df = document_count as f64;
    (1.0 + (total - df + 0.5) / (df + 0.5)).ln()
}

impl SearchIndex {
    /// 为文章列表构建索引；没有文章时返回错误
    pub fn build(posts: &[Post]) -> Result<Self, SearchError> {
        let mut builder = SearchBuilder::new();
        for post in posts {
            builder.add_post(post);
        }
        builder.build()
    }

    /// 索引中的文章数量
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// 执行前缀搜索，按分数降序返回命中；同分保持文章原始顺序
    pub fn search(&self, raw: &str) -> Vec<SearchHit> {
        let query = Query::parse(raw);
        if query.is_empty() {
            return Vec::new();
        }

        let mut scores: Vec<Option<f64>> = vec![None; self.refs.len()];

        for term in query.terms() {
            let matches = self
                .terms
                .range::<str, _>((Bound::Included(term.as_str()), Bound::Unbounded))
                .take_while(|(indexed, _)| indexed.starts_with(term.as_str()));

            for (_, entry) in matches {
                let weight = idf(self.refs.len(), entry.document_count);
                for posting in &entry.postings {
                    let score = scores[posting.doc].get_or_insert(0.0);
                    *score += posting.field.boost() * f64::from(posting.frequency) * weight;
                }
            }
        }

        let mut ranked: Vec<(usize, f64)> = scores
            .into_iter()
            .enumerate()
            .filter_map(|(doc, score)| score.map(|s| (doc, s)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        debug!(query = raw, hits = ranked.len(), "搜索完成");

        ranked
            .into_iter()
            .map(|(doc, score)| SearchHit {
                id: self.refs[doc].clone(),
                score,
            })
            .collect()
    }

    /// 只返回命中文章的ID
    pub fn search_ids(&self, raw: &str) -> Vec<String> {
        self.search(raw).into_iter().map(|hit| hit.id).collect()
    }
}
