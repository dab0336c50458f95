use std::collections::{BTreeMap, HashMap, HashSet};

use blog_common::Post;
use once_cell::sync::Lazy;
use tracing::info;

use crate::models::{Field, Posting, SearchError, SearchIndex, TermEntry};

/// 英文停用词，建索引时忽略
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "able", "about", "across", "after", "all", "almost", "also", "am", "among", "an",
        "and", "any", "are", "as", "at", "be", "because", "been", "but", "by", "can", "cannot",
        "could", "dear", "did", "do", "does", "either", "else", "ever", "every", "for", "from",
        "get", "got", "had", "has", "have", "he", "her", "hers", "him", "his", "how", "however",
        "i", "if", "in", "into", "is", "it", "its", "just", "least", "let", "like", "likely",
        "may", "me", "might", "most", "must", "my", "neither", "no", "nor", "not", "of", "off",
        "often", "on", "only", "or", "other", "our", "own", "rather", "said", "say", "says",
        "she", "should", "since", "so", "some", "than", "that", "the", "their", "them", "then",
        "there", "these", "they", "this", "tis", "to", "too", "twas", "us", "wants", "was", "we",
        "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
        "would", "yet", "you", "your",
    ]
    .into_iter()
    .collect()
});

/// 清理单个词元：转小写并去掉首尾的非字母数字字符
fn clean_term(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// 按空白和连字符切分并清理，丢弃空词元；索引和查询共用
pub(crate) fn split_terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| c.is_whitespace() || c == '-')
        .map(clean_term)
        .filter(|term| !term.is_empty())
}

/// 分词：切分后去掉停用词
pub fn tokenize(text: &str) -> Vec<String> {
    split_terms(text)
        .filter(|term| !STOP_WORDS.contains(term.as_str()))
        .collect()
}

/// 搜索索引构建器
pub struct SearchBuilder {
    refs: Vec<String>,
    terms: BTreeMap<String, TermEntry>,
}

impl SearchBuilder {
    /// 创建新的搜索索引构建器
    pub fn new() -> Self {
        Self {
            refs: Vec::new(),
            terms: BTreeMap::new(),
        }
    }

    /// 获取索引构建器中的文章数量
    pub fn get_post_count(&self) -> usize {
        self.refs.len()
    }

    /// 添加文章到索引构建器
    pub fn add_post(&mut self, post: &Post) {
        let doc = self.refs.len();
        self.refs.push(post.id.clone());

        for field in Field::ALL {
            let mut frequencies: HashMap<String, u32> = HashMap::new();
            for term in tokenize(&field.text(post)) {
                *frequencies.entry(term).or_insert(0) += 1;
            }

            for (term, frequency) in frequencies {
                let entry = self.terms.entry(term).or_default();
                if entry.postings.last().map(|p| p.doc) != Some(doc) {
                    entry.document_count += 1;
                }
                entry.postings.push(Posting {
                    doc,
                    field,
                    frequency,
                });
            }
        }
    }

    /// 构建搜索索引
    pub fn build(self) -> Result<SearchIndex, SearchError> {
        if self.refs.is_empty() {
            return Err(SearchError::NoPosts);
        }

        info!(
            posts = self.refs.len(),
            terms = self.terms.len(),
            "搜索索引构建完成"
        );

        Ok(SearchIndex {
            refs: self.refs,
            terms: self.terms,
        })
    }
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
