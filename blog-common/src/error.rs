use thiserror::Error;

/// 文章目录加载错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// 单个候选路径请求失败（网络错误等）
    #[error("请求 {path} 失败: {message}")]
    Fetch { path: String, message: String },
    /// 所有候选路径都没有返回可用数据
    #[error("所有候选路径均不可用: {}", attempted.join(", "))]
    Unreachable { attempted: Vec<String> },
    /// 返回的文档中没有 posts 数组
    #[error("{path} 中缺少 posts 字段")]
    MissingPosts { path: String },
    /// 文档不是合法的 JSON
    #[error("解析文章数据失败: {0}")]
    Parse(String),
}

impl LoadError {
    pub fn fetch(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
