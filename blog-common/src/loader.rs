use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::LoadError;
use crate::models::Catalog;

/// 默认候选路径 - 页面所在目录深度未知，依次尝试
pub const DEFAULT_CANDIDATE_PATHS: [&str; 4] =
    ["/posts.json", "../posts.json", "./posts.json", "posts.json"];

/// 一次请求的响应
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP 状态码
    pub status: u16,
    /// 响应体文本
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 状态码是否为 2xx
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 文章数据来源 - 浏览器中由 fetch 实现，测试中可替换为内存数据
#[async_trait(?Send)]
pub trait CatalogSource {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError>;
}

#[async_trait(?Send)]
impl<T: CatalogSource + ?Sized> CatalogSource for Rc<T> {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        (**self).fetch(path).await
    }
}

/// 文章目录加载器
pub struct CatalogLoader<S> {
    source: S,
    paths: Vec<String>,
}

impl<S: CatalogSource> CatalogLoader<S> {
    /// 使用默认候选路径创建加载器
    pub fn new(source: S) -> Self {
        Self {
            source,
            paths: DEFAULT_CANDIDATE_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// 替换候选路径
    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// 依次请求候选路径，第一个返回成功且为合法 JSON 的路径胜出
    pub async fn load(&self) -> Result<Catalog, LoadError> {
        for path in &self.paths {
            let response = match self.source.fetch(path).await {
                Ok(response) => response,
                Err(e) => {
                    debug!(%path, error = %e, "候选路径请求失败");
                    continue;
                }
            };

            if !response.is_ok() {
                debug!(%path, status = response.status, "候选路径返回非成功状态");
                continue;
            }

            let document: Value = match serde_json::from_str(&response.body) {
                Ok(document) => document,
                Err(e) => {
                    debug!(%path, error = %e, "候选路径返回的内容不是 JSON");
                    continue;
                }
            };

            return match Catalog::from_document(document, path) {
                Ok(catalog) => {
                    info!(%path, count = catalog.len(), "文章数据加载完成");
                    Ok(catalog)
                }
                Err(e) => {
                    error!(error = %e, "未找到文章数据");
                    Err(e)
                }
            };
        }

        let err = LoadError::Unreachable {
            attempted: self.paths.clone(),
        };
        error!(error = %err, "未找到文章数据");
        Err(err)
    }
}
