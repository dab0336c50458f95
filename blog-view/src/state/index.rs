use blog_common::{Catalog, LoadError};
use post_filter::{apply_filters, distinct_categories, FilterState};
use tracing::{debug, error};

use crate::render;

/// 首页状态：Loading -> Ready | Failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed,
}

/// 首页网格区域需要显示的内容
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridView {
    /// 网格 HTML
    pub grid_html: String,
    /// 是否显示"无结果"面板
    pub show_no_results: bool,
    /// 结果数量文本
    pub results_count: String,
}

/// 博客首页控制器持有的状态
#[derive(Debug)]
pub struct BlogIndexState {
    catalog: Catalog,
    filter: FilterState,
    phase: Phase,
}

impl BlogIndexState {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::default(),
            filter: FilterState::default(),
            phase: Phase::Loading,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 加载结束；失败时目录为空并进入 Failed
    pub fn finish_loading(&mut self, result: Result<Catalog, LoadError>) -> GridView {
        match result {
            Ok(catalog) => {
                self.catalog = catalog;
                self.phase = Phase::Ready;
            }
            Err(e) => {
                error!(error = %e, "加载文章失败");
                self.catalog = Catalog::default();
                self.phase = Phase::Failed;
            }
        }
        self.view()
    }

    /// 分类按钮 HTML；加载失败时为空
    pub fn filter_buttons_html(&self) -> String {
        if self.phase != Phase::Ready {
            return String::new();
        }
        let categories = distinct_categories(&self.catalog);
        render::category_filters(&categories, &self.filter.category)
    }

    /// 选择分类；加载完成前只记录状态
    pub fn select_category(&mut self, category: &str) -> Option<GridView> {
        self.filter.set_category(category);
        self.refresh()
    }

    /// 更新搜索词；加载完成前只记录状态
    pub fn search(&mut self, text: &str) -> Option<GridView> {
        self.filter.set_search(text);
        self.refresh()
    }

    fn refresh(&self) -> Option<GridView> {
        match self.phase {
            Phase::Ready => {
                debug!(category = %self.filter.category, search = %self.filter.search, "重新筛选");
                Some(self.view())
            }
            Phase::Loading | Phase::Failed => None,
        }
    }

    /// 按当前状态计算网格内容
    pub fn view(&self) -> GridView {
        match self.phase {
            Phase::Loading => GridView {
                grid_html: String::new(),
                show_no_results: false,
                results_count: String::new(),
            },
            Phase::Failed => GridView {
                grid_html: render::error_panel(),
                show_no_results: false,
                results_count: String::new(),
            },
            Phase::Ready => {
                let posts = apply_filters(&self.catalog, &self.filter);
                if posts.is_empty() {
                    GridView {
                        grid_html: String::new(),
                        show_no_results: true,
                        results_count: String::new(),
                    }
                } else {
                    GridView {
                        grid_html: render::post_grid(&posts),
                        show_no_results: false,
                        results_count: render::results_count(posts.len()),
                    }
                }
            }
        }
    }
}

impl Default for BlogIndexState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTS: &str = r#"{ "posts": [
        { "id": "1", "title": "Keyword Research", "category": "SEO", "tags": ["SEO"] },
        { "id": "2", "title": "Link Building", "category": "SEO", "tags": ["links"] },
        { "id": "3", "title": "Responsive CSS", "category": "Web Development", "tags": ["CSS"] }
    ] }"#;

    fn ready() -> BlogIndexState {
        let mut state = BlogIndexState::new();
        state.finish_loading(Catalog::from_json_str(POSTS));
        state
    }

    #[test]
    fn loaded_catalog_renders_every_card() {
        let state = ready();
        let view = state.view();
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(view.grid_html.matches("blog-card\"").count(), 3);
        assert_eq!(view.results_count, "Showing 3 articles");
    }

    #[test]
    fn failed_load_shows_error_panel() {
        let mut state = BlogIndexState::new();
        let view = state.finish_loading(Err(LoadError::Unreachable { attempted: vec![] }));

        assert_eq!(state.phase(), Phase::Failed);
        assert!(view.grid_html.contains("Error loading blog posts"));
        assert_eq!(view.results_count, "");
        assert!(state.filter_buttons_html().is_empty());
        assert_eq!(state.search("seo"), None);
    }

    #[test]
    fn input_before_load_is_applied_once_ready() {
        let mut state = BlogIndexState::new();
        assert_eq!(state.search("CSS"), None);

        let view = state.finish_loading(Catalog::from_json_str(POSTS));
        assert_eq!(view.results_count, "Showing 1 article");
    }

    #[test]
    fn category_and_search_narrow_progressively() {
        let mut state = ready();
        let by_category = state.select_category("SEO").unwrap();
        assert_eq!(by_category.results_count, "Showing 2 articles");

        let narrowed = state.search("LINK").unwrap();
        assert_eq!(narrowed.results_count, "Showing 1 article");
        assert_eq!(state.filter().search, "link");
    }

    #[test]
    fn empty_result_shows_no_results_panel() {
        let mut state = ready();
        let view = state.search("nothing like this").unwrap();

        assert!(view.show_no_results);
        assert!(view.grid_html.is_empty());
        assert!(view.results_count.is_empty());
    }

    #[test]
    fn filter_buttons_follow_active_category() {
        let mut state = ready();
        state.select_category("Web Development");
        let html = state.filter_buttons_html();
        assert!(html.contains(r#"class="filter-btn active" data-category="Web Development""#));
        assert!(html.contains(r#"class="filter-btn" data-category="all""#));
    }
}
