use blog_common::{Catalog, Post};
use blog_search::{SearchIndex, MIN_QUERY_CHARS};
use post_filter::{all_tags, filter_by_tag, related_posts};
use tracing::{info, warn};

use crate::render::{self, results};

/// 搜索结果面板：隐藏或显示某段 HTML
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultsPanel {
    Hidden,
    Visible(String),
}

/// 文章页控制器持有的状态
#[derive(Debug)]
pub struct PostPageState {
    catalog: Catalog,
    index: Option<SearchIndex>,
    loaded: bool,
    current_post_id: Option<String>,
    related_limit: usize,
}

impl PostPageState {
    pub fn new(current_post_id: Option<String>, related_limit: usize) -> Self {
        Self {
            catalog: Catalog::default(),
            index: None,
            loaded: false,
            current_post_id,
            related_limit,
        }
    }

    /// 保存目录并尝试建立搜索索引
    pub fn finish_loading(&mut self, catalog: Catalog, search_enabled: bool) {
        self.index = if !search_enabled {
            warn!("搜索功能未启用");
            None
        } else {
            match SearchIndex::build(catalog.posts()) {
                Ok(index) => Some(index),
                Err(e) => {
                    warn!(error = %e, "搜索功能已禁用");
                    None
                }
            }
        };
        self.catalog = catalog;
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn search_available(&self) -> bool {
        self.index.is_some()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 执行搜索；少于两个字符时隐藏面板
    pub fn search(&self, query: &str) -> ResultsPanel {
        if query.chars().count() < MIN_QUERY_CHARS {
            return ResultsPanel::Hidden;
        }

        let Some(index) = &self.index else {
            return ResultsPanel::Visible(render::message(results::SEARCH_UNAVAILABLE));
        };

        let posts: Vec<&Post> = index
            .search(query)
            .iter()
            .filter_map(|hit| self.catalog.find(&hit.id))
            .collect();

        if posts.is_empty() {
            ResultsPanel::Visible(render::message(results::NO_SEARCH_MATCHES))
        } else {
            ResultsPanel::Visible(render::search_results(&posts, query))
        }
    }

    /// 按标签筛选并强制显示结果面板
    pub fn filter_by_tag(&self, tag: &str) -> ResultsPanel {
        if !self.loaded || self.catalog.is_empty() {
            warn!(tag, "文章尚未加载");
            return ResultsPanel::Visible(render::message(results::POSTS_STILL_LOADING));
        }

        let posts = filter_by_tag(&self.catalog, tag);
        info!(tag, count = posts.len(), "按标签筛选");

        if posts.is_empty() {
            let available = all_tags(&self.catalog);
            ResultsPanel::Visible(render::tag_not_found(tag, &available))
        } else {
            ResultsPanel::Visible(render::tag_results(&posts, tag))
        }
    }

    /// 相关文章面板 HTML；缺少当前文章或没有相关文章时为 None
    pub fn related_html(&self) -> Option<String> {
        let current_id = self.current_post_id.as_deref()?;
        let current = self.catalog.find(current_id)?;
        let related = related_posts(current, &self.catalog, self.related_limit);
        render::related_posts(&related)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTS: &str = r#"{ "posts": [
        { "id": "guide", "title": "SEO Guide", "excerpt": "Basics", "category": "SEO", "tags": ["SEO", "Basics"] },
        { "id": "market", "title": "Growth", "excerpt": "Funnels", "category": "Digital Marketing", "tags": ["marketing", "SEO"] },
        { "id": "css", "title": "Grid Layouts", "excerpt": "CSS grid", "category": "Web Development", "tags": ["CSS"] },
        { "id": "odd", "title": "Odd One", "excerpt": "No tags", "category": "SEO", "tags": "SEO" }
    ] }"#;

    fn loaded(current: Option<&str>) -> PostPageState {
        let mut state = PostPageState::new(current.map(str::to_string), 3);
        state.finish_loading(Catalog::from_json_str(POSTS).unwrap(), true);
        state
    }

    #[test]
    fn short_queries_hide_the_panel() {
        let state = loaded(None);
        assert_eq!(state.search(""), ResultsPanel::Hidden);
        assert_eq!(state.search("s"), ResultsPanel::Hidden);
    }

    #[test]
    fn prefix_search_finds_tag_matches() {
        let state = loaded(None);
        match state.search("mark") {
            ResultsPanel::Visible(html) => {
                assert!(html.contains("Growth"));
                assert!(html.contains("1 post found"));
            }
            ResultsPanel::Hidden => panic!("panel should be visible"),
        }
    }

    #[test]
    fn no_match_message() {
        let state = loaded(None);
        assert_eq!(
            state.search("zzzz"),
            ResultsPanel::Visible(render::message(results::NO_SEARCH_MATCHES))
        );
    }

    #[test]
    fn disabled_search_reports_unavailable() {
        let mut state = PostPageState::new(None, 3);
        state.finish_loading(Catalog::from_json_str(POSTS).unwrap(), false);

        assert!(!state.search_available());
        assert_eq!(
            state.search("seo"),
            ResultsPanel::Visible(render::message(results::SEARCH_UNAVAILABLE))
        );
    }

    #[test]
    fn empty_catalog_disables_search() {
        let mut state = PostPageState::new(None, 3);
        state.finish_loading(Catalog::default(), true);
        assert!(!state.search_available());
    }

    #[test]
    fn tag_filter_before_load_asks_to_retry() {
        let state = PostPageState::new(None, 3);
        assert_eq!(
            state.filter_by_tag("SEO"),
            ResultsPanel::Visible(render::message(results::POSTS_STILL_LOADING))
        );
    }

    #[test]
    fn tag_filter_lists_matching_posts() {
        let state = loaded(None);
        match state.filter_by_tag("seo") {
            ResultsPanel::Visible(html) => {
                assert!(html.contains("2 posts tagged with"));
                assert!(!html.contains("Odd One"));
            }
            ResultsPanel::Hidden => panic!("panel should be visible"),
        }
    }

    #[test]
    fn unknown_tag_lists_available_tags() {
        let state = loaded(None);
        match state.filter_by_tag("rust") {
            ResultsPanel::Visible(html) => {
                assert!(html.contains("Available tags: SEO, Basics, marketing, CSS"))
            }
            ResultsPanel::Hidden => panic!("panel should be visible"),
        }
    }

    #[test]
    fn related_posts_use_current_post_id() {
        let state = loaded(Some("guide"));
        let html = state.related_html().unwrap();
        assert!(html.contains("Growth"));
        assert!(!html.contains("Grid Layouts"));
        assert!(!html.contains("SEO Guide"));
    }

    #[test]
    fn related_posts_need_a_known_current_post() {
        assert_eq!(loaded(None).related_html(), None);
        assert_eq!(loaded(Some("missing")).related_html(), None);
        assert_eq!(loaded(Some("css")).related_html(), None);
    }
}
