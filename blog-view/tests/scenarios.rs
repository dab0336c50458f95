//! 页面级流程：数据源 -> 加载器 -> 状态 -> HTML

use std::collections::HashMap;

use async_trait::async_trait;
use blog_common::{CatalogLoader, CatalogSource, FetchResponse, LoadError};
use blog_view::render;
use blog_view::state::{BlogIndexState, Phase, PostPageState, ResultsPanel};
use futures::executor::block_on;
use post_filter::recent;

const FIXTURE: &str = include_str!("fixtures/posts.json");

/// 按路径返回固定响应，其余路径 404
#[derive(Default)]
struct StaticSite {
    files: HashMap<String, (u16, String)>,
}

impl StaticSite {
    fn serve(mut self, path: &str, status: u16, body: &str) -> Self {
        self.files.insert(path.to_string(), (status, body.to_string()));
        self
    }
}

#[async_trait(?Send)]
impl CatalogSource for StaticSite {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        Ok(match self.files.get(path) {
            Some((status, body)) => FetchResponse::new(*status, body.as_str()),
            None => FetchResponse::new(404, ""),
        })
    }
}

fn index_page(site: StaticSite) -> BlogIndexState {
    let loader = CatalogLoader::new(site);
    let mut state = BlogIndexState::new();
    state.finish_loading(block_on(loader.load()));
    state
}

fn post_page(current: Option<&str>) -> PostPageState {
    let loader = CatalogLoader::new(StaticSite::default().serve("posts.json", 200, FIXTURE));
    let catalog = block_on(loader.load()).unwrap();
    let mut state = PostPageState::new(current.map(str::to_string), 3);
    state.finish_loading(catalog, true);
    state
}

fn card_count(html: &str) -> usize {
    html.matches(r#"<div class="blog-card">"#).count()
}

#[test]
fn selecting_a_category_narrows_the_grid() {
    let site = StaticSite::default().serve(
        "/posts.json",
        200,
        r#"{ "posts": [
            { "id": "1", "title": "One", "category": "SEO" },
            { "id": "2", "title": "Two", "category": "SEO" },
            { "id": "3", "title": "Three", "category": "Web Development" }
        ] }"#,
    );
    let mut state = index_page(site);
    assert_eq!(state.phase(), Phase::Ready);

    let buttons = state.filter_buttons_html();
    assert_eq!(buttons.matches("<button").count(), 3);
    assert!(buttons
        .contains(r#"<button class="filter-btn active" data-category="all">All</button>"#));

    let view = state.select_category("Web Development").unwrap();
    assert_eq!(card_count(&view.grid_html), 1);
    assert!(view.grid_html.contains("Three"));
    assert_eq!(view.results_count, "Showing 1 article");
    assert!(state
        .filter_buttons_html()
        .contains(r#"<button class="filter-btn active" data-category="Web Development">"#));
}

#[test]
fn unreachable_catalog_shows_error_panel() {
    let site = StaticSite::default()
        .serve("/posts.json", 500, "")
        .serve("../posts.json", 403, "")
        .serve("./posts.json", 502, "");
    let mut state = index_page(site);

    assert_eq!(state.phase(), Phase::Failed);
    let view = state.view();
    assert_eq!(view.grid_html, render::error_panel());
    assert_eq!(view.results_count, "");
    assert!(!view.show_no_results);
    assert_eq!(state.filter_buttons_html(), "");
    assert_eq!(state.search("seo"), None);
}

#[test]
fn index_search_matches_tags_by_substring() {
    let mut state = index_page(StaticSite::default().serve("./posts.json", 200, FIXTURE));

    let view = state.search("mark").unwrap();
    assert_eq!(card_count(&view.grid_html), 2);
    assert!(view.grid_html.contains("Building Email Funnels"));
    assert!(view.grid_html.contains("Schema Markup Explained"));
    assert_eq!(view.results_count, "Showing 2 articles");
}

#[test]
fn empty_result_shows_no_results_panel() {
    let mut state = index_page(StaticSite::default().serve("/posts.json", 200, FIXTURE));
    state.select_category("Content Strategy");

    let view = state.search("flexbox").unwrap();
    assert!(view.show_no_results);
    assert_eq!(view.grid_html, "");
    assert_eq!(view.results_count, "");

    let view = state.search("").unwrap();
    assert_eq!(card_count(&view.grid_html), 1);
}

#[test]
fn typing_before_load_applies_after_load() {
    let mut state = BlogIndexState::new();
    assert_eq!(state.search("flexbox"), None);

    let loader = CatalogLoader::new(StaticSite::default().serve("/posts.json", 200, FIXTURE));
    let view = state.finish_loading(block_on(loader.load()));
    assert_eq!(card_count(&view.grid_html), 1);
    assert!(view.grid_html.contains("A Practical Flexbox Guide"));
}

#[test]
fn post_page_search_uses_prefixes() {
    let state = post_page(None);
    assert!(state.search_available());

    match state.search("mark") {
        ResultsPanel::Visible(html) => {
            assert!(html.contains("2 posts found"));
            assert!(html.contains("Email Funnels"));
            assert!(html.contains("<mark>Mark</mark>up"));
            assert!(!html.contains("Flexbox"));
        }
        ResultsPanel::Hidden => panic!("results should be visible"),
    }
    assert_eq!(state.search("m"), ResultsPanel::Hidden);
}

#[test]
fn post_page_tag_click_and_related_posts() {
    let state = post_page(Some("local-seo"));

    match state.filter_by_tag("SEO") {
        ResultsPanel::Visible(html) => {
            assert!(html.contains("4 posts tagged with"));
            assert!(!html.contains("Building Email Funnels"));
        }
        ResultsPanel::Hidden => panic!("results should be visible"),
    }

    let related = state.related_html().unwrap();
    assert_eq!(related.matches(r#"class="related-post-card""#).count(), 3);
    assert!(!related.contains("Local SEO for Small Shops"));
}

#[test]
fn footer_lists_five_most_recent_posts() {
    let loader = CatalogLoader::new(StaticSite::default().serve("/posts.json", 200, FIXTURE));
    let catalog = block_on(loader.load()).unwrap();
    let html = render::footer_recent(&recent(&catalog, 5), "/blog/index.html");

    assert_eq!(html.matches("<li>").count(), 6);
    assert!(html.contains(
        r#"<a href="/blog/index.html"><span class="post-title">All Blog Posts</span></a>"#
    ));
    assert!(!html.contains("Flexbox"));
    assert!(!html.contains("Content Calendar"));

    let order: Vec<usize> = [
        "Local SEO for Small Shops",
        "Core Web Vitals in Practice",
        "Building Email Funnels",
        "Schema Markup Explained",
        "Keyword Research Basics",
    ]
    .iter()
    .map(|title| html.find(title).unwrap())
    .collect();
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn footer_without_posts() {
    let site = StaticSite::default();
    let loader = CatalogLoader::new(site);
    let catalog = block_on(loader.load()).unwrap_or_default();
    assert_eq!(
        render::footer_recent(&recent(&catalog, 5), "/blog/index.html"),
        "<p>No recent posts available</p>"
    );
}
