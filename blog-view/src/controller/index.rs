use std::cell::RefCell;
use std::rc::Rc;

use blog_common::{CatalogLoader, CatalogSource};
use tracing::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::config::ViewConfig;
use crate::debounce::Debouncer;
use crate::dom::{self, Page, HIDDEN_CLASS};
use crate::error::ViewError;
use crate::state::{BlogIndexState, GridView};

/// 首页上会被更新的元素
struct IndexDom {
    grid: Element,
    filters: Option<Element>,
    search: Option<HtmlInputElement>,
    no_results: Option<Element>,
    results_count: Option<Element>,
}

impl IndexDom {
    fn apply(&self, view: &GridView) {
        dom::set_html(&self.grid, &view.grid_html);
        if let Some(no_results) = &self.no_results {
            dom::set_class(no_results, HIDDEN_CLASS, !view.show_no_results);
        }
        if let Some(results_count) = &self.results_count {
            dom::set_text(results_count, &view.results_count);
        }
    }

    fn apply_buttons(&self, state: &BlogIndexState) {
        if let Some(filters) = &self.filters {
            dom::set_html(filters, &state.filter_buttons_html());
        }
    }
}

/// 挂载博客首页：加载目录、生成分类按钮并接好搜索与筛选事件
pub async fn mount_blog_index<S: CatalogSource>(
    page: &Page,
    loader: &CatalogLoader<S>,
    config: &ViewConfig,
) -> Result<(), ViewError> {
    let ids = &config.elements;
    let grid = page.require(&ids.blog_grid)?;
    let search = page
        .element(&ids.blog_search)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

    let view = Rc::new(IndexDom {
        grid,
        filters: page.element(&ids.category_filters),
        search,
        no_results: page.element(&ids.no_results),
        results_count: page.element(&ids.results_count),
    });
    let state = Rc::new(RefCell::new(BlogIndexState::new()));

    // 先接好输入框，加载期间的输入会在加载完成后生效
    if let Some(input) = &view.search {
        let debouncer = Debouncer::new(config.debounce_ms);
        let state = Rc::clone(&state);
        let view = Rc::clone(&view);
        let reader = input.clone();
        dom::listen(input, "input", move |_| {
            let state = Rc::clone(&state);
            let view = Rc::clone(&view);
            let reader = reader.clone();
            let scheduled = debouncer.schedule(move || {
                let text = reader.value();
                let rendered = state.borrow_mut().search(&text);
                if let Some(rendered) = rendered {
                    view.apply(&rendered);
                }
            });
            if let Err(e) = scheduled {
                warn!(error = %e, "无法安排搜索");
            }
        })?;
    }

    let result = loader.load().await;
    let rendered = state.borrow_mut().finish_loading(result);
    view.apply(&rendered);
    view.apply_buttons(&state.borrow());
    info!(phase = ?state.borrow().phase(), "博客首页已就绪");

    if let Some(filters) = &view.filters {
        let state = Rc::clone(&state);
        let view = Rc::clone(&view);
        dom::listen(filters, "click", move |event| {
            let Some(button) = dom::closest(&event, "[data-category]") else {
                return;
            };
            let Some(category) = button.get_attribute("data-category") else {
                return;
            };
            let rendered = state.borrow_mut().select_category(&category);
            view.apply_buttons(&state.borrow());
            if let Some(rendered) = rendered {
                view.apply(&rendered);
            }
        })?;
    }

    {
        let state = Rc::clone(&state);
        let listener_view = Rc::clone(&view);
        dom::listen(&view.grid, "click", move |event| {
            let Some(tag) = dom::closest(&event, ".blog-tag[data-tag]")
                .and_then(|el| el.get_attribute("data-tag"))
            else {
                return;
            };
            if let Some(input) = &listener_view.search {
                input.set_value(&tag);
            }
            let rendered = state.borrow_mut().search(&tag);
            if let Some(rendered) = rendered {
                listener_view.apply(&rendered);
            }
        })?;
    }

    Ok(())
}
