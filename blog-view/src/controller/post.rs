use std::cell::RefCell;
use std::rc::Rc;

use blog_common::{CatalogLoader, CatalogSource};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, KeyboardEvent, Node};

use crate::config::ViewConfig;
use crate::debounce::Debouncer;
use crate::dom::{self, Page};
use crate::error::ViewError;
use crate::state::{PostPageState, ResultsPanel};

/// 搜索框及其结果面板
struct SearchBox {
    input: HtmlInputElement,
    results: Element,
    debouncer: Debouncer,
}

impl SearchBox {
    fn show(&self, panel: &ResultsPanel) {
        match panel {
            ResultsPanel::Hidden => {
                dom::set_html(&self.results, "");
                dom::set_visible(&self.results, false);
            }
            ResultsPanel::Visible(html) => {
                dom::set_html(&self.results, html);
                dom::set_visible(&self.results, true);
            }
        }
    }

    /// 清空输入与结果，并取消尚未执行的搜索
    fn clear(&self) {
        self.debouncer.cancel();
        self.input.set_value("");
        self.show(&ResultsPanel::Hidden);
    }

    fn contains(&self, target: &Element) -> bool {
        let node: &Node = target.as_ref();
        self.input.contains(Some(node)) || self.results.contains(Some(node))
    }
}

/// 挂载文章页：相关文章、搜索框、标签点击
pub async fn mount_post_page<S: CatalogSource>(
    page: &Page,
    loader: &CatalogLoader<S>,
    config: &ViewConfig,
    search_enabled: bool,
) -> Result<(), ViewError> {
    let ids = &config.elements;
    let current_post_id = page.meta_content(&config.post_id_meta);
    let state = Rc::new(RefCell::new(PostPageState::new(
        current_post_id,
        config.related_limit,
    )));

    let search_box = match (
        page.require_input(&ids.search_input),
        page.require(&ids.search_results),
    ) {
        (Ok(input), Ok(results)) => Some(Rc::new(SearchBox {
            input,
            results,
            debouncer: Debouncer::new(config.debounce_ms),
        })),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "文章页搜索框不可用，跳过搜索");
            None
        }
    };

    if let Some(search_box) = &search_box {
        wire_search_box(page, search_box, &state)?;
    }

    let catalog = match loader.load().await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(error = %e, "加载文章失败");
            Default::default()
        }
    };
    state.borrow_mut().finish_loading(catalog, search_enabled);

    if let Some(container) = page.element(&ids.related_posts) {
        match state.borrow().related_html() {
            Some(html) => dom::set_html(&container, &html),
            None => debug!("没有相关文章"),
        }
    }

    info!(search = state.borrow().search_available(), "文章页已就绪");
    Ok(())
}

fn wire_search_box(
    page: &Page,
    search_box: &Rc<SearchBox>,
    state: &Rc<RefCell<PostPageState>>,
) -> Result<(), ViewError> {
    let input = search_box.input.clone();

    {
        let search_box = Rc::clone(search_box);
        let state = Rc::clone(state);
        dom::listen(&input, "input", move |_| {
            let query = search_box.input.value();
            let state = Rc::clone(&state);
            let target = Rc::clone(&search_box);
            let scheduled = search_box.debouncer.schedule(move || {
                let panel = state.borrow().search(&query);
                target.show(&panel);
            });
            if let Err(e) = scheduled {
                warn!(error = %e, "无法安排搜索");
            }
        })?;
    }

    {
        let search_box = Rc::clone(search_box);
        dom::listen(&input, "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .map_or(false, |key| key.key() == "Escape");
            if is_escape {
                search_box.clear();
            }
        })?;
    }

    let search_box = Rc::clone(search_box);
    let state = Rc::clone(state);
    dom::listen(page.document(), "click", move |event| {
        if let Some(tag) = dom::closest(&event, ".tag[data-tag]")
            .and_then(|el| el.get_attribute("data-tag"))
        {
            event.prevent_default();
            event.stop_propagation();
            search_box.debouncer.cancel();
            search_box.input.set_value(&tag);
            let panel = state.borrow().filter_by_tag(&tag);
            search_box.show(&panel);
            search_box.input.scroll_into_view();
            return;
        }

        if dom::closest(&event, "[data-action=\"clear-search\"]").is_some() {
            event.prevent_default();
            search_box.clear();
            return;
        }

        let outside = match dom::event_element(&event) {
            Some(target) => {
                !search_box.contains(&target) && target.closest(".tag").ok().flatten().is_none()
            }
            None => true,
        };
        if outside {
            dom::set_visible(&search_box.results, false);
        }
    })
}
