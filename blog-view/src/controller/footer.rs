use blog_common::{CatalogLoader, CatalogSource};
use post_filter::recent;
use tracing::{debug, warn};

use crate::config::ViewConfig;
use crate::dom::{self, Page};
use crate::error::ViewError;
use crate::render;

/// 页脚最近文章；页面没有容器时不发起请求
pub async fn mount_footer<S: CatalogSource>(
    page: &Page,
    loader: &CatalogLoader<S>,
    config: &ViewConfig,
) -> Result<(), ViewError> {
    let Some(container) = page.element(&config.elements.footer_recent_posts) else {
        return Ok(());
    };

    let catalog = match loader.load().await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(error = %e, "页脚无法加载文章");
            Default::default()
        }
    };

    let posts = recent(&catalog, config.recent_limit);
    debug!(count = posts.len(), "渲染页脚最近文章");
    dom::set_html(
        &container,
        &render::footer_recent(&posts, &config.all_posts_href),
    );
    Ok(())
}
