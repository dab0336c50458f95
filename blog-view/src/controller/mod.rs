//! 页面控制器 - 把用户事件接到状态机，再把结果写回 DOM
//!
//! 三个控制器互不共享状态，各自加载文章目录。

pub mod footer;
pub mod index;
pub mod post;

pub use footer::mount_footer;
pub use index::mount_blog_index;
pub use post::mount_post_page;
