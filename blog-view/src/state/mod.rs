//! 页面状态机 - 与 DOM 无关，控制器负责把结果写入页面

pub mod index;
pub mod post;

pub use index::{BlogIndexState, GridView, Phase};
pub use post::{PostPageState, ResultsPanel};
