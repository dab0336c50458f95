//! 输入合并：静默窗口内的多次输入只触发最后一次

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::ViewError;

/// 单调递增的请求代号；旧代号的回调到达时直接丢弃
#[derive(Clone, Debug, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始新一轮请求，返回其代号
    pub fn advance(&self) -> u64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }

    pub fn current(&self) -> u64 {
        self.0.get()
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.get() == ticket
    }
}

/// 防抖器 - 每次输入都重置计时，只有最后一次在静默期结束后执行
#[derive(Clone, Debug)]
pub struct Debouncer {
    generation: Generation,
    quiet_ms: u32,
}

impl Debouncer {
    pub fn new(quiet_ms: u32) -> Self {
        Self {
            generation: Generation::new(),
            quiet_ms,
        }
    }

    /// 安排一次执行；静默期内再次调用会使之前的安排失效
    pub fn schedule<F>(&self, action: F) -> Result<(), ViewError>
    where
        F: FnOnce() + 'static,
    {
        let ticket = self.generation.advance();
        let generation = self.generation.clone();
        let callback = Closure::once_into_js(move || {
            if generation.is_current(ticket) {
                action();
            }
        });

        let window = web_sys::window().ok_or(ViewError::NoDocument)?;
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                self.quiet_ms as i32,
            )
            .map_err(|e| ViewError::dom(&e))?;
        Ok(())
    }

    /// 取消尚未执行的安排
    pub fn cancel(&self) {
        self.generation.advance();
    }
}
