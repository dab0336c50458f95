//! 把 tracing 事件输出到浏览器控制台

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// 控制台方法
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<Level> for ConsoleMethod {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => ConsoleMethod::Error,
            Level::WARN => ConsoleMethod::Warn,
            Level::INFO => ConsoleMethod::Info,
            _ => ConsoleMethod::Debug,
        }
    }
}

/// 缓冲一条格式化后的事件，释放时写入控制台
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer);
        let message = JsValue::from_str(text.trim_end());
        match self.method {
            ConsoleMethod::Error => console::error_1(&message),
            ConsoleMethod::Warn => console::warn_1(&message),
            ConsoleMethod::Info => console::info_1(&message),
            ConsoleMethod::Debug => console::debug_1(&message),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::Info,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::from(*meta.level()),
            buffer: Vec::new(),
        }
    }
}

/// 安装全局 subscriber；重复调用时忽略
pub fn init() {
    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let result = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(max_level)
        .without_time()
        .with_target(true)
        .try_init();

    if let Err(e) = result {
        console::warn_1(&JsValue::from_str(&format!("日志初始化失败: {e}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(ConsoleMethod::from(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(ConsoleMethod::from(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(ConsoleMethod::from(Level::INFO), ConsoleMethod::Info);
        assert_eq!(ConsoleMethod::from(Level::TRACE), ConsoleMethod::Debug);
    }
}
