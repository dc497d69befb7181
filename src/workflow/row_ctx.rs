//! 名单行处理上下文
//!
//! 封装"我正在处理第几行、是谁"这一信息，只用于日志

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct RowCtx {
    /// CSV 行号（表头是第 1 行）
    pub line_number: usize,
    pub name: String,
}

impl RowCtx {
    pub fn new(line_number: usize, name: impl Into<String>) -> Self {
        Self {
            line_number,
            name: name.into(),
        }
    }
}

impl Display for RowCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[第 {} 行 {}]", self.line_number, self.name)
    }
}
