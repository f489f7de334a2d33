//! 公共类型（对外暴露）
use serde::Serialize;

use crate::findings::Finding;

/// JSON 报告的单个元素
#[derive(Debug, Clone, Serialize)]
pub struct OutputItem<'a> {
    pub file: &'a str,
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub character: String,
    pub code_point: u32,
}

impl<'a> OutputItem<'a> {
    pub fn from_finding(file: &'a str, f: &Finding) -> Self {
        Self {
            file,
            line: f.line,
            start_column: f.start_column,
            end_column: f.end_column,
            character: f.character.to_string(),
            code_point: f.code_point,
        }
    }
}
