//! 报告输出（文本 / JSON 数组流式写入）
use anyhow::Result;
use std::io::Write;

use crate::findings::Finding;
use crate::options::{OutputFormat, ScanOptions};
use crate::types::OutputItem;

/// 单文件扫描结束后的提示
pub const ANALYSIS_COMPLETE: &str = "Analysis complete.";

/// 渲染单个命中：
/// - 单列：`<ch> (<cp>) <label>: Ln <line>, Col <col>`
/// - 多列：`<ch> (<cp>) <label>: Ln <line>, Cols <start>-<end>`
pub fn format_finding(f: &Finding, label: &str, escape: bool) -> String {
    let shown = if escape { f.character.escape_default().to_string() } else { f.character.to_string() };
    let columns = if f.is_single_column() {
        format!("Col {}", f.start_column)
    } else {
        format!("Cols {}-{}", f.start_column, f.end_column)
    };
    format!("{} ({}) {}: Ln {}, {}", shown, f.code_point, label, f.line, columns)
}

/// 报告写出器：持有格式状态，保证 JSON 数组的逗号与括号正确
pub(crate) struct ReportWriter<'w> {
    out: &'w mut dyn Write,
    format: OutputFormat,
    label: String,
    escape: bool,
    /// 多文件时在文本报告中输出文件头
    headers: bool,
    first: bool,
}

impl<'w> ReportWriter<'w> {
    pub(crate) fn new(out: &'w mut dyn Write, opts: &ScanOptions, headers: bool) -> Self {
        Self {
            out,
            format: opts.format,
            label: opts.found_label.clone(),
            escape: opts.escape,
            headers,
            first: true,
        }
    }

    pub(crate) fn begin(&mut self) -> Result<()> {
        if self.format == OutputFormat::Json {
            write!(self.out, "[")?;
        }
        Ok(())
    }

    pub(crate) fn file_start(&mut self, file: &str) -> Result<()> {
        if self.format == OutputFormat::Text && self.headers {
            writeln!(self.out, "==> {} <==", file)?;
        }
        Ok(())
    }

    pub(crate) fn finding(&mut self, file: &str, f: &Finding) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{}", format_finding(f, &self.label, self.escape))?;
            }
            OutputFormat::Json => {
                if !self.first { write!(self.out, ",")?; } else { self.first = false; }
                serde_json::to_writer(&mut *self.out, &OutputItem::from_finding(file, f))?;
            }
        }
        Ok(())
    }

    pub(crate) fn file_end(&mut self) -> Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "{}", ANALYSIS_COMPLETE)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub(crate) fn finish(&mut self) -> Result<()> {
        if self.format == OutputFormat::Json {
            write!(self.out, "]")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
