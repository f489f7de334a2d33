//! 扫描选项与统计信息（模块）
use serde::Deserialize;

use crate::findings::AllowedRange;

/// 扫描引擎类型
/// - Chars：按 UTF-8 解码为码点逐列扫描，非法序列替换为 U+FFFD（同样会被报告）。
/// - Bytes：不解码，按字节逐列扫描，适合非 UTF-8 文件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanEngine {
    Chars,
    Bytes,
}

/// 报告格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub engine: ScanEngine,
    pub format: OutputFormat,
    /// 允许字符区间；区间外的字符均被报告
    pub range: AllowedRange,
    /// 文本报告中的命中标签（`<ch> (<cp>) <label>: Ln ..`）
    pub found_label: String,
    /// 文本报告中以转义形式显示字符（如 `\t`、`\u{feff}`）
    pub escape: bool,
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            engine: ScanEngine::Chars,
            format: OutputFormat::Text,
            range: AllowedRange::default(),
            found_label: "found".to_string(),
            escape: false,
            max_file_size: None,
            threads: None,
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_failed: usize,
    /// 超过 `max_file_size` 而未扫描的文件数
    pub files_skipped: usize,
    pub lines_scanned: usize,
    pub findings_written: usize,
}
