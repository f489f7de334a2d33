//! 命中项与允许字符区间

/// 允许字符的闭区间 `[low, high]`（按字符序号比较）
/// 默认为可打印 ASCII：0x20（空格）..=0x7E（`~`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedRange {
    pub low: u32,
    pub high: u32,
}

impl AllowedRange {
    pub const PRINTABLE_ASCII: AllowedRange = AllowedRange { low: 0x20, high: 0x7E };

    #[inline]
    pub fn allows(&self, ch: char) -> bool {
        let v = ch as u32;
        v >= self.low && v <= self.high
    }
}

impl Default for AllowedRange {
    fn default() -> Self {
        Self::PRINTABLE_ASCII
    }
}

/// 单次命中：同一行内连续相同的越界字符
/// - 行号、列号均从 1 开始
/// - `start_column..=end_column` 内每一列都是同一个 `character`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finding {
    pub character: char,
    pub code_point: u32,
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl Finding {
    pub(crate) fn new(character: char, line: usize, start_column: usize, end_column: usize) -> Self {
        Self { character, code_point: character as u32, line, start_column, end_column }
    }

    /// 是否为单列命中
    pub fn is_single_column(&self) -> bool {
        self.start_column == self.end_column
    }

    /// 覆盖的列数
    pub fn width(&self) -> usize {
        self.end_column - self.start_column + 1
    }
}
