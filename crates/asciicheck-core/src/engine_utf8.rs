//! 字符级（UTF-8 码点）行扫描引擎
//!
//! 单遍扫描一行，把“连续相同的越界字符”归并为一个命中。
//! 归并键是字符完全相等：相邻但不同的越界字符（如 NUL 后接 TAB）各自成为独立命中。
use std::iter::Peekable;
use std::str::Chars;

use crate::findings::{AllowedRange, Finding};

/// 惰性行扫描器：按列从左到右推进，每次 `next` 产出一个已闭合的命中
/// - `pending_start` 为当前未闭合区间的起始列（无则为 None）
/// - 区间总在自身最后一列闭合，因此行尾不会残留未闭合区间
pub struct LineScanner<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    range: AllowedRange,
    line: usize,
    column: usize,
    pending_start: Option<usize>,
}

impl<I: Iterator<Item = char>> LineScanner<I> {
    pub(crate) fn new(chars: I, line: usize, range: AllowedRange) -> Self {
        Self { chars: chars.peekable(), range, line, column: 0, pending_start: None }
    }
}

impl<I: Iterator<Item = char>> Iterator for LineScanner<I> {
    type Item = Finding;

    fn next(&mut self) -> Option<Finding> {
        while let Some(ch) = self.chars.next() {
            self.column += 1;
            if self.range.allows(ch) {
                continue;
            }
            let start = *self.pending_start.get_or_insert(self.column);
            // 下一个字符不同或已到行尾：闭合区间
            if self.chars.peek() != Some(&ch) {
                self.pending_start = None;
                return Some(Finding::new(ch, self.line, start, self.column));
            }
        }
        None
    }
}

/// 以默认可打印 ASCII 区间扫描一行；`line_number` 原样回显，不做校验
pub fn scan_line(line: &str, line_number: usize) -> LineScanner<Chars<'_>> {
    scan_line_with(line, line_number, AllowedRange::default())
}

/// 以指定允许区间扫描一行
pub fn scan_line_with(line: &str, line_number: usize, range: AllowedRange) -> LineScanner<Chars<'_>> {
    LineScanner::new(line.chars(), line_number, range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(line: &str) -> Vec<(u32, usize, usize)> {
        scan_line(line, 1).map(|f| (f.code_point, f.start_column, f.end_column)).collect()
    }

    #[test]
    fn tab_in_middle() {
        let found: Vec<Finding> = scan_line("AB\tC", 7).collect();
        assert_eq!(found, vec![Finding { character: '\t', code_point: 9, line: 7, start_column: 3, end_column: 3 }]);
    }

    #[test]
    fn run_of_identical_chars_is_one_span() {
        assert_eq!(spans("\x01\x01\x01"), vec![(1, 1, 3)]);
    }

    #[test]
    fn different_adjacent_chars_are_separate() {
        assert_eq!(spans("\x01\x02"), vec![(1, 1, 1), (2, 2, 2)]);
    }

    #[test]
    fn alternating_chars_never_merge() {
        assert_eq!(spans("\0\t\0\t"), vec![(0, 1, 1), (9, 2, 2), (0, 3, 3), (9, 4, 4)]);
    }

    #[test]
    fn clean_lines() {
        assert!(spans("").is_empty());
        assert!(spans("hello world").is_empty());
        assert!(spans(" ~!@#$%^&*()_+{}|:\"<>?").is_empty());
    }

    #[test]
    fn run_followed_by_allowed_and_repeated() {
        assert_eq!(spans("a\x7f\x7fb\x7fc"), vec![(0x7f, 2, 3), (0x7f, 5, 5)]);
    }

    #[test]
    fn columns_count_code_points() {
        // “é” 为 1 列，而非 2 个 UTF-8 字节
        assert_eq!(spans("caféé!"), vec![(0xe9, 4, 5)]);
        assert_eq!(spans("\u{feff}x"), vec![(0xfeff, 1, 1)]);
        assert_eq!(spans("a😀"), vec![(0x1f600, 2, 2)]);
    }

    #[test]
    fn custom_range() {
        let range = AllowedRange { low: 0x09, high: 0x7E };
        let found: Vec<_> = scan_line_with("a\tb\x01", 2, range).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start_column, 4);
        assert_eq!(found[0].line, 2);
    }

    #[test]
    fn lazy_scanner_yields_incrementally() {
        let mut it = scan_line("\x01x\x02", 1);
        assert_eq!(it.next().map(|f| f.start_column), Some(1));
        assert_eq!(it.next().map(|f| f.start_column), Some(3));
        assert_eq!(it.next(), None);
    }
}
