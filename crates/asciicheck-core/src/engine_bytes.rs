//! 字节级行扫描引擎
//!
//! 不做 UTF-8 解码，每个字节占一列；字节值即码点（0x80..=0xFF 按 Latin-1 显示）。
//! 适合非 UTF-8 编码的文件，避免解码替换字符掩盖原始字节。
use std::iter::Map;
use std::slice::Iter;

use crate::engine_utf8::LineScanner;
use crate::findings::AllowedRange;

pub type ByteChars<'a> = Map<Iter<'a, u8>, fn(&u8) -> char>;

fn byte_to_char(b: &u8) -> char {
    char::from(*b)
}

/// 按字节扫描一行
pub fn scan_line_bytes(line: &[u8], line_number: usize, range: AllowedRange) -> LineScanner<ByteChars<'_>> {
    let chars: ByteChars<'_> = line.iter().map(byte_to_char as fn(&u8) -> char);
    LineScanner::new(chars, line_number, range)
}
