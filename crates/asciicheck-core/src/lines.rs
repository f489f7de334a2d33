//! 按行读取（字节级）
//!
//! 行结束符为 `\n`、`\r\n` 或单独的 `\r`，均不计入行内容。
//! 文件末尾的结束符不会额外产生空行；空输入不产生任何行。
use std::io::{self, BufRead};

pub(crate) struct LineReader<R> {
    reader: R,
    /// 上一行以 `\r` 结束；若下一个字节是 `\n` 需吞掉
    pending_cr: bool,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader, pending_cr: false }
    }

    /// 读取下一行到 `line`（先清空）；到达末尾返回 `Ok(false)`
    pub(crate) fn read_line(&mut self, line: &mut Vec<u8>) -> io::Result<bool> {
        line.clear();
        let mut read_any = false;
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(b) => b,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(read_any);
            }
            if self.pending_cr {
                self.pending_cr = false;
                if buf[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            match buf.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    line.extend_from_slice(&buf[..i]);
                    self.pending_cr = buf[i] == b'\r';
                    self.reader.consume(i + 1);
                    return Ok(true);
                }
                None => {
                    let n = buf.len();
                    line.extend_from_slice(buf);
                    self.reader.consume(n);
                    read_any = true;
                }
            }
        }
    }
}
