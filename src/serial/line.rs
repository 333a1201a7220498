use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use crate::error::Result;

/// 未收到换行符时，缓冲区超过此长度即丢弃（上电时的乱码、波特率不匹配）
pub const MAX_PENDING_LINE: usize = 256;

/// 一次 [`LineSource::next_line`] 调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    Line(String),
    /// 读超时，暂时没有完整的一行
    Idle,
    /// 数据流已结束
    Closed,
}

/// 读取下一行可用数据，没有则返回 `Idle`
pub trait LineSource: Send {
    fn next_line(&mut self) -> Result<LineRead>;
}

/// 按 `\n` 切分字节流，兼容 `\r\n` 和无效 UTF-8
#[derive(Debug, Default)]
pub struct LineAssembler {
    pending: Vec<u8>,
    // 当前这一行已超长，丢弃直到下一个换行
    discarding: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8], out: &mut Vec<String>) {
        for &byte in bytes {
            if byte == b'\n' {
                if !self.discarding {
                    out.push(decode_line(&self.pending));
                }
                self.pending.clear();
                self.discarding = false;
            } else if !self.discarding {
                self.pending.push(byte);
                if self.pending.len() > MAX_PENDING_LINE {
                    log::trace!("Discarding over-long serial line");
                    self.pending.clear();
                    self.discarding = true;
                }
            }
        }
    }
}

// 无效的 UTF-8 字节直接忽略
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).replace(char::REPLACEMENT_CHARACTER, "")
}

/// 基于任意字节读取器的 [`LineSource`]，串口或测试中的内存缓冲区
pub struct ByteLineSource<R> {
    reader: R,
    assembler: LineAssembler,
    ready: VecDeque<String>,
    buf: [u8; 128],
}

impl<R: Read> ByteLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            assembler: LineAssembler::new(),
            ready: VecDeque::new(),
            buf: [0; 128],
        }
    }
}

impl<R: Read + Send> LineSource for ByteLineSource<R> {
    fn next_line(&mut self) -> Result<LineRead> {
        if let Some(line) = self.ready.pop_front() {
            return Ok(LineRead::Line(line));
        }

        let n = match self.reader.read(&mut self.buf) {
            Ok(0) => return Ok(LineRead::Closed),
            Ok(n) => n,
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                return Ok(LineRead::Idle)
            }
            Err(e) => return Err(e.into()),
        };

        let mut lines = Vec::new();
        self.assembler.push(&self.buf[..n], &mut lines);
        self.ready.extend(lines);

        Ok(self
            .ready
            .pop_front()
            .map(LineRead::Line)
            .unwrap_or(LineRead::Idle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn assemble(chunks: &[&[u8]]) -> Vec<String> {
        let mut assembler = LineAssembler::new();
        let mut out = Vec::new();
        for chunk in chunks {
            assembler.push(chunk, &mut out);
        }
        out
    }

    #[test]
    fn lines_split_across_chunks_are_joined() {
        let lines = assemble(&[b"12.5,", b"-3.0\r\n4", b"0,1\n"]);
        assert_eq!(lines, vec!["12.5,-3.0", "40,1"]);
    }

    #[test]
    fn partial_line_is_held_until_newline() {
        assert!(assemble(&[b"1,2,3"]).is_empty());
    }

    #[test]
    fn invalid_utf8_is_ignored_not_fatal() {
        let lines = assemble(&[b"\xff\xfe1,2\n"]);
        assert_eq!(lines, vec!["1,2"]);
    }

    #[test]
    fn over_long_line_is_discarded_until_next_newline() {
        let garbage = vec![b'x'; MAX_PENDING_LINE + 10];
        let lines = assemble(&[garbage.as_slice(), b"tail\n0,0,0\n"]);
        assert_eq!(lines, vec!["0,0,0"]);
    }

    #[test]
    fn source_yields_lines_then_closes() {
        let mut source = ByteLineSource::new(Cursor::new(b"1,2\n3,4\n".to_vec()));
        assert_eq!(source.next_line().unwrap(), LineRead::Line("1,2".into()));
        assert_eq!(source.next_line().unwrap(), LineRead::Line("3,4".into()));
        assert_eq!(source.next_line().unwrap(), LineRead::Closed);
    }

    #[test]
    fn source_reports_idle_without_full_line() {
        let mut source = ByteLineSource::new(Cursor::new(b"1,2".to_vec()));
        assert_eq!(source.next_line().unwrap(), LineRead::Idle);
        assert_eq!(source.next_line().unwrap(), LineRead::Closed);
    }
}
