//! # 区块扫描器
//!
//! 按行扫描文本，用正则匹配起始标记和结束标记，定位数据区块。
//!
//! 状态转换：
//! ```text
//! SeekStart --起始标记--> InBlock --结束标记--> Done
//! ```
//! 扫描结束时仍处于 `SeekStart` 表示起始标记缺失；
//! 处于 `InBlock` 且要求结束标记时表示结束标记缺失。
//!
//! ## 依赖关系
//! - 被 `parsers/feff_inp.rs`, `parsers/feff_path.rs` 使用
//! - 使用 `regex` crate

use crate::error::{FeffViewError, Result};
use regex::Regex;
use std::ops::Range;

/// 一个区块标记：正则 + 用于报错的名称
#[derive(Debug, Clone, Copy)]
pub struct Marker<'a> {
    pub pattern: &'a Regex,
    pub name: &'a str,
}

impl<'a> Marker<'a> {
    pub fn new(pattern: &'a Regex, name: &'a str) -> Self {
        Marker { pattern, name }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekStart,
    InBlock { start: usize },
    Done { start: usize, end: usize },
}

/// 定位结果，行号均为 0 起始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub start_marker: usize,
    pub end_marker: Option<usize>,
}

impl Section {
    /// 区块内容所在的行范围（不含两端标记行）
    pub fn body_range(&self, line_count: usize) -> Range<usize> {
        let end = self.end_marker.unwrap_or(line_count);
        (self.start_marker + 1).min(end)..end
    }
}

/// 区块扫描器
#[derive(Debug, Clone, Copy)]
pub struct SectionScanner<'a> {
    start: Marker<'a>,
    end: Marker<'a>,
    end_required: bool,
}

impl<'a> SectionScanner<'a> {
    pub fn new(start: Marker<'a>, end: Marker<'a>) -> Self {
        SectionScanner {
            start,
            end,
            end_required: true,
        }
    }

    /// 设置结束标记是否必须存在；不要求时区块延伸到文件末尾
    pub fn require_end(mut self, required: bool) -> Self {
        self.end_required = required;
        self
    }

    /// 扫描行列表，`source` 仅用于错误信息
    pub fn scan(&self, lines: &[&str], source: &str) -> Result<Section> {
        let mut state = ScanState::SeekStart;

        for (i, line) in lines.iter().enumerate() {
            state = match state {
                ScanState::SeekStart if self.start.pattern.is_match(line) => {
                    ScanState::InBlock { start: i }
                }
                ScanState::InBlock { start } if self.end.pattern.is_match(line) => {
                    ScanState::Done { start, end: i }
                }
                other => other,
            };

            if matches!(state, ScanState::Done { .. }) {
                break;
            }
        }

        match state {
            ScanState::SeekStart => Err(FeffViewError::MissingSection {
                marker: self.start.name.to_string(),
                path: source.to_string(),
            }),
            ScanState::InBlock { .. } if self.end_required => Err(FeffViewError::MissingSection {
                marker: self.end.name.to_string(),
                path: source.to_string(),
            }),
            ScanState::InBlock { start } => Ok(Section {
                start_marker: start,
                end_marker: None,
            }),
            ScanState::Done { start, end } => Ok(Section {
                start_marker: start,
                end_marker: Some(end),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> (Regex, Regex) {
        (Regex::new("BEGIN").unwrap(), Regex::new("STOP").unwrap())
    }

    #[test]
    fn test_scan_finds_both_markers() {
        let (start, end) = markers();
        let lines = vec!["header", "BEGIN", "a", "b", "STOP", "STOP"];
        let scanner = SectionScanner::new(Marker::new(&start, "BEGIN"), Marker::new(&end, "STOP"));

        let section = scanner.scan(&lines, "test").unwrap();
        assert_eq!(section.start_marker, 1);
        assert_eq!(section.end_marker, Some(4));
        assert_eq!(section.body_range(lines.len()), 2..4);
    }

    #[test]
    fn test_end_marker_before_start_is_ignored() {
        let (start, end) = markers();
        let lines = vec!["STOP", "BEGIN", "a", "STOP"];
        let scanner = SectionScanner::new(Marker::new(&start, "BEGIN"), Marker::new(&end, "STOP"));

        let section = scanner.scan(&lines, "test").unwrap();
        assert_eq!(section.end_marker, Some(3));
    }

    #[test]
    fn test_missing_start() {
        let (start, end) = markers();
        let lines = vec!["a", "STOP"];
        let scanner = SectionScanner::new(Marker::new(&start, "BEGIN"), Marker::new(&end, "STOP"));

        match scanner.scan(&lines, "test") {
            Err(FeffViewError::MissingSection { marker, .. }) => assert_eq!(marker, "BEGIN"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_end() {
        let (start, end) = markers();
        let lines = vec!["BEGIN", "a"];
        let scanner = SectionScanner::new(Marker::new(&start, "BEGIN"), Marker::new(&end, "STOP"));

        match scanner.scan(&lines, "test") {
            Err(FeffViewError::MissingSection { marker, .. }) => assert_eq!(marker, "STOP"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_optional_end_runs_to_eof() {
        let (start, end) = markers();
        let lines = vec!["BEGIN", "a", "b"];
        let scanner = SectionScanner::new(Marker::new(&start, "BEGIN"), Marker::new(&end, "STOP"))
            .require_end(false);

        let section = scanner.scan(&lines, "test").unwrap();
        assert_eq!(section.end_marker, None);
        assert_eq!(section.body_range(lines.len()), 1..3);
    }
}
