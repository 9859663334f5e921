//! # FEFF feff.inp ATOMS 块解析器
//!
//! 从 FEFF 输入文件中读取原子坐标。
//!
//! ## ATOMS 块格式说明
//! ```text
//! ATOMS
//! *   x          y          z      ipot  tag   distance   site_info
//!    0.00000    0.00000    0.00000   0   Fe    0.00000    Fe_1
//!    1.80000    0.00000    0.00000   1   C     1.80000    C_1
//! ...
//! END
//! ```
//! 第一行为列名，之后为数据行。每行先去掉所有 `*` 再按空白切分，
//! 按列名 `tag`, `site_info`, `x`, `y`, `z` 取值。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/section.rs`, `models/`

use super::section::{Marker, SectionScanner};
use crate::error::{FeffViewError, Result};
use crate::models::{AtomRecord, LineSpan, Structure};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const COL_ELEMENT: &str = "tag";
const COL_LABEL: &str = "site_info";

fn atoms_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"ATOMS").unwrap())
}

fn end_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"END").unwrap())
}

/// 解析 feff.inp 文件
pub fn parse_inp_file(path: &Path) -> Result<Structure> {
    let (content, name) = super::read_source(path)?;
    parse_inp_content(&content, &name)
}

/// 从字符串内容解析 ATOMS 块
pub fn parse_inp_content(content: &str, name: &str) -> Result<Structure> {
    let lines: Vec<&str> = content.lines().collect();

    let section = SectionScanner::new(
        Marker::new(atoms_marker(), "ATOMS"),
        Marker::new(end_marker(), "END"),
    )
    .scan(&lines, name)?;

    // (行号, 去掉 '*' 后的内容)，空白行不计入
    let mut rows = section
        .body_range(lines.len())
        .map(|i| (i, lines[i].replace('*', "")))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_idx, header_line) = rows.next().ok_or_else(|| FeffViewError::EmptyResult {
        what: "ATOMS".to_string(),
        path: name.to_string(),
    })?;

    let columns =
        ColumnMap::from_header(&header_line).map_err(|reason| FeffViewError::MalformedRow {
            path: name.to_string(),
            line: header_idx + 1,
            reason,
        })?;

    let mut atoms = Vec::new();
    for (idx, line) in rows {
        let atom = columns
            .parse_row(&line)
            .map_err(|reason| FeffViewError::MalformedRow {
                path: name.to_string(),
                line: idx + 1,
                reason,
            })?;
        atoms.push(atom);
    }

    if atoms.is_empty() {
        return Err(FeffViewError::EmptyResult {
            what: "ATOMS".to_string(),
            path: name.to_string(),
        });
    }

    Ok(Structure {
        name: name.to_string(),
        atoms,
        span: LineSpan {
            start: section.start_marker,
            end: section.end_marker,
        },
    })
}

/// 列名到列索引的映射
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    element: usize,
    label: usize,
    x: usize,
    y: usize,
    z: usize,
}

impl ColumnMap {
    fn from_header(header: &str) -> std::result::Result<Self, String> {
        let names: Vec<&str> = header.split_whitespace().collect();
        let find = |col: &str| {
            names
                .iter()
                .position(|n| *n == col)
                .ok_or_else(|| format!("Header row is missing required column '{}'", col))
        };

        Ok(ColumnMap {
            element: find(COL_ELEMENT)?,
            label: find(COL_LABEL)?,
            x: find("x")?,
            y: find("y")?,
            z: find("z")?,
        })
    }

    /// 数据行至少需要的列数
    fn width(&self) -> usize {
        [self.element, self.label, self.x, self.y, self.z]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }

    fn parse_row(&self, line: &str) -> std::result::Result<AtomRecord, String> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < self.width() {
            return Err(format!(
                "Expected at least {} columns, found {}",
                self.width(),
                parts.len()
            ));
        }

        let coord = |idx: usize, axis: &str| {
            parts[idx]
                .parse::<f64>()
                .map_err(|_| format!("Cannot parse {} coordinate '{}'", axis, parts[idx]))
        };

        let position = [coord(self.x, "x")?, coord(self.y, "y")?, coord(self.z, "z")?];
        Ok(AtomRecord::new(
            parts[self.element],
            parts[self.label],
            position,
        ))
    }
}

/// 将原子记录写回 ATOMS 块（列布局与解析器一致）
pub fn to_atoms_block(atoms: &[AtomRecord]) -> String {
    let mut result = String::new();

    result.push_str("ATOMS\n");
    result.push_str(&format!(
        "* {:>14} {:>14} {:>14}  {:<4} {}\n",
        "x", "y", "z", COL_ELEMENT, COL_LABEL
    ));
    for atom in atoms {
        result.push_str(&format!(
            "  {:>14} {:>14} {:>14}  {:<4} {}\n",
            atom.x, atom.y, atom.z, atom.element, atom.label
        ));
    }
    result.push_str("END\n");

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEFF_INP: &str = r#" TITLE Fe(CO)5
 EDGE      K
 S02       1.0

 POTENTIALS
*   ipot   Z  element
      0   26   Fe
      1    6   C
      2    8   O

 ATOMS
*   x          y          z      ipot  tag   distance   site_info
    0.00000    0.00000    0.00000   0   Fe    0.00000    Fe_0
    1.80000    0.00000    0.00000   1   C     1.80000    C_1
   -1.80000    0.00000    0.00000   1   C     1.80000    C_2
    2.95000    0.00000    0.00000   2   O     2.95000    O_1
 END
"#;

    #[test]
    fn test_parse_feff_inp() {
        let structure = parse_inp_content(FEFF_INP, "feff").unwrap();
        assert_eq!(structure.atoms.len(), 4);

        let first = &structure.atoms[0];
        assert_eq!(first.element, "Fe");
        assert_eq!(first.label, "Fe_0");
        assert_eq!(first.position(), [0.0, 0.0, 0.0]);

        // 顺序与文件一致
        let labels: Vec<&str> = structure.atoms.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Fe_0", "C_1", "C_2", "O_1"]);
        assert!((structure.atoms[2].x + 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_record_count_matches_marker_lines() {
        let structure = parse_inp_content(FEFF_INP, "feff").unwrap();
        let end = structure.span.end.unwrap();
        assert_eq!(structure.atoms.len(), end - structure.span.start - 2);
    }

    #[test]
    fn test_minimal_scenario() {
        let content = "ATOMS\ntag site_info x y z\nFe A1 0.0 0.0 0.0\nEND\n";
        let structure = parse_inp_content(content, "minimal").unwrap();
        assert_eq!(structure.atoms, vec![AtomRecord::new("Fe", "A1", [0.0; 3])]);
    }

    #[test]
    fn test_stars_are_stripped() {
        let content = "ATOMS\n* tag site_info x y z\nFe* A1 *1.5 2.0 3.0*\nEND\n";
        let structure = parse_inp_content(content, "stars").unwrap();
        assert_eq!(structure.atoms[0].element, "Fe");
        assert_eq!(structure.atoms[0].position(), [1.5, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_end_marker() {
        let content = "ATOMS\ntag site_info x y z\nFe A1 0.0 0.0 0.0\n";
        match parse_inp_content(content, "no_end") {
            Err(FeffViewError::MissingSection { marker, .. }) => assert_eq!(marker, "END"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_atoms_marker() {
        let content = "TITLE nothing here\nEND\n";
        match parse_inp_content(content, "no_atoms") {
            Err(FeffViewError::MissingSection { marker, .. }) => assert_eq!(marker, "ATOMS"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_zero_data_rows() {
        let content = "ATOMS\ntag site_info x y z\nEND\n";
        assert!(matches!(
            parse_inp_content(content, "empty"),
            Err(FeffViewError::EmptyResult { .. })
        ));

        let content = "ATOMS\nEND\n";
        assert!(matches!(
            parse_inp_content(content, "no_header"),
            Err(FeffViewError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_short_row_is_error() {
        let content = "ATOMS\ntag site_info x y z\nFe A1 0.0 0.0\nEND\n";
        match parse_inp_content(content, "short") {
            Err(FeffViewError::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_bad_coordinate_is_error() {
        let content = "ATOMS\ntag site_info x y z\nFe A1 0.0 abc 0.0\nEND\n";
        match parse_inp_content(content, "bad") {
            Err(FeffViewError::MalformedRow { reason, .. }) => assert!(reason.contains("abc")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_header_missing_column() {
        let content = "ATOMS\nx y z ipot tag\n0.0 0.0 0.0 0 Fe\nEND\n";
        match parse_inp_content(content, "no_site_info") {
            Err(FeffViewError::MalformedRow { reason, line, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("site_info"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_atoms_block_round_trip() {
        let original = parse_inp_content(FEFF_INP, "feff").unwrap();
        let block = to_atoms_block(&original.atoms);
        let parsed = parse_inp_content(&block, "round_trip").unwrap();
        assert_eq!(parsed.atoms, original.atoms);
    }

    #[test]
    fn test_parse_inp_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("feff.inp");
        std::fs::write(&path, FEFF_INP).unwrap();

        let structure = parse_inp_file(&path).unwrap();
        assert_eq!(structure.name, "feff");
        assert_eq!(structure.atoms.len(), 4);
    }

    #[test]
    fn test_parse_inp_file_not_found() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing.inp");
        assert!(matches!(
            parse_inp_file(&path),
            Err(FeffViewError::FileNotFound { .. })
        ));
    }
}
