//! # FEFF feffNNNN.dat 路径文件解析器
//!
//! 从散射路径文件中读取路径上的原子坐标。
//!
//! ## 路径文件格式说明
//! ```text
//!  ...（头部信息）
//!        x           y           z     pot at#
//!     0.0000      0.0000      0.0000   0  26 Fe       absorbing atom
//!     1.8000      0.0000      0.0000   1   6 C
//!     k   real[2*phc]   mag[feff]  phase[feff] red factor   lambda     real[p]@#
//!  ...（数值表）
//! ```
//! 数据行按位置取列：x, y, z, pot, at#, 元素；多余列忽略。
//! 不足 6 列或数值无法解析的行不会报错，而是记录到 `skipped` 中。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/section.rs`, `models/`

use super::section::{Marker, SectionScanner};
use crate::error::{FeffViewError, Result};
use crate::models::{LineSpan, PathAtomRecord, ScatteringPath, SkippedRow};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// 数据行最少列数
const MIN_COLUMNS: usize = 6;

const K_TABLE_HEADER: &str =
    "    k   real[2*phc]   mag[feff]  phase[feff] red factor   lambda     real[p]@#";

fn coordinates_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"x\s+y\s+z\s+pot(\s|$)").unwrap())
}

fn k_table_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"k\s+real\[2\*phc\]").unwrap())
}

/// 解析 feffNNNN.dat 文件
pub fn parse_path_file(path: &Path) -> Result<ScatteringPath> {
    let (content, name) = super::read_source(path)?;
    parse_path_content(&content, &name)
}

/// 从字符串内容解析路径原子
pub fn parse_path_content(content: &str, name: &str) -> Result<ScatteringPath> {
    let lines: Vec<&str> = content.lines().collect();

    let section = SectionScanner::new(
        Marker::new(coordinates_header(), "x y z pot"),
        Marker::new(k_table_marker(), "k real[2*phc]"),
    )
    .require_end(false)
    .scan(&lines, name)?;

    let mut atoms = Vec::new();
    let mut skipped = Vec::new();

    for i in section.body_range(lines.len()) {
        let line = lines[i];
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line) {
            Ok(atom) => atoms.push(atom),
            Err(reason) => skipped.push(SkippedRow { line: i + 1, reason }),
        }
    }

    if atoms.is_empty() {
        return Err(FeffViewError::EmptyResult {
            what: "path atom".to_string(),
            path: name.to_string(),
        });
    }

    Ok(ScatteringPath {
        name: name.to_string(),
        atoms,
        span: LineSpan {
            start: section.start_marker,
            end: section.end_marker,
        },
        skipped,
    })
}

/// 解析单个数据行
fn parse_row(line: &str) -> std::result::Result<PathAtomRecord, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < MIN_COLUMNS {
        return Err(format!(
            "Expected at least {} columns, found {}",
            MIN_COLUMNS,
            parts.len()
        ));
    }

    let float = |idx: usize, what: &str| {
        parts[idx]
            .parse::<f64>()
            .map_err(|_| format!("Cannot parse {} '{}'", what, parts[idx]))
    };
    let index = |idx: usize, what: &str| {
        parts[idx]
            .parse::<u32>()
            .map_err(|_| format!("Cannot parse {} '{}'", what, parts[idx]))
    };

    let position = [
        float(0, "x coordinate")?,
        float(1, "y coordinate")?,
        float(2, "z coordinate")?,
    ];
    Ok(PathAtomRecord::new(
        parts[5],
        position,
        index(3, "potential index")?,
        index(4, "atom index")?,
    ))
}

/// 将路径原子写回坐标块，以 k 表头结束
pub fn to_path_block(atoms: &[PathAtomRecord]) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "{:>14} {:>14} {:>14} {:>4} {:>4}\n",
        "x", "y", "z", "pot", "at#"
    ));
    for atom in atoms {
        result.push_str(&format!(
            "{:>14} {:>14} {:>14} {:>4} {:>4} {}\n",
            atom.x, atom.y, atom.z, atom.potential_index, atom.atom_index, atom.element
        ));
    }
    result.push_str(K_TABLE_HEADER);
    result.push('\n');

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEFF_DAT: &str = r#" Fe(CO)5                                                     Feff 8.40
 Abs   Z=26 Rmt= 1.162 Rnm= 1.289 K  shell
 Pot 1 Z= 6 Rmt= 0.721 Rnm= 0.878
 Gam_ch=1.317E+00 H-L exch
 Mu=-5.238E+00 kf=1.812E+00 Vint=-1.614E+01 Rs_int= 1.768
 Path    1      icalc       2
 -----------------------------------------------------------------------
   2   2.000   1.8000   3.55000  -2.18591 nleg, deg, reff, rnrmav(bohr), edge
        x           y           z     pot at#
      0.0000      0.0000      0.0000   0  26 Fe       absorbing atom

      1.8000      0.0000      0.0000   1   6 C
    k   real[2*phc]   mag[feff]  phase[feff] red factor   lambda     real[p]@#
   0.000  7.0931E+00  0.0000E+00 -3.0137E+00  1.000E+00  5.9221E+00  1.8049E+00
   0.100  7.0741E+00  1.4167E-02 -3.0224E+00  1.000E+00  5.9249E+00  1.8099E+00
"#;

    #[test]
    fn test_parse_feff_dat() {
        let path = parse_path_content(FEFF_DAT, "feff0001").unwrap();
        assert_eq!(path.atoms.len(), 2);
        assert!(path.skipped.is_empty());

        let absorber = path.absorber().unwrap();
        assert_eq!(absorber.element, "Fe");
        assert_eq!(absorber.potential_index, 0);
        assert_eq!(absorber.atom_index, 26);

        let carbon = &path.atoms[1];
        assert_eq!(carbon.element, "C");
        assert_eq!(carbon.position(), [1.8, 0.0, 0.0]);
        assert_eq!(carbon.potential_index, 1);
        assert_eq!(carbon.atom_index, 6);

        assert_eq!(path.span.start, 8);
        assert_eq!(path.span.end, Some(12));
    }

    #[test]
    fn test_minimal_scenario() {
        let content = "x y z pot at# elem\n1.0 2.0 3.0 0 1 Fe\n";
        let path = parse_path_content(content, "minimal").unwrap();
        assert_eq!(
            path.atoms,
            vec![PathAtomRecord::new("Fe", [1.0, 2.0, 3.0], 0, 1)]
        );
        assert_eq!(path.span.end, None);
    }

    #[test]
    fn test_five_tokens_skipped_six_accepted() {
        let content = "x y z pot at#\n1.0 2.0 3.0 0 1\n4.0 5.0 6.0 1 2 C\n";
        let path = parse_path_content(content, "short").unwrap();
        assert_eq!(path.atoms.len(), 1);
        assert_eq!(path.atoms[0].element, "C");
        assert_eq!(path.skipped.len(), 1);
        assert_eq!(path.skipped[0].line, 2);
    }

    #[test]
    fn test_rows_after_k_marker_ignored() {
        let content = "x y z pot at#\n0 0 0 0 1 Fe\n k real[2*phc] mag\n1.0 2.0 3.0 0 1 O\n";
        let path = parse_path_content(content, "stop").unwrap();
        assert_eq!(path.atoms.len(), 1);
        assert_eq!(path.span.end, Some(2));
    }

    #[test]
    fn test_header_requires_pot_token() {
        // "potential" 不应匹配 "pot" 后跟空白的规则
        let content = "x y z potential\n0 0 0 0 1 Fe\n";
        assert!(matches!(
            parse_path_content(content, "nohdr"),
            Err(FeffViewError::MissingSection { .. })
        ));
    }

    #[test]
    fn test_header_is_case_sensitive() {
        let content = "X Y Z POT AT#\n0 0 0 0 1 Fe\n";
        assert!(matches!(
            parse_path_content(content, "upper"),
            Err(FeffViewError::MissingSection { .. })
        ));
    }

    #[test]
    fn test_negative_index_row_skipped() {
        let content = "x y z pot at#\n0 0 0 -1 1 Fe\n0 0 1 0 2 O\n";
        let path = parse_path_content(content, "neg").unwrap();
        assert_eq!(path.atoms.len(), 1);
        assert_eq!(path.atoms[0].atom_index, 2);
        assert!(path.skipped[0].reason.contains("potential index"));
    }

    #[test]
    fn test_no_data_rows() {
        let content = "x y z pot at#\n    k   real[2*phc]\n";
        assert!(matches!(
            parse_path_content(content, "empty"),
            Err(FeffViewError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_path_block_round_trip() {
        let original = parse_path_content(FEFF_DAT, "feff0001").unwrap();
        let block = to_path_block(&original.atoms);
        let parsed = parse_path_content(&block, "round_trip").unwrap();
        assert_eq!(parsed.atoms, original.atoms);
        assert!(parsed.span.end.is_some());
    }

    #[test]
    fn test_parse_path_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("feff0001.dat");
        std::fs::write(&path, FEFF_DAT).unwrap();

        let parsed = parse_path_file(&path).unwrap();
        assert_eq!(parsed.name, "feff0001");
        assert_eq!(parsed.atoms.len(), 2);
    }
}
