//! # atoms 命令实现
//!
//! 以表格形式打印解析出的原子记录，可选导出 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/atoms.rs` 定义的参数
//! - 使用 `parsers/`, `models/`
//! - 使用 `tabled` 打印表格，`csv` + `serde` 导出

use crate::cli::atoms::AtomsArgs;
use crate::error::{FeffViewError, Result};
use crate::models::{ScatteringPath, Structure};
use crate::parsers::{feff_inp, feff_path};
use crate::utils::output;

use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 结构原子表格行
#[derive(Debug, Clone, Tabled)]
struct AtomRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "Site")]
    label: String,
    #[tabled(rename = "x (Å)")]
    x: String,
    #[tabled(rename = "y (Å)")]
    y: String,
    #[tabled(rename = "z (Å)")]
    z: String,
}

/// 路径原子表格行
#[derive(Debug, Clone, Tabled)]
struct PathAtomRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "x (Å)")]
    x: String,
    #[tabled(rename = "y (Å)")]
    y: String,
    #[tabled(rename = "z (Å)")]
    z: String,
    #[tabled(rename = "pot")]
    potential_index: u32,
    #[tabled(rename = "at#")]
    atom_index: u32,
    #[tabled(rename = "R (Å)")]
    distance: String,
}

/// 执行 atoms 命令
pub fn execute(args: AtomsArgs) -> Result<()> {
    output::print_header("FEFF Atom Records");

    let both = match (&args.inp, &args.path) {
        (None, None) => return Err(super::no_input_error()),
        (Some(_), Some(_)) => true,
        _ => false,
    };

    if let Some(ref inp) = args.inp {
        let structure = super::load_structure(inp)?;
        print_structure_table(&structure);
        if args.normalized {
            print!("{}", feff_inp::to_atoms_block(&structure.atoms));
        }

        if let Some(ref csv) = args.csv {
            let target = csv_target(csv, both.then_some("inp"));
            write_records_csv(&structure.atoms, &target)?;
            output::print_success(&format!("Structure atoms saved to '{}'", target.display()));
        }
    }

    if let Some(ref path) = args.path {
        let scattering = super::load_path(path)?;
        print_path_table(&scattering);
        if args.normalized {
            print!("{}", feff_path::to_path_block(&scattering.atoms));
        }

        if let Some(ref csv) = args.csv {
            let target = csv_target(csv, both.then_some("path"));
            write_records_csv(&scattering.atoms, &target)?;
            output::print_success(&format!("Path atoms saved to '{}'", target.display()));
        }
    }

    Ok(())
}

fn print_structure_table(structure: &Structure) {
    output::print_header(&format!("ATOMS: {}", structure.name));

    let rows: Vec<AtomRow> = structure
        .atoms
        .iter()
        .enumerate()
        .map(|(i, a)| AtomRow {
            index: i + 1,
            element: a.element.clone(),
            label: a.label.clone(),
            x: format!("{:.5}", a.x),
            y: format!("{:.5}", a.y),
            z: format!("{:.5}", a.z),
        })
        .collect();
    println!("{}", Table::new(&rows));

    let counts = structure
        .element_counts()
        .into_iter()
        .map(|(el, n)| format!("{}: {}", el, n))
        .collect::<Vec<_>>()
        .join(", ");
    output::print_info(&format!("Elements: {}", counts));
}

fn print_path_table(path: &ScatteringPath) {
    output::print_header(&format!("Path: {}", path.name));

    let rows: Vec<PathAtomRow> = match path.absorber() {
        Some(absorber) => path
            .atoms
            .iter()
            .enumerate()
            .map(|(i, a)| PathAtomRow {
                index: i + 1,
                element: a.element.clone(),
                x: format!("{:.4}", a.x),
                y: format!("{:.4}", a.y),
                z: format!("{:.4}", a.z),
                potential_index: a.potential_index,
                atom_index: a.atom_index,
                distance: format!("{:.4}", absorber.distance_to(a)),
            })
            .collect(),
        None => Vec::new(),
    };
    println!("{}", Table::new(&rows));

    // 有效路径长度为往返总长的一半
    output::print_info(&format!(
        "Legs: {}, half path length: {:.4} Å",
        path.atoms.len(),
        path.total_length() / 2.0
    ));
    let counts = path
        .element_counts()
        .into_iter()
        .map(|(el, n)| format!("{}: {}", el, n))
        .collect::<Vec<_>>()
        .join(", ");
    output::print_info(&format!("Elements: {}", counts));
    if !path.skipped.is_empty() {
        output::print_warning(&format!(
            "{} row(s) between the markers were skipped",
            path.skipped.len()
        ));
    }
}

/// 同时导出两种记录时，在文件名主干后追加后缀
fn csv_target(base: &Path, suffix: Option<&str>) -> PathBuf {
    match suffix {
        None => base.to_path_buf(),
        Some(suffix) => {
            let stem = base
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("atoms");
            let ext = base.extension().and_then(|e| e.to_str()).unwrap_or("csv");
            base.with_file_name(format!("{}_{}.{}", stem, suffix, ext))
        }
    }
}

/// 以 serde 序列化写出 CSV
fn write_records_csv<T: Serialize>(records: &[T], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush().map_err(|e| FeffViewError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AtomRecord, PathAtomRecord};

    #[test]
    fn test_csv_target() {
        let base = Path::new("out/atoms.csv");
        assert_eq!(csv_target(base, None), PathBuf::from("out/atoms.csv"));
        assert_eq!(
            csv_target(base, Some("path")),
            PathBuf::from("out/atoms_path.csv")
        );
    }

    #[test]
    fn test_write_structure_csv() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let target = dir.path().join("atoms.csv");
        let atoms = vec![
            AtomRecord::new("Fe", "Fe_0", [0.0, 0.0, 0.0]),
            AtomRecord::new("C", "C_1", [1.8, 0.0, -0.5]),
        ];

        write_records_csv(&atoms, &target).unwrap();

        let mut rdr = csv::Reader::from_path(&target).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["element", "label", "x", "y", "z"]
        );
        let back: Vec<AtomRecord> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back, atoms);
    }

    #[test]
    fn test_write_path_csv() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let target = dir.path().join("path.csv");
        let atoms = vec![PathAtomRecord::new("Fe", [0.0, 0.0, 0.0], 0, 26)];

        write_records_csv(&atoms, &target).unwrap();

        let content = std::fs::read_to_string(&target).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("element,x,y,z,potential_index,atom_index")
        );
        assert_eq!(lines.next(), Some("Fe,0.0,0.0,0.0,0,26"));
    }
}
