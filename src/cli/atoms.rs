//! # atoms 子命令 CLI 定义
//!
//! 打印解析出的原子记录，可选导出 CSV。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/atoms.rs`

use clap::{ArgGroup, Args};
use std::path::PathBuf;

/// atoms 子命令参数
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["inp", "path"])
))]
pub struct AtomsArgs {
    /// Path to the FEFF input file (feff.inp)
    #[arg(short, long)]
    pub inp: Option<PathBuf>,

    /// Path to the FEFF path file (feffNNNN.dat)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Export records to CSV; with both inputs, '_inp'/'_path' is appended to the file stem
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Also print each parsed block rewritten in normalized FEFF column layout
    #[arg(long)]
    pub normalized: bool,
}
