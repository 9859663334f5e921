//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `view`: 绘制结构和/或散射路径
//! - `atoms`: 以表格打印解析结果，可导出 CSV
//! - `paths`: 批量绘制目录中的路径文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: view, atoms, paths

pub mod atoms;
pub mod paths;
pub mod view;

use clap::{Parser, Subcommand};

/// feffview - FEFF 结构与散射路径查看器
#[derive(Parser)]
#[command(name = "feffview")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Plot atoms from FEFF input and scattering-path files", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Plot a structure (feff.inp) and/or a scattering path (feffNNNN.dat)
    View(view::ViewArgs),

    /// Print parsed atom records as a table, optionally export to CSV
    Atoms(atoms::AtomsArgs),

    /// Plot every scattering-path file in a directory
    Paths(paths::PathsArgs),
}
