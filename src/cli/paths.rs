//! # paths 子命令 CLI 定义
//!
//! 批量绘制 FEFF 运行目录中的所有路径文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 使用 `cli/view.rs` 的 StyleArgs
//! - 参数传递给 `commands/paths.rs`

use super::view::StyleArgs;
use clap::Args;
use std::path::PathBuf;

/// paths 子命令参数
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Directory containing feffNNNN.dat files
    pub dir: PathBuf,

    /// Overlay every path on this FEFF input file (feff.inp)
    #[arg(short, long)]
    pub inp: Option<PathBuf>,

    /// Output directory for the images
    #[arg(short, long, default_value = "paths")]
    pub output: PathBuf,

    /// Glob pattern for path files (comma separated for several patterns)
    #[arg(long, default_value = "feff*.dat")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    #[command(flatten)]
    pub style: StyleArgs,
}
