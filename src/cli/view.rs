//! # view 子命令 CLI 定义
//!
//! 绘制结构文件和/或路径文件，两者同时给出时路径叠加在结构上。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/paths.rs` 使用
//! - 参数传递给 `commands/view.rs`

use clap::{ArgGroup, Args, ValueEnum};
use std::path::{Path, PathBuf};

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

impl ImageFormat {
    /// 从文件扩展名推断格式，未知扩展名返回 None
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())?;
        match ext.as_str() {
            "png" => Some(ImageFormat::Png),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 绘图样式参数（view 与 paths 共用）
#[derive(Args, Debug, Clone)]
pub struct StyleArgs {
    /// Size (area) of the scatter points
    #[arg(short = 's', long, default_value_t = 100)]
    pub dot_size: u32,

    /// Show site labels next to structure atoms
    #[arg(short, long, default_value_t = false)]
    pub labels: bool,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1000)]
    pub height: u32,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<ImageFormat>,

    /// Central species for path connectivity lines
    #[arg(long, default_value = "Fe")]
    pub central: String,

    /// Ligand species for path connectivity lines
    #[arg(long, default_value = "C")]
    pub ligand: String,
}

/// view 子命令参数
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["inp", "path"])
))]
pub struct ViewArgs {
    /// Path to the FEFF input file (feff.inp)
    #[arg(short, long)]
    pub inp: Option<PathBuf>,

    /// Path to the FEFF path file (feffNNNN.dat)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Output image file
    #[arg(short, long, default_value = "feff_view.png")]
    pub output: PathBuf,

    /// Title for the plot (default: derived from input names)
    #[arg(long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}
