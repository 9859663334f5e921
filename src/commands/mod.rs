//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，以及各命令共用的输入加载与输出路径处理。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `models/`, `render/`, `utils/`
//! - 子模块: view, atoms, paths

pub mod atoms;
pub mod paths;
pub mod view;

use crate::cli::view::{ImageFormat, StyleArgs};
use crate::cli::Commands;
use crate::error::{FeffViewError, Result};
use crate::models::{ScatteringPath, Structure};
use crate::parsers;
use crate::render::{ConnectivityRules, RenderOptions};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::View(args) => view::execute(args),
        Commands::Atoms(args) => atoms::execute(args),
        Commands::Paths(args) => paths::execute(args),
    }
}

/// 两个输入都缺失时的错误
fn no_input_error() -> FeffViewError {
    FeffViewError::InvalidArgument(
        "Please provide either an inp file (--inp) or a path file (--path)".to_string(),
    )
}

/// 读取 feff.inp 并报告定位到的标记行
fn load_structure(path: &Path) -> Result<Structure> {
    let structure = parsers::parse_inp_file(path)?;

    output::print_info(&format!(
        "Found ATOMS section at line {} in '{}'",
        structure.span.start + 1,
        path.display()
    ));
    if let Some(end) = structure.span.end {
        output::print_info(&format!("Found END of ATOMS section at line {}", end + 1));
    }
    output::print_success(&format!(
        "Parsed {} atoms ({})",
        structure.atoms.len(),
        structure.formula()
    ));

    Ok(structure)
}

/// 读取路径文件，报告被跳过的行
fn load_path(path: &Path) -> Result<ScatteringPath> {
    let scattering = parsers::parse_path_file(path)?;

    output::print_info(&format!(
        "Found coordinates header at line {} in '{}'",
        scattering.span.start + 1,
        path.display()
    ));
    for row in &scattering.skipped {
        output::print_warning(&format!("Skipped line {}: {}", row.line, row.reason));
    }
    output::print_success(&format!(
        "Parsed {} path atoms (absorber: {})",
        scattering.atoms.len(),
        scattering
            .absorber()
            .map(|a| a.element.as_str())
            .unwrap_or("-")
    ));

    Ok(scattering)
}

/// 确定输出图像格式与最终路径
///
/// 显式给出的格式优先；与扩展名不一致时改写扩展名。
/// 未给出格式时按扩展名推断，无法推断则报错。
fn resolve_output(output: &Path, format: Option<ImageFormat>) -> Result<(PathBuf, ImageFormat)> {
    let detected = ImageFormat::from_path(output);
    match (format, detected) {
        (Some(f), Some(d)) if f == d => Ok((output.to_path_buf(), f)),
        (Some(f), _) => Ok((output.with_extension(f.extension()), f)),
        (None, Some(d)) => Ok((output.to_path_buf(), d)),
        (None, None) => Err(FeffViewError::InvalidArgument(format!(
            "Cannot infer image format from '{}', use --format png|svg",
            output.display()
        ))),
    }
}

/// 由命令行样式参数构造绘图选项
fn render_options(style: &StyleArgs, format: ImageFormat, title: Option<String>) -> RenderOptions {
    RenderOptions {
        dot_size: style.dot_size,
        show_labels: style.labels,
        width: style.width,
        height: style.height,
        title,
        use_svg: format == ImageFormat::Svg,
        rules: ConnectivityRules::central_ligand(&style.central, &style.ligand),
    }
}
