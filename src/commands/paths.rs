//! # paths 命令实现
//!
//! 批量绘制 FEFF 运行目录中的散射路径文件。
//!
//! ## 功能
//! - 按 glob 模式收集 feffNNNN.dat
//! - 可选叠加同一个 feff.inp 结构
//! - 已存在的输出默认跳过
//! - 逐个处理，单个文件失败不影响其余文件
//!
//! ## 依赖关系
//! - 使用 `cli/paths.rs` 定义的参数
//! - 使用 `batch/` 模块收集与执行
//! - 使用 `parsers/`, `render/`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::paths::PathsArgs;
use crate::cli::view::ImageFormat;
use crate::error::{FeffViewError, Result};
use crate::models::Structure;
use crate::parsers;
use crate::render::{render_scene, RenderOptions, Scene};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 批量绘图配置
struct BatchPathConfig<'a> {
    input_dir: PathBuf,
    output_dir: PathBuf,
    format: ImageFormat,
    overwrite: bool,
    structure: Option<&'a Structure>,
    options: RenderOptions,
}

/// 执行 paths 命令
pub fn execute(args: PathsArgs) -> Result<()> {
    output::print_header("Rendering FEFF Scattering Paths");

    if !args.dir.exists() {
        return Err(FeffViewError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    // 收集文件
    let files = FileCollector::new(args.dir.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} path files", files.len()));

    let structure = args
        .inp
        .as_deref()
        .map(super::load_structure)
        .transpose()?;

    // 确保输出目录存在
    fs::create_dir_all(&args.output).map_err(|e| FeffViewError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let format = args.style.format.unwrap_or(ImageFormat::Png);
    output::print_info(&format!("Output format: {}", format));

    let config = BatchPathConfig {
        input_dir: args.dir.clone(),
        output_dir: args.output.clone(),
        format,
        overwrite: args.overwrite,
        structure: structure.as_ref(),
        options: super::render_options(&args.style, format, None),
    };

    let result = BatchRunner::new().run(&files, |file| process_path_file(file, &config));

    // 打印统计
    output::print_separator();
    output::print_done(&format!(
        "Batch complete: {} files, {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 输出文件名：相对输入目录的路径，分隔符替换为 '_'，避免递归模式下重名
///
/// 输入本身就是单个文件时，相对路径为空，改用文件名。
fn output_file_for(input: &Path, config: &BatchPathConfig) -> PathBuf {
    let relative = match input.strip_prefix(&config.input_dir) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel,
        _ => input.file_name().map(Path::new).unwrap_or(input),
    };
    let stem = relative
        .with_extension("")
        .to_string_lossy()
        .replace(['/', '\\'], "_");
    config
        .output_dir
        .join(format!("{}.{}", stem, config.format.extension()))
}

/// 处理批量模式中的单个文件
fn process_path_file(input: &Path, config: &BatchPathConfig) -> ProcessResult {
    let output_file = output_file_for(input, config);

    // 检查是否已存在
    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match render_path_file(input, &output_file, config) {
        Ok(()) => {
            ProcessResult::Success(format!("{} -> {}", input.display(), output_file.display()))
        }
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn render_path_file(input: &Path, output: &Path, config: &BatchPathConfig) -> Result<()> {
    let path = parsers::parse_path_file(input)?;
    let scene = Scene {
        structure: config.structure,
        path: Some(&path),
    };
    render_scene(&scene, output, &config.options)
}
