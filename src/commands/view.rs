//! # view 命令实现
//!
//! 读取结构文件和/或路径文件并生成 2×2 视图图像。
//!
//! ## 依赖关系
//! - 使用 `cli/view.rs` 定义的参数
//! - 使用 `parsers/`, `render/`
//! - 使用 `utils/output.rs`

use crate::cli::view::ViewArgs;
use crate::error::Result;
use crate::render::{render_scene, Scene};
use crate::utils::output;

/// 执行 view 命令
pub fn execute(args: ViewArgs) -> Result<()> {
    output::print_header("FEFF Structure Viewer");

    if args.inp.is_none() && args.path.is_none() {
        return Err(super::no_input_error());
    }

    let (output_path, format) = super::resolve_output(&args.output, args.style.format)?;
    if output_path != args.output {
        output::print_warning(&format!(
            "Writing {} output to '{}'",
            format,
            output_path.display()
        ));
    }

    // 先结构后路径，路径叠加在结构之上
    let structure = args
        .inp
        .as_deref()
        .map(super::load_structure)
        .transpose()?;
    let path = args.path.as_deref().map(super::load_path).transpose()?;

    let scene = Scene {
        structure: structure.as_ref(),
        path: path.as_ref(),
    };
    let options = super::render_options(&args.style, format, args.title.clone());

    render_scene(&scene, &output_path, &options)?;

    let inputs = [args.inp.as_deref(), args.path.as_deref()]
        .into_iter()
        .flatten()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" + ");
    output::print_rendered(&inputs, &output_path.display().to_string());

    Ok(())
}
