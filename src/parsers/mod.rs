//! # 解析器模块
//!
//! 提供 FEFF 结构输入文件和散射路径文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: section, feff_inp, feff_path

pub mod feff_inp;
pub mod feff_path;
pub mod section;

pub use feff_inp::parse_inp_file;
pub use feff_path::parse_path_file;

use crate::error::{FeffViewError, Result};
use std::fs;
use std::path::Path;

/// 读取整个文件，返回 (内容, 文件名主干)
fn read_source(path: &Path) -> Result<(String, String)> {
    if !path.is_file() {
        return Err(FeffViewError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| FeffViewError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();

    Ok((content, name))
}
