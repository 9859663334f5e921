//! # 数据模型模块
//!
//! 定义 FEFF 文件解析结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `commands/`, `render/` 使用
//! - 子模块: atom, structure

pub mod atom;
pub mod structure;

pub use atom::{AtomRecord, PathAtomRecord};
pub use structure::{Bounds, LineSpan, ScatteringPath, SkippedRow, Structure};
