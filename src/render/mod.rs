//! # 绘图模块
//!
//! 把解析得到的原子记录画成散点图与连线图。
//!
//! ## 子模块
//! - `palette`: 元素配色、深度透明度
//! - `projection`: 投影平面
//! - `connectivity`: 路径连线规则表
//! - `plot`: 图表生成
//!
//! ## 依赖关系
//! - 被 `commands/view.rs`, `commands/paths.rs` 使用
//! - 使用 `models/`

pub mod connectivity;
pub mod palette;
pub mod plot;
pub mod projection;

pub use connectivity::ConnectivityRules;
pub use plot::{render_scene, RenderOptions, Scene};
