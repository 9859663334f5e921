//! # 元素配色与深度透明度
//!
//! ## 依赖关系
//! - 被 `render/plot.rs` 使用
//! - 使用 `plotters` 颜色类型

use plotters::style::RGBColor;

/// 未知元素的回退颜色（灰）
pub const DEFAULT_COLOR: RGBColor = RGBColor(128, 128, 128);

/// 透明度下限，对应深度最小的点
pub const MIN_ALPHA: f64 = 0.1;

/// 常见元素颜色表
pub fn element_color(element: &str) -> RGBColor {
    match element {
        "Fe" | "Si" => RGBColor(255, 165, 0),
        "O" => RGBColor(255, 0, 0),
        "C" => RGBColor(0, 0, 0),
        "H" => RGBColor(255, 255, 255),
        "N" => RGBColor(0, 0, 255),
        "P" => RGBColor(128, 0, 128),
        "S" => RGBColor(255, 255, 0),
        _ => DEFAULT_COLOR,
    }
}

/// 按垂直于投影面的坐标计算每个点的透明度
///
/// `alpha = (v - min) / (max - min) * 0.9 + 0.1`，范围 0.1..=1.0。
/// 所有点坐标相同时全部返回 1.0。
pub fn depth_alphas(depths: &[f64]) -> Vec<f64> {
    let min = depths.iter().copied().fold(f64::INFINITY, f64::min);
    let max = depths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range.is_nan() || range <= 0.0 {
        return vec![1.0; depths.len()];
    }

    depths
        .iter()
        .map(|v| (v - min) / range * (1.0 - MIN_ALPHA) + MIN_ALPHA)
        .collect()
}
