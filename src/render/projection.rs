//! # 投影平面
//!
//! XY / XZ / YZ 三个正交投影，以及每个平面对应的深度轴。
//!
//! ## 依赖关系
//! - 被 `render/plot.rs` 使用
//! - 无外部模块依赖

/// 正交投影平面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    /// 网格布局顺序：左上 XY，右上 XZ，左下 YZ
    pub const ALL: [Plane; 3] = [Plane::XY, Plane::XZ, Plane::YZ];

    /// 水平轴与竖直轴的坐标下标
    pub fn axes(self) -> (usize, usize) {
        match self {
            Plane::XY => (0, 1),
            Plane::XZ => (0, 2),
            Plane::YZ => (1, 2),
        }
    }

    /// 垂直于平面的轴，用于深度透明度
    pub fn depth_axis(self) -> usize {
        match self {
            Plane::XY => 2,
            Plane::XZ => 1,
            Plane::YZ => 0,
        }
    }

    pub fn project(self, p: [f64; 3]) -> (f64, f64) {
        let (a, b) = self.axes();
        (p[a], p[b])
    }

    pub fn title(self) -> &'static str {
        match self {
            Plane::XY => "XY Plane",
            Plane::XZ => "XZ Plane",
            Plane::YZ => "YZ Plane",
        }
    }

    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            Plane::XY => ("X", "Y"),
            Plane::XZ => ("X", "Z"),
            Plane::YZ => ("Y", "Z"),
        }
    }
}
