//! # 原子记录数据模型
//!
//! FEFF 两类文件解析出的原子记录。记录一经解析即不再修改，
//! 顺序与文件中的行顺序一致。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `render/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// feff.inp ATOMS 块中的一个原子位点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomRecord {
    /// 元素符号（`tag` 列）
    pub element: String,

    /// 位点描述（`site_info` 列）
    pub label: String,

    /// 笛卡尔坐标 (Å)
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AtomRecord {
    pub fn new(
        element: impl Into<String>,
        label: impl Into<String>,
        position: [f64; 3],
    ) -> Self {
        AtomRecord {
            element: element.into(),
            label: label.into(),
            x: position[0],
            y: position[1],
            z: position[2],
        }
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// feffNNNN.dat 路径中的一个原子
///
/// 序列中的第一个原子是吸收原子（absorber），这只是位置约定，
/// 记录本身不携带标志。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAtomRecord {
    /// 元素符号
    pub element: String,

    /// 笛卡尔坐标 (Å)
    pub x: f64,
    pub y: f64,
    pub z: f64,

    /// 势索引（`pot` 列）
    pub potential_index: u32,

    /// 原子序号（`at#` 列）
    pub atom_index: u32,
}

impl PathAtomRecord {
    pub fn new(
        element: impl Into<String>,
        position: [f64; 3],
        potential_index: u32,
        atom_index: u32,
    ) -> Self {
        PathAtomRecord {
            element: element.into(),
            x: position[0],
            y: position[1],
            z: position[2],
            potential_index,
            atom_index,
        }
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// 到另一个原子的距离 (Å)
    pub fn distance_to(&self, other: &PathAtomRecord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
