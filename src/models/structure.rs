//! # 结构与散射路径容器
//!
//! 把解析出的原子记录与来源信息（文件名、标记所在行、被跳过的行）
//! 放在一起，供命令层输出诊断信息、供绘图层计算坐标范围。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `commands/`, `render/` 使用
//! - 使用 `models/atom.rs`

use super::atom::{AtomRecord, PathAtomRecord};
use std::collections::BTreeMap;

/// 区块标记所在的行（0 起始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// 起始标记行
    pub start: usize,
    /// 结束标记行；文件在结束标记之前结束时为 None
    pub end: Option<usize>,
}

/// 路径文件中被跳过的数据行
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 行号（1 起始）
    pub line: usize,
    pub reason: String,
}

/// feff.inp 中的晶体结构
#[derive(Debug, Clone)]
pub struct Structure {
    pub name: String,
    pub atoms: Vec<AtomRecord>,
    pub span: LineSpan,
}

impl Structure {
    /// 各元素原子数
    pub fn element_counts(&self) -> BTreeMap<&str, usize> {
        count_elements(self.atoms.iter().map(|a| a.element.as_str()))
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        self.element_counts()
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.atoms.iter().map(|a| a.position()))
    }
}

/// feffNNNN.dat 中的一条散射路径
#[derive(Debug, Clone)]
pub struct ScatteringPath {
    pub name: String,
    pub atoms: Vec<PathAtomRecord>,
    pub span: LineSpan,
    pub skipped: Vec<SkippedRow>,
}

impl ScatteringPath {
    /// 吸收原子（序列第一个）
    pub fn absorber(&self) -> Option<&PathAtomRecord> {
        self.atoms.first()
    }

    pub fn element_counts(&self) -> BTreeMap<&str, usize> {
        count_elements(self.atoms.iter().map(|a| a.element.as_str()))
    }

    /// 路径总长：吸收原子 → 各散射原子 → 回到吸收原子
    pub fn total_length(&self) -> f64 {
        let Some(absorber) = self.absorber() else {
            return 0.0;
        };
        let mut length = 0.0;
        let mut prev = absorber;
        for atom in self.atoms.iter().skip(1) {
            length += prev.distance_to(atom);
            prev = atom;
        }
        length + prev.distance_to(absorber)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.atoms.iter().map(|a| a.position()))
    }
}

fn count_elements<'a>(elements: impl Iterator<Item = &'a str>) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for el in elements {
        *counts.entry(el).or_insert(0) += 1;
    }
    counts
}

/// 三维坐标的轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    /// 从点集计算包围盒，点集为空时返回 None
    pub fn from_points(points: impl IntoIterator<Item = [f64; 3]>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.include(p);
        }
        Some(bounds)
    }

    pub fn include(&mut self, p: [f64; 3]) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    /// 合并两个包围盒
    pub fn union(self, other: Bounds) -> Bounds {
        let mut merged = self;
        merged.include(other.min);
        merged.include(other.max);
        merged
    }

    /// 某一轴上的绘图范围，两侧留出 `margin` 比例的空白；
    /// 退化轴（所有点坐标相同）两侧各留 1.0
    pub fn axis_range(&self, axis: usize, margin: f64) -> (f64, f64) {
        let (lo, hi) = (self.min[axis], self.max[axis]);
        let span = hi - lo;
        if span.abs() < f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            (lo - span * margin, hi + span * margin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_path() -> ScatteringPath {
        ScatteringPath {
            name: "feff0001".to_string(),
            atoms: vec![
                PathAtomRecord::new("Fe", [0.0, 0.0, 0.0], 0, 1),
                PathAtomRecord::new("C", [3.0, 4.0, 0.0], 1, 2),
            ],
            span: LineSpan {
                start: 10,
                end: Some(14),
            },
            skipped: vec![],
        }
    }

    #[test]
    fn test_structure_formula() {
        let structure = Structure {
            name: "feff".to_string(),
            atoms: vec![
                AtomRecord::new("Fe", "Fe1", [0.0, 0.0, 0.0]),
                AtomRecord::new("C", "C1", [1.0, 0.0, 0.0]),
                AtomRecord::new("C", "C2", [0.0, 1.0, 0.0]),
                AtomRecord::new("O", "O1", [0.0, 0.0, 1.0]),
            ],
            span: LineSpan {
                start: 0,
                end: Some(6),
            },
        };
        assert_eq!(structure.formula(), "C2FeO");
    }

    #[test]
    fn test_absorber_is_first_atom() {
        let path = sample_path();
        assert_eq!(path.absorber().unwrap().element, "Fe");
    }

    #[test]
    fn test_total_length_single_scattering() {
        // 单散射路径：去程 5 Å + 回程 5 Å
        let path = sample_path();
        assert!((path.total_length() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_and_degenerate_axis() {
        let bounds = sample_path().bounds().unwrap();
        assert_eq!(bounds.min, [0.0, 0.0, 0.0]);
        assert_eq!(bounds.max, [3.0, 4.0, 0.0]);

        let (lo, hi) = bounds.axis_range(2, 0.1);
        assert_eq!((lo, hi), (-1.0, 1.0));

        let (lo, hi) = bounds.axis_range(0, 0.1);
        assert!((lo + 0.3).abs() < 1e-12);
        assert!((hi - 3.3).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_union() {
        let a = Bounds::from_points([[0.0, 0.0, 0.0]]).unwrap();
        let b = Bounds::from_points([[-1.0, 2.0, 5.0]]).unwrap();
        let u = a.union(b);
        assert_eq!(u.min, [-1.0, 0.0, 0.0]);
        assert_eq!(u.max, [0.0, 2.0, 5.0]);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_points(Vec::<[f64; 3]>::new()).is_none());
    }
}
