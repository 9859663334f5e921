//! # 路径连线规则
//!
//! 用规则表描述 3D 视图中路径原子之间画哪些线，替代按元素符号写死的分支。
//!
//! ## 规则类型
//! - `Pair`: `from` 元素的每个原子连到 `to` 元素的每个原子
//! - `AllPairs`: 同一元素原子两两相连
//! - `ToAbsorber`: 某元素的每个原子连回吸收原子（序列第一个）
//!
//! ## 依赖关系
//! - 被 `render/plot.rs`, `commands/` 使用
//! - 使用 `models/atom.rs`

use crate::models::PathAtomRecord;
use plotters::style::RGBColor;

/// 连线样式
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub color: RGBColor,
    /// 图例文字
    pub label: String,
}

impl EdgeStyle {
    pub fn new(color: RGBColor, label: impl Into<String>) -> Self {
        EdgeStyle {
            color,
            label: label.into(),
        }
    }
}

/// 单条连线规则
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeRule {
    Pair {
        from: String,
        to: String,
        style: EdgeStyle,
    },
    AllPairs {
        species: String,
        style: EdgeStyle,
    },
    ToAbsorber {
        species: String,
        style: EdgeStyle,
    },
}

impl EdgeRule {
    pub fn style(&self) -> &EdgeStyle {
        match self {
            EdgeRule::Pair { style, .. }
            | EdgeRule::AllPairs { style, .. }
            | EdgeRule::ToAbsorber { style, .. } => style,
        }
    }
}

/// 一条连线：两个原子在路径中的下标，以及产生它的规则下标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub rule: usize,
}

/// 连线规则表
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectivityRules {
    rules: Vec<EdgeRule>,
}

impl ConnectivityRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: EdgeRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// 中心原子-配体规则：中心-配体，配体-配体，配体-吸收原子
    pub fn central_ligand(central: &str, ligand: &str) -> Self {
        Self::new()
            .with_rule(EdgeRule::Pair {
                from: central.to_string(),
                to: ligand.to_string(),
                style: EdgeStyle::new(RGBColor(255, 0, 0), format!("{}-{}", central, ligand)),
            })
            .with_rule(EdgeRule::AllPairs {
                species: ligand.to_string(),
                style: EdgeStyle::new(RGBColor(0, 0, 255), format!("{}-{}", ligand, ligand)),
            })
            .with_rule(EdgeRule::ToAbsorber {
                species: ligand.to_string(),
                style: EdgeStyle::new(RGBColor(0, 128, 0), "Back to Absorber"),
            })
    }

    pub fn rules(&self) -> &[EdgeRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 按规则顺序生成所有连线，跳过原子到自身的连线
    pub fn edges(&self, atoms: &[PathAtomRecord]) -> Vec<Edge> {
        let of_species = |species: &str| -> Vec<usize> {
            atoms
                .iter()
                .enumerate()
                .filter(|(_, a)| a.element == species)
                .map(|(i, _)| i)
                .collect()
        };

        let mut edges = Vec::new();
        for (rule_idx, rule) in self.rules.iter().enumerate() {
            let mut push = |from: usize, to: usize| {
                if from != to {
                    edges.push(Edge {
                        from,
                        to,
                        rule: rule_idx,
                    });
                }
            };

            match rule {
                EdgeRule::Pair { from, to, .. } => {
                    let targets = of_species(to);
                    for i in of_species(from) {
                        for &j in &targets {
                            push(i, j);
                        }
                    }
                }
                EdgeRule::AllPairs { species, .. } => {
                    let members = of_species(species);
                    for (n, &i) in members.iter().enumerate() {
                        for &j in &members[n + 1..] {
                            push(i, j);
                        }
                    }
                }
                EdgeRule::ToAbsorber { species, .. } => {
                    if atoms.is_empty() {
                        continue;
                    }
                    for i in of_species(species) {
                        push(i, 0);
                    }
                }
            }
        }

        edges
    }
}
