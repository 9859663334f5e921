//! # 结构/路径图表生成
//!
//! 使用 `plotters` 库把原子记录画成 2×2 网格：
//! XY / XZ / YZ 三个投影面和一个 3D 视图。
//!
//! ## 功能
//! - 结构原子按元素分组着色，按深度调节透明度
//! - 路径原子逐个标注元素符号
//! - 投影面上画吸收原子到其他原子的虚线
//! - 3D 视图按连线规则表画路径连线
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/view.rs`, `commands/paths.rs` 调用
//! - 使用 `render/palette.rs`, `render/projection.rs`, `render/connectivity.rs`
//! - 使用 `plotters` 渲染图表

use super::connectivity::ConnectivityRules;
use super::palette;
use super::projection::Plane;
use crate::error::{FeffViewError, Result};
use crate::models::{AtomRecord, Bounds, ScatteringPath, Structure};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// 坐标轴两侧留白比例
const AXIS_MARGIN: f64 = 0.1;

/// 绘图选项
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// 点的面积（与 matplotlib 的 `s` 同义）
    pub dot_size: u32,
    /// 是否在结构原子旁标注位点描述
    pub show_labels: bool,
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub use_svg: bool,
    pub rules: ConnectivityRules,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            dot_size: 100,
            show_labels: false,
            width: 1200,
            height: 1000,
            title: None,
            use_svg: false,
            rules: ConnectivityRules::central_ligand("Fe", "C"),
        }
    }
}

impl RenderOptions {
    /// 点半径（像素）
    pub fn point_radius(&self) -> u32 {
        ((self.dot_size as f64).sqrt() / 2.0).round().max(1.0) as u32
    }
}

/// 待绘制的内容：结构、路径或两者叠加
#[derive(Debug, Clone, Copy, Default)]
pub struct Scene<'a> {
    pub structure: Option<&'a Structure>,
    pub path: Option<&'a ScatteringPath>,
}

impl<'a> Scene<'a> {
    /// 所有原子的包围盒
    pub fn bounds(&self) -> Option<Bounds> {
        let structure = self.structure.and_then(|s| s.bounds());
        let path = self.path.and_then(|p| p.bounds());
        match (structure, path) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (a, b) => a.or(b),
        }
    }

    /// 默认图表标题
    pub fn default_title(&self) -> String {
        match (self.structure, self.path) {
            (Some(s), Some(p)) => format!("{} + {}", s.name, p.name),
            (Some(s), None) => format!("Crystal Structure: {}", s.name),
            (None, Some(p)) => format!("Scattering Path: {}", p.name),
            (None, None) => String::new(),
        }
    }
}

/// 生成图表文件
pub fn render_scene(scene: &Scene, output_path: &Path, options: &RenderOptions) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_scene(&root, scene, options)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_scene(&root, scene, options)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn plot_err<E: std::fmt::Debug>(e: E) -> FeffViewError {
    FeffViewError::PlotError(format!("{:?}", e))
}

/// 按元素分组，组内保持文件顺序
fn group_by_element(atoms: &[AtomRecord]) -> BTreeMap<&str, Vec<&AtomRecord>> {
    let mut groups: BTreeMap<&str, Vec<&AtomRecord>> = BTreeMap::new();
    for atom in atoms {
        groups.entry(atom.element.as_str()).or_default().push(atom);
    }
    groups
}

/// 绘制整张图的核心逻辑
fn draw_scene<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene,
    options: &RenderOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let bounds = scene
        .bounds()
        .ok_or_else(|| FeffViewError::PlotError("Nothing to plot".to_string()))?;

    root.fill(&WHITE).map_err(plot_err)?;

    let title = options
        .title
        .clone()
        .unwrap_or_else(|| scene.default_title());
    let root = root
        .titled(&title, ("sans-serif", 28).into_font())
        .map_err(plot_err)?;

    let panels = root.split_evenly((2, 2));
    for (panel, plane) in panels.iter().zip(Plane::ALL) {
        draw_plane(panel, plane, scene, &bounds, options)?;
    }
    draw_3d(&panels[3], scene, &bounds, options)?;

    Ok(())
}

/// 绘制单个投影面
fn draw_plane<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plane: Plane,
    scene: &Scene,
    bounds: &Bounds,
    options: &RenderOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (h_axis, v_axis) = plane.axes();
    let (x_min, x_max) = bounds.axis_range(h_axis, AXIS_MARGIN);
    let (y_min, y_max) = bounds.axis_range(v_axis, AXIS_MARGIN);
    let (x_desc, y_desc) = plane.axis_labels();

    let mut chart = ChartBuilder::on(area)
        .caption(plane.title(), ("sans-serif", 20).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_label_style(("sans-serif", 12))
        .y_label_style(("sans-serif", 12))
        .axis_desc_style(("sans-serif", 14))
        .draw()
        .map_err(plot_err)?;

    let radius = options.point_radius();

    if let Some(structure) = scene.structure {
        for (element, atoms) in group_by_element(&structure.atoms) {
            let color = palette::element_color(element);
            let depths: Vec<f64> = atoms
                .iter()
                .map(|a| a.position()[plane.depth_axis()])
                .collect();
            let alphas = palette::depth_alphas(&depths);

            chart
                .draw_series(atoms.iter().zip(alphas).map(|(atom, alpha)| {
                    Circle::new(
                        plane.project(atom.position()),
                        radius,
                        color.mix(alpha).filled(),
                    )
                }))
                .map_err(plot_err)?
                .label(element)
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));

            // 描边，浅色元素（H）在白底上也能看清
            chart
                .draw_series(atoms.iter().map(|atom| {
                    Circle::new(
                        plane.project(atom.position()),
                        radius,
                        BLACK.mix(0.3).stroke_width(1),
                    )
                }))
                .map_err(plot_err)?;

            if options.show_labels {
                chart
                    .draw_series(atoms.iter().map(|atom| {
                        Text::new(
                            atom.label.clone(),
                            plane.project(atom.position()),
                            ("sans-serif", 12).into_font().color(&BLACK),
                        )
                    }))
                    .map_err(plot_err)?;
            }
        }
    }

    if let Some(path) = scene.path {
        if let Some(absorber) = path.absorber() {
            let origin = plane.project(absorber.position());
            for atom in path.atoms.iter().skip(1) {
                chart
                    .draw_series(DashedLineSeries::new(
                        vec![origin, plane.project(atom.position())],
                        6,
                        4,
                        BLACK.stroke_width(1),
                    ))
                    .map_err(plot_err)?;
            }
        }

        for (i, atom) in path.atoms.iter().enumerate() {
            let pos = plane.project(atom.position());
            chart
                .draw_series(std::iter::once(Circle::new(
                    pos,
                    radius,
                    Palette99::pick(i).filled(),
                )))
                .map_err(plot_err)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    atom.element.clone(),
                    pos,
                    ("sans-serif", 13).into_font().color(&BLACK),
                )))
                .map_err(plot_err)?;
        }
    }

    if scene.structure.is_some() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;
    }

    Ok(())
}

/// 3D 坐标映射：plotters 的竖直轴是第二个分量，这里让 z 朝上
fn to_view(p: [f64; 3]) -> (f64, f64, f64) {
    (p[0], p[2], p[1])
}

/// 绘制 3D 视图
fn draw_3d<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scene: &Scene,
    bounds: &Bounds,
    options: &RenderOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (x_min, x_max) = bounds.axis_range(0, AXIS_MARGIN);
    let (y_min, y_max) = bounds.axis_range(1, AXIS_MARGIN);
    let (z_min, z_max) = bounds.axis_range(2, AXIS_MARGIN);

    let mut chart = ChartBuilder::on(area)
        .caption("3D View", ("sans-serif", 20).into_font())
        .margin(15)
        .build_cartesian_3d(x_min..x_max, z_min..z_max, y_min..y_max)
        .map_err(plot_err)?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.35;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .label_style(("sans-serif", 11))
        .draw()
        .map_err(plot_err)?;

    let radius = options.point_radius();
    let mut has_legend = false;

    if let Some(structure) = scene.structure {
        for (element, atoms) in group_by_element(&structure.atoms) {
            let color = palette::element_color(element);
            let depths: Vec<f64> = atoms.iter().map(|a| a.z).collect();
            let alphas = palette::depth_alphas(&depths);

            chart
                .draw_series(atoms.iter().zip(alphas).map(|(atom, alpha)| {
                    Circle::new(
                        to_view(atom.position()),
                        radius,
                        color.mix(alpha).filled(),
                    )
                }))
                .map_err(plot_err)?
                .label(element)
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
            has_legend = true;

            if options.show_labels {
                chart
                    .draw_series(atoms.iter().map(|atom| {
                        Text::new(
                            atom.label.clone(),
                            to_view(atom.position()),
                            ("sans-serif", 12).into_font().color(&BLACK),
                        )
                    }))
                    .map_err(plot_err)?;
            }
        }
    }

    if let Some(path) = scene.path {
        for (i, atom) in path.atoms.iter().enumerate() {
            let pos = to_view(atom.position());
            chart
                .draw_series(std::iter::once(Circle::new(
                    pos,
                    radius,
                    Palette99::pick(i).filled(),
                )))
                .map_err(plot_err)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    atom.element.clone(),
                    pos,
                    ("sans-serif", 13).into_font().color(&BLACK),
                )))
                .map_err(plot_err)?;
        }

        // 每条规则只在图例中出现一次
        let mut labeled: HashSet<usize> = HashSet::new();
        let edges = if options.rules.is_empty() {
            Vec::new()
        } else {
            options.rules.edges(&path.atoms)
        };
        for edge in edges {
            let style = options.rules.rules()[edge.rule].style();
            let color = style.color;
            let anno = chart
                .draw_series(LineSeries::new(
                    vec![
                        to_view(path.atoms[edge.from].position()),
                        to_view(path.atoms[edge.to].position()),
                    ],
                    color.stroke_width(2),
                ))
                .map_err(plot_err)?;

            if labeled.insert(edge.rule) {
                anno.label(style.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
                has_legend = true;
            }
        }
    }

    if has_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;
    }

    Ok(())
}
