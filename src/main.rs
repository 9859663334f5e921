//! # feffview - FEFF 结构与散射路径查看器
//!
//! 读取 FEFF 的 feff.inp（ATOMS 块）和 feffNNNN.dat（路径原子），
//! 把原子坐标画成三个投影面加一个 3D 视图。
//!
//! ## 子命令
//! - `view`  - 绘制结构和/或路径
//! - `atoms` - 打印/导出解析出的原子记录
//! - `paths` - 批量绘制目录中的路径文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (feff.inp / feffNNNN.dat 解析器)
//!   │     ├── models/    (原子记录数据模型)
//!   │     ├── render/    (plotters 绘图)
//!   │     └── batch/     (批量处理)
//!   ├── utils/      (终端输出、进度条)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod render;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
