//! # 批量执行器
//!
//! 逐个处理文件列表，带进度条与结果汇总。
//!
//! ## 功能
//! - 顺序处理，一次只读一个文件
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/paths.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条

use crate::utils::progress;

use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如文件已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
#[derive(Debug, Default)]
pub struct BatchRunner {
    /// 不显示进度条（测试与非终端输出）
    quiet: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new() -> Self {
        Self::default()
    }

    /// 隐藏进度条，用于测试和非终端输出
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// 依次处理文件列表
    pub fn run<F>(&self, files: &[PathBuf], mut processor: F) -> BatchResult
    where
        F: FnMut(&PathBuf) -> ProcessResult,
    {
        let pb = if self.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            progress::create_progress_bar(files.len() as u64, "Rendering")
        };

        let mut batch_result = BatchResult::default();
        for file in files {
            batch_result.merge(processor(file));
            pb.inc(1);
        }

        pb.finish_and_clear();
        batch_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_collects_statistics() {
        let files: Vec<PathBuf> = ["a.dat", "b.dat", "c.dat", "d.dat"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let mut seen = Vec::new();
        let result = BatchRunner::new().quiet(true).run(&files, |f| {
            seen.push(f.clone());
            match f.to_str().unwrap() {
                "a.dat" | "b.dat" => ProcessResult::Success("ok".to_string()),
                "c.dat" => ProcessResult::Skipped("exists".to_string()),
                _ => ProcessResult::Failed(f.display().to_string(), "boom".to_string()),
            }
        });

        // 顺序处理
        assert_eq!(seen, files);
        assert_eq!(result.success, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.total(), 4);
        assert_eq!(result.failures[0].1, "boom");
    }
}
