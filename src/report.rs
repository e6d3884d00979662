use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::{self, Display};

use crate::image::layout::ImageLayout;

/// 组装结果摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyReport {
    pub image_size: usize, // in bytes
    pub sector_size: usize,
    pub sector_count: usize,
    pub boot_sector_len: usize,
    pub extension_len: usize,
    pub payload_offset: usize,
    pub payload_sector: usize,
    pub payload_len: Option<usize>,
}

impl From<&ImageLayout> for AssemblyReport {
    fn from(layout: &ImageLayout) -> Self {
        Self {
            image_size: layout.image_len,
            sector_size: layout.sector_size,
            sector_count: layout.sector_count(),
            boot_sector_len: layout.boot_sector_len,
            extension_len: layout.extension_len,
            payload_offset: layout.payload_offset,
            payload_sector: layout.payload_sector(),
            payload_len: layout.payload_len,
        }
    }
}

impl Display for AssemblyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[MKFS REPORT]")?;
        writeln!(f, "Size: {} Bytes ({} x {} B sectors)", self.image_size, self.sector_count, self.sector_size)?;
        writeln!(f, "Boot sector: {} Bytes", self.boot_sector_len)?;
        writeln!(f, "Loader extension: {} Bytes", self.extension_len)?;
        match self.payload_len {
            Some(len) => write!(
                f,
                "Payload: {} Bytes at offset {} (sector {})",
                len, self.payload_offset, self.payload_sector
            ),
            None => write!(f, "Payload: none (ends at offset {})", self.payload_offset),
        }
    }
}

/// 终端输出；quiet 时只保留错误
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn step(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.bright_black());
        }
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {}", "✅".green(), msg.green().bold());
        }
    }

    pub fn report(&self, report: &AssemblyReport) {
        if !self.quiet {
            println!("{}", report);
        }
    }

    pub fn progress_bar(&self) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>5}/{len} sectors {msg}") {
            pb.set_style(style.progress_chars("=> "));
        }
        pb
    }
}

pub fn error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "❌ Error:".red().bold(), err);
}
