use clap::Parser;
use std::path::PathBuf;

use crate::image::config::{
    LayoutConfig, DEFAULT_BOOT_SECTOR_LEN, DEFAULT_MAX_IMAGE_SIZE, DEFAULT_MAX_LOADER_SIZE,
    DEFAULT_SECTOR_SIZE,
};

pub const DEFAULT_BOOTLOADER: &str = "build/boot.bin";
pub const DEFAULT_OUTPUT: &str = "build/image.bin";

#[derive(Parser, Debug)]
#[command(
    name = "mkfs",
    version,
    about = "Assemble a bootloader and an optional kernel into a bootable disk image"
)]
pub struct Cli {
    /// 引导程序二进制（引导扇区 + 扩展区）
    #[arg(short = 'b', long = "boot", default_value = DEFAULT_BOOTLOADER)]
    pub boot: PathBuf,

    /// 内核二进制，写在引导区之后的第一个扇区边界
    #[arg(short = 'k', long = "kernel", short_alias = 's', alias = "source")]
    pub kernel: Option<PathBuf>,

    /// 输出镜像路径
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    #[arg(long, default_value_t = DEFAULT_SECTOR_SIZE)]
    pub sector_size: usize,

    #[arg(long, default_value_t = DEFAULT_BOOT_SECTOR_LEN)]
    pub boot_sector_len: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_LOADER_SIZE)]
    pub max_loader_size: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_IMAGE_SIZE)]
    pub max_image_size: usize,

    /// 把区域布局以 bincode 格式写到该文件
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,

    /// 提交前逐扇区读回校验
    #[arg(long)]
    pub verify: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::new(
            self.sector_size,
            self.boot_sector_len,
            self.max_loader_size,
            self.max_image_size,
        )
    }
}
