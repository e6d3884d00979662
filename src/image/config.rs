use serde::{Deserialize, Serialize};

use crate::image::error::{AssemblyError, Result};

/// 扇区大小（字节），磁盘按扇区寻址
pub const DEFAULT_SECTOR_SIZE: usize = 512;

/// 引导扇区长度：固件加载并执行的第一段
pub const DEFAULT_BOOT_SECTOR_LEN: usize = 512;

/// 引导程序总上限 = 引导扇区 + 63 个扩展扇区（32 KiB）
pub const DEFAULT_MAX_LOADER_SIZE: usize = 64 * DEFAULT_SECTOR_SIZE;

/// 镜像总上限：16 MiB
pub const DEFAULT_MAX_IMAGE_SIZE: usize = 16 * 1024 * 1024;

/// 镜像布局参数，一次组装内不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub sector_size: usize,
    pub boot_sector_len: usize,
    pub max_loader_size: usize,
    pub max_image_size: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sector_size: DEFAULT_SECTOR_SIZE,
            boot_sector_len: DEFAULT_BOOT_SECTOR_LEN,
            max_loader_size: DEFAULT_MAX_LOADER_SIZE,
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
        }
    }
}

impl LayoutConfig {
    pub fn new(
        sector_size: usize,
        boot_sector_len: usize,
        max_loader_size: usize,
        max_image_size: usize,
    ) -> Self {
        Self {
            sector_size,
            boot_sector_len,
            max_loader_size,
            max_image_size,
        }
    }

    /// 检查各项参数是否自洽，不自洽的配置无法产生合法镜像
    pub fn validate(&self) -> Result<()> {
        if self.sector_size == 0 || !self.sector_size.is_power_of_two() {
            return Err(AssemblyError::InvalidConfig(format!(
                "sector size {} is not a non-zero power of two",
                self.sector_size
            )));
        }
        if self.boot_sector_len == 0 {
            return Err(AssemblyError::InvalidConfig(
                "boot sector length must be non-zero".to_string(),
            ));
        }
        if self.max_loader_size < self.boot_sector_len {
            return Err(AssemblyError::InvalidConfig(format!(
                "max loader size {} is smaller than the boot sector ({} bytes)",
                self.max_loader_size, self.boot_sector_len
            )));
        }
        Ok(())
    }

    /// 向上取整到扇区边界，溢出时返回 None
    pub fn align(&self, len: usize) -> Option<usize> {
        crate::utils::align_up(len, self.sector_size)
    }
}
