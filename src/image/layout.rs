use serde::{Deserialize, Serialize};

use crate::image::{
    config::LayoutConfig,
    error::{AssemblyError, Result},
};

/// 一个镜像的区域表（字节偏移）
///
/// ```text
/// | boot sector | loader extension | pad | payload | pad |
/// 0             boot_sector_len    |     payload_offset  image_len
/// ```
///
/// payload_offset 和 image_len 总是扇区对齐的。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLayout {
    pub sector_size: usize,
    pub boot_sector_len: usize,
    pub extension_len: usize,      // 引导程序超出引导扇区的部分
    pub payload_offset: usize,     // 内核起始位置
    pub payload_len: Option<usize>, // None 表示没有内核
    pub image_len: usize,
}

impl ImageLayout {
    /// 根据输入长度计算布局，所有尺寸校验都在这里完成
    pub fn compute(boot_len: usize, kernel_len: Option<usize>, cfg: &LayoutConfig) -> Result<Self> {
        cfg.validate()?;

        if boot_len == 0 {
            return Err(AssemblyError::EmptyLoader);
        }
        if boot_len > cfg.max_loader_size {
            return Err(AssemblyError::OversizedLoader {
                size: boot_len,
                max: cfg.max_loader_size,
            });
        }

        // 对齐溢出说明镜像无论如何都放不下
        let overflow = AssemblyError::OversizedImage {
            size: usize::MAX,
            max: cfg.max_image_size,
        };

        let extension_len = boot_len.saturating_sub(cfg.boot_sector_len);
        let payload_offset = cfg
            .align(cfg.boot_sector_len + extension_len)
            .ok_or_else(|| overflow.clone())?;

        // 没有内核时镜像到 payload_offset 为止
        let image_len = match kernel_len {
            Some(len) => payload_offset
                .checked_add(len)
                .and_then(|end| cfg.align(end))
                .ok_or(overflow)?,
            None => payload_offset,
        };
        if image_len > cfg.max_image_size {
            return Err(AssemblyError::OversizedImage {
                size: image_len,
                max: cfg.max_image_size,
            });
        }

        Ok(Self {
            sector_size: cfg.sector_size,
            boot_sector_len: cfg.boot_sector_len,
            extension_len,
            payload_offset,
            payload_len: kernel_len,
            image_len,
        })
    }

    pub fn sector_count(&self) -> usize {
        self.image_len / self.sector_size
    }

    pub fn payload_sector(&self) -> usize {
        self.payload_offset / self.sector_size
    }

    /// 序列化为 bincode 记录，供构建流程中的其他工具读取
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    #[cfg(test)]
    pub fn from_bytes(bytes: &[u8]) -> std::io::Result<Self> {
        bincode::deserialize(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
