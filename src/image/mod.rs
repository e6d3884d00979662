use crate::image::{config::LayoutConfig, error::Result, layout::ImageLayout};

pub mod config;
pub mod error;
pub mod layout;

/// 组装完成的磁盘镜像，写出后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskImage {
    bytes: Vec<u8>,
    layout: ImageLayout,
}

impl DiskImage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn layout(&self) -> &ImageLayout {
        &self.layout
    }

    /// 按扇区切分，长度总是扇区的整数倍
    pub fn sectors(&self) -> std::slice::ChunksExact<'_, u8> {
        self.bytes.chunks_exact(self.layout.sector_size)
    }
}

/// 把引导程序和（可选的）内核拼成一个可引导镜像
///
/// 纯函数：不做任何文件 I/O，相同输入总是得到相同输出。
/// 所有尺寸校验在分配输出缓冲之前完成。
pub fn assemble(boot: &[u8], kernel: Option<&[u8]>, cfg: &LayoutConfig) -> Result<DiskImage> {
    let layout = ImageLayout::compute(boot.len(), kernel.map(<[u8]>::len), cfg)?;

    // 零初始化，未覆盖的字节（填充区）保持为 0
    let mut bytes = vec![0u8; layout.image_len];

    // 引导扇区 + 扩展区是连续的，直接整体拷贝；短于引导扇区时右侧自然补零
    bytes[..boot.len()].copy_from_slice(boot);

    if let Some(kernel) = kernel {
        let start = layout.payload_offset;
        bytes[start..start + kernel.len()].copy_from_slice(kernel);
    }

    Ok(DiskImage { bytes, layout })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::error::AssemblyError;

    fn cfg() -> LayoutConfig {
        LayoutConfig::new(512, 512, 4096, 64 * 1024)
    }

    #[test]
    fn full_boot_sector_without_kernel() {
        let boot = vec![0xAA; 512];
        let image = assemble(&boot, None, &cfg()).unwrap();
        assert_eq!(image.as_bytes().len(), 512);
        assert!(image.as_bytes().iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn extension_and_kernel_layout() {
        let mut boot = vec![0xAA; 512];
        boot.extend(vec![0xBB; 88]);
        let kernel = vec![0xCC; 10];

        let image = assemble(&boot, Some(&kernel), &cfg()).unwrap();
        let bytes = image.as_bytes();

        assert_eq!(bytes.len(), 1536);
        assert!(bytes[..512].iter().all(|&b| b == 0xAA));
        assert!(bytes[512..600].iter().all(|&b| b == 0xBB));
        assert!(bytes[600..1024].iter().all(|&b| b == 0));
        assert!(bytes[1024..1034].iter().all(|&b| b == 0xCC));
        assert!(bytes[1034..].iter().all(|&b| b == 0));
        assert_eq!(image.layout().payload_offset, 1024);
    }

    #[test]
    fn short_loader_is_zero_padded() {
        let boot = [0x90u8, 0x90, 0xEB, 0xFE];
        let image = assemble(&boot, None, &cfg()).unwrap();
        assert_eq!(image.as_bytes().len(), 512);
        assert_eq!(&image.as_bytes()[..4], &boot);
        assert!(image.as_bytes()[4..].iter().all(|&b| b == 0));
        assert_eq!(image.layout().extension_len, 0);
    }

    #[test]
    fn regions_hold_inputs_verbatim_and_rest_is_zero() {
        // 非均匀内容，便于发现错位
        let boot: Vec<u8> = (0..1300u32).map(|i| (i % 251) as u8 + 1).collect();
        let kernel: Vec<u8> = (0..2049u32).map(|i| (i % 241) as u8 + 1).collect();

        let image = assemble(&boot, Some(&kernel), &cfg()).unwrap();
        let bytes = image.as_bytes();
        let layout = image.layout();

        assert_eq!(bytes.len() % 512, 0);
        assert_eq!(layout.payload_offset % 512, 0);
        assert_eq!(&bytes[..512], &boot[..512]);
        assert_eq!(&bytes[512..boot.len()], &boot[512..]);
        assert!(bytes[boot.len()..layout.payload_offset].iter().all(|&b| b == 0));

        let payload_end = layout.payload_offset + kernel.len();
        assert_eq!(&bytes[layout.payload_offset..payload_end], &kernel[..]);
        assert!(bytes[payload_end..].iter().all(|&b| b == 0));
    }

    #[test]
    fn output_is_sector_multiple_across_sizes() {
        for boot_len in [1, 511, 512, 513, 1024, 4096] {
            for kernel_len in [None, Some(0), Some(1), Some(512), Some(777)] {
                let boot = vec![1u8; boot_len];
                let kernel = kernel_len.map(|n| vec![2u8; n]);
                let image = assemble(&boot, kernel.as_deref(), &cfg()).unwrap();
                assert_eq!(image.as_bytes().len() % 512, 0, "boot={} kernel={:?}", boot_len, kernel_len);
                assert_eq!(image.sectors().count(), image.layout().sector_count());
            }
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let boot = vec![0x11; 700];
        let kernel = vec![0x22; 3000];
        let a = assemble(&boot, Some(&kernel), &cfg()).unwrap();
        let b = assemble(&boot, Some(&kernel), &cfg()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_loader_is_rejected() {
        assert_eq!(
            assemble(&[], Some(&[1, 2, 3]), &cfg()),
            Err(AssemblyError::EmptyLoader)
        );
    }

    #[test]
    fn oversized_loader_is_rejected() {
        let boot = vec![0u8; 4097];
        assert_eq!(
            assemble(&boot, None, &cfg()),
            Err(AssemblyError::OversizedLoader { size: 4097, max: 4096 })
        );
    }

    #[test]
    fn oversized_kernel_is_rejected() {
        let boot = vec![0u8; 512];
        let kernel = vec![0u8; 64 * 1024];
        assert!(matches!(
            assemble(&boot, Some(&kernel), &cfg()),
            Err(AssemblyError::OversizedImage { max, .. }) if max == 64 * 1024
        ));
    }
}
