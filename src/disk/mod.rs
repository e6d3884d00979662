use std::{
    io::{Error, ErrorKind, Result},
    path::Path,
};

use indicatif::ProgressBar;

use crate::image::DiskImage;

pub mod block_device;
pub mod file_disk;
pub mod types;

pub use block_device::BlockDevice;
pub use file_disk::FileDisk;

/// 把镜像逐扇区写到 `output`
///
/// 中途失败时目标路径保持原样（暂存文件随 FileDisk 一起删除）。
pub fn write_image(image: &DiskImage, output: &Path, verify: bool, pb: &ProgressBar) -> Result<()> {
    let layout = image.layout();
    let disk = FileDisk::create(output, layout.sector_size, layout.sector_count() as u64)?;

    pb.set_length(layout.sector_count() as u64);
    for (i, sector) in image.sectors().enumerate() {
        disk.write_block(i as u64, sector)?;
        pb.inc(1);
    }

    if verify {
        verify_sectors(&disk, image)?;
    }

    disk.commit()
}

/// 逐扇区读回并与内存中的镜像比较
pub fn verify_sectors(disk: &dyn BlockDevice, image: &DiskImage) -> Result<()> {
    let layout = image.layout();
    let expected_count = layout.sector_count() as u64;
    if disk.sector_count() != expected_count || disk.sector_size() != layout.sector_size {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!(
                "verification failed: disk has {} x {} B sectors, image has {} x {} B",
                disk.sector_count(),
                disk.sector_size(),
                expected_count,
                layout.sector_size
            ),
        ));
    }

    let sector_size = disk.sector_size();
    let bytes = image.as_bytes();
    let mut buf = vec![0u8; sector_size];
    for i in 0..expected_count as usize {
        disk.read_block(i as u64, &mut buf)?;
        if buf[..] != bytes[i * sector_size..(i + 1) * sector_size] {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("verification failed: sector {} differs after write", i),
            ));
        }
    }
    Ok(())
}
