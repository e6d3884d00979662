use std::{
    fs::{self, File, OpenOptions},
    io::{Error, ErrorKind, Read, Result, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use crate::{
    disk::{block_device::BlockDevice, types::SectorId},
    utils::staging_path,
};

/// 以文件为后端的扇区设备
///
/// 所有写入先落到暂存文件，`commit()` 时才重命名为目标路径；
/// 未提交就被丢弃时删除暂存文件，目标路径上不会出现半成品镜像。
#[derive(Debug)]
pub struct FileDisk {
    file: Mutex<File>,
    staging: PathBuf,
    target: PathBuf,
    sector_size: usize,
    sector_count: u64,
    committed: bool,
}

impl FileDisk {
    pub fn create(target: &Path, sector_size: usize, sector_count: u64) -> Result<Self> {
        let staging = staging_path(target);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&staging)?;

        let disk = Self {
            file: Mutex::new(file),
            staging,
            target: target.to_path_buf(),
            sector_size,
            sector_count,
            committed: false,
        };

        // 预分配，未写的扇区读出来是 0
        disk.lock()?.set_len(sector_size as u64 * sector_count)?;
        Ok(disk)
    }

    /// 刷盘并原子替换目标文件
    pub fn commit(mut self) -> Result<()> {
        {
            let mut file = self.lock()?;
            file.flush()?;
            file.sync_all()?;
        }
        fs::rename(&self.staging, &self.target)?;
        self.committed = true;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| Error::new(ErrorKind::Other, "disk file lock poisoned"))
    }

    fn check(&self, sector: SectorId, len: usize) -> Result<()> {
        if sector >= self.sector_count {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("sector {} out of range (disk has {})", sector, self.sector_count),
            ));
        }
        if len != self.sector_size {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("buffer is {} bytes, sector is {}", len, self.sector_size),
            ));
        }
        Ok(())
    }
}

impl BlockDevice for FileDisk {
    fn sector_size(&self) -> usize {
        self.sector_size
    }

    fn sector_count(&self) -> u64 {
        self.sector_count
    }

    fn read_block(&self, sector: SectorId, buf: &mut [u8]) -> Result<()> {
        self.check(sector, buf.len())?;
        let mut file = self.lock()?;
        file.seek(SeekFrom::Start(sector * self.sector_size as u64))?;
        file.read_exact(buf)?;
        Ok(())
    }

    fn write_block(&self, sector: SectorId, buf: &[u8]) -> Result<()> {
        self.check(sector, buf.len())?;
        let mut file = self.lock()?;
        file.seek(SeekFrom::Start(sector * self.sector_size as u64))?;
        file.write_all(buf)?;
        Ok(())
    }
}

impl Drop for FileDisk {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.staging);
        }
    }
}
