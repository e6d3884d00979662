use std::io::Result;

use crate::disk::types::SectorId;

pub trait BlockDevice: Send + Sync {
    fn sector_size(&self) -> usize;
    fn sector_count(&self) -> u64;
    fn read_block(&self, sector: SectorId, buf: &mut [u8]) -> Result<()>;
    fn write_block(&self, sector: SectorId, buf: &[u8]) -> Result<()>;
}
