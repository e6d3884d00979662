use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::disk::types::STAGING_SUFFIX;

/// 向上取整到 `align` 的整数倍，溢出时返回 None
pub fn align_up(len: usize, align: usize) -> Option<usize> {
    len.div_ceil(align).checked_mul(align)
}

/// 生成一个随机唯一 ID
pub fn generate_uuid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// 与目标同目录的暂存文件路径，保证 rename 不跨文件系统
pub fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    target.with_file_name(format!("{}.{}.{}", name, generate_uuid(), STAGING_SUFFIX))
}

#[cfg(test)]
pub fn test_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mkfs-test-{}", generate_uuid()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
