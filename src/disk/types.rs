/// 扇区编号，从镜像开头按扇区计数
pub type SectorId = u64;

/// 暂存文件的后缀，提交前镜像写在 `<output>.<uuid>.partial`
pub const STAGING_SUFFIX: &str = "partial";
