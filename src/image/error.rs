use std::fmt;

/// 镜像组装错误：全部是写出之前的本地校验失败，重试不会改变结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    EmptyLoader,                                   // 引导程序为空
    OversizedLoader { size: usize, max: usize },   // 引导程序超过引导区上限
    OversizedImage { size: usize, max: usize },    // 镜像超过总容量
    InvalidConfig(String),                         // 布局参数不自洽
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLoader => write!(f, "Bootloader is empty: an image needs boot sector content"),
            Self::OversizedLoader { size, max } => write!(
                f,
                "Bootloader is {} bytes, exceeding the loader region limit of {} bytes",
                size, max
            ),
            Self::OversizedImage { size, max } => write!(
                f,
                "Image would be {} bytes, exceeding the maximum image size of {} bytes",
                size, max
            ),
            Self::InvalidConfig(reason) => write!(f, "Invalid layout configuration: {}", reason),
        }
    }
}

impl std::error::Error for AssemblyError {}

/// 组装结果类型
pub type Result<T> = std::result::Result<T, AssemblyError>;
