pub mod args;

use anyhow::{Context, Result};
use std::fs;

use crate::{
    cli::args::Cli,
    disk::write_image,
    image::assemble,
    report::{AssemblyReport, Reporter},
};

/// 读取输入、组装、写出镜像
///
/// 校验失败时不会创建输出文件。
pub fn run(cli: &Cli) -> Result<AssemblyReport> {
    let out = Reporter::new(cli.quiet);
    let cfg = cli.layout_config();

    out.step(&format!("Reading bootloader {}", cli.boot.display()));
    let boot = fs::read(&cli.boot)
        .with_context(|| format!("failed to read bootloader `{}`", cli.boot.display()))?;

    let kernel = match &cli.kernel {
        Some(path) => {
            out.step(&format!("Reading kernel {}", path.display()));
            let data = fs::read(path)
                .with_context(|| format!("failed to read kernel `{}`", path.display()))?;
            Some(data)
        }
        None => None,
    };

    out.step("Assembling image...");
    let image = assemble(&boot, kernel.as_deref(), &cfg)
        .with_context(|| format!("cannot assemble `{}`", cli.output.display()))?;

    out.step(&format!(
        "Writing {} sectors to {}",
        image.layout().sector_count(),
        cli.output.display()
    ));
    let pb = out.progress_bar();
    write_image(&image, &cli.output, cli.verify, &pb)
        .with_context(|| format!("failed to write image `{}`", cli.output.display()))?;
    pb.finish_and_clear();

    if let Some(path) = &cli.layout {
        let bytes = image.layout().to_bytes()?;
        fs::write(path, bytes)
            .with_context(|| format!("failed to write layout `{}`", path.display()))?;
    }

    let report = AssemblyReport::from(image.layout());
    out.success(&format!("Image written to {}", cli.output.display()));
    out.report(&report);
    Ok(report)
}
