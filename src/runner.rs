//! End-to-end execution of an [`IconJob`].

use std::path::PathBuf;

use log::debug;

use crate::compose::compose;
use crate::error::Result;
use crate::export::{export_multi_size, export_png};
use crate::profile::IconJob;
use crate::source::load_source;

/// Loads the job's source, composes it and writes the output.
///
/// Parameters are validated before any file is read, and the output is only
/// written once the whole icon has been encoded. Returns the written path.
pub fn run_job(job: &IconJob) -> Result<PathBuf> {
    job.validate()?;
    let export = job.export_spec()?;

    let source = load_source(&job.source)?;
    let canvas = compose(&source, &job.params())?;
    debug!(
        "composed {} onto {}px canvas",
        job.source.display(),
        canvas.size()
    );

    match export {
        Some(sizes) => export_multi_size(&canvas, &sizes, &job.output)?,
        None => export_png(&canvas, &job.output)?,
    }
    Ok(job.output.clone())
}

/// Runs jobs in order, stopping at the first failure.
///
/// Later jobs may read what earlier ones wrote, as the favicon does with the
/// PWA icon.
pub fn run_all<'a>(jobs: impl IntoIterator<Item = &'a IconJob>) -> Result<Vec<PathBuf>> {
    jobs.into_iter().map(run_job).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::FitMode;
    use crate::error::ErrorKind;
    use crate::profile::OutputFormat;
    use image::{Rgba, RgbaImage};
    use std::fs::File;
    use std::path::Path;

    fn write_logo(path: &Path, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([20, 120, 220, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn pwa_then_favicon() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("public").join("logo.png");
        std::fs::create_dir_all(logo.parent().unwrap()).unwrap();
        write_logo(&logo, 800, 200);

        let pwa = IconJob::pwa()
            .with_source(&logo)
            .with_output(dir.path().join("public").join("icon-pwa.png"));
        let favicon = IconJob::favicon()
            .with_source(&pwa.output)
            .with_output(dir.path().join("app").join("favicon.ico"));

        let written = run_all([&pwa, &favicon]).unwrap();
        assert_eq!(written, vec![pwa.output.clone(), favicon.output.clone()]);

        let icon = image::open(&pwa.output).unwrap().into_rgba8();
        assert_eq!(icon.dimensions(), (512, 512));
        assert_eq!(icon.get_pixel(0, 0)[3], 0);
        assert_eq!(icon.get_pixel(89, 256)[3], 0);
        assert_eq!(icon.get_pixel(256, 213)[3], 0);
        assert!(icon.get_pixel(256, 256)[3] > 0);

        let icon_dir = ico::IconDir::read(File::open(&favicon.output).unwrap()).unwrap();
        assert_eq!(icon_dir.entries().len(), 4);
    }

    #[test]
    fn optimized_favicon_from_logo() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        write_logo(&logo, 200, 200);

        let job = IconJob::favicon_optimized()
            .with_source(&logo)
            .with_output(dir.path().join("favicon.ico"));
        run_job(&job).unwrap();

        let icon_dir = ico::IconDir::read(File::open(&job.output).unwrap()).unwrap();
        let sides: Vec<_> = icon_dir.entries().iter().map(|e| e.width()).collect();
        assert_eq!(sides, vec![16, 32, 48, 64]);
    }

    #[test]
    fn missing_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let job = IconJob::pwa()
            .with_source(dir.path().join("logo.png"))
            .with_output(dir.path().join("icon-pwa.png"));

        let err = run_job(&job).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!job.output.exists());
    }

    #[test]
    fn invalid_job_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let job = IconJob {
            source: dir.path().join("does-not-exist.png"),
            output: dir.path().join("out.ico"),
            canvas_size: 32,
            fill_ratio: 0.5,
            fit: FitMode::Contain,
            format: OutputFormat::favicon(),
        };

        let err = run_job(&job).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(!job.output.exists());
    }

    #[test]
    fn existing_output_survives_failure() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("favicon.ico");
        std::fs::write(&output, b"previous").unwrap();

        let bad_logo = dir.path().join("logo.png");
        std::fs::write(&bad_logo, b"not an image").unwrap();

        let job = IconJob::favicon_optimized()
            .with_source(&bad_logo)
            .with_output(&output);
        assert!(run_job(&job).is_err());
        assert_eq!(std::fs::read(&output).unwrap(), b"previous");
    }
}
