//! Command-line contract for producing importable metadata with an external exporter.

use crate::{Error, ImportJob};
use std::io;
use std::path::{Path, PathBuf};

/// Runs an external program and reports its exit code. Implemented by the host.
pub trait ExportTool {
    fn run(&mut self, program: &Path, working_dir: &Path, args: &[String]) -> io::Result<i32>;
}

/// Batch export through the Aseprite command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AsepriteExport {
    pub executable: PathBuf,
}

impl Default for AsepriteExport {
    fn default() -> Self {
        Self::new(Self::standard_path())
    }
}

impl AsepriteExport {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Default install location on the current platform.
    pub fn standard_path() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\Program Files (x86)\Aseprite\Aseprite.exe")
        } else {
            PathBuf::from("/Applications/Aseprite.app/Contents/MacOS/aseprite")
        }
    }

    pub fn data_file_name(job: &ImportJob) -> String {
        format!("{}.json", job.name())
    }

    pub fn sheet_file_name(job: &ImportJob) -> String {
        format!("{}.png", job.name())
    }

    /// Packed sheet plus array-style JSON listing tags and slices.
    pub fn arguments(job: &ImportJob) -> Vec<String> {
        let mut args = vec!["-b".to_string()];
        args.extend(job.additional_export_arguments.iter().cloned());
        args.extend([
            "--data".to_string(),
            Self::data_file_name(job),
            "--sheet".to_string(),
            Self::sheet_file_name(job),
            "--sheet-pack".to_string(),
            "--list-tags".to_string(),
            "--list-slices".to_string(),
            "--format".to_string(),
            "json-array".to_string(),
            job.file_name().to_string(),
        ]);
        args
    }

    /// Runs the export in the job's asset directory.
    pub fn run<T: ExportTool + ?Sized>(&self, tool: &mut T, job: &ImportJob) -> Result<(), Error> {
        let args = Self::arguments(job);
        let code = tool
            .run(&self.executable, job.asset_directory(), &args)
            .map_err(|e| Error::ExportLaunch {
                message: e.to_string(),
            })?;
        if code != 0 {
            log::warn!("{} exited with code {code}", self.executable.display());
            return Err(Error::ExportFailed { code });
        }
        Ok(())
    }
}
