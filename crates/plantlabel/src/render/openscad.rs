//! OpenSCAD command-line renderer.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use super::error::RenderError;
use super::renderer::{RenderJob, RenderOutput, Renderer};
use super::template::apply_parameters;
use crate::error::{PlantLabelError, Result};

/// Default time allowed for one label.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Time allowed for `--version`.
const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// How the template reaches OpenSCAD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScadSource {
    /// Render the template directly, passing values as `-D name=value`.
    Definitions,
    /// Write a per-label copy of the template with its assignments rewritten
    /// into `dir`, then render that copy.
    Materialized { dir: PathBuf, keep: bool },
}

/// OpenSCAD renderer settings.
#[derive(Debug, Clone)]
pub struct OpenScadConfig {
    /// Executable name or path.
    pub binary: PathBuf,
    /// The label template (`.scad`).
    pub template: PathBuf,
    pub timeout: Duration,
    pub source: ScadSource,
}

impl Default for OpenScadConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("openscad"),
            template: PathBuf::from("Enhanced Plant Labeler.scad"),
            timeout: DEFAULT_TIMEOUT,
            source: ScadSource::Definitions,
        }
    }
}

/// Renders labels by running the `openscad` executable.
///
/// Each call blocks until OpenSCAD exits or the timeout elapses, in which
/// case the process is killed.
pub struct OpenScadRenderer {
    config: OpenScadConfig,
    runtime: Runtime,
    template_text: Option<String>,
}

impl OpenScadRenderer {
    /// Create a renderer, checking the template exists.
    pub fn new(config: OpenScadConfig) -> Result<Self> {
        if !config.template.is_file() {
            return Err(PlantLabelError::Io {
                path: config.template.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "template file not found",
                ),
            });
        }

        let template_text = match &config.source {
            ScadSource::Definitions => None,
            ScadSource::Materialized { dir, .. } => {
                std::fs::create_dir_all(dir).map_err(|e| PlantLabelError::Io {
                    path: dir.clone(),
                    source: e,
                })?;
                let text = std::fs::read_to_string(&config.template).map_err(|e| {
                    PlantLabelError::Io {
                        path: config.template.clone(),
                        source: e,
                    }
                })?;
                Some(text)
            }
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                PlantLabelError::RendererUnavailable(format!("could not start runtime: {}", e))
            })?;

        Ok(Self {
            config,
            runtime,
            template_text,
        })
    }

    pub fn config(&self) -> &OpenScadConfig {
        &self.config
    }

    /// Ask the renderer for its version, proving it can be run.
    pub fn check_available(&self) -> Result<String> {
        let output = self
            .run(vec!["--version".into()], VERSION_TIMEOUT)
            .map_err(|e| PlantLabelError::RendererUnavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(PlantLabelError::RendererUnavailable(format!(
                "'{} --version' exited with {}",
                self.config.binary.display(),
                output.status
            )));
        }

        // OpenSCAD prints its version on stderr
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let version = if stdout.trim().is_empty() {
            stderr.trim()
        } else {
            stdout.trim()
        };
        Ok(version.to_string())
    }

    /// Remove the scratch directory of materialized templates unless asked to keep it.
    pub fn cleanup(&self) -> Result<()> {
        if let ScadSource::Materialized { dir, keep: false } = &self.config.source {
            if dir.exists() {
                std::fs::remove_dir_all(dir).map_err(|e| PlantLabelError::Io {
                    path: dir.clone(),
                    source: e,
                })?;
                debug!(dir = %dir.display(), "removed scratch templates");
            }
        }
        Ok(())
    }

    /// Command-line arguments for one job, writing its template copy if needed.
    fn arguments(&self, job: &RenderJob<'_>) -> std::result::Result<Vec<OsString>, RenderError> {
        let mut args: Vec<OsString> = vec!["-o".into(), job.output_path.as_os_str().to_owned()];

        match (&self.config.source, &self.template_text) {
            (ScadSource::Materialized { dir, .. }, Some(template)) => {
                let (content, appended) = apply_parameters(template, job.params);
                if !appended.is_empty() {
                    debug!(label = job.name, ?appended, "template has no assignment for some parameters");
                }
                let scad_path = dir.join(format!("{}.scad", job.name));
                std::fs::write(&scad_path, content)?;
                args.push(scad_path.into_os_string());
            }
            _ => {
                for definition in job.params.definitions() {
                    args.push("-D".into());
                    args.push(definition.into());
                }
                args.push(self.config.template.as_os_str().to_owned());
            }
        }

        Ok(args)
    }

    fn run(&self, args: Vec<OsString>, timeout: Duration) -> std::result::Result<Output, RenderError> {
        let binary = &self.config.binary;

        self.runtime.block_on(async {
            let spawned = Command::new(binary)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .spawn();

            let child = match spawned {
                Ok(child) => child,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(RenderError::NotFound {
                        binary: binary.clone(),
                    });
                }
                Err(e) => {
                    return Err(RenderError::Spawn {
                        binary: binary.clone(),
                        source: e,
                    });
                }
            };

            // Dropping the future on timeout drops the child, which kills it
            match tokio::time::timeout(timeout, child.wait_with_output()).await {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(e)) => Err(RenderError::Io(e)),
                Err(_) => Err(RenderError::Timeout {
                    seconds: timeout.as_secs(),
                }),
            }
        })
    }
}

impl Renderer for OpenScadRenderer {
    fn render(&self, job: &RenderJob<'_>) -> std::result::Result<RenderOutput, RenderError> {
        let args = self.arguments(job)?;

        // A leftover file from an earlier run must not pass for fresh output
        match std::fs::remove_file(job.output_path) {
            Ok(()) => debug!(label = job.name, "removed stale output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(RenderError::Io(e)),
        }

        debug!(label = job.name, args = args.len(), "invoking openscad");

        let started = Instant::now();
        let output = self.run(args, self.config.timeout)?;
        let duration = started.elapsed();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            warn!(label = job.name, status = %output.status, "openscad failed");
            return Err(RenderError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        if !job.output_path.exists() {
            return Err(RenderError::MissingOutput {
                path: job.output_path.to_path_buf(),
            });
        }

        Ok(RenderOutput {
            output_path: job.output_path.to_path_buf(),
            duration,
            stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::params::{ParamValue, RenderParameterSet};
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    /// Write an executable shell script standing in for openscad.
    fn fake_openscad(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-openscad");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn template(dir: &Path) -> PathBuf {
        let path = dir.join("label.scad");
        std::fs::write(&path, "plant_name = \"\";\nwater_drops = 2;\n").unwrap();
        path
    }

    fn params() -> RenderParameterSet {
        [
            ("plant_name".to_string(), ParamValue::Text("Fern".into())),
            ("water_drops".to_string(), ParamValue::Integer(3)),
        ]
        .into_iter()
        .collect()
    }

    fn renderer(dir: &Path, script: &str, source: ScadSource) -> OpenScadRenderer {
        OpenScadRenderer::new(OpenScadConfig {
            binary: fake_openscad(dir, script),
            template: template(dir),
            timeout: Duration::from_secs(5),
            source,
        })
        .unwrap()
    }

    #[test]
    fn test_missing_template_is_rejected() {
        let err = OpenScadRenderer::new(OpenScadConfig {
            template: PathBuf::from("/nonexistent/label.scad"),
            ..OpenScadConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, PlantLabelError::Io { .. }));
    }

    #[test]
    fn test_definitions_are_passed_as_arguments() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("args.txt");
        // Record arguments, then create the file named after -o
        let script = format!("printf '%s\\n' \"$@\" > '{}'\ntouch \"$2\"", log.display());
        let renderer = renderer(dir.path(), &script, ScadSource::Definitions);

        let out = dir.path().join("Fern.stl");
        let params = params();
        let job = RenderJob {
            name: "Fern",
            params: &params,
            output_path: &out,
        };
        renderer.render(&job).unwrap();

        let args = std::fs::read_to_string(&log).unwrap();
        let args: Vec<&str> = args.lines().collect();
        assert_eq!(args[0], "-o");
        assert_eq!(args[1], out.to_str().unwrap());
        assert_eq!(&args[2..6], &["-D", "plant_name=\"Fern\"", "-D", "water_drops=3"]);
        assert!(args[6].ends_with("label.scad"));
    }

    #[test]
    fn test_non_zero_exit_carries_stderr() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer(dir.path(), "echo 'syntax error' >&2\nexit 3", ScadSource::Definitions);

        let out = dir.path().join("Fern.stl");
        let params = params();
        let err = renderer
            .render(&RenderJob {
                name: "Fern",
                params: &params,
                output_path: &out,
            })
            .unwrap_err();

        match err {
            RenderError::Failed { code, ref stderr } => {
                assert_eq!(code, Some(3));
                assert!(stderr.contains("syntax error"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_timeout_kills_renderer() {
        let dir = TempDir::new().unwrap();
        let mut renderer = renderer(dir.path(), "sleep 5", ScadSource::Definitions);
        renderer.config.timeout = Duration::from_millis(200);

        let out = dir.path().join("Fern.stl");
        let params = params();
        let started = Instant::now();
        let err = renderer
            .render(&RenderJob {
                name: "Fern",
                params: &params,
                output_path: &out,
            })
            .unwrap_err();

        assert!(matches!(err, RenderError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_binary_is_not_found() {
        let dir = TempDir::new().unwrap();
        let renderer = OpenScadRenderer::new(OpenScadConfig {
            binary: PathBuf::from("definitely-not-openscad-xyz"),
            template: template(dir.path()),
            timeout: Duration::from_secs(5),
            source: ScadSource::Definitions,
        })
        .unwrap();

        assert!(renderer.check_available().is_err());
        let out = dir.path().join("x.stl");
        let params = params();
        let err = renderer
            .render(&RenderJob {
                name: "x",
                params: &params,
                output_path: &out,
            })
            .unwrap_err();
        assert!(matches!(err, RenderError::NotFound { .. }));
    }

    #[test]
    fn test_materialized_template_written_and_cleaned() {
        let dir = TempDir::new().unwrap();
        let scratch = dir.path().join("scad");
        let renderer = renderer(
            dir.path(),
            "touch \"$2\"",
            ScadSource::Materialized {
                dir: scratch.clone(),
                keep: false,
            },
        );

        let out = dir.path().join("Fern.stl");
        let params = params();
        renderer
            .render(&RenderJob {
                name: "Fern",
                params: &params,
                output_path: &out,
            })
            .unwrap();

        let written = std::fs::read_to_string(scratch.join("Fern.scad")).unwrap();
        assert!(written.contains("plant_name = \"Fern\";"));
        assert!(written.contains("water_drops = 3;"));

        renderer.cleanup().unwrap();
        assert!(!scratch.exists());
    }

    #[test]
    fn test_success_without_output_file() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer(dir.path(), "exit 0", ScadSource::Definitions);
        let out = dir.path().join("Fern.stl");
        let params = params();
        let err = renderer
            .render(&RenderJob {
                name: "Fern",
                params: &params,
                output_path: &out,
            })
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingOutput { .. }));
    }

    #[test]
    fn test_stale_output_is_not_mistaken_for_success() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer(dir.path(), "exit 0", ScadSource::Definitions);
        let out = dir.path().join("Fern.stl");
        std::fs::write(&out, "solid old\nendsolid old\n").unwrap();
        let params = params();
        let err = renderer
            .render(&RenderJob {
                name: "Fern",
                params: &params,
                output_path: &out,
            })
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingOutput { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_check_available_reads_version() {
        let dir = TempDir::new().unwrap();
        let renderer = renderer(
            dir.path(),
            "echo 'OpenSCAD version 2021.01' >&2",
            ScadSource::Definitions,
        );
        assert_eq!(renderer.check_available().unwrap(), "OpenSCAD version 2021.01");
    }
}
