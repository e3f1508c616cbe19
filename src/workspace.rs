//! Solution and project loading.
//!
//! A solution file is a line-oriented registry of project entries; each
//! C# project is an MSBuild XML file naming its target frameworks and
//! (optionally) assembly name, version, and output path. A project that
//! multi-targets yields one compilation unit per target framework,
//! displayed as `"Name (tfm)"` the way workspace models expose them.
//!
//! Loading narrates its work through a [`ProgressReport`] sink so the
//! orchestrator can surface per-unit timings without the loader knowing
//! anything about logging.

use std::fs;
use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};
use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::compile::SourceFile;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse project file {path}: {source}")]
    Xml {
        path: Utf8PathBuf,
        #[source]
        source: quick_xml::Error,
    },
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(std::path::PathBuf),
}

/// One compilation unit: a project evaluated for one target framework.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    /// Absolute path of the `.csproj` file.
    pub file_path: Utf8PathBuf,
    /// Name as a workspace model would display it: the plain project
    /// name, or `"Name (tfm)"` when the project multi-targets.
    pub display_name: String,
    pub assembly_name: String,
    pub version: String,
    /// The target framework this unit was evaluated for, if the project
    /// declares one.
    pub target_framework: Option<String>,
    /// Where the compiled artifact would land; used to recover a
    /// target-framework label when the display name carries none.
    pub output_assembly_path: Utf8PathBuf,
    pub source_files: Vec<Utf8PathBuf>,
}

#[derive(Debug)]
pub struct Solution {
    pub file_path: Utf8PathBuf,
    pub projects: Vec<ProjectInfo>,
}

/// Phases of loading one unit, mirrored in progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOperation {
    /// Project file evaluated.
    Evaluate,
    /// Sources discovered and read.
    Parse,
    /// Symbol graph bound.
    Compile,
}

impl LoadOperation {
    pub fn label(self) -> &'static str {
        match self {
            LoadOperation::Evaluate => "Evaluate",
            LoadOperation::Parse => "Parse",
            LoadOperation::Compile => "Compile",
        }
    }
}

/// One progress event from the loading pipeline.
#[derive(Debug)]
pub struct LoadProgress<'a> {
    pub operation: LoadOperation,
    pub elapsed: Duration,
    pub project_path: &'a Utf8Path,
    pub target_framework: Option<&'a str>,
}

/// Sink for progress events.
pub trait ProgressReport {
    fn report(&self, progress: &LoadProgress<'_>);
}

/// Production sink: one log line per event.
pub struct LogProgressReporter;

impl ProgressReport for LogProgressReporter {
    fn report(&self, progress: &LoadProgress<'_>) {
        match progress.target_framework {
            Some(tfm) => info!(
                operation = progress.operation.label(),
                elapsed = ?progress.elapsed,
                target_framework = tfm,
                path = %progress.project_path,
                "project.progress"
            ),
            None => info!(
                operation = progress.operation.label(),
                elapsed = ?progress.elapsed,
                path = %progress.project_path,
                "project.progress"
            ),
        }
    }
}

fn read_file(path: &Utf8Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

/// Solution files directly under `dir`, non-recursive, sorted for a
/// deterministic processing order.
pub fn find_solution_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, LoadError> {
    let pattern = dir.join("*.sln");
    let mut found = Vec::new();
    for entry in glob::glob(pattern.as_str())? {
        match entry {
            Ok(path) => match Utf8PathBuf::from_path_buf(path) {
                Ok(path) => found.push(path),
                Err(path) => return Err(LoadError::NonUtf8Path(path)),
            },
            Err(err) => warn!(error = %err, "solution.glob_entry_unreadable"),
        }
    }
    found.sort();
    Ok(found)
}

/// Load one solution: parse its project entries and evaluate each
/// referenced C# project. A project file that cannot be evaluated is
/// logged and skipped; only failures reading the solution itself are
/// errors.
pub fn load_solution(
    path: &Utf8Path,
    progress: &dyn ProgressReport,
) -> Result<Solution, LoadError> {
    let started = Instant::now();
    let text = read_file(path)?;
    let solution_dir = path.parent().unwrap_or(Utf8Path::new("."));

    let mut projects = Vec::new();
    for project_path in parse_solution_entries(&text, solution_dir) {
        match evaluate_project(&project_path) {
            Ok(evaluated) => {
                for unit in expand_units(&project_path, evaluated) {
                    progress.report(&LoadProgress {
                        operation: LoadOperation::Evaluate,
                        elapsed: started.elapsed(),
                        project_path: &unit.file_path,
                        target_framework: unit.target_framework.as_deref(),
                    });
                    projects.push(unit);
                }
            }
            Err(err) => {
                warn!(path = %project_path, error = %err, "project.evaluation_failed");
            }
        }
    }

    Ok(Solution { file_path: path.to_path_buf(), projects })
}

/// Paths of the `.csproj` entries in a solution file, resolved against
/// the solution directory. Solution folders and non-C# projects are
/// ignored.
fn parse_solution_entries(text: &str, solution_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if !line.starts_with("Project(") {
            continue;
        }
        // Project("{type-guid}") = "Name", "rel\path.csproj", "{guid}"
        let quoted: Vec<&str> = line.split('"').collect();
        let Some(raw_path) = quoted.get(5) else {
            continue;
        };
        if !raw_path.to_ascii_lowercase().ends_with(".csproj") {
            continue;
        }
        let relative = raw_path.replace('\\', "/");
        entries.push(solution_dir.join(relative));
    }
    entries
}

/// Raw properties read from a project file.
#[derive(Debug, Default)]
struct EvaluatedProject {
    target_frameworks: Vec<String>,
    assembly_name: Option<String>,
    version: Option<String>,
    output_path: Option<String>,
}

/// Read the handful of MSBuild properties the reports need. An event
/// scan is enough; no MSBuild evaluation semantics are attempted.
fn evaluate_project(path: &Utf8Path) -> Result<EvaluatedProject, LoadError> {
    let xml = read_file(path)?;
    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut evaluated = EvaluatedProject::default();
    let mut current_element: Option<String> = None;
    loop {
        let event = reader
            .read_event()
            .map_err(|source| LoadError::Xml { path: path.to_path_buf(), source })?;
        match event {
            Event::Start(start) => {
                current_element =
                    Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|source| LoadError::Xml {
                        path: path.to_path_buf(),
                        source: source.into(),
                    })?
                    .trim()
                    .to_string();
                if value.is_empty() {
                    continue;
                }
                match current_element.as_deref() {
                    Some("TargetFramework") => evaluated.target_frameworks = vec![value],
                    Some("TargetFrameworks") => {
                        evaluated.target_frameworks = value
                            .split(';')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string)
                            .collect();
                    }
                    Some("AssemblyName") => evaluated.assembly_name = Some(value),
                    Some("Version") => evaluated.version = Some(value),
                    Some("OutputPath") => evaluated.output_path = Some(value),
                    _ => {}
                }
            }
            Event::End(_) => current_element = None,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(evaluated)
}

/// Fan a project out into one unit per target framework.
fn expand_units(path: &Utf8Path, evaluated: EvaluatedProject) -> Vec<ProjectInfo> {
    let project_name = path.file_stem().unwrap_or("Project").to_string();
    let assembly_name = evaluated
        .assembly_name
        .unwrap_or_else(|| project_name.clone());
    let version = evaluated.version.unwrap_or_else(|| "0.0.0.0".to_string());
    let project_dir = path.parent().unwrap_or(Utf8Path::new("."));
    let sources = find_source_files(project_dir);
    let multi_targeted = evaluated.target_frameworks.len() > 1;

    let mut units = Vec::new();
    let frameworks: Vec<Option<String>> = if evaluated.target_frameworks.is_empty() {
        vec![None]
    } else {
        evaluated.target_frameworks.into_iter().map(Some).collect()
    };
    for tfm in frameworks {
        let display_name = match (&tfm, multi_targeted) {
            (Some(tfm), true) => format!("{project_name} ({tfm})"),
            _ => project_name.clone(),
        };
        let output_dir = match &evaluated.output_path {
            Some(out) => project_dir.join(out.replace('\\', "/")),
            None => {
                let mut dir = project_dir.join("bin").join("Debug");
                if let Some(tfm) = &tfm {
                    dir = dir.join(tfm);
                }
                dir
            }
        };
        units.push(ProjectInfo {
            file_path: path.to_path_buf(),
            display_name,
            assembly_name: assembly_name.clone(),
            version: version.clone(),
            target_framework: tfm,
            output_assembly_path: output_dir.join(format!("{assembly_name}.dll")),
            source_files: sources.clone(),
        });
    }
    units
}

/// All `.cs` files under the project directory, skipping build output.
fn find_source_files(project_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut sources = Vec::new();
    let walker = WalkDir::new(project_dir.as_std_path())
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.file_type().is_dir() && (name == "bin" || name == "obj"))
        });
    for entry in walker {
        let Ok(entry) = entry else {
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
            continue;
        };
        if path.extension() == Some("cs") {
            sources.push(path);
        }
    }
    sources.sort();
    sources
}

/// Read a unit's sources into memory.
pub fn read_sources(project: &ProjectInfo) -> Result<Vec<SourceFile>, LoadError> {
    let mut sources = Vec::with_capacity(project.source_files.len());
    for path in &project.source_files {
        sources.push(SourceFile { path: path.clone(), text: read_file(path)? });
    }
    Ok(sources)
}

/// Whether a project path contains a `ref` segment. Runtime-style repos
/// ship reference-assembly stub projects under `ref/` that mirror the
/// real ones; processing both would double-count every unit.
pub fn is_reference_assembly_project(path: &Utf8Path) -> bool {
    path.components().any(|c| c.as_str() == "ref")
}
