//! Find C# extension methods across the projects of one or more solution
//! files and report them as two CSV tables.
//!
//! The pipeline has three stages:
//!
//! 1. [`workspace`] discovers `*.sln` files, evaluates their `.csproj`
//!    projects (one compilation unit per target framework), and collects
//!    source files.
//! 2. [`compile`] parses each unit's sources with tree-sitter and binds a
//!    symbol graph ([`symbols::Compilation`]); [`discover`] walks that
//!    graph for extension containers and [`classify`] computes per-method
//!    and per-container attributes.
//! 3. [`report`] aggregates results across units, sorts them
//!    deterministically, and renders the type and method tables.

pub mod classify;
pub mod compile;
pub mod discover;
pub mod frameworks;
pub mod project_key;
pub mod report;
pub mod symbols;
pub mod workspace;

use std::collections::HashSet;
use std::time::Instant;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{error, info};

use crate::classify::ClassifyError;
use crate::project_key::ProjectKey;
use crate::report::UnitReport;
use crate::symbols::AssemblyIdentity;
use crate::workspace::{LoadOperation, LoadProgress, ProgressReport, ProjectInfo};

/// Process every solution under `search_directory` and write both
/// report files into `output_dir`. Returns the report paths.
///
/// Units are processed strictly sequentially; a visited set keyed by
/// [`ProjectKey`] guarantees a unit reachable from several solution
/// entries is processed once. Per-unit failures are logged and skipped;
/// the reports are always written, header-only if nothing was found.
pub fn run(
    search_directory: &Utf8Path,
    output_dir: &Utf8Path,
    progress: &dyn ProgressReport,
) -> Result<(Utf8PathBuf, Utf8PathBuf)> {
    let solution_files = workspace::find_solution_files(search_directory)?;
    if solution_files.is_empty() {
        error!(path = %search_directory, "no solution files found");
    }

    let mut visited: HashSet<ProjectKey> = HashSet::new();
    let mut units: Vec<UnitReport> = Vec::new();

    for solution_file in &solution_files {
        info!(path = %solution_file, "solution.loading");
        let solution = match workspace::load_solution(solution_file, progress) {
            Ok(solution) => solution,
            Err(err) => {
                error!(path = %solution_file, error = %err, "solution.load_failed");
                continue;
            }
        };

        for project in solution.projects {
            if workspace::is_reference_assembly_project(&project.file_path) {
                continue;
            }
            let key = ProjectKey::from_project(&project);
            if !visited.insert(key.clone()) {
                // The same unit can be reachable from several solution
                // entries; process it once.
                continue;
            }

            info!(project = %project.display_name, "project.processing");
            if let Some(unit) = process_unit(&project, key, progress) {
                units.push(unit);
            }
        }
    }

    report::write_reports(output_dir, units).context("failed to write report files")
}

/// Compile, walk, and summarize one unit. Failures are logged and
/// yield `None`: a bad unit never aborts the run, but a classifier
/// assumption violation is surfaced loudly rather than producing a
/// wrong row.
fn process_unit(
    project: &ProjectInfo,
    key: ProjectKey,
    progress: &dyn ProgressReport,
) -> Option<UnitReport> {
    let started = Instant::now();
    let sources = match workspace::read_sources(project) {
        Ok(sources) => sources,
        Err(err) => {
            error!(project = %project.display_name, error = %err, "project.sources_unreadable");
            return None;
        }
    };
    progress.report(&LoadProgress {
        operation: LoadOperation::Parse,
        elapsed: started.elapsed(),
        project_path: &project.file_path,
        target_framework: project.target_framework.as_deref(),
    });

    let assembly = AssemblyIdentity::new(&project.assembly_name, &project.version);
    let compilation = match compile::compile(assembly, &sources) {
        Ok(compilation) => compilation,
        Err(err) => {
            error!(project = %project.display_name, error = %err, "project.compilation_unavailable");
            return None;
        }
    };
    progress.report(&LoadProgress {
        operation: LoadOperation::Compile,
        elapsed: started.elapsed(),
        project_path: &project.file_path,
        target_framework: project.target_framework.as_deref(),
    });

    let containers = discover::discover_extension_containers(&compilation);
    info!(
        project = %project.display_name,
        count = containers.len(),
        "containers.found"
    );
    if containers.is_empty() {
        return None;
    }

    match report::summarize_unit(key, &compilation, &containers) {
        Ok(unit) => Some(unit),
        Err(err @ ClassifyError::UnhandledTypeShape { .. }) => {
            // A defect signal, not an input error: refuse to report
            // anything for this unit rather than guess.
            error!(project = %project.display_name, error = %err, "classification.aborted");
            None
        }
    }
}
