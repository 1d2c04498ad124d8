//! Watch command: bake once, then re-bake levels as they change.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use notify::{EventKind, RecursiveMode, Watcher};

use crate::discovery::Manifest;
use crate::error::{BakeError, Result};
use crate::output::{display_path, plural, Printer};

use super::build::bake_plan;
use super::{LightingArgs, Plan};

/// Editors often write a file in several steps; wait this long for quiet.
const SETTLE: Duration = Duration::from_millis(200);

/// Bake, then re-bake level files as they change
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Level files or directories (default: discover from levelbake.yaml or .)
    pub paths: Vec<PathBuf>,

    /// Base output directory (default: next to each level)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub lighting: LightingArgs,
}

pub fn run(args: WatchArgs) -> Result<()> {
    let printer = Printer::new();
    let plan = Plan::resolve(Path::new("."), &args.paths, args.output.as_ref(), &args.lighting)?;

    bake_plan(&plan, &plan.levels, &printer);

    let (tx, rx) = mpsc::channel::<PathBuf>();
    let filter = plan.manifest.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(event) => {
                for path in changed_levels(&event, &filter) {
                    let _ = tx.send(path);
                }
            }
            Err(e) => log::warn!("watch error: {}", e),
        }
    })
    .map_err(watch_error)?;

    let targets = watch_targets(&plan, &args.paths);
    for target in &targets {
        let mode = if target.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(target, mode).map_err(watch_error)?;
    }

    printer.info(
        "Watching",
        &format!("{} for changes", plural(targets.len(), "path", "paths")),
    );

    while let Ok(first) = rx.recv() {
        let mut batch = BTreeSet::from([first]);
        while let Ok(next) = rx.recv_timeout(SETTLE) {
            batch.insert(next);
        }

        let levels: Vec<PathBuf> = batch.into_iter().filter(|p| p.is_file()).collect();
        for level in &levels {
            log::debug!("changed: {}", display_path(level));
        }
        bake_plan(&plan, &levels, &printer);
    }

    Ok(())
}

/// Level files touched by a create or modify event.
pub fn changed_levels(event: &notify::Event, manifest: &Manifest) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any => event
            .paths
            .iter()
            .filter(|p| manifest.is_level_file(p) && !manifest.is_excluded(p))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

/// Paths to watch: the explicit arguments, or the manifest's sources.
fn watch_targets(plan: &Plan, paths: &[PathBuf]) -> Vec<PathBuf> {
    let targets: Vec<PathBuf> = if paths.is_empty() {
        plan.manifest
            .effective_sources()
            .iter()
            .map(|s| plan.root.join(s))
            .collect()
    } else {
        paths.to_vec()
    };
    targets.into_iter().filter(|p| p.exists()).collect()
}

fn watch_error(e: notify::Error) -> BakeError {
    BakeError::Build {
        message: format!("Failed to watch for changes: {}", e),
        help: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use tempfile::tempdir;

    fn event(kind: EventKind, paths: &[&str]) -> notify::Event {
        paths
            .iter()
            .fold(notify::Event::new(kind), |e, p| e.add_path(PathBuf::from(p)))
    }

    #[test]
    fn test_changed_levels_filters_extension() {
        let e = event(
            EventKind::Modify(ModifyKind::Any),
            &["levels/cave.txt", "levels/json/cave.json", "levels/shadow/cave_shadowmap.png"],
        );
        assert_eq!(
            changed_levels(&e, &Manifest::default()),
            vec![PathBuf::from("levels/cave.txt")]
        );
    }

    #[test]
    fn test_changed_levels_accepts_create() {
        let e = event(EventKind::Create(CreateKind::File), &["new.txt"]);
        assert_eq!(changed_levels(&e, &Manifest::default()).len(), 1);
    }

    #[test]
    fn test_changed_levels_ignores_removals_and_excludes() {
        let e = event(EventKind::Remove(RemoveKind::File), &["gone.txt"]);
        assert!(changed_levels(&e, &Manifest::default()).is_empty());

        let manifest = Manifest {
            excludes: vec!["**/drafts/*".to_string()],
            ..Default::default()
        };
        let e = event(EventKind::Modify(ModifyKind::Any), &["levels/drafts/wip.txt"]);
        assert!(changed_levels(&e, &manifest).is_empty());
    }

    #[test]
    fn test_watch_targets_default_to_sources() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("levels")).unwrap();
        std::fs::write(dir.path().join("levelbake.yaml"), "sources: [levels, missing]").unwrap();

        let plan = Plan::resolve(dir.path(), &[], None, &LightingArgs::default()).unwrap();
        assert_eq!(watch_targets(&plan, &[]), vec![dir.path().join("levels")]);
    }
}
