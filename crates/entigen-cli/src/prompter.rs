//! Terminal prompter backed by dialoguer.

use std::path::{Path, PathBuf};

use dialoguer::{FuzzySelect, Input, theme::ColorfulTheme};
use tracing::debug;

use entigen_core::{
    application::Prompter,
    error::{Context as _, EntigenResult},
};

/// Directories never offered as output folders.
const SKIPPED_DIRS: &[&str] = &["build", "target", "node_modules"];

/// How deep below the project root folders are offered.
const MAX_DEPTH: usize = 4;

/// Interactive prompter. Folder selection fuzzy-searches the folders under
/// `root`, with a free-text entry as the first choice.
#[derive(Debug, Clone)]
pub struct DialoguerPrompter {
    root: PathBuf,
}

impl DialoguerPrompter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Prompter for DialoguerPrompter {
    fn ask_string(&self, prompt: &str, placeholder: &str) -> EntigenResult<Option<String>> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{prompt} ({placeholder})"))
            .allow_empty(true)
            .interact_text()
            .context("Failed to read answer")?;

        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_owned()))
    }

    fn pick_directory(&self, label: &str) -> EntigenResult<Option<PathBuf>> {
        let dirs = candidate_dirs(&self.root, MAX_DEPTH);
        debug!(candidates = dirs.len(), "offering output folders");

        let mut items = vec!["<type a path>".to_owned()];
        items.extend(dirs.iter().map(|d| d.display().to_string()));

        let choice = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .items(&items)
            .default(0)
            .interact_opt()
            .context("Failed to read folder selection")?;

        // Resolved against the root so both picked folders share one base.
        let picked = match choice {
            None => None,
            Some(0) => self.ask_string(label, "path")?.map(PathBuf::from),
            Some(i) => dirs.get(i - 1).cloned(),
        };
        Ok(picked.map(|dir| self.root.join(dir)))
    }
}

/// Non-hidden folders below `root`, relative to it, in sorted order.
fn candidate_dirs(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect_dirs(root, Path::new(""), max_depth, &mut found);
    found.sort();
    found
}

fn collect_dirs(base: &Path, rel: &Path, depth_left: usize, found: &mut Vec<PathBuf>) {
    if depth_left == 0 {
        return;
    }
    let Ok(entries) = std::fs::read_dir(base.join(rel)) else {
        return;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()) {
            continue;
        }
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            let child = rel.join(name.as_ref());
            collect_dirs(base, &child, depth_left - 1, found);
            found.push(child);
        }
    }
}
