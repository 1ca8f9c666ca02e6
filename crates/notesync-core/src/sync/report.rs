//! Outcome of a sync pass

use super::Policy;
use serde::Serialize;
use std::collections::BTreeSet;

/// Report from one sync pass over one binding
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    /// Notebook the pass ran against
    pub notebook: String,
    /// Policy of the pass
    pub policy: Policy,
    /// Whether side effects were only simulated
    pub dry_run: bool,
    /// Names whose content was created or replaced on either side
    pub updated: BTreeSet<String>,
    /// Actions taken, in order. Prefixed with "[dry-run] Would" in dry-run
    pub actions: Vec<String>,
    /// Names left in conflict
    pub conflicts: Vec<String>,
    /// Per-item failures that did not stop the pass
    pub errors: Vec<String>,
}

impl PassReport {
    pub fn new(notebook: impl Into<String>, policy: Policy, dry_run: bool) -> Self {
        Self {
            notebook: notebook.into(),
            policy,
            dry_run,
            updated: BTreeSet::new(),
            actions: Vec::new(),
            conflicts: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Whether every item was processed without error. Conflicts are not
    /// errors.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an action, phrased for dry-run when needed.
    ///
    /// `done` is the past-tense description and `planned` the infinitive,
    /// e.g. "Created note 'todo'" and "create note 'todo'".
    pub(crate) fn action(&mut self, done: String, planned: String) {
        if self.dry_run {
            self.actions.push(format!("[dry-run] Would {}", planned));
        } else {
            self.actions.push(done);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_actions_are_prefixed() {
        let mut report = PassReport::new("Notes", Policy::Up, true);
        report.action("Created note 'todo'".into(), "create note 'todo'".into());
        assert_eq!(report.actions, vec!["[dry-run] Would create note 'todo'"]);
    }

    #[test]
    fn conflicts_do_not_fail_the_report() {
        let mut report = PassReport::new("Notes", Policy::TwoWay, false);
        report.conflicts.push("todo".into());
        assert!(report.success());

        report.errors.push("todo: not UTF-8".into());
        assert!(!report.success());
    }
}
