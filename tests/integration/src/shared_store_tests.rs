//! Two clients sharing one note store
//!
//! Each test drives real directories through `LocalDir` and a real
//! `FileNoteService`, the way two machines syncing the same notebook would.

use notesync_content::Format;
use notesync_core::{Policy, PassReport, SnapshotStore, SyncEngine, SyncOptions};
use notesync_fs::{LocalDir, NormalizedPath};
use notesync_store::FileNoteService;
use notesync_test_utils::TestDir;
use pretty_assertions::assert_eq;
use std::time::Duration;

const TOKEN: &str = "shared-secret";
const NOTEBOOK: &str = "Notes";

struct World {
    dir: TestDir,
}

impl World {
    fn new() -> Self {
        let dir = TestDir::new()
            .with_dir("store")
            .with_dir("laptop")
            .with_dir("desktop");
        FileNoteService::init(dir.path("store"), TOKEN).unwrap();
        Self { dir }
    }

    fn service(&self) -> FileNoteService {
        FileNoteService::open(self.dir.path("store"), Some(TOKEN)).unwrap()
    }

    fn sync(&self, client: &str, policy: Policy, options: SyncOptions) -> PassReport {
        self.sync_masked(client, None, policy, options)
    }

    fn sync_masked(
        &self,
        client: &str,
        mask: Option<&str>,
        policy: Policy,
        options: SyncOptions,
    ) -> PassReport {
        let service = self.service();
        let files = LocalDir::open(self.dir.path(client), mask).unwrap();
        let engine = SyncEngine::new(&service, files, Some(NOTEBOOK), options).unwrap();
        engine.run_pass(policy).unwrap()
    }

    /// Edit a file so its modification time moves past the recorded one.
    fn edit(&self, rel: &str, content: &str) {
        std::thread::sleep(Duration::from_millis(20));
        self.dir.write(rel, content);
    }

    fn snapshot_bytes(&self, client: &str) -> Vec<u8> {
        let store = SnapshotStore::for_binding(&NormalizedPath::new(self.dir.path(client)), NOTEBOOK);
        std::fs::read(store.path()).unwrap()
    }
}

#[test]
fn note_travels_from_laptop_to_desktop() {
    let world = World::new();
    world.dir.write("laptop/todo.txt", "milk\neggs\n");

    let report = world.sync("laptop", Policy::Up, SyncOptions::default());
    assert_eq!(report.actions, vec!["Created note 'todo'".to_string()]);

    world.sync("desktop", Policy::Down, SyncOptions::default());
    assert_eq!(world.dir.read("desktop/todo.txt"), "milk\neggs\n");
}

#[test]
fn edits_flow_both_ways() {
    let world = World::new();
    world.dir.write("laptop/todo.txt", "milk\n");
    world.sync("laptop", Policy::TwoWay, SyncOptions::default());
    world.sync("desktop", Policy::TwoWay, SyncOptions::default());

    world.edit("desktop/todo.txt", "milk\nbread\n");
    let report = world.sync("desktop", Policy::TwoWay, SyncOptions::default());
    assert!(report.updated.contains("todo"));

    world.sync("laptop", Policy::TwoWay, SyncOptions::default());
    assert_eq!(world.dir.read("laptop/todo.txt"), "milk\nbread\n");
}

#[test]
fn concurrent_edits_are_flagged_then_merged() {
    let world = World::new();
    world.dir.write("laptop/todo.txt", "milk\n");
    world.sync("laptop", Policy::TwoWay, SyncOptions::default());
    world.sync("desktop", Policy::TwoWay, SyncOptions::default());

    world.edit("laptop/todo.txt", "milk\nfrom laptop\n");
    world.sync("laptop", Policy::TwoWay, SyncOptions::default());
    world.edit("desktop/todo.txt", "milk\nfrom desktop\n");

    let before = world.snapshot_bytes("desktop");
    let report = world.sync("desktop", Policy::TwoWay, SyncOptions::default());

    assert_eq!(report.conflicts, vec!["todo".to_string()]);
    assert_eq!(world.dir.read("desktop/.todo.txt.rej"), "milk\nfrom laptop\n");
    assert_eq!(world.dir.read("desktop/todo.txt"), "milk\nfrom desktop\n");
    assert_eq!(world.snapshot_bytes("desktop"), before);

    world.edit("desktop/todo.txt", "milk\nfrom laptop\nfrom desktop\n");
    let merged = SyncOptions::default().with_merge_authorized(true);
    let report = world.sync("desktop", Policy::TwoWay, merged);
    assert!(report.conflicts.is_empty());

    world.sync("laptop", Policy::TwoWay, SyncOptions::default());
    assert_eq!(world.dir.read("laptop/todo.txt"), "milk\nfrom laptop\nfrom desktop\n");
}

#[test]
fn repeated_pass_changes_nothing() {
    let world = World::new();
    world.dir.write("laptop/todo.txt", "milk\n");
    world.dir.write("laptop/ideas.txt", "rust\n");
    world.sync("laptop", Policy::TwoWay, SyncOptions::default());

    let snapshot = world.snapshot_bytes("laptop");
    let notes = world.service().notes().unwrap();

    let report = world.sync("laptop", Policy::TwoWay, SyncOptions::default());

    assert!(report.actions.is_empty());
    assert_eq!(world.snapshot_bytes("laptop"), snapshot);
    assert_eq!(world.service().notes().unwrap(), notes);
}

#[test]
fn markdown_notes_keep_their_structure() {
    let world = World::new();
    world.dir.write("laptop/plan.md", "# Plan\n\n- ship it\n");
    let markdown = SyncOptions::default().with_format(Format::Markdown);

    world.sync("laptop", Policy::Up, markdown.clone());
    let note = world.service().notes().unwrap().remove(0);
    assert!(note.content.contains("<h1>Plan</h1>"));

    world.sync("desktop", Policy::Down, markdown);
    let text = world.dir.read("desktop/plan.md");
    assert!(text.starts_with("# Plan\n"));
    assert!(text.contains("- ship it"));
}

#[test]
fn mask_limits_uploaded_files() {
    let world = World::new();
    world.dir.write("laptop/todo.md", "milk\n");
    world.dir.write("laptop/draft.txt", "wip\n");

    world.sync_masked("laptop", Some("*.md"), Policy::Up, SyncOptions::default());

    let titles: Vec<String> = world
        .service()
        .notes()
        .unwrap()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["todo".to_string()]);
}

#[test]
fn snapshot_and_artifacts_stay_out_of_the_store() {
    let world = World::new();
    world.dir.write("laptop/todo.txt", "milk\n");
    world.dir.write("laptop/.hidden.txt", "secret\n");
    world.sync("laptop", Policy::Up, SyncOptions::default());
    world.sync("laptop", Policy::Up, SyncOptions::default());

    let notes = world.service().notes().unwrap();
    assert_eq!(notes.len(), 1);
    world.dir.assert_file_exists("laptop/.Notes.mtime");
}
