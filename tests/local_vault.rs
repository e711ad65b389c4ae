// Filesystem vault behaviour.
use jotter::context::{AppContext, TestContext};
use jotter::vault::{LocalVault, Properties, Vault};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

fn vault(ctx: &TestContext) -> LocalVault {
    let root = ctx.get_data_dir().unwrap().join("vault");
    fs::create_dir_all(&root).unwrap();
    LocalVault::new(root)
}

#[test]
fn test_paths_cannot_escape_root() {
    let ctx = TestContext::new();
    let v = vault(&ctx);
    assert!(v.resolve("../outside.md").is_err());
    assert!(v.resolve("notes/../../outside.md").is_err());
    assert!(v.resolve("/etc/passwd").is_err());
    assert!(v.resolve("").is_err());
    assert!(v.resolve("daily log/today.md").is_ok());
    assert!(v.create_folder("../escape").is_err());
    assert!(!v.folder_exists(".."));
}

#[test]
fn test_folder_lifecycle() {
    let ctx = TestContext::new();
    let v = vault(&ctx);
    assert!(!v.folder_exists("intentions"));
    v.ensure_folder("intentions").unwrap();
    assert!(v.folder_exists("intentions"));
    // Second call is a no-op
    v.ensure_folder("intentions").unwrap();
}

#[test]
fn test_create_requires_folder_and_new_file() {
    let ctx = TestContext::new();
    let v = vault(&ctx);
    assert!(v.create("missing/a.md", "x").is_err());

    v.create_folder("notes").unwrap();
    v.create("notes/a.md", "first").unwrap();
    assert!(v.file_exists("notes/a.md"));
    assert!(v.create("notes/a.md", "second").is_err());
    assert_eq!(fs::read_to_string(v.resolve("notes/a.md").unwrap()).unwrap(), "first");
}

#[test]
fn test_append_requires_existing_file() {
    let ctx = TestContext::new();
    let v = vault(&ctx);
    assert!(v.append("log.md", "x").is_err());
    v.create("log.md", "a").unwrap();
    v.append("log.md", "b").unwrap();
    assert_eq!(fs::read_to_string(v.resolve("log.md").unwrap()).unwrap(), "ab");
}

#[test]
fn test_create_note_with_properties() {
    let ctx = TestContext::new();
    let v = vault(&ctx);
    let props = Properties::new()
        .with("Stage", "created")
        .with("tags", vec!["x".to_string()]);
    v.create_note("n.md", "Body\n", Some(&props)).unwrap();
    assert_eq!(
        fs::read_to_string(v.resolve("n.md").unwrap()).unwrap(),
        "---\nStage: created\ntags:\n  - x\n---\nBody\n"
    );

    // Processing again updates in place
    let update = Properties::new().with("Stage", "done");
    v.process_front_matter("n.md", &update).unwrap();
    assert_eq!(
        fs::read_to_string(v.resolve("n.md").unwrap()).unwrap(),
        "---\nStage: done\ntags:\n  - x\n---\nBody\n"
    );
}

#[test]
fn test_create_note_without_properties_is_plain() {
    let ctx = TestContext::new();
    let v = vault(&ctx);
    v.create_note("plain.md", "# Heading\n", None).unwrap();
    assert_eq!(
        fs::read_to_string(v.resolve("plain.md").unwrap()).unwrap(),
        "# Heading\n"
    );
}

#[test]
fn test_concurrent_appends_do_not_interleave() {
    let ctx = TestContext::new();
    let v = vault(&ctx);
    v.create("log.md", "").unwrap();

    let thread_count = 8;
    let barrier = Arc::new(Barrier::new(thread_count));
    let mut handles = vec![];

    for i in 0..thread_count {
        let b = barrier.clone();
        let v = v.clone();
        handles.push(thread::spawn(move || {
            b.wait();
            let entry = format!("[entry {} {}]\n", i, "x".repeat(4096));
            v.append("log.md", &entry).unwrap();
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let content = fs::read_to_string(v.resolve("log.md").unwrap()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), thread_count);
    for line in lines {
        assert!(line.starts_with("[entry "));
        assert!(line.ends_with("x]"));
    }
}
