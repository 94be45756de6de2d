mod common;

use assert_cmd::Command;
use common::{scratch_repo, write_file};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn bundle_cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("repo-bundle").expect("Binary exists");
    cmd.current_dir(root)
        .env("REPO_BUNDLE_ROOT", root)
        .env_remove("REPO_BUNDLE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn bundles_targets_and_prints_summary() {
    let (_tmp, root) = scratch_repo();
    write_file(&root, "src/a.js", "console.log(1)");
    write_file(&root, "src/big.json", format!("\"{}\"", "x".repeat(30 * 1024)));

    bundle_cmd(&root)
        .arg("src")
        .assert()
        .success()
        .stdout(
            "Included files:\n- src/a.js\n- src/big.json (30.0 KB)\nBundle written to: tools/tmp/repo_bundle.md\n",
        );

    let document = fs::read_to_string(root.join("tools/tmp/repo_bundle.md")).unwrap();
    assert!(document.starts_with("# Repository source bundle\n\n## `src/a.js`"));
}

#[test]
fn output_option_redirects_the_bundle() {
    let (_tmp, root) = scratch_repo();
    write_file(&root, "README.md", "# readme");

    bundle_cmd(&root)
        .args(["README.md", "-o", "snapshots/readme.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundle written to: snapshots/readme.md"));

    assert!(root.join("snapshots/readme.md").is_file());
    assert!(!root.join("tools").exists());
}

#[test]
fn output_outside_root_is_shown_absolute() {
    let (_tmp, root) = scratch_repo();
    let (_out_tmp, out_dir) = scratch_repo();
    write_file(&root, "README.md", "# readme");
    let out = out_dir.join("bundle.md");

    bundle_cmd(&root)
        .arg("README.md")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Bundle written to: {}", out.display())));
}

#[test]
fn non_utf8_files_are_reported_on_stderr() {
    let (_tmp, root) = scratch_repo();
    write_file(&root, "src/ok.js", "ok()");
    write_file(&root, "src/latin1.txt", [b'c', b'a', b'f', 0xe9]);

    let output = bundle_cmd(&root)
        .arg("src")
        .assert()
        .success()
        .stdout(predicate::str::contains("- src/ok.js"))
        .stdout(predicate::str::contains("latin1").not())
        .get_output()
        .clone();

    // Exactly one diagnostic line with default logging, and no colour codes.
    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines, vec!["Skipping src/latin1.txt: not UTF-8 text."], "stderr was: {stderr:?}");
}

#[test]
fn fatal_error_is_reported_once() {
    let (_tmp, root) = scratch_repo();
    write_file(&root, "src/a.js", "x");

    let output = bundle_cmd(&root)
        .arg("../x")
        .assert()
        .failure()
        .get_output()
        .clone();

    let stderr = String::from_utf8(output.stderr).unwrap();
    let mentions = stderr.lines().filter(|l| l.contains("escapes repository root")).count();
    assert_eq!(mentions, 1, "stderr was: {stderr:?}");
    assert!(!stderr.contains('\u{1b}'), "unexpected ANSI escapes: {stderr:?}");
}

#[test]
fn escaping_target_fails_without_output() {
    let (_tmp, root) = scratch_repo();
    write_file(&root, "src/a.js", "x");

    bundle_cmd(&root)
        .args(["src", "../../etc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("escapes repository root"));

    assert!(!root.join("tools/tmp/repo_bundle.md").exists());
}

#[test]
fn nested_target_fails() {
    let (_tmp, root) = scratch_repo();
    write_file(&root, "src/util/b.js", "x");

    bundle_cmd(&root)
        .arg("src/util")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must live in repository root"));
}

#[test]
fn config_file_from_env_changes_rules() {
    let (_tmp, root) = scratch_repo();
    write_file(&root, "src/a.js", "a()");
    write_file(&root, "src/b.rs", "fn b() {}");
    write_file(&root, "bundle.yaml", "exclude:\n  suffixes: [rs]\noutput: out.md\n");

    bundle_cmd(&root)
        .env("REPO_BUNDLE_CONFIG", root.join("bundle.yaml"))
        .arg("src")
        .assert()
        .success()
        .stdout("Included files:\n- src/a.js\nBundle written to: out.md\n");
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*; // needed for .with()
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        use std::fmt::Write as FmtWrite;
        let mut msg = String::new();
        let _ = write!(&mut msg, "{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

#[test]
fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use repo_bundle::cli::{run, Cli};

    // A target that cannot exist: the run fails, but only after tracing starts.
    let cli = Cli {
        targets: vec!["definitely-not-a-target-7f3a".to_string()],
        output: None,
    };

    let _ = run(cli);

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
