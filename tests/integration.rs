use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use handcrack::cli::generate::{self, GenerateArgs, OutputFormat};
use handcrack::cli::menu::{self, Prompt};
use handcrack::command::{self, Selection};
use handcrack::dispatch::{ClipboardSink, Dispatcher, Shell};
use handcrack::inventory::{self, Inventory};
use handcrack::{Config, Error, Result};

type Log = Rc<RefCell<Vec<String>>>;

/// Answers prompts from a fixed script, matching item labels.
struct ScriptedPrompt {
    answers: VecDeque<Option<&'static str>>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    fn new(answers: &[Option<&'static str>]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn select(&mut self, message: &str, items: &[String]) -> Result<Option<usize>> {
        self.asked.push(message.to_string());
        let answer = self
            .answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {message}"));

        Ok(answer.map(|wanted| {
            items
                .iter()
                .position(|item| item == wanted || item.starts_with(&format!("{wanted}: ")))
                .unwrap_or_else(|| panic!("{wanted} not offered in {items:?}"))
        }))
    }
}

struct RecordingShell {
    log: Log,
    fail: bool,
}

impl Shell for RecordingShell {
    fn run_line(&mut self, line: &str) -> Result<()> {
        self.log.borrow_mut().push(line.to_string());
        if self.fail {
            return Err(Error::SubprocessFailure {
                command: line.to_string(),
                reason: "exit status: 255".to_string(),
            });
        }
        Ok(())
    }

    fn run_program(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("{} {} @{}", program, args.join(" "), cwd.display()));
        Ok(())
    }
}

struct HeadlessClipboard;

impl ClipboardSink for HeadlessClipboard {
    fn copy(&mut self, _text: &str) -> Result<()> {
        Err(Error::ClipboardUnavailable("no display".to_string()))
    }
}

struct Fixture {
    _dir: tempfile::TempDir,
    config: Config,
}

fn fixture(handshakes: &[&str], wordlists: &[&str], rules: &[&str]) -> Fixture {
    handcrack::output::set_quiet(true);

    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_root(dir.path());

    for (path, names) in [
        (&config.handshake_dir, handshakes),
        (&config.wordlist_dir, wordlists),
        (&config.rule_dir, rules),
    ] {
        fs::create_dir_all(path).unwrap();
        fs::write(path.join(".gitkeep"), "").unwrap();
        for name in names {
            fs::write(path.join(name), "").unwrap();
        }
    }

    Fixture { _dir: dir, config }
}

fn dispatcher(fail: bool) -> (Dispatcher, Log) {
    let log = Log::default();
    let dispatcher = Dispatcher::new(
        Box::new(RecordingShell { log: log.clone(), fail }),
        Box::new(HeadlessClipboard),
    );
    (dispatcher, log)
}

fn write_manifest(path: &Path) {
    let manifest = r#"{
        "scripts": {
            "sync": "rsync -av pi@pwnagotchi.local:handshakes/ handshakes/pcap",
            "convert": "hcxpcapngtool -o out.hc22000 handshakes/pcap/*.pcap"
        }
    }"#;
    fs::write(path, manifest).unwrap();
}

fn run_menu(
    config: &Config,
    prompt: &mut ScriptedPrompt,
    dispatcher: &mut Dispatcher,
    seed: u64,
) -> Result<()> {
    menu::run_loop(config, prompt, dispatcher, &mut StdRng::seed_from_u64(seed))
}

#[test]
fn test_inventory_lists_sorted_candidates() {
    let fx = fixture(
        &["b.hc22000", "a.hc22000", "old.tar.gz"],
        &["rockyou.txt"],
        &["best64.rule"],
    );

    let inventory = Inventory::scan(&fx.config).unwrap();
    assert_eq!(inventory.handshakes, vec!["a.hc22000", "b.hc22000"]);
    assert_eq!(inventory.wordlists, vec!["rockyou.txt"]);
    assert_eq!(inventory.rules, vec!["best64.rule"]);
}

#[test]
fn test_missing_wordlist_dir_is_directory_unavailable() {
    let fx = fixture(&["a.hc22000"], &[], &[]);
    fs::remove_dir_all(&fx.config.wordlist_dir).unwrap();

    let err = Inventory::scan(&fx.config).unwrap_err();
    assert!(matches!(err, Error::DirectoryUnavailable { .. }));
}

#[test]
fn test_synthesize_against_layout() {
    let fx = fixture(&["net.hc22000"], &["list.txt"], &["best.txt"]);
    let selection = Selection::new("net.hc22000", Some("list.txt"), Some("best.txt"));

    let cmd = command::synthesize(&fx.config, &selection, &mut StdRng::seed_from_u64(5)).unwrap();

    let rules = fx.config.rule_dir.join("best");
    let wordlist = fx.config.wordlist_dir.join("list.txt");
    assert!(cmd.session.starts_with("net-"));
    assert!(cmd.line.contains(&format!("--rules-file=\"{}\"", rules.display())));
    assert!(cmd.line.contains(&format!("-S \"{}\"", wordlist.display())));
    assert!(cmd.line.contains(&format!("--session {}", cmd.session)));
}

#[test]
fn test_empty_handshake_dir_stops_before_prompting() {
    let fx = fixture(&[], &["list.txt"], &[]);
    let mut prompt = ScriptedPrompt::new(&[Some("Custom Command")]);
    let (mut dispatcher, log) = dispatcher(false);

    let err = run_menu(&fx.config, &mut prompt, &mut dispatcher, 1).unwrap_err();

    assert!(matches!(err, Error::EmptySelectionSet { .. }));
    assert!(err.is_fatal());
    assert_eq!(prompt.asked, vec!["Select a command type:"]);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_custom_flow_executes_command() {
    let fx = fixture(&["net.hc22000"], &["list.txt"], &["best.txt"]);
    let mut prompt = ScriptedPrompt::new(&[
        Some("Custom Command"),
        Some("net.hc22000"),
        Some("list.txt"),
        Some("NONE"),
        Some("Execute"),
        Some("Exit"),
    ]);
    let (mut dispatcher, log) = dispatcher(false);

    run_menu(&fx.config, &mut prompt, &mut dispatcher, 2).unwrap();

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("hashcat --hash-type=22000 --attack-mode=0 --session net-"));
    assert!(log[0].contains("list.txt"));
    assert!(!log[0].contains("--rules-file"));
}

#[test]
fn test_cancel_mid_selection_has_no_side_effects() {
    let fx = fixture(&["net.hc22000"], &["list.txt"], &["best.txt"]);
    let mut prompt = ScriptedPrompt::new(&[
        Some("Custom Command"),
        Some("net.hc22000"),
        Some("Cancel"),
        None,
    ]);
    let (mut dispatcher, log) = dispatcher(false);

    run_menu(&fx.config, &mut prompt, &mut dispatcher, 3).unwrap();

    assert!(log.borrow().is_empty());
    assert_eq!(prompt.asked.len(), 4);
}

#[test]
fn test_incomplete_selection_returns_to_menu() {
    let fx = fixture(&["net.hc22000"], &["list.txt"], &["best.txt"]);
    let mut prompt = ScriptedPrompt::new(&[
        Some("Custom Command"),
        Some("net.hc22000"),
        Some("NONE"),
        Some("NONE"),
        Some("Exit"),
    ]);
    let (mut dispatcher, log) = dispatcher(false);

    run_menu(&fx.config, &mut prompt, &mut dispatcher, 4).unwrap();

    assert!(log.borrow().is_empty());
    assert_eq!(prompt.asked.last().unwrap(), "Select a command type:");
}

#[test]
fn test_subprocess_and_clipboard_failures_are_recoverable() {
    let fx = fixture(&["net.hc22000"], &["list.txt"], &["best.txt"]);
    let mut prompt = ScriptedPrompt::new(&[
        Some("Custom Command"),
        Some("net.hc22000"),
        Some("list.txt"),
        Some("best.txt"),
        Some("Execute"),
        Some("Custom Command"),
        Some("net.hc22000"),
        Some("NONE"),
        Some("best.txt"),
        Some("Copy to Clipboard"),
        Some("Exit"),
    ]);
    let (mut dispatcher, log) = dispatcher(true);

    run_menu(&fx.config, &mut prompt, &mut dispatcher, 5).unwrap();

    assert_eq!(log.borrow().len(), 1);
    assert!(prompt.answers.is_empty());
}

#[test]
fn test_standard_flow_runs_named_script() {
    let fx = fixture(&["net.hc22000"], &[], &[]);
    write_manifest(&fx.config.manifest);
    let mut prompt = ScriptedPrompt::new(&[
        Some("Standard Commands"),
        Some("convert"),
        Some("Standard Commands"),
        Some("Exit"),
        Some("Exit"),
    ]);
    let (mut dispatcher, log) = dispatcher(false);

    run_menu(&fx.config, &mut prompt, &mut dispatcher, 6).unwrap();

    let expected = format!("npm run convert @{}", fx.config.root.display());
    assert_eq!(*log.borrow(), vec![expected]);
}

#[test]
fn test_named_script_runs_beside_its_manifest() {
    let fx = fixture(&["net.hc22000"], &[], &[]);
    let mut config = fx.config.clone();
    let tools = config.root.join("tools");
    fs::create_dir_all(&tools).unwrap();
    config.manifest = tools.join("package.json");
    write_manifest(&config.manifest);

    let mut prompt = ScriptedPrompt::new(&[
        Some("Standard Commands"),
        Some("sync"),
        Some("Exit"),
    ]);
    let (mut dispatcher, log) = dispatcher(false);

    run_menu(&config, &mut prompt, &mut dispatcher, 9).unwrap();

    let expected = format!("npm run sync @{}", tools.display());
    assert_eq!(*log.borrow(), vec![expected]);
}

#[cfg(unix)]
#[test]
fn test_system_shell_runs_script_in_manifest_dir() {
    let fx = fixture(&["net.hc22000"], &[], &[]);
    write_manifest(&fx.config.manifest);
    // `sh run convert` only succeeds where this `run` file lives.
    fs::write(fx.config.root.join("run"), "test \"$1\" = convert\n").unwrap();

    Dispatcher::system()
        .run_script("sh", "convert", fx.config.script_dir())
        .unwrap();
}

#[test]
fn test_missing_manifest_is_fatal() {
    let fx = fixture(&["net.hc22000"], &[], &[]);
    let mut prompt = ScriptedPrompt::new(&[Some("Standard Commands")]);
    let (mut dispatcher, _) = dispatcher(false);

    let err = run_menu(&fx.config, &mut prompt, &mut dispatcher, 7).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_escape_at_first_prompt_exits() {
    let fx = fixture(&["net.hc22000"], &[], &[]);
    let mut prompt = ScriptedPrompt::new(&[None]);
    let (mut dispatcher, log) = dispatcher(false);

    run_menu(&fx.config, &mut prompt, &mut dispatcher, 8).unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_generate_validates_names() {
    let fx = fixture(&["net.hc22000"], &["list.txt"], &["best.txt"]);
    let args = |handshake: &str, wordlist: Option<&str>, rules: Option<&str>| GenerateArgs {
        handshake: handshake.to_string(),
        wordlist: wordlist.map(String::from),
        rules: rules.map(String::from),
        format: OutputFormat::Plain,
        exec: false,
        copy: false,
    };

    let validate = |args: GenerateArgs| generate::validate(&args, &fx.config);

    let selection = validate(args("net.hc22000", Some("list.txt"), Some("best.txt"))).unwrap();
    assert_eq!(selection.wordlist.as_deref(), Some("list.txt"));
    assert_eq!(selection.rules.as_deref(), Some("best.txt"));

    let err = validate(args("other.hc22000", Some("list.txt"), None)).unwrap_err();
    assert!(err.to_string().contains("Unknown handshake file"));

    let err = validate(args("net.hc22000", Some("missing.txt"), None)).unwrap_err();
    assert!(err.to_string().contains("Unknown wordlist"));

    let err = validate(args("net.hc22000", None, Some("dive.rule"))).unwrap_err();
    assert!(err.to_string().contains("Unknown rules file: 'dive.rule'"));
}

#[test]
fn test_list_handshakes_requires_files() {
    let fx = fixture(&[], &[], &[]);
    assert!(matches!(
        inventory::list_handshakes(&fx.config),
        Err(Error::EmptySelectionSet { .. })
    ));
}
