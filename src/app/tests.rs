use super::*;
use crate::core::actions::Action;
use crate::models::ExtractDecision;
use crate::system::executor::testing::RecordingExecutor;
use crate::ui::InputPurpose;
use std::fs;
use tempfile::tempdir;

const LISTING: &str = "\
2024-01-01 12:00:00 D.... 0  docs
2024-01-01 12:00:00 ....A 1024 512 docs/readme.txt
2024-01-01 12:00:00 ....A 10 6 readme.txt
------------------- ----- ------------ ------------  ------------------------
2024-01-01 12:00:00 1034 518 2 files, 1 folders
";
const AFTER_ADD: &str = "\
2024-01-01 12:00:00 D.... 0  docs
2024-01-01 12:00:00 ....A 1024 512 docs/readme.txt
2024-01-01 12:00:00 ....A 10 6 readme.txt
2024-05-05 10:00:00 ....A 77  new.txt
";

fn make_test_app() -> (RecordingExecutor, App) {
    let exec = RecordingExecutor::new();
    let tool = ArchiveTool::with_executor("7z", Box::new(exec.clone()));
    (exec, App::with_tool(Settings::default(), tool))
}

fn open_test_app() -> (RecordingExecutor, App) {
    let (exec, mut app) = make_test_app();
    exec.push_stdout(LISTING);
    app.open_archive("/data/test.7z");
    (exec, app)
}

fn names(app: &App) -> Vec<&str> {
    app.entries().iter().map(|e| e.filename.as_str()).collect()
}

fn error_message(app: &App) -> Option<&str> {
    match &app.dialog {
        Some(DialogKind::Error { message, .. }) => Some(message.as_str()),
        _ => None,
    }
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.dialog_input_char(c);
    }
}

fn clear_input(app: &mut App) {
    app.dialog_input_end();
    while matches!(&app.dialog, Some(DialogKind::Input { value, .. }) if !value.is_empty()) {
        app.dialog_input_backspace();
    }
}

#[test]
fn test_open_archive_lists_entries() {
    let (exec, app) = open_test_app();

    assert!(app.is_archive_open());
    assert_eq!(names(&app), vec!["docs", "docs/readme.txt", "readme.txt"]);
    assert_eq!(app.entry_counts(), (2, 1));
    assert_eq!(exec.calls_for("l").len(), 1);
    assert!(app.dialog.is_none());
}

#[test]
fn test_open_failure_shows_error_and_keeps_previous() {
    let (exec, mut app) = open_test_app();
    exec.push_failure("ERROR: /data/broken.7z : Can not open the file as archive", 2);

    app.open_archive("/data/broken.7z");

    assert_eq!(
        app.manifest.as_ref().map(|m| m.archive_path().to_path_buf()),
        Some(std::path::PathBuf::from("/data/test.7z"))
    );
    let message = error_message(&app).expect("error dialog");
    assert!(message.contains("Can not open the file as archive"));
}

#[test]
fn test_open_launch_failure_is_reported() {
    let (exec, mut app) = make_test_app();
    exec.push_launch_error("No such file or directory");

    app.open_archive("/data/test.7z");

    assert!(!app.is_archive_open());
    assert!(error_message(&app).is_some_and(|m| m.contains("No such file or directory")));
}

#[test]
fn test_empty_listing_shows_message() {
    let (exec, mut app) = make_test_app();
    exec.push_stdout("");

    app.open_archive("/data/empty.7z");

    assert!(app.is_archive_open());
    assert!(app.entries().is_empty());
    assert_eq!(app.empty_message(), EMPTY_LISTING_MESSAGE);
    assert_eq!(
        app.toast_display().map(|(m, _)| m),
        Some(EMPTY_LISTING_MESSAGE)
    );
}

#[test]
fn test_decode_fallback_raises_warning_toast() {
    let (exec, mut app) = make_test_app();
    exec.push_output(b"2024-01-01 12:00:00 ....A 3 3 caf\xe9.txt\n", b"", 0);

    app.open_archive("/data/latin1.7z");

    assert_eq!(app.entries().len(), 1);
    let (_, level) = app.toast_display().expect("toast");
    assert_eq!(level, MessageLevel::Warning);
}

#[test]
fn test_add_files_through_input_dialog() {
    let (exec, mut app) = open_test_app();
    exec.push_stdout("").push_stdout(AFTER_ADD);

    app.execute_action(Action::AddFiles);
    assert!(matches!(
        app.dialog,
        Some(DialogKind::Input {
            purpose: InputPurpose::AddFiles,
            ..
        })
    ));
    type_text(&mut app, "new.txt \"my notes.txt\"");
    app.dialog_submit();

    let add = exec.calls_for("a");
    assert_eq!(add.len(), 1);
    assert_eq!(add[0].args, vec!["a", "/data/test.7z", "new.txt", "my notes.txt"]);
    assert!(names(&app).contains(&"new.txt"));
    assert!(app.dialog.is_none());
}

#[test]
fn test_add_with_unbalanced_quotes_does_not_invoke_tool() {
    let (exec, mut app) = open_test_app();
    let before = exec.call_count();

    app.confirm_add("\"unterminated");

    assert_eq!(exec.call_count(), before);
    assert!(error_message(&app).is_some());
}

#[test]
fn test_add_failure_keeps_entries() {
    let (exec, mut app) = open_test_app();
    exec.push_failure("WARNING: No more files\nmissing.txt", 1);

    app.confirm_add("missing.txt");

    assert_eq!(names(&app), vec!["docs", "docs/readme.txt", "readme.txt"]);
    assert!(error_message(&app).is_some_and(|m| m.contains("No more files")));
}

#[test]
fn test_remove_selected_entry_after_confirm() {
    let (exec, mut app) = open_test_app();
    exec.push_stdout("")
        .push_stdout("2024-01-01 12:00:00 D.... 0  docs\n2024-01-01 12:00:00 ....A 10 6 readme.txt\n");

    app.move_selection_down();
    app.execute_action(Action::RemoveEntry);
    assert!(matches!(app.dialog, Some(DialogKind::Confirm { .. })));
    app.dialog_submit();

    let delete = exec.calls_for("d");
    assert_eq!(delete.len(), 1);
    assert_eq!(delete[0].args, vec!["d", "/data/test.7z", "docs/readme.txt"]);
    assert_eq!(names(&app), vec!["docs", "readme.txt"]);
    assert_eq!(app.selected_index, 1);
}

#[test]
fn test_remove_cancel_does_not_invoke_tool() {
    let (exec, mut app) = open_test_app();
    let before = exec.call_count();

    app.start_remove();
    app.dialog_toggle_button();
    app.dialog_submit();

    assert_eq!(exec.call_count(), before);
    assert!(app.dialog.is_none());
    assert_eq!(app.entries().len(), 3);
}

#[test]
fn test_refresh_failure_keeps_snapshot() {
    let (exec, mut app) = open_test_app();
    exec.push_failure("ERROR: file is locked", 2);

    app.execute_action(Action::Refresh);

    assert_eq!(app.entries().len(), 3);
    assert!(error_message(&app).is_some());
}

#[test]
fn test_archive_actions_need_open_archive() {
    let (exec, mut app) = make_test_app();

    app.execute_action(Action::Extract);
    app.execute_action(Action::RemoveEntry);

    assert_eq!(exec.call_count(), 0);
    assert!(app.dialog.is_none());
    assert_eq!(
        app.toast_display(),
        Some(("No archive open", MessageLevel::Warning))
    );
}

#[test]
fn test_extract_without_conflicts_runs_immediately() {
    let temp = tempdir().expect("create tempdir");
    let (exec, mut app) = open_test_app();

    app.start_extract();
    clear_input(&mut app);
    type_text(&mut app, &temp.path().display().to_string());
    app.dialog_submit();

    let extract = exec.calls_for("x");
    assert_eq!(extract.len(), 1);
    assert!(!extract[0].args.iter().any(|a| a == "-y"));
    assert!(app.dialog.is_none());
}

#[test]
fn test_extract_conflict_prompts_and_abort_skips_tool() {
    let temp = tempdir().expect("create tempdir");
    fs::write(temp.path().join("readme.txt"), b"local").expect("write file");
    let (exec, mut app) = open_test_app();

    app.confirm_extract_destination(&temp.path().display().to_string());

    match &app.dialog {
        Some(DialogKind::Overwrite { files, .. }) => assert_eq!(files, &vec!["readme.txt"]),
        other => panic!("expected overwrite dialog, got {:?}", other),
    }

    app.dialog_cancel();

    assert!(exec.calls_for("x").is_empty());
    assert!(app.dialog.is_none());
    assert_eq!(
        app.toast_display(),
        Some(("Extraction aborted", MessageLevel::Warning))
    );
}

#[test]
fn test_extract_conflict_overwrite_passes_yes_flag() {
    let temp = tempdir().expect("create tempdir");
    fs::create_dir(temp.path().join("docs")).expect("create dir");
    let (exec, mut app) = open_test_app();

    app.confirm_extract_destination(&temp.path().display().to_string());
    app.dialog_toggle_button();
    app.dialog_submit();

    let extract = exec.calls_for("x");
    assert_eq!(extract.len(), 1);
    assert_eq!(extract[0].args.last().map(String::as_str), Some("-y"));
}

#[test]
fn test_resolve_overwrite_abort_directly() {
    let temp = tempdir().expect("create tempdir");
    fs::write(temp.path().join("readme.txt"), b"local").expect("write file");
    let (exec, mut app) = open_test_app();

    app.confirm_extract_destination(&temp.path().display().to_string());
    app.resolve_overwrite(ExtractDecision::Abort);

    assert!(exec.calls_for("x").is_empty());
    assert_eq!(
        fs::read(temp.path().join("readme.txt")).expect("read file"),
        b"local"
    );
}

#[test]
fn test_extract_into_missing_directory_is_error() {
    let temp = tempdir().expect("create tempdir");
    let (exec, mut app) = open_test_app();

    app.confirm_extract_destination(&temp.path().join("nope").display().to_string());

    assert!(exec.calls_for("x").is_empty());
    assert!(error_message(&app).is_some());
}

/// 열지 않은 압축 파일 풀기: 경로 입력 후 대상 입력까지 진행
fn submit_extract_archive(app: &mut App, archive: &str, destination: &std::path::Path) {
    app.execute_action(Action::ExtractArchive);
    assert!(matches!(
        app.dialog,
        Some(DialogKind::Input {
            purpose: InputPurpose::ExtractArchivePath,
            ..
        })
    ));
    clear_input(app);
    type_text(app, archive);
    app.dialog_submit();

    assert!(matches!(
        app.dialog,
        Some(DialogKind::Input {
            purpose: InputPurpose::ExtractArchiveDestination,
            ..
        })
    ));
    clear_input(app);
    type_text(app, &destination.display().to_string());
    app.dialog_submit();
}

#[test]
fn test_extract_archive_file_without_open_manifest() {
    let temp = tempdir().expect("create tempdir");
    let (exec, mut app) = make_test_app();
    exec.push_stdout(LISTING);

    submit_extract_archive(&mut app, "/data/other.7z", temp.path());

    assert_eq!(exec.calls_for("l")[0].args, vec!["l", "/data/other.7z"]);
    let extract = exec.calls_for("x");
    assert_eq!(extract.len(), 1);
    assert_eq!(
        extract[0].args,
        vec![
            "x".to_string(),
            "/data/other.7z".to_string(),
            format!("-o{}", temp.path().display()),
        ]
    );
    assert!(!app.is_archive_open());
    assert!(app.dialog.is_none());
}

#[test]
fn test_extract_archive_file_conflict_abort_skips_tool() {
    let temp = tempdir().expect("create tempdir");
    fs::write(temp.path().join("readme.txt"), b"local").expect("write file");
    let (exec, mut app) = make_test_app();
    exec.push_stdout(LISTING);

    submit_extract_archive(&mut app, "/data/other.7z", temp.path());

    assert_eq!(exec.calls_for("l").len(), 1);
    match &app.dialog {
        Some(DialogKind::Overwrite { files, .. }) => assert_eq!(files, &vec!["readme.txt"]),
        other => panic!("expected overwrite dialog, got {:?}", other),
    }

    app.dialog_submit();

    assert!(exec.calls_for("x").is_empty());
    assert_eq!(
        fs::read(temp.path().join("readme.txt")).expect("read file"),
        b"local"
    );
    assert_eq!(
        app.toast_display(),
        Some(("Extraction aborted", MessageLevel::Warning))
    );
}

#[test]
fn test_extract_archive_file_conflict_overwrite_passes_yes_flag() {
    let temp = tempdir().expect("create tempdir");
    fs::write(temp.path().join("readme.txt"), b"local").expect("write file");
    let (exec, mut app) = make_test_app();
    exec.push_stdout(LISTING);

    submit_extract_archive(&mut app, "/data/other.7z", temp.path());
    app.dialog_toggle_button();
    app.dialog_submit();

    let extract = exec.calls_for("x");
    assert_eq!(extract.len(), 1);
    assert_eq!(extract[0].args[1], "/data/other.7z");
    assert_eq!(extract[0].args.last().map(String::as_str), Some("-y"));
}

#[test]
fn test_extract_archive_file_uses_fresh_listing() {
    let temp = tempdir().expect("create tempdir");
    fs::write(temp.path().join("fresh.txt"), b"local").expect("write file");
    let (exec, mut app) = open_test_app();
    exec.push_stdout("2024-01-01 12:00:00 ....A 5 5 fresh.txt\n");

    submit_extract_archive(&mut app, "/data/test.7z", temp.path());

    assert_eq!(exec.calls_for("l").len(), 2);
    assert!(matches!(
        &app.dialog,
        Some(DialogKind::Overwrite { files, .. }) if files == &vec!["fresh.txt"]
    ));
}

#[test]
fn test_extract_archive_file_listing_failure_is_error() {
    let temp = tempdir().expect("create tempdir");
    let (exec, mut app) = make_test_app();
    exec.push_failure("ERROR: /data/broken.7z : Can not open the file as archive", 2);

    submit_extract_archive(&mut app, "/data/broken.7z", temp.path());

    assert!(exec.calls_for("x").is_empty());
    assert!(error_message(&app).is_some_and(|m| m.contains("Can not open")));
}

#[test]
fn test_extract_archive_file_cancel_clears_pending_archive() {
    let temp = tempdir().expect("create tempdir");
    let (exec, mut app) = make_test_app();

    app.start_extract_archive();
    type_text(&mut app, "/data/other.7z");
    app.dialog_submit();
    app.dialog_cancel();
    app.confirm_extract_archive_destination(&temp.path().display().to_string());

    assert_eq!(exec.call_count(), 0);
}

#[test]
fn test_compress_creates_and_opens_archive() {
    let temp = tempdir().expect("create tempdir");
    let archive = temp.path().join("out.7z");
    let (exec, mut app) = make_test_app();
    exec.push_stdout("")
        .push_stdout("2024-01-01 12:00:00 ....A 10 6 a.txt\n");

    app.confirm_compress(&format!("{} a.txt", archive.display()));

    let add = exec.calls_for("a");
    assert_eq!(add.len(), 1);
    assert_eq!(add[0].args[1], archive.display().to_string());
    assert_eq!(names(&app), vec!["a.txt"]);
}

#[test]
fn test_compress_without_sources_is_rejected() {
    let temp = tempdir().expect("create tempdir");
    let (exec, mut app) = make_test_app();

    app.confirm_compress(&temp.path().join("out.7z").display().to_string());

    assert_eq!(exec.call_count(), 0);
    assert!(error_message(&app).is_some());
}

#[test]
fn test_close_archive_resets_state() {
    let (_exec, mut app) = open_test_app();
    app.go_to_bottom();

    app.execute_action(Action::CloseArchive);

    assert!(!app.is_archive_open());
    assert_eq!(app.selected_index, 0);
    assert!(app.entries().is_empty());
}

#[test]
fn test_navigation_bounds() {
    let (_exec, mut app) = open_test_app();

    app.move_selection_up();
    assert_eq!(app.selected_index, 0);

    app.go_to_bottom();
    assert_eq!(app.selected_index, 2);

    app.move_selection_down();
    assert_eq!(app.selected_index, 2);

    app.move_selection_page_up();
    assert_eq!(app.selected_index, 1);
}

#[test]
fn test_gg_sequence_goes_to_top() {
    let (_exec, mut app) = open_test_app();
    app.go_to_bottom();

    assert!(app.handle_sequence_key('g'));
    assert_eq!(app.pending_key, Some('g'));
    assert!(app.handle_sequence_key('g'));

    assert_eq!(app.selected_index, 0);
    assert!(app.pending_key.is_none());
}

#[test]
fn test_input_dialog_cancel_button() {
    let (exec, mut app) = open_test_app();
    let before = exec.call_count();

    app.start_add();
    type_text(&mut app, "x.txt");
    app.dialog_toggle_button();
    app.dialog_submit();

    assert_eq!(exec.call_count(), before);
    assert!(app.dialog.is_none());
}

#[test]
fn test_help_dialog_scroll() {
    let (_exec, mut app) = make_test_app();
    app.execute_action(Action::ShowHelp);

    app.dialog_help_scroll_up();
    app.dialog_help_scroll_down();
    app.dialog_help_scroll_down();

    assert!(matches!(app.dialog, Some(DialogKind::Help { scroll_offset: 2 })));
    app.dialog_cancel();
    assert!(app.dialog.is_none());
}
