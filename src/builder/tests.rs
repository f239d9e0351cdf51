//! Tests for the builder.

use super::*;
use crate::test_support::{DirGuard, RecordingUi};
use serial_test::serial;
use tempfile::TempDir;

fn builder_with(config: BuildConfig, toolchain: &str) -> Builder {
    Builder::new(config).with_toolchain(Toolchain::parse(toolchain).unwrap())
}

fn source_dir(temp: &TempDir) -> String {
    temp.path().to_string_lossy().into_owned()
}

#[test]
fn test_new_builder_uses_go() {
    let builder = Builder::default();
    assert_eq!(builder.toolchain().program(), "go");
    assert_eq!(builder.config(), &BuildConfig::default());
}

#[test]
fn test_config_set_accepts_existing_source() {
    let temp = TempDir::new().unwrap();
    let config = BuildConfig::new("myapp", source_dir(&temp));

    let mut builder = Builder::default();
    builder.config_set(config.clone()).unwrap();
    assert_eq!(builder.config(), &config);
}

#[test]
fn test_config_set_rejects_missing_source_and_keeps_previous() {
    let temp = TempDir::new().unwrap();
    let good = BuildConfig::new("myapp", source_dir(&temp));
    let bad = BuildConfig::new("myapp", temp.path().join("missing").to_string_lossy());

    let mut builder = Builder::default();
    builder.config_set(good.clone()).unwrap();

    let err = builder.config_set(bad).unwrap_err();
    assert!(err.is_config_error());
    assert_eq!(err.to_string(), "source folder does not exist");
    assert_eq!(builder.config(), &good);
}

#[test]
#[serial]
fn test_validate_defaults_empty_source_to_current_dir() {
    let temp = TempDir::new().unwrap();
    let _guard = DirGuard::new(temp.path());

    assert!(validate(&BuildConfig::default()).is_ok());
}

#[cfg(unix)]
#[test]
fn test_validate_conflates_dangling_symlink_with_missing() {
    let temp = TempDir::new().unwrap();
    let link = temp.path().join("dangling");
    std::os::unix::fs::symlink(temp.path().join("gone"), &link).unwrap();

    let err = validate(&BuildConfig::new("", link.to_string_lossy())).unwrap_err();
    assert!(matches!(err, GobuildError::SourceMissing { .. }));
    assert_eq!(err.to_string(), "source folder does not exist");
}

#[cfg(unix)]
#[test]
fn test_build_success_returns_joined_location() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("cmd/server")).unwrap();
    let ctx = BuildContext::in_dir(temp.path());
    let ui = RecordingUi::default();

    let mut builder = builder_with(BuildConfig::new("server", "./cmd/server"), "true");
    let binary = builder.build(&ctx, &ui).unwrap();

    assert_eq!(binary.location, "cmd/server/server");
    assert_eq!(ui.updates(), vec!["Building application".to_string()]);
    assert_eq!(
        ui.steps(),
        vec![(StepStatus::Ok, "Application build successfully".to_string())]
    );
    assert_eq!(ui.open_count(), 1);
    assert_eq!(ui.close_count(), 1);
}

#[cfg(unix)]
#[test]
fn test_build_applies_defaults() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::in_dir(temp.path());
    let ui = RecordingUi::default();

    let mut builder = builder_with(BuildConfig::default(), "true");
    let binary = builder.build(&ctx, &ui).unwrap();

    assert_eq!(binary.location, "app");
    assert_eq!(builder.config(), &BuildConfig::new("app", "./"));
}

#[cfg(unix)]
#[test]
fn test_build_passes_arguments_to_toolchain() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("pkg")).unwrap();
    let ctx = BuildContext::in_dir(temp.path());
    let ui = RecordingUi::default();

    // Checks the argument layout and creates a file at the path reported as
    // `location` (`<src>/<out>`). Real `go build -o` writes relative to the
    // working directory instead.
    let toolchain = r#"sh -c 'test "$1" = build && test "$2" = -o && touch "$4/$3"' sh"#;
    let mut builder = builder_with(BuildConfig::new("myapp", "./pkg"), toolchain);
    let binary = builder.build(&ctx, &ui).unwrap();

    assert_eq!(binary.location, "pkg/myapp");
    assert!(temp.path().join(&binary.location).exists());
    assert_eq!(ui.close_count(), 1);
}

#[cfg(unix)]
#[test]
fn test_build_nonzero_exit_reports_failure() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::in_dir(temp.path());
    let ui = RecordingUi::default();

    let mut builder = builder_with(BuildConfig::default(), "false");
    let err = builder.build(&ctx, &ui).unwrap_err();

    match &err {
        GobuildError::Failed(status) => assert_eq!(status.code(), Some(1)),
        other => panic!("expected Failed, got {other:?}"),
    }
    let steps = ui.steps();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0], (StepStatus::Error, "build failed".to_string()));
    assert_eq!(ui.close_count(), 1);
}

#[cfg(unix)]
#[test]
fn test_build_failure_step_includes_toolchain_output() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::in_dir(temp.path());
    let ui = RecordingUi::default();

    let toolchain = r#"sh -c 'echo "main.go:3:1: syntax error" >&2; exit 2' sh"#;
    let mut builder = builder_with(BuildConfig::default(), toolchain);
    let err = builder.build(&ctx, &ui).unwrap_err();

    assert!(matches!(err, GobuildError::Failed(_)));
    let (status, msg) = ui.steps().remove(0);
    assert_eq!(status, StepStatus::Error);
    assert!(msg.starts_with("build failed\n"));
    assert!(msg.contains("main.go:3:1: syntax error"));
    assert_eq!(ui.close_count(), 1);
}

#[test]
fn test_build_spawn_failure_propagates_io_error() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::in_dir(temp.path());
    let ui = RecordingUi::default();

    let mut builder = builder_with(BuildConfig::default(), "gobuild-no-such-toolchain-xyz");
    let err = builder.build(&ctx, &ui).unwrap_err();

    match &err {
        GobuildError::Spawn(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected Spawn, got {other:?}"),
    }
    assert_eq!(
        ui.steps(),
        vec![(StepStatus::Error, "build failed".to_string())]
    );
    assert_eq!(ui.close_count(), 1);
}

#[cfg(unix)]
#[test]
fn test_build_func_is_build() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::in_dir(temp.path());
    let ui = RecordingUi::default();

    let mut builder = builder_with(BuildConfig::new("tool", "./"), "true");
    let build = builder.build_func();
    let binary = build(&mut builder, &ctx, &ui).unwrap();

    assert_eq!(binary.location, "tool");
    assert_eq!(ui.close_count(), 1);
}

#[cfg(unix)]
#[test]
fn test_each_build_closes_its_own_status() {
    let temp = TempDir::new().unwrap();
    let ctx = BuildContext::in_dir(temp.path());
    let ui = RecordingUi::default();

    let mut builder = builder_with(BuildConfig::default(), "true");
    builder.build(&ctx, &ui).unwrap();
    builder.build(&ctx, &ui).unwrap();

    assert_eq!(ui.open_count(), 2);
    assert_eq!(ui.close_count(), 2);
}

#[cfg(unix)]
#[test]
#[serial]
fn test_testapp_example() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("testapp")).unwrap();
    std::fs::write(
        temp.path().join("testapp/main.go"),
        "package main\n\nfunc main() {}\n",
    )
    .unwrap();
    let _guard = DirGuard::new(temp.path());

    let mut builder = Builder::default().with_toolchain(Toolchain::parse("true").unwrap());
    builder
        .config_set(BuildConfig::new("myapp", "./testapp"))
        .unwrap();

    let ctx = BuildContext::resolve().unwrap();
    let ui = RecordingUi::default();
    let binary = builder.build(&ctx, &ui).unwrap();

    assert_eq!(
        binary,
        Binary {
            location: "testapp/myapp".to_string()
        }
    );
    assert_eq!(ui.close_count(), 1);
}

#[cfg(unix)]
#[test]
#[serial]
fn test_build_rechecks_source_in_build_directory() {
    let validated_in = TempDir::new().unwrap();
    std::fs::create_dir(validated_in.path().join("testapp")).unwrap();
    let build_in = TempDir::new().unwrap();
    let marker = build_in.path().join("invoked");
    let toolchain = format!("sh -c 'touch \"$0\"' '{}'", marker.display());

    let mut builder = builder_with(BuildConfig::default(), &toolchain);
    {
        let _guard = DirGuard::new(validated_in.path());
        builder
            .config_set(BuildConfig::new("myapp", "./testapp"))
            .unwrap();
    }

    let ctx = BuildContext::in_dir(build_in.path());
    let ui = RecordingUi::default();
    let err = builder.build(&ctx, &ui).unwrap_err();

    match &err {
        GobuildError::SourceMissing { path, .. } => {
            assert_eq!(path, &build_in.path().join("./testapp").to_string_lossy())
        }
        other => panic!("expected SourceMissing, got {other:?}"),
    }
    assert!(!marker.exists());
    assert_eq!(
        ui.steps(),
        vec![(StepStatus::Error, "source folder does not exist".to_string())]
    );
    assert_eq!(ui.close_count(), 1);
}

#[test]
fn test_build_resolves_source_against_build_directory() {
    let build_in = TempDir::new().unwrap();
    std::fs::create_dir(build_in.path().join("testapp")).unwrap();

    assert!(
        BuildConfig::new("myapp", "./testapp")
            .validate_in(build_in.path())
            .is_ok()
    );
}
