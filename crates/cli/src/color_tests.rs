// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

/// Run `f` with the color env vars set as given, restoring them after.
fn with_color_env<T>(no_color: Option<&str>, color: Option<&str>, f: impl FnOnce() -> T) -> T {
    let saved = (std::env::var("NO_COLOR").ok(), std::env::var("COLOR").ok());
    let apply = |key: &str, value: Option<&str>| match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    };
    apply("NO_COLOR", no_color);
    apply("COLOR", color);
    let result = f();
    apply("NO_COLOR", saved.0.as_deref());
    apply("COLOR", saved.1.as_deref());
    result
}

#[test]
#[serial]
fn no_color_wins_over_color() {
    assert!(!with_color_env(Some("1"), Some("1"), should_colorize));
}

#[test]
#[serial]
fn color_forces_ansi_output() {
    let painted = with_color_env(None, Some("1"), || header("Build context"));
    assert_eq!(painted, "\x1b[38;5;74mBuild context\x1b[0m");
}

#[test]
#[serial]
fn plain_text_without_color() {
    let text = with_color_env(Some("1"), None, || {
        (header("a"), literal("b"), context("c"))
    });
    assert_eq!(text, ("a".to_string(), "b".to_string(), "c".to_string()));
}
