// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn azpool_no_args_shows_usage_and_exits_two() {
    cli().exits(2);
}

#[test]
fn azpool_help_lists_commands() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("init").stdout_has("start");
}

#[test]
fn azpool_start_help_shows_flags() {
    cli()
        .args(&["start", "--help"])
        .passes()
        .stdout_has("--url")
        .stdout_has("--token")
        .stdout_has("--pool")
        .stdout_has("--count")
        .stdout_has("--rm-on-failure");
}

#[test]
fn azpool_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
