//! # CMDS Working Directory Integration Tests
//!
//! File: lib/tests/directory.rs
//! Author: Christi Mahu
//!
//! `cd` changes the working directory of the whole test process, so every
//! test in this file runs serially and restores the previous directory.
//!

mod common;
use common::*;

use cmds::{cd, execute_all, pwd, Execute, ExecuteOptions, ShellResult, SENTINEL_STATUS};
use serial_test::serial;
use std::env;
use tempfile::tempdir;

struct RestoreDir(std::path::PathBuf);

impl Drop for RestoreDir {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}

fn remember_dir() -> RestoreDir {
    RestoreDir(env::current_dir().unwrap())
}

#[test]
#[serial]
fn test_cd_changes_directory_for_later_commands() {
    let _restore = remember_dir();
    let temp_dir = tempdir().unwrap();
    let target = temp_dir.path().canonicalize().unwrap();

    let script: Vec<Box<dyn Execute>> = vec![
        Box::new(cd(target.to_string_lossy())),
        Box::new(bash("pwd -P")),
    ];
    let result = execute_all(script, ExecuteOptions::default());

    assert_eq!(
        result,
        ShellResult::Success(format!("{}\n", target.display()))
    );
    assert_eq!(pwd().unwrap().canonicalize().unwrap(), target);
}

#[test]
#[serial]
fn test_cd_names_missing_second_segment() {
    let _restore = remember_dir();
    let temp_dir = tempdir().unwrap();
    let existing = temp_dir.path().join("first");
    std::fs::create_dir(&existing).unwrap();

    env::set_current_dir(temp_dir.path()).unwrap();
    let result = cd("first/second/third").execute(ExecuteOptions::default());

    assert_eq!(
        result,
        ShellResult::failure(
            SENTINEL_STATUS,
            "Failed to set current directory to 'first/second/third'\n'second' does not exist"
        )
    );
}

#[test]
#[serial]
fn test_failed_cd_stops_batch() {
    let _restore = remember_dir();
    let mut commands: Vec<Box<dyn Execute>> = vec![
        Box::new(bash("printf 'Hello world'")),
        Box::new(cd("/Path/To/Directory/That/Does/Not/Exist")),
        Box::new(bash("printf never")),
    ];
    let result = execute_all(commands.iter_mut(), ExecuteOptions::default());

    let err = result.success().unwrap_err();
    assert_eq!(err.status, SENTINEL_STATUS);
    assert_eq!(
        err.to_string(),
        "Failed to set current directory to '/Path/To/Directory/That/Does/Not/Exist'\n'Path' does not exist"
    );
}
