//! コンソールログのパスとコピーのテスト

use std::path::{Path, PathBuf};

use common::domain::{InstanceName, RemoteHost};

use super::mocks::{harness, local_config, FsCall, MockFileSystem, MockHostFactory};
use crate::domain::PathUtilsConfig;

fn local_dir() -> PathBuf {
    Path::new(r"c:\inst_dir").join("fake_instance_name")
}

fn remote_dir() -> PathBuf {
    Path::new(r"\\dest_host\c$\inst_dir").join("fake_instance_name")
}

fn copies(calls: Vec<FsCall>) -> Vec<(PathBuf, PathBuf)> {
    calls
        .into_iter()
        .filter_map(|c| match c {
            FsCall::Copy(from, to) => Some((from, to)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_get_vm_console_log_paths() {
    let fs = MockFileSystem::with_paths(&[local_dir()]);
    let h = harness(local_config(), fs, MockHostFactory::empty());

    let paths = h
        .path_utils
        .get_vm_console_log_paths(&InstanceName::new("fake_instance_name"), None)
        .unwrap();

    assert_eq!(paths.log, local_dir().join("console.log"));
    assert_eq!(paths.archived_log, local_dir().join("console.log.1"));
}

#[test]
fn test_copy_vm_console_logs_in_order() {
    let fs = MockFileSystem::with_paths(&[
        local_dir(),
        local_dir().join("console.log"),
        local_dir().join("console.log.1"),
    ]);
    let h = harness(local_config(), fs, MockHostFactory::empty());

    h.path_utils
        .copy_vm_console_logs(
            &InstanceName::new("fake_instance_name"),
            &RemoteHost::new("dest_host"),
        )
        .unwrap();

    assert_eq!(
        copies(h.fs.calls()),
        vec![
            (local_dir().join("console.log"), remote_dir().join("console.log")),
            (local_dir().join("console.log.1"), remote_dir().join("console.log.1")),
        ]
    );
    assert_eq!(
        h.log.messages(),
        vec!["console log copied".to_string(), "console log copied".to_string()]
    );
}

#[test]
fn test_copy_vm_console_logs_skips_missing() {
    let fs = MockFileSystem::with_paths(&[local_dir(), local_dir().join("console.log")]);
    let h = harness(local_config(), fs, MockHostFactory::empty());

    h.path_utils
        .copy_vm_console_logs(
            &InstanceName::new("fake_instance_name"),
            &RemoteHost::new("dest_host"),
        )
        .unwrap();

    assert_eq!(
        copies(h.fs.calls()),
        vec![(local_dir().join("console.log"), remote_dir().join("console.log"))]
    );
}

#[test]
fn test_copy_vm_console_logs_partial_failure_keeps_first_copy() {
    let fs = MockFileSystem::with_paths(&[
        local_dir(),
        local_dir().join("console.log"),
        local_dir().join("console.log.1"),
    ]);
    fs.fail_copy_from(local_dir().join("console.log.1"));
    let h = harness(local_config(), fs, MockHostFactory::empty());

    let result = h.path_utils.copy_vm_console_logs(
        &InstanceName::new("fake_instance_name"),
        &RemoteHost::new("dest_host"),
    );

    assert!(result.is_err());
    assert!(h.fs.contains(remote_dir().join("console.log")));
    assert!(!h.fs.contains(remote_dir().join("console.log.1")));
}

#[test]
fn test_copy_vm_console_logs_unc_instances_path_leaves_logs_alone() {
    let unc_dir = Path::new(r"\\nas\instances").join("fake_instance_name");
    let fs = MockFileSystem::with_paths(&[
        unc_dir.clone(),
        unc_dir.join("console.log"),
        unc_dir.join("console.log.1"),
    ]);
    let config = PathUtilsConfig::new(r"\\nas\instances", "");
    let h = harness(config, fs, MockHostFactory::empty());

    h.path_utils
        .copy_vm_console_logs(
            &InstanceName::new("fake_instance_name"),
            &RemoteHost::new("dest_host"),
        )
        .unwrap();

    // 移行先も同じ共有上のパスなので自分自身へのコピーは起きない
    assert!(copies(h.fs.calls()).is_empty());
    assert!(h.fs.contains(unc_dir.join("console.log")));
    assert!(h.fs.contains(unc_dir.join("console.log.1")));
    assert_eq!(
        h.log.messages(),
        vec![
            "console log already in place".to_string(),
            "console log already in place".to_string()
        ]
    );
}
