//! 共有ストレージ判定のテスト

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::adapter::NoopLog;
use common::domain::RemoteHost;

use super::mocks::{harness, local_config, FsCall, MockFileSystem, MockHostFactory};
use crate::domain::PathUtilsConfig;
use crate::wiring::wire_path_utils;

fn temp_files_dropped(calls: &[FsCall]) -> Vec<PathBuf> {
    calls
        .iter()
        .filter_map(|c| match c {
            FsCall::DropTempFile(p) => Some(p.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_check_dirs_shared_storage_visible() {
    let fs = MockFileSystem::new();
    fs.mirror("fake_src_dir", "fake_dest_dir");
    let h = harness(local_config(), fs, MockHostFactory::empty());

    let shared = h
        .path_utils
        .check_dirs_shared_storage(Path::new("fake_src_dir"), Path::new("fake_dest_dir"))
        .unwrap();

    assert!(shared);
    let calls = h.fs.calls();
    assert_eq!(calls[0], FsCall::CreateTempFile(PathBuf::from("fake_dest_dir")));
    let dropped = temp_files_dropped(&calls);
    assert_eq!(dropped.len(), 1);
    let probe_name = dropped[0].file_name().unwrap();
    // 見る側のパスで存在確認している
    assert_eq!(calls[1], FsCall::Metadata(Path::new("fake_src_dir").join(probe_name)));
    // プローブファイルは残らない
    assert!(!h.fs.contains(&dropped[0]));
}

#[test]
fn test_check_dirs_shared_storage_not_visible() {
    let h = harness(local_config(), MockFileSystem::new(), MockHostFactory::empty());

    let shared = h
        .path_utils
        .check_dirs_shared_storage(Path::new("fake_src_dir"), Path::new("fake_dest_dir"))
        .unwrap();

    assert!(!shared);
    let dropped = temp_files_dropped(&h.fs.calls());
    assert_eq!(dropped.len(), 1);
    assert!(!h.fs.contains(&dropped[0]));
}

#[test]
fn test_check_dirs_shared_storage_unwritable_dest() {
    let fs = MockFileSystem::new();
    fs.fail_create_with(io::ErrorKind::PermissionDenied);
    let h = harness(local_config(), fs, MockHostFactory::empty());

    let err = h
        .path_utils
        .check_dirs_shared_storage(Path::new("fake_src_dir"), Path::new("fake_dest_dir"))
        .unwrap_err();

    assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
    assert!(temp_files_dropped(&h.fs.calls()).is_empty());
}

#[test]
fn test_check_remote_instances_dir_shared() {
    let fs = MockFileSystem::new();
    fs.mirror(r"c:\inst_dir", r"\\dest_host\c$\inst_dir");
    let h = harness(local_config(), fs, MockHostFactory::empty());

    let shared = h
        .path_utils
        .check_remote_instances_dir_shared(&RemoteHost::new("dest_host"))
        .unwrap();

    assert!(shared);
    assert_eq!(
        h.fs.calls()[0],
        FsCall::CreateTempFile(PathBuf::from(r"\\dest_host\c$\inst_dir"))
    );
    assert_eq!(h.log.messages(), vec!["shared storage checked".to_string()]);
}

#[test]
fn test_check_dirs_shared_storage_real_fs() {
    let src = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let config = PathUtilsConfig::new(src.path().to_string_lossy(), "");
    let path_utils = wire_path_utils(config, Arc::new(MockHostFactory::empty()), Arc::new(NoopLog));

    assert!(path_utils
        .check_dirs_shared_storage(src.path(), src.path())
        .unwrap());
    assert!(!path_utils
        .check_dirs_shared_storage(src.path(), other.path())
        .unwrap());

    assert_eq!(std::fs::read_dir(src.path()).unwrap().count(), 0);
    assert_eq!(std::fs::read_dir(other.path()).unwrap().count(), 0);
}
