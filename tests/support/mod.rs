use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use tt::task::Task;

pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        self.write_file(".tt.toml", contents)
    }

    pub fn read_tasks(&self) -> Vec<Task> {
        let contents = fs::read_to_string(self.tasks_file()).expect("read tasks file");
        serde_json::from_str(&contents).expect("parse tasks json")
    }
}

pub fn tt_cmd(dir: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin("tt").expect("binary");
    cmd.current_dir(dir.path());
    // Keep tests hermetic against the caller's environment
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("TT_FILE");
    cmd
}
