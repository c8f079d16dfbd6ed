//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::path::PathBuf;
use std::process::Output;

impl Test {
    /// Create a confcrypt command running inside the test directory.
    ///
    /// GPG environment overrides from the parent process are cleared so the
    /// host's setup cannot leak into assertions.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("confcrypt").expect("failed to find confcrypt binary");
        cmd.env_remove("CONFCRYPT_GPG_HOMEDIR")
            .env_remove("CONFCRYPT_GPG_BINARY")
            .env_remove("CONFCRYPT_GPG_KEYRING")
            .env_remove("CONFCRYPT_LOG")
            .env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Write a file into the test directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    /// Shortcut for `confcrypt decrypt <file> [args]`.
    pub fn decrypt(&self, file: &str, args: &[&str]) -> Output {
        self.cmd()
            .arg("decrypt")
            .arg(file)
            .args(args)
            .output()
            .expect("failed to run confcrypt decrypt")
    }

    /// Write an executable shell script standing in for gpg.
    #[cfg(unix)]
    pub fn fake_gpg(&self, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.write("fake-gpg", &format!("#!/bin/sh\n{}\n", script));
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }
}
