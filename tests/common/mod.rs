#![allow(dead_code)]

pub mod command;
pub mod file;

pub const ONE_SHA1: &str = "43dd47ea691c90a5fa7827892c70241913351963";
pub const ONE_SHA256: &str = "437613f2000d14882113a8ceeb5e68572589edac29230c9fecd09d682612c4a3";
pub const TWO_SHA1: &str = "64c5e5885a4b06010b3a0c20edb7900dd0311025";
pub const THREE_SHA1: &str = "1d19714ffbc272ba0da6eb419d66123c20527174";
pub const GITIGNORE_SHA1: &str = "397b4a7624e35fa60563a9c03b1213d93f7b6546";
pub const CHANGED_SHA1: &str = "21fb1eca31e64cd3914025058b21992ab76edcf9";

/// Stdout of a finished command as a string
pub fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}
