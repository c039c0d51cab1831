//! Atomic file replacement inside a capability directory.
//!
//! Contents go to a hidden staging file in the same directory which is then
//! renamed over the target, so readers never observe a partial write.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};

static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

pub(super) fn write_atomic(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    let counter = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
    let staging_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

    write_staging_file(dir, &staging_name, contents)?;
    if let Err(error) = replace_target(dir, &staging_name, file_name) {
        drop(dir.remove_file(&staging_name));
        return Err(error);
    }
    sync_directory(dir);
    Ok(())
}

fn write_staging_file(dir: &Dir, staging_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(staging_name, &options)?;

    let written = file.write_all(contents).and_then(|()| file.sync_all());
    if let Err(error) = written {
        drop(file);
        drop(dir.remove_file(staging_name));
        return Err(error);
    }
    Ok(())
}

#[cfg(windows)]
fn replace_target(dir: &Dir, staging_name: &str, file_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(file_name) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    dir.rename(staging_name, dir, file_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, staging_name: &str, file_name: &str) -> io::Result<()> {
    dir.rename(staging_name, dir, file_name)
}

fn sync_directory(dir: &Dir) {
    // Best effort.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}
