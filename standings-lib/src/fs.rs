use std::{fs::create_dir_all, io, path::PathBuf};

use xdg::BaseDirectories;

/// Returns the path to the standings configuration directory. If it doesn't exist when this
/// function is called, it will be created.
pub fn config_dir() -> io::Result<PathBuf> {
    let path = xdg_prefix().get_config_home().ok_or_else(no_home)?;

    create_dir_all(&path)?;

    Ok(path)
}

/// Returns the path to the standings data directory, where roster snapshots live. If it doesn't
/// exist when this function is called, it will be created.
pub fn data_dir() -> io::Result<PathBuf> {
    let path = xdg_prefix().get_data_home().ok_or_else(no_home)?;

    create_dir_all(&path)?;

    Ok(path)
}

/// Returns the path to the standings state directory, which backs the durable key-value store.
/// If it doesn't exist when this function is called, it will be created.
pub fn state_dir() -> io::Result<PathBuf> {
    let path = xdg_prefix().get_state_home().ok_or_else(no_home)?;

    create_dir_all(&path)?;

    Ok(path)
}

fn xdg_prefix() -> BaseDirectories {
    xdg::BaseDirectories::with_prefix("standings")
}

fn no_home() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "$HOME must exist")
}
