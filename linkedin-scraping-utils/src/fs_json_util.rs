use std::{
    fmt::Debug,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};

/// Writes `value` as pretty-printed JSON, overwriting `path`.
pub fn write_json<P: Into<PathBuf>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

pub fn read_toml<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| toml::from_str(&fs_err::read_to_string(&path)?).map_err(anyhow::Error::new))().with_context(
        || {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        },
    )
}

/// Same as [`read_toml`], but falls back to `T::default()` when no path is given.
pub fn read_toml_or_default<T: for<'de> Deserialize<'de> + Default>(
    path: Option<&Path>,
) -> anyhow::Result<T> {
    match path {
        Some(path) => read_toml(path),
        None => Ok(T::default()),
    }
}
