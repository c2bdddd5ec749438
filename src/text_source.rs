//! Loading text resources as a [`Single`].
//!
//! Reading is an injected capability ([`TextSource`]) so callers can swap the
//! filesystem for an in-memory store. [`DirTextSource`] resolves names
//! inside a directory, appending an extension (`txt` by default).

use std::{
  fs, io,
  path::{Path, PathBuf},
  sync::Arc,
};

use thiserror::Error;
use tracing::debug;

use crate::single::Single;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileReadError {
  #[error("file not found: {0}")]
  NotFound(String),
  #[error("file unreadable: {0}")]
  Unreadable(String),
  #[error("file is not valid UTF-8: {0}")]
  DecodeFailed(String),
}

/// Reads a named text resource.
pub trait TextSource {
  fn read_text(&self, name: &str) -> Result<String, FileReadError>;
}

impl<S: TextSource + ?Sized> TextSource for Arc<S> {
  #[inline]
  fn read_text(&self, name: &str) -> Result<String, FileReadError> { (**self).read_text(name) }
}

impl<S: TextSource + ?Sized> TextSource for &S {
  #[inline]
  fn read_text(&self, name: &str) -> Result<String, FileReadError> { (**self).read_text(name) }
}

/// Text files inside one directory.
#[derive(Debug, Clone)]
pub struct DirTextSource {
  root: PathBuf,
  extension: Option<String>,
}

impl DirTextSource {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into(), extension: Some("txt".to_owned()) }
  }

  /// Append `.{extension}` to every name.
  pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
    self.extension = Some(extension.into());
    self
  }

  /// Use names as given.
  pub fn without_extension(mut self) -> Self {
    self.extension = None;
    self
  }

  #[inline]
  pub fn root(&self) -> &Path { &self.root }

  /// The path `name` resolves to.
  pub fn resolve(&self, name: &str) -> PathBuf {
    match &self.extension {
      Some(ext) => self.root.join(format!("{name}.{ext}")),
      None => self.root.join(name),
    }
  }
}

impl TextSource for DirTextSource {
  fn read_text(&self, name: &str) -> Result<String, FileReadError> {
    let path = self.resolve(name);
    let bytes = fs::read(&path).map_err(|e| match e.kind() {
      io::ErrorKind::NotFound => FileReadError::NotFound(path.display().to_string()),
      _ => FileReadError::Unreadable(format!("{}: {e}", path.display())),
    })?;
    String::from_utf8(bytes)
      .map_err(|e| FileReadError::DecodeFailed(format!("{}: {e}", path.display())))
  }
}

/// A [`Single`] that reads `name` from `source` on every subscription.
///
/// ```rust,no_run
/// use rxlite::prelude::*;
///
/// let bag = DisposeBag::new();
/// load_text(DirTextSource::new("resources"), "Quotes")
///   .subscribe(|result| match result {
///     Ok(text) => println!("{text}"),
///     Err(e) => println!("{e}"),
///   })
///   .disposed_by(&bag);
/// ```
pub fn load_text<S>(source: S, name: impl Into<String>) -> Single<String, FileReadError>
where
  S: TextSource + Send + Sync + 'static,
{
  let name = name.into();
  Single::create(move |emitter| {
    let result = source.read_text(&name);
    debug!(%name, ok = result.is_ok(), "text loaded");
    emitter.on(result);
  })
}
