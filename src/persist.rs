//! Saves and loads search state: the tried set, and the log of solutions.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::*;
use crate::solve::driver::{LogEntry, SolutionLog};
use crate::solve::Backup;

/// The tried-set file layout this build writes and reads.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
  /// There's no saved state at the path.  Callers usually start from an
  /// empty tried set instead.
  #[error("no saved state at {}", .0.display())]
  NotFound(PathBuf),

  #[error("I/O error on {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The file exists but doesn't hold a tried set this build understands.
  #[error("corrupt state in {}: {reason}", .path.display())]
  Corrupt { path: PathBuf, reason: String },
}

impl PersistError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, PersistError::NotFound(_))
  }

  fn io(path: &Path, source: io::Error) -> Self {
    PersistError::Io {
      path: path.to_path_buf(),
      source,
    }
  }

  fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
    PersistError::Corrupt {
      path: path.to_path_buf(),
      reason: reason.into(),
    }
  }
}

/// The on-disk form of a tried set: the rank of every attempt in it, in
/// ascending order.
#[derive(Debug, Deserialize, Serialize)]
struct TriedFile {
  version: u32,
  space: u32,
  ranks: Vec<u32>,
}

/// How `save_tried` treats an existing file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SaveMode {
  #[default]
  Overwrite,
  /// Leaves existing files alone, writing to the first free name among
  /// `stem_1.ext`, `stem_2.ext`, and so on.
  Numbered,
}

/// Writes the tried set to `path`, or next to it when `mode` is `Numbered`,
/// creating missing directories.  Returns the path written.
pub fn save_tried(path: &Path, tried: &TriedSet, mode: SaveMode) -> Result<PathBuf, PersistError> {
  if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
    fs::create_dir_all(dir).map_err(|e| PersistError::io(dir, e))?;
  }
  let path = match mode {
    SaveMode::Overwrite => path.to_path_buf(),
    SaveMode::Numbered => numbered_path(path),
  };
  let contents = TriedFile {
    version: FORMAT_VERSION,
    space: SPACE_SIZE,
    ranks: tried.ranks().collect(),
  };
  let file = File::create(&path).map_err(|e| PersistError::io(&path, e))?;
  let mut writer = BufWriter::new(file);
  serde_json::to_writer(&mut writer, &contents).map_err(|e| PersistError::io(&path, e.into()))?;
  writer.flush().map_err(|e| PersistError::io(&path, e))?;
  Ok(path)
}

/// Reads a tried set written by `save_tried`.
pub fn load_tried(path: &Path) -> Result<TriedSet, PersistError> {
  let file = File::open(path).map_err(|e| match e.kind() {
    io::ErrorKind::NotFound => PersistError::NotFound(path.to_path_buf()),
    _ => PersistError::io(path, e),
  })?;
  let contents: TriedFile = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
    if e.is_io() {
      PersistError::io(path, e.into())
    } else {
      PersistError::corrupt(path, e.to_string())
    }
  })?;
  if contents.version != FORMAT_VERSION {
    return Err(PersistError::corrupt(
      path,
      format!("unsupported version {}", contents.version),
    ));
  }
  if contents.space != SPACE_SIZE {
    return Err(PersistError::corrupt(
      path,
      format!("space of {} permutations, expected {}", contents.space, SPACE_SIZE),
    ));
  }
  let mut tried = TriedSet::new();
  let mut last = None;
  for rank in contents.ranks {
    if last.is_some_and(|prev| rank <= prev) {
      return Err(PersistError::corrupt(
        path,
        format!("rank {} is not above the rank before it", rank),
      ));
    }
    last = Some(rank);
    let attempt = Attempt::from_rank(rank)
      .ok_or_else(|| PersistError::corrupt(path, format!("rank {} out of range", rank)))?;
    tried.insert(attempt);
  }
  Ok(tried)
}

/// Like `load_tried`, but a missing file yields an empty set.
pub fn load_or_default(path: &Path) -> Result<TriedSet, PersistError> {
  match load_tried(path) {
    Err(e) if e.is_not_found() => {
      info!("No previous attempts were found at {}", path.display());
      Ok(TriedSet::new())
    }
    result => result,
  }
}

/// Finds the first of `stem_1.ext`, `stem_2.ext`, ... that doesn't exist, or
/// `path` itself if it doesn't.
pub fn numbered_path(path: &Path) -> PathBuf {
  if !path.exists() {
    return path.to_path_buf();
  }
  let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
  let ext = path.extension().map(|e| format!(".{}", e.to_string_lossy())).unwrap_or_default();
  (1..)
    .map(|n| path.with_file_name(format!("{}_{}{}", stem, n, ext)))
    .find(|p| !p.exists())
    .unwrap_or_else(|| path.to_path_buf())
}

/// A `Backup` that writes the tried set to a file.
#[derive(Clone, Debug)]
pub struct FileBackup {
  pub path: PathBuf,
  /// How periodic snapshots treat existing files.  The final save always
  /// overwrites `path`.
  pub mode: SaveMode,
}

impl FileBackup {
  pub fn new(path: impl Into<PathBuf>, mode: SaveMode) -> Self {
    Self {
      path: path.into(),
      mode,
    }
  }
}

impl Backup for FileBackup {
  fn save(&mut self, tried: &TriedSet) -> Result<(), PersistError> {
    save_tried(&self.path, tried, self.mode).map(|_| ())
  }

  fn finish(&mut self, tried: &TriedSet) -> Result<(), PersistError> {
    save_tried(&self.path, tried, SaveMode::Overwrite).map(|_| ())
  }
}

/// A `SolutionLog` that appends to a text file, and optionally echoes each
/// entry to standard output.
#[derive(Clone, Debug)]
pub struct SolutionsFile {
  pub path: PathBuf,
  pub echo: bool,
}

impl SolutionsFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      echo: false,
    }
  }

  pub fn echo(mut self, echo: bool) -> Self {
    self.echo = echo;
    self
  }
}

impl SolutionLog for SolutionsFile {
  fn record(&mut self, entry: &LogEntry) -> Result<(), PersistError> {
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      fs::create_dir_all(dir).map_err(|e| PersistError::io(dir, e))?;
    }
    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)
      .map_err(|e| PersistError::io(&self.path, e))?;
    writeln!(file, "{}", entry).map_err(|e| PersistError::io(&self.path, e))?;
    if self.echo {
      println!("{}", entry);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::elapsed::Elapsed;
  use crate::solve::Solution;
  use std::time::Duration;

  /// A fresh directory under the system temp dir, removed on drop.
  struct TempDir(PathBuf);

  impl TempDir {
    fn new(name: &str) -> Self {
      let dir = std::env::temp_dir().join(format!("ai-vertici-{}-{}", name, std::process::id()));
      let _ = fs::remove_dir_all(&dir);
      TempDir(dir)
    }
  }

  impl Drop for TempDir {
    fn drop(&mut self) {
      let _ = fs::remove_dir_all(&self.0);
    }
  }

  fn sample() -> TriedSet {
    (0..1000).filter_map(|r| Attempt::from_rank(r * 3617)).collect()
  }

  #[test]
  fn test_round_trip() {
    let dir = TempDir::new("round-trip");
    let path = dir.0.join("nested/deeper/tries.json");
    let tried = sample();
    assert_eq!(path, save_tried(&path, &tried, SaveMode::Overwrite).unwrap());
    assert_eq!(tried, load_tried(&path).unwrap());

    let empty = TriedSet::new();
    save_tried(&path, &empty, SaveMode::Overwrite).unwrap();
    assert_eq!(empty, load_tried(&path).unwrap());
  }

  #[test]
  fn test_round_trip_full() {
    let dir = TempDir::new("round-trip-full");
    let path = dir.0.join("tries.json");
    let mut tried = TriedSet::full();
    tried.remove(&Attempt::identity());
    save_tried(&path, &tried, SaveMode::Overwrite).unwrap();
    assert_eq!(tried, load_tried(&path).unwrap());
  }

  #[test]
  fn test_missing() {
    let dir = TempDir::new("missing");
    let path = dir.0.join("nope.json");
    let err = load_tried(&path).unwrap_err();
    assert!(err.is_not_found(), "{}", err);
    assert_eq!(TriedSet::new(), load_or_default(&path).unwrap());
  }

  #[test]
  fn test_corrupt() {
    let dir = TempDir::new("corrupt");
    fs::create_dir_all(&dir.0).unwrap();
    let cases = [
      ("garbage.json", "not json at all".to_string()),
      ("truncated.json", r#"{"version":1,"space":3628800,"ranks":[1,2"#.to_string()),
      ("version.json", r#"{"version":7,"space":3628800,"ranks":[]}"#.to_string()),
      ("space.json", r#"{"version":1,"space":120,"ranks":[]}"#.to_string()),
      ("rank.json", format!(r#"{{"version":1,"space":3628800,"ranks":[0,{}]}}"#, SPACE_SIZE)),
      ("unsorted.json", r#"{"version":1,"space":3628800,"ranks":[5,3]}"#.to_string()),
      ("duplicate.json", r#"{"version":1,"space":3628800,"ranks":[0,4,4]}"#.to_string()),
    ];
    for (name, text) in cases {
      let path = dir.0.join(name);
      fs::write(&path, text).unwrap();
      let err = load_tried(&path).unwrap_err();
      assert!(matches!(err, PersistError::Corrupt { .. }), "{}: {}", name, err);
      assert!(matches!(load_or_default(&path), Err(PersistError::Corrupt { .. })));
    }
  }

  #[test]
  fn test_numbered() {
    let dir = TempDir::new("numbered");
    let path = dir.0.join("tries.json");
    let tried = sample();
    assert_eq!(path, save_tried(&path, &tried, SaveMode::Numbered).unwrap());
    let first = save_tried(&path, &tried, SaveMode::Numbered).unwrap();
    assert_eq!(dir.0.join("tries_1.json"), first);
    let second = save_tried(&path, &tried, SaveMode::Numbered).unwrap();
    assert_eq!(dir.0.join("tries_2.json"), second);
    assert_eq!(tried, load_tried(&second).unwrap());
  }

  #[test]
  fn test_file_backup_finish_overwrites() {
    let dir = TempDir::new("backup");
    let path = dir.0.join("tries.json");
    let mut backup = FileBackup::new(&path, SaveMode::Numbered);
    backup.save(&sample()).unwrap();
    backup.save(&sample()).unwrap();
    backup.finish(&TriedSet::new()).unwrap();
    assert_eq!(TriedSet::new(), load_tried(&path).unwrap());
    assert_eq!(sample(), load_tried(&dir.0.join("tries_1.json")).unwrap());
    assert!(!dir.0.join("tries_2.json").exists());
  }

  #[test]
  fn test_solutions_file_appends() {
    let dir = TempDir::new("solutions");
    let path = dir.0.join("logs/sols.txt");
    let mut log = SolutionsFile::new(&path);
    let attempt = Attempt::new([0, 5, 9, 6, 3, 2, 1, 7, 4, 8]).unwrap();
    let solution = Solution {
      attempt,
      assignment: Assignment::from(attempt),
      tries: 7,
    };
    for index in 1..=2 {
      let entry = LogEntry {
        index,
        solution: &solution,
        elapsed: Elapsed::from_std(Duration::from_secs(2)),
      };
      log.record(&entry).unwrap();
    }
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Sol. 1 (try #7) : {a: 0, "));
    assert!(text.contains("\n\nSol. 2 (try #7) : "));
    assert_eq!(2, text.matches("Exec. time: 0h 00m 02.000s\n").count());
  }
}
