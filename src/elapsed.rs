use std::fmt::Display;
use std::time::{Duration, Instant};

use chrono::TimeDelta;

/// A wall-clock duration that displays as hours, minutes and seconds, like
/// `1h 02m 03.500s`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Elapsed(TimeDelta);

impl Elapsed {
  /// The time since `start`.
  pub fn since(start: Instant) -> Self {
    Self::from_std(start.elapsed())
  }

  /// Converts a standard duration, saturating at chrono's maximum.
  pub fn from_std(duration: Duration) -> Self {
    Self(TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX))
  }

  pub fn hours(&self) -> i64 {
    self.0.num_hours()
  }

  /// The minutes past the hour.
  pub fn minutes(&self) -> i64 {
    self.0.num_minutes() % 60
  }

  /// The seconds past the minute.
  pub fn seconds(&self) -> i64 {
    self.0.num_seconds() % 60
  }

  /// The milliseconds past the second.
  pub fn millis(&self) -> i64 {
    self.0.num_milliseconds() % 1000
  }
}

impl Display for Elapsed {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}h {:02}m {:02}.{:03}s",
      self.hours(),
      self.minutes(),
      self.seconds(),
      self.millis()
    )
  }
}

impl From<Duration> for Elapsed {
  fn from(duration: Duration) -> Self {
    Self::from_std(duration)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_basics() {
    let e = Elapsed::from_std(Duration::from_millis(3_723_500));
    assert_eq!(1, e.hours());
    assert_eq!(2, e.minutes());
    assert_eq!(3, e.seconds());
    assert_eq!(500, e.millis());
    assert_eq!("1h 02m 03.500s", e.to_string());
  }

  #[test]
  fn test_extremes() {
    assert_eq!("0h 00m 00.000s", Elapsed::default().to_string());
    assert_eq!("0h 00m 00.999s", Elapsed::from(Duration::from_micros(999_999)).to_string());
    assert_eq!("100h 00m 00.000s", Elapsed::from(Duration::from_secs(360_000)).to_string());
  }

  #[test]
  fn test_since() {
    let e = Elapsed::since(Instant::now());
    assert!(e < Elapsed::from_std(Duration::from_secs(60)));
  }
}
