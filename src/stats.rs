//! Per-case dispositions and the pass/bypass/failed counters derived from them.
//!
//! Accumulation is a pure reduction; nothing here touches the filesystem.

use std::fmt;

/// Final classification of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    Pass,
    Failed,
    Bypass,
    Missing,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Pass => "pass",
            Disposition::Failed => "failed",
            Disposition::Bypass => "bypass",
            Disposition::Missing => "missing",
        }
    }

    /// `Missing` counts toward the failed bucket.
    pub fn is_failure(&self) -> bool {
        matches!(self, Disposition::Failed | Disposition::Missing)
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recorded disposition of one named case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub name: String,
    pub disposition: Disposition,
}

impl CaseResult {
    pub fn new(name: impl Into<String>, disposition: Disposition) -> Self {
        Self {
            name: name.into(),
            disposition,
        }
    }
}

/// Counters for one category or for the whole run. `total == pass + bypass + failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub pass: usize,
    pub bypass: usize,
    pub failed: usize,
    pub total: usize,
}

impl Stats {
    pub fn record(&mut self, disposition: Disposition) {
        match disposition {
            Disposition::Pass => self.pass += 1,
            Disposition::Bypass => self.bypass += 1,
            Disposition::Failed | Disposition::Missing => self.failed += 1,
        }
        self.total += 1;
    }

    pub fn from_dispositions<I>(dispositions: I) -> Self
    where
        I: IntoIterator<Item = Disposition>,
    {
        let mut stats = Stats::default();
        for d in dispositions {
            stats.record(d);
        }
        stats
    }

    /// Folds another set of counters into this one.
    pub fn absorb(&mut self, other: &Stats) {
        self.pass += other.pass;
        self.bypass += other.bypass;
        self.failed += other.failed;
        self.total += other.total;
    }

    /// Cases that did not fail: passed plus bypassed.
    pub fn passed(&self) -> usize {
        self.total - self.failed
    }

    /// `(total - failed) / total` in hundredths of a percent, rounded half up;
    /// zero for an empty set.
    pub fn passed_ratio_hundredths(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        let (passed, total) = (self.passed() as u64, self.total as u64);
        (passed * 20_000 + total) / (2 * total)
    }

    /// The pass ratio as a percentage with two decimals, e.g. `"3.13"` for 1 of 32.
    pub fn passed_ratio(&self) -> String {
        let hundredths = self.passed_ratio_hundredths();
        format!("{}.{:02}", hundredths / 100, hundredths % 100)
    }
}
