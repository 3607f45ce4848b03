//! Output verbosity.

/// How much a command prints besides its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Results, progress, and a line per finished check.
    Verbose,
    /// Results and progress.
    #[default]
    Normal,
    /// Results only: no spinners or headers.
    Quiet,
}

impl OutputMode {
    /// Mode selected by the `--verbose` and `--quiet` flags. Quiet wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Per-check detail lines are shown.
    pub fn shows_detail(self) -> bool {
        self == Self::Verbose
    }

    /// Spinners and headers are shown.
    pub fn shows_progress(self) -> bool {
        self != Self::Quiet
    }
}
