use super::version::VersionBump;

/// Bump signal produced by classifying a single commit.
///
/// Totally ordered: `None < Patch < Minor < Major`. The derived `Ord`
/// relies on the declaration order of the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpSignal {
    None,
    Patch,
    Minor,
    Major,
}

impl BumpSignal {
    /// Convert a signal into a bump magnitude; `None` carries no bump.
    pub fn into_bump(self) -> Option<VersionBump> {
        match self {
            BumpSignal::Major => Some(VersionBump::Major),
            BumpSignal::Minor => Some(VersionBump::Minor),
            BumpSignal::Patch => Some(VersionBump::Patch),
            BumpSignal::None => None,
        }
    }
}

/// Fold a sequence of signals into the single highest-priority signal.
///
/// The reduction is the max over the total order, so it is associative and
/// commutative: any permutation of the input yields the same result. An
/// empty sequence resolves to `BumpSignal::None`.
pub fn resolve(signals: impl IntoIterator<Item = BumpSignal>) -> BumpSignal {
    signals
        .into_iter()
        .fold(BumpSignal::None, |acc, signal| acc.max(signal))
}
