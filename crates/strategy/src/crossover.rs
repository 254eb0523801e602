/// Relation between the last two points of two trajectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Crossover {
    /// `line` moved from at-or-below `reference` to strictly above it.
    Above,
    /// `line` moved from at-or-above `reference` to strictly below it.
    Below,
    Neither,
}

/// Compare the last two points of `line` against `reference`.
///
/// Trajectories are aligned on their last point. Returns `None` when either
/// has fewer than two points.
pub(crate) fn detect(line: &[f64], reference: &[f64]) -> Option<Crossover> {
    if line.len() < 2 || reference.len() < 2 {
        return None;
    }
    let (prev, curr) = (line[line.len() - 2], line[line.len() - 1]);
    let (prev_ref, curr_ref) = (reference[reference.len() - 2], reference[reference.len() - 1]);

    Some(if prev <= prev_ref && curr > curr_ref {
        Crossover::Above
    } else if prev >= prev_ref && curr < curr_ref {
        Crossover::Below
    } else {
        Crossover::Neither
    })
}
