// candidates.rs - Candidate window generation (exhaustive and seeded)

use crate::core::error::{Result, WindowError};
use crate::core::window::{Extent, Window};

fn check_splittable(length: usize, min_win: usize) -> Result<()> {
    if min_win == 0 {
        return Err(WindowError::ZeroMinWindow);
    }
    if length < 3 * min_win {
        return Err(WindowError::WindowTooSmall { length, min_win });
    }
    Ok(())
}

/// Number of windows [`generate_all`] produces: `n(n+1)/2` with `n = length - 3·min_win + 1`
pub fn candidate_count(length: usize, min_win: usize) -> usize {
    if min_win == 0 || length < 3 * min_win {
        return 0;
    }
    let n = length - 3 * min_win + 1;
    n * (n + 1) / 2
}

/// Every window over `[0, length)` leaving at least `min_win` columns in
/// the left flank, the core and the right flank.
///
/// Grows quadratically with `length`; meant for short extents.
pub fn generate_all(length: usize, min_win: usize) -> Result<Vec<Window>> {
    check_splittable(length, min_win)?;
    Ok(generate_within(length, min_win, Extent::new(0, length)))
}

/// Exhaustive windows over `[0, length)` whose start and stop both fall inside `bounds`.
///
/// Flank and core minimums are enforced against the whole extent, so this
/// is [`generate_all`] restricted to a neighbourhood.
pub fn generate_within(length: usize, min_win: usize, bounds: Extent) -> Vec<Window> {
    let mut windows = Vec::new();
    if min_win == 0 || length < 3 * min_win {
        return windows;
    }

    let first_start = min_win.max(bounds.start);
    let last_stop = (length - min_win).min(bounds.stop);

    for start in first_start..=last_stop.saturating_sub(min_win) {
        for stop in (start + min_win)..=last_stop {
            windows.push(Window::new(start, stop));
        }
    }
    windows
}

/// Seed windows of exactly `min_win` columns over `[start, stop)`.
///
/// Seeds step by half a window (50% overlap) from the first admissible
/// position. When the extent is not a multiple of `min_win`, a second series
/// shifted by the remainder is added. The last admissible seed, ending at
/// `stop - min_win`, is always included. Returned sorted and without duplicates.
pub fn generate_seeds(start: usize, stop: usize, min_win: usize) -> Result<Vec<Window>> {
    let extent = Extent::new(start, stop);
    check_splittable(extent.len(), min_win)?;

    let step = (min_win / 2).max(1);
    let last_stop = extent.stop - min_win;
    let remainder = extent.len() % min_win;

    let mut seeds = Vec::new();
    let mut push_series = |offset: usize| {
        let mut s = extent.start + min_win + offset;
        while s + min_win <= last_stop {
            seeds.push(Window::new(s, s + min_win));
            s += step;
        }
    };

    push_series(0);
    if remainder != 0 {
        push_series(remainder);
    }
    // Odd half-steps can overshoot the right edge
    seeds.push(Window::new(last_stop - min_win, last_stop));

    seeds.sort();
    seeds.dedup();
    Ok(seeds)
}
