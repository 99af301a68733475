/// Indices of local maxima in `values`, at least `distance` positions apart.
///
/// A candidate is strictly higher than both neighbours, so endpoints and flat
/// plateaus never qualify. When candidates crowd each other, the tallest wins
/// and suppresses everything closer than `distance`; among equal heights the
/// later index is considered first. The result is sorted ascending.
pub fn find_peaks(values: &[usize], distance: usize) -> Vec<usize> {
    let candidates = local_maxima(values);
    if distance <= 1 || candidates.len() < 2 {
        return candidates;
    }
    select_by_distance(values, &candidates, distance)
}

fn local_maxima(values: &[usize]) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }
    (1..values.len() - 1)
        .filter(|&i| values[i - 1] < values[i] && values[i] > values[i + 1])
        .collect()
}

fn select_by_distance(values: &[usize], candidates: &[usize], distance: usize) -> Vec<usize> {
    let mut keep = vec![true; candidates.len()];

    // Stable ascending sort by height; walking it backwards visits the tallest
    // first and, for ties, the later index first.
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&j| values[candidates[j]]);

    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let pos = candidates[j];

        let mut k = j;
        while k > 0 && pos - candidates[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < candidates.len() && candidates[k] - pos < distance {
            keep[k] = false;
            k += 1;
        }
    }

    candidates
        .iter()
        .zip(keep)
        .filter_map(|(&pos, kept)| kept.then_some(pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_has_no_peaks() {
        assert!(find_peaks(&[], 5).is_empty());
        assert!(find_peaks(&[4], 5).is_empty());
        assert!(find_peaks(&[1, 9], 5).is_empty());
    }

    #[test]
    fn endpoints_are_never_peaks() {
        assert!(find_peaks(&[9, 1, 9], 1).is_empty());
        assert_eq!(find_peaks(&[1, 2, 1], 1), vec![1]);
    }

    #[test]
    fn plateaus_are_not_peaks() {
        assert!(find_peaks(&[1, 3, 3, 1], 1).is_empty());
        assert_eq!(find_peaks(&[1, 3, 3, 1, 4, 1], 1), vec![4]);
    }

    #[test]
    fn distance_keeps_the_taller_of_close_peaks() {
        let volumes = [1, 3, 1, 2, 1, 1, 1, 4, 1];
        assert_eq!(find_peaks(&volumes, 1), vec![1, 3, 7]);
        // 3 is within 4 of the tallest peak at 7; 1 is exactly 6 away
        assert_eq!(find_peaks(&volumes, 5), vec![1, 7]);
    }

    #[test]
    fn peaks_exactly_distance_apart_both_survive() {
        let volumes = [0, 5, 0, 0, 0, 0, 6, 0];
        assert_eq!(find_peaks(&volumes, 5), vec![1, 6]);
        assert_eq!(find_peaks(&volumes, 6), vec![6]);
    }

    #[test]
    fn equal_heights_prefer_later_index() {
        assert_eq!(find_peaks(&[0, 5, 0, 5, 0], 5), vec![3]);
    }

    #[test]
    fn suppressed_peak_does_not_suppress_others() {
        // 12 removes 8; 8 would have removed 7 but is already gone
        let volumes = [0, 7, 0, 0, 0, 8, 0, 12, 0];
        assert_eq!(find_peaks(&volumes, 5), vec![1, 7]);
    }

    #[test]
    fn result_is_sorted_in_range_and_separated() {
        // deterministic pseudo-random walk
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let volumes: Vec<usize> = (0..400)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 33) % 50) as usize
            })
            .collect();

        for distance in [1, 2, 5, 13] {
            let peaks = find_peaks(&volumes, distance);
            assert!(!peaks.is_empty());
            assert!(peaks.iter().all(|&p| p > 0 && p < volumes.len() - 1));
            assert!(peaks.windows(2).all(|w| w[1] - w[0] >= distance.max(1)));
        }
    }
}
