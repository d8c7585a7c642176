//! Fuzzy "did you mean" suggestions over a candidate name set.

/// A scored suggestion: `name` is within [`MAX_DISTANCE`] edits of the
/// misspelled identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub distance: usize,
}

const MAX_DISTANCE: usize = 2;
const MAX_SUGGESTIONS: usize = 3;

/// Rank every name in `pool` by Damerau-Levenshtein distance to `target`,
/// keep the ones within [`MAX_DISTANCE`], and return at most
/// [`MAX_SUGGESTIONS`] ordered closest-first (ties broken alphabetically
/// so the result is deterministic).
pub fn fuzzy_suggestions<'a>(target: &str, pool: impl IntoIterator<Item = &'a str>) -> Vec<Candidate> {
    let mut scored: Vec<Candidate> = pool
        .into_iter()
        .filter(|name| *name != target)
        .map(|name| Candidate {
            name: name.to_string(),
            distance: damerau_levenshtein(target, name),
        })
        .filter(|c| c.distance <= MAX_DISTANCE)
        .collect();

    scored.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.name.cmp(&b.name)));
    scored.truncate(MAX_SUGGESTIONS);
    scored
}

/// Restricted (optimal string alignment) Damerau-Levenshtein distance:
/// insertions, deletions, substitutions, and adjacent transpositions.
fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (la, lb) = (a.len(), b.len());

    if la == 0 {
        return lb;
    }
    if lb == 0 {
        return la;
    }

    let mut d = vec![vec![0usize; lb + 1]; la + 1];
    for (i, row) in d.iter_mut().enumerate().take(la + 1) {
        row[0] = i;
    }
    for (j, cell) in d[0].iter_mut().enumerate().take(lb + 1) {
        *cell = j;
    }

    for i in 1..=la {
        for j in 1..=lb {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let mut best = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(d[i - 2][j - 2] + 1);
            }
            d[i][j] = best;
        }
    }

    d[la][lb]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_excluded_from_its_own_suggestions() {
        let pool = ["User", "Profile"];
        let result = fuzzy_suggestions("User", pool);
        assert!(result.is_empty());
    }

    #[test]
    fn typo_finds_the_close_candidate() {
        let pool = ["User", "Profile", "Status"];
        let result = fuzzy_suggestions("Usr", pool);
        assert_eq!(result[0].name, "User");
        assert_eq!(result[0].distance, 1);
    }

    #[test]
    fn transposition_counts_as_one_edit() {
        assert_eq!(damerau_levenshtein("Usre", "User"), 1);
    }

    #[test]
    fn far_candidates_are_excluded() {
        let pool = ["CompletelyUnrelatedName"];
        assert!(fuzzy_suggestions("User", pool).is_empty());
    }

    #[test]
    fn caps_at_three_ordered_by_distance() {
        let pool = ["Userr", "Usera", "Usr", "Use", "Usee"];
        let result = fuzzy_suggestions("User", pool);
        assert_eq!(result.len(), 3);
        // "Use" and "Usr" are both one edit away; ties break alphabetically.
        assert_eq!(result[0].name, "Use");
        assert_eq!(result[0].distance, 1);
    }
}
