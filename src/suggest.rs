//! "Did you mean?" suggestions based on Levenshtein edit distance.

/// Levenshtein distance between two strings, counted in Unicode scalar values.
///
/// Case-sensitive; callers lowercase both sides when they want otherwise.
/// Builds the full `(|a|+1) x (|b|+1)` table, which is fine for the short
/// command names and library names this is used on.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut dist = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dist.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        dist[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            dist[i][j] = if a[i - 1] == b[j - 1] {
                dist[i - 1][j - 1]
            } else {
                dist[i - 1][j]
                    .min(dist[i][j - 1])
                    .min(dist[i - 1][j - 1])
                    + 1
            };
        }
    }

    dist[a.len()][b.len()]
}

/// Options close to `query`, best first.
///
/// An option is kept when its distance to the query is at most half the
/// query length, or when it starts with the same character as the query.
/// Comparison is case-insensitive. Ties keep their original order.
pub fn best_matches<S: AsRef<str>>(query: &str, options: &[S]) -> Vec<String> {
    let query = query.to_lowercase();
    let threshold = query.chars().count() / 2;

    let mut scored: Vec<(&str, usize)> = options
        .iter()
        .map(|s| s.as_ref())
        .filter_map(|option| {
            let lower = option.to_lowercase();
            let distance = edit_distance(&lower, &query);
            if distance <= threshold || shares_prefix(&lower, &query) {
                Some((option, distance))
            } else {
                None
            }
        })
        .collect();

    // sort_by_key is stable
    scored.sort_by_key(|&(_, distance)| distance);
    scored.into_iter().map(|(s, _)| s.to_string()).collect()
}

fn shares_prefix(a: &str, b: &str) -> bool {
    matches!((a.chars().next(), b.chars().next()), (Some(x), Some(y)) if x == y)
}

/// The single best suggestion for a mistyped token, if any.
pub fn suggest<S: AsRef<str>>(token: &str, options: &[S]) -> Option<String> {
    best_matches(token, options).into_iter().next()
}

/// Build a " Did you mean 'X'?" suffix, or an empty string when nothing is close.
pub fn did_you_mean<S: AsRef<str>>(token: &str, options: &[S]) -> String {
    match suggest(token, options) {
        Some(s) => format!(" Did you mean '{}'?", s),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_basics() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", "xyz"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("export", "export"), 0);
        assert_eq!(edit_distance("tempalte", "template"), 2);
    }

    #[test]
    fn test_distance_is_case_sensitive() {
        assert_eq!(edit_distance("MIT", "mit"), 3);
    }

    #[test]
    fn test_distance_counts_chars_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
        assert_eq!(edit_distance("日本語", "日本"), 1);
    }

    #[test]
    fn test_distance_symmetry_and_triangle() {
        let words = ["check", "chekc", "export", "exprot", "", "list", "Alamofire"];
        for a in words {
            assert_eq!(edit_distance(a, a), 0);
            for b in words {
                assert_eq!(edit_distance(a, b), edit_distance(b, a));
                for c in words {
                    assert!(edit_distance(a, b) <= edit_distance(a, c) + edit_distance(c, b));
                }
            }
        }
    }

    #[test]
    fn test_best_matches_transposition() {
        let matches = best_matches("tempalte", &["template", "format", "export"]);
        assert_eq!(matches.first().map(String::as_str), Some("template"));
    }

    #[test]
    fn test_best_matches_nothing_close() {
        assert!(best_matches("zz", &["export", "check"]).is_empty());
    }

    #[test]
    fn test_best_matches_shared_prefix_rescues_distant_option() {
        // far beyond 3 / 2, but both start with 'c'
        let matches = best_matches("chk", &["check-unsupported"]);
        assert_eq!(matches, vec!["check-unsupported".to_string()]);
    }

    #[test]
    fn test_best_matches_sorted_and_stable() {
        let options = ["lisp", "list", "lost", "export"];
        let matches = best_matches("list", &options);
        assert_eq!(matches, vec!["list", "lisp", "lost"]);
    }

    #[test]
    fn test_best_matches_case_insensitive_returns_original() {
        let matches = best_matches("alamofir", &["Alamofire", "Kingfisher"]);
        assert_eq!(matches, vec!["Alamofire".to_string()]);
    }

    #[test]
    fn test_suggest() {
        assert_eq!(suggest("exprot", &["export", "list", "check"]), Some("export".to_string()));
        assert_eq!(suggest("zz", &["export", "check"]), None);
        let empty: [&str; 0] = [];
        assert_eq!(suggest("anything", &empty), None);
    }

    #[test]
    fn test_did_you_mean() {
        assert_eq!(did_you_mean("jsn", &["json", "xml"]), " Did you mean 'json'?");
        assert_eq!(did_you_mean("zz", &["text"]), "");
    }
}
