//! Closest-match suggestions for mistyped command names.

const MAX_SUGGESTIONS: usize = 3;
const MIN_SIMILARITY: f64 = 0.6;

/// Up to three known names close to `token`: names that start with it come
/// first, then the rest by descending similarity.
pub fn suggest<'a, I>(token: &str, known: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let token = token.to_lowercase();
    if token.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(bool, f64, &str)> = known
        .into_iter()
        .filter_map(|name| {
            let is_prefix = name.starts_with(&token);
            let score = similarity(&token, name);
            (is_prefix || score >= MIN_SIMILARITY).then_some((is_prefix, score, name))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then(b.1.total_cmp(&a.1))
            .then(a.2.cmp(b.2))
    });

    let mut result: Vec<String> = Vec::new();
    for (_, _, name) in scored {
        if !result.iter().any(|r| r == name) {
            result.push(name.to_string());
        }
        if result.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    result
}

/// 1.0 for equal strings down to 0.0 for nothing in common.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
