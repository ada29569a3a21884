/// Unweighted Levenshtein distance between two titles, counted in chars.
///
/// Builds the full `(len(b) + 1) x (len(a) + 1)` table where `matrix[i][j]` is
/// the distance between the first `i` chars of `b` and the first `j` chars of
/// `a`. Titles are short, so the quadratic table is fine.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            matrix[i][j] = if b[i - 1] == a[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                let substitution = matrix[i - 1][j - 1];
                let insertion = matrix[i][j - 1];
                let deletion = matrix[i - 1][j];
                1 + substitution.min(insertion).min(deletion)
            };
        }
    }

    matrix[b.len()][a.len()]
}
