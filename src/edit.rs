//! Edit distance and edit-path reconstruction.

use std::fmt;

pub const DEFAULT_SUBSTITUTION_COST: usize = 1;

/// Full `(len(a) + 1) x (len(b) + 1)` dynamic-programming grid.
#[derive(Debug, Clone)]
pub struct EditDistanceMatrix {
    cols: usize,
    cells: Vec<usize>,
}

impl EditDistanceMatrix {
    pub fn new(a: &str, b: &str, substitution_cost: usize) -> Self {
        let (a, b) = (a.as_bytes(), b.as_bytes());
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let mut matrix = EditDistanceMatrix {
            cols,
            cells: vec![0; rows * cols],
        };

        for i in 0..rows {
            matrix.set(i, 0, i);
        }
        for j in 0..cols {
            matrix.set(0, j, j);
        }

        for i in 1..rows {
            for j in 1..cols {
                let value = if a[i - 1] == b[j - 1] {
                    matrix.get(i - 1, j - 1)
                } else {
                    let delete = matrix.get(i - 1, j) + 1;
                    let insert = matrix.get(i, j - 1) + 1;
                    let substitute = matrix.get(i - 1, j - 1) + substitution_cost;
                    delete.min(insert).min(substitute)
                };
                matrix.set(i, j, value);
            }
        }
        matrix
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / self.cols
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }

    fn set(&mut self, i: usize, j: usize, value: usize) {
        self.cells[i * self.cols + j] = value;
    }

    pub fn distance(&self) -> usize {
        self.cells[self.cells.len() - 1]
    }
}

/// Minimum number of single-character edits turning `a` into `b`, all costing 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    edit_distance_with_cost(a, b, DEFAULT_SUBSTITUTION_COST)
}

pub fn edit_distance_with_cost(a: &str, b: &str, substitution_cost: usize) -> usize {
    EditDistanceMatrix::new(a, b, substitution_cost).distance()
}

/// One step of an edit path, carrying the character of the found word it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Copy(char),
    Substitute(char),
    Insert(char),
    Delete,
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Copy(ch) => write!(f, "{}", ch),
            EditOp::Substitute(ch) => write!(f, "{}(s)", ch),
            EditOp::Insert(ch) => write!(f, "{}(i)", ch),
            EditOp::Delete => f.write_str("(d)"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPath {
    ops: Vec<EditOp>,
}

impl EditPath {
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    /// Number of non-copy steps.
    pub fn cost(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !matches!(op, EditOp::Copy(_)))
            .count()
    }
}

impl fmt::Display for EditPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, op) in self.ops.iter().enumerate() {
            if n > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

pub fn edit_path(found: &str, key: &str) -> EditPath {
    edit_path_with_cost(found, key, DEFAULT_SUBSTITUTION_COST)
}

/// Steps turning `key` into `found`, traced back from the bottom-right cell.
///
/// Equal characters are always copied. Otherwise the diagonal wins only when it
/// is strictly below both neighbours, and insert wins only when strictly below
/// delete.
pub fn edit_path_with_cost(found: &str, key: &str, substitution_cost: usize) -> EditPath {
    let matrix = EditDistanceMatrix::new(found, key, substitution_cost);
    let (f, k) = (found.as_bytes(), key.as_bytes());
    let (mut i, mut j) = (f.len(), k.len());
    let mut ops = Vec::with_capacity(i.max(j));

    while i != 0 && j != 0 {
        let ch = f[i - 1] as char;
        if f[i - 1] == k[j - 1] {
            ops.push(EditOp::Copy(ch));
            i -= 1;
            j -= 1;
            continue;
        }

        let diagonal = matrix.get(i - 1, j - 1);
        let up = matrix.get(i - 1, j);
        let left = matrix.get(i, j - 1);
        if diagonal < up {
            if diagonal < left {
                ops.push(EditOp::Substitute(ch));
                i -= 1;
                j -= 1;
            } else {
                ops.push(EditOp::Delete);
                j -= 1;
            }
        } else if up < left {
            ops.push(EditOp::Insert(ch));
            i -= 1;
        } else {
            ops.push(EditOp::Delete);
            j -= 1;
        }
    }
    while i != 0 {
        ops.push(EditOp::Insert(f[i - 1] as char));
        i -= 1;
    }
    while j != 0 {
        ops.push(EditOp::Delete);
        j -= 1;
    }

    ops.reverse();
    EditPath { ops }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("intention", "execution"), 5);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn test_edit_distance_identity_and_symmetry() {
        let words = ["", "a", "cat", "cart", "kitten", "sitting", "spelling"];
        for a in words {
            assert_eq!(edit_distance(a, a), 0);
            for b in words {
                assert_eq!(edit_distance(a, b), edit_distance(b, a), "{} / {}", a, b);
            }
        }
    }

    #[test]
    fn test_substitution_cost() {
        assert_eq!(edit_distance_with_cost("cat", "cot", 2), 2);
        assert_eq!(edit_distance_with_cost("kitten", "sitting", 2), 5);
    }

    #[test]
    fn test_matrix_boundaries() {
        let matrix = EditDistanceMatrix::new("ab", "xyz", 1);
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 4);
        assert_eq!((0..3).map(|i| matrix.get(i, 0)).collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!((0..4).map(|j| matrix.get(0, j)).collect::<Vec<_>>(), [0, 1, 2, 3]);
        assert_eq!(matrix.distance(), 3);
    }

    #[test]
    fn test_edit_path_substitute() {
        let path = edit_path("cat", "cot");
        assert_eq!(
            path.ops(),
            [EditOp::Copy('c'), EditOp::Substitute('a'), EditOp::Copy('t')]
        );
        assert_eq!(path.to_string(), "c a(s) t");
    }

    #[test]
    fn test_edit_path_delete() {
        let path = edit_path("cat", "cart");
        assert_eq!(path.to_string(), "c a (d) t");
        assert_eq!(path.cost(), 1);
    }

    #[test]
    fn test_edit_path_insert() {
        let path = edit_path("cart", "cat");
        assert_eq!(path.to_string(), "c a r(i) t");
    }

    #[test]
    fn test_edit_path_trailing_steps() {
        assert_eq!(edit_path("abc", "").to_string(), "a(i) b(i) c(i)");
        assert_eq!(edit_path("", "ab").to_string(), "(d) (d)");
        assert_eq!(edit_path("", "").to_string(), "");
    }

    #[test]
    fn test_edit_path_cost_matches_distance() {
        let pairs = [
            ("kitten", "sitting"),
            ("spelling", "speling"),
            ("necessary", "neccesary"),
            ("house", "hose"),
        ];
        for (found, key) in pairs {
            let path = edit_path(found, key);
            assert_eq!(path.cost(), edit_distance(found, key), "{} / {}", found, key);
        }
    }
}
