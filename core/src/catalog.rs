use crate::*;

/// Pure predicate over `(row, col, grid_size)`, all zero-based. Must be
/// deterministic and total for `0 <= row, col < grid_size`.
pub type Predicate = fn(Coord, Coord, Coord) -> bool;

/// One entry of the rule catalog. Defined at process start, never mutated.
/// The `id` is the stable persistence key for unlocking.
#[derive(Copy, Clone, Debug)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub predicate: Predicate,
}

impl Rule {
    pub fn holds_at(&self, row: Coord, col: Coord, grid_size: Coord) -> bool {
        (self.predicate)(row, col, grid_size)
    }

    /// Number of cells the predicate marks correct on a square grid.
    pub fn target_count(&self, grid_size: Coord) -> CellCount {
        let mut count = 0;
        for row in 0..grid_size {
            for col in 0..grid_size {
                if self.holds_at(row, col, grid_size) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rule {}

fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn is_square(x: u32) -> bool {
    let s = (x as f64).sqrt() as u32;
    s * s == x || (s + 1) * (s + 1) == x
}

fn is_fibonacci(n: u32) -> bool {
    is_square(5 * n * n + 4) || (5 * n * n >= 4 && is_square(5 * n * n - 4))
}

// The rule descriptions speak in 1-based row/column numbers, the predicates
// receive 0-based coordinates. The widening to u32 keeps sums and products
// out of Coord range trouble.
macro_rules! rule {
    ($id:literal, $name:literal, $desc:literal, |$r:ident, $c:ident, $n:ident| $body:expr) => {
        Rule {
            id: $id,
            name: $name,
            description: $desc,
            predicate: |row, col, size| {
                let ($r, $c, $n) = (row as u32, col as u32, size as u32);
                let _ = ($r, $c, $n);
                $body
            },
        }
    };
}

pub static EASY_RULES: &[Rule] = &[
    rule!("even-sum", "Even Sum", "Correct if (row + column) is even.",
        |r, c, n| ((r + 1) + (c + 1)) % 2 == 0),
    rule!("odd-row", "Odd Row", "Correct if row number is odd.",
        |r, c, n| (r + 1) % 2 == 1),
    rule!("odd-column", "Odd Column", "Correct if column number is odd.",
        |r, c, n| (c + 1) % 2 == 1),
    rule!("border", "Border", "Correct if tile is on the edge.",
        |r, c, n| r == 0 || c == 0 || r == n - 1 || c == n - 1),
    rule!("main-diagonal", "Main Diagonal", "Correct if row equals column.",
        |r, c, n| r == c),
    rule!("anti-diagonal", "Anti Diagonal", "Correct if row + column equals grid size - 1.",
        |r, c, n| r + c == n - 1),
    rule!("center-tile", "Center Tile", "Correct if tile is the center (for odd-sized grids).",
        |r, c, n| r == n / 2 && c == n / 2),
    rule!("top-half", "Top Half", "Correct if tile is in the top half.",
        |r, c, n| r < n / 2),
    rule!("left-half", "Left Half", "Correct if tile is in the left half.",
        |r, c, n| c < n / 2),
    rule!("row-multiple-3", "Row Multiple of 3", "Correct if row number is a multiple of 3.",
        |r, c, n| (r + 1) % 3 == 0),
    rule!("col-multiple-3", "Column Multiple of 3", "Correct if column number is a multiple of 3.",
        |r, c, n| (c + 1) % 3 == 0),
    rule!("corner-tiles", "Corners", "Correct if tile is in a corner.",
        |r, c, n| (r == 0 || r == n - 1) && (c == 0 || c == n - 1)),
    rule!("sum-less-than-6", "Small Sum", "Correct if row+column < 6.",
        |r, c, n| (r + 1) + (c + 1) < 6),
    rule!("checkerboard", "Checkerboard", "Alternating tiles like a checkerboard.",
        |r, c, n| (r + c) % 2 == 0),
];

pub static MEDIUM_RULES: &[Rule] = &[
    rule!("even-row", "Even Row", "Correct if row number is even.",
        |r, c, n| (r + 1) % 2 == 0),
    rule!("even-column", "Even Column", "Correct if column number is even.",
        |r, c, n| (c + 1) % 2 == 0),
    rule!("row-greater", "Row > Column", "Correct if row number is greater than column number.",
        |r, c, n| r > c),
    rule!("upper-triangle", "Upper Triangle", "Correct if tile is above main diagonal.",
        |r, c, n| r < c),
    rule!("lower-triangle", "Lower Triangle", "Correct if tile is below main diagonal.",
        |r, c, n| r > c),
    rule!("near-diagonal", "Near Diagonal", "Correct if tile is on or near the main diagonal.",
        |r, c, n| r.abs_diff(c) <= 1),
    rule!("outer-ring", "Outer Ring", "Correct if tile is on the outer ring.",
        |r, c, n| r == 0 || c == 0 || r == n - 1 || c == n - 1),
    rule!("inner-ring", "Inner Ring", "Correct if tile is one step in from the outer ring.",
        |r, c, n| r == 1 || c == 1 || r + 2 == n || c + 2 == n),
    rule!("sum-multiple-3", "Sum Multiple of 3", "Correct if row+column divisible by 3.",
        |r, c, n| ((r + 1) + (c + 1)) % 3 == 0),
    rule!("sum-multiple-4", "Sum Multiple of 4", "Correct if row+column divisible by 4.",
        |r, c, n| ((r + 1) + (c + 1)) % 4 == 0),
    rule!("prime-row", "Prime Row", "Correct if row number is prime.",
        |r, c, n| is_prime(r + 1)),
    rule!("prime-column", "Prime Column", "Correct if column number is prime.",
        |r, c, n| is_prime(c + 1)),
    rule!("2x2-checker", "2×2 Blocks", "Checkerboard pattern in 2x2 blocks.",
        |r, c, n| (r / 2) % 2 == (c / 2) % 2),
    rule!("row-col-parity", "Same Parity", "Correct if row and column have the same parity.",
        |r, c, n| (r + 1) % 2 == (c + 1) % 2),
    rule!("distance-2", "Distance ≥ 2", "Correct if row and column differ by at least 2.",
        |r, c, n| r.abs_diff(c) >= 2),
];

pub static HARD_RULES: &[Rule] = &[
    rule!("prime-sum", "Prime Sum", "Correct if row+column is prime.",
        |r, c, n| is_prime((r + 1) + (c + 1))),
    rule!("fibonacci-sum", "Fibonacci Sum", "Correct if row+column is Fibonacci.",
        |r, c, n| is_fibonacci((r + 1) + (c + 1))),
    rule!("coprime", "Coprime", "Correct if row and column are coprime.",
        |r, c, n| gcd(r + 1, c + 1) == 1),
    rule!("center-cross", "Center Cross", "Correct if tile is in center row or column.",
        |r, c, n| r == n / 2 || c == n / 2),
    rule!("diamond", "Diamond", "Correct if tile is in a diamond shape from center.",
        |r, c, n| r.abs_diff(n / 2) + c.abs_diff(n / 2) <= 2),
    rule!("manhattan-3", "Manhattan = 3", "Correct if Manhattan distance from center is 3.",
        |r, c, n| r.abs_diff(n / 2) + c.abs_diff(n / 2) == 3),
    rule!("xor-parity", "XOR Parity", "Correct if row and column have opposite parity.",
        |r, c, n| (r + 1) % 2 != (c + 1) % 2),
    rule!("row-mod-4", "Row mod 4", "Correct if row mod 4 equals column mod 4.",
        |r, c, n| (r + 1) % 4 == (c + 1) % 4),
    rule!("outer-two-rings", "Outer Two Rings", "Correct if tile is in the two outermost rings.",
        |r, c, n| r <= 1 || c <= 1 || r + 2 >= n || c + 2 >= n),
    rule!("center-square", "Center 3×3", "Correct if tile is in the 3x3 center square.",
        |r, c, n| r.abs_diff(n / 2) <= 1 && c.abs_diff(n / 2) <= 1),
    rule!("sum-greater-10", "Large Sum", "Correct if row+column > 10.",
        |r, c, n| (r + 1) + (c + 1) > 10),
    rule!("row-times-col-even", "Product Even", "Correct if row*column is even.",
        |r, c, n| ((r + 1) * (c + 1)) % 2 == 0),
    rule!("row-times-col-prime", "Product Prime", "Correct if row*column is prime.",
        |r, c, n| is_prime((r + 1) * (c + 1))),
    rule!("knight-like", "Knight-ish", "Correct if |row-col| = 2.",
        |r, c, n| r.abs_diff(c) == 2),
    rule!("mod-3-opposite", "Opposite mod 3", "Correct if (row mod 3 + col mod 3) = 3.",
        |r, c, n| (r + 1) % 3 + (c + 1) % 3 == 3),
];

/// The tier's rule pool, fixed and ordered.
pub fn rules_for(difficulty: Difficulty) -> &'static [Rule] {
    match difficulty {
        Difficulty::Easy => EASY_RULES,
        Difficulty::Medium => MEDIUM_RULES,
        Difficulty::Hard => HARD_RULES,
    }
}

/// All rules across tiers, in catalog order (easy, medium, hard).
pub fn all_rules() -> impl Iterator<Item = &'static Rule> {
    EASY_RULES
        .iter()
        .chain(MEDIUM_RULES.iter())
        .chain(HARD_RULES.iter())
}

/// Catalog lookup by stable id. Stale ids resolve to `None`, not an error.
pub fn rule_by_id(id: &str) -> Option<&'static Rule> {
    all_rules().find(|rule| rule.id == id)
}
