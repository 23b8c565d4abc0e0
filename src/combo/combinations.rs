//! Lexicographic k-combinations over a candidate pool.

/// Iterator over every `k`-element subset of `pool`, in lexicographic order of
/// positions. Each item keeps the pool's relative order.
///
/// `k == 0` yields a single empty combination; `k > pool.len()` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    pool: &'a [T],
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl<'a, T: Clone> Combinations<'a, T> {
    pub fn new(pool: &'a [T], k: usize) -> Self {
        Self {
            pool,
            indices: (0..k).collect(),
            started: false,
            done: k > pool.len(),
        }
    }

    fn advance(&mut self) -> bool {
        let n = self.pool.len();
        let k = self.indices.len();
        // rightmost index that can still move right
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.started && !self.advance() {
            self.done = true;
            return None;
        }
        self.started = true;
        Some(self.indices.iter().map(|&i| self.pool[i].clone()).collect())
    }
}

/// `n choose k`, saturating at `u64::MAX`.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    let mut acc: u64 = 1;
    for i in 0..k {
        // acc * (n - i) / (i + 1) stays integral at every step
        acc = match acc.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return u64::MAX,
        };
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_lexicographic_subsets() {
        let pool = ['a', 'b', 'c', 'd'];
        let combos: Vec<String> = Combinations::new(&pool, 2)
            .map(|c| c.into_iter().collect())
            .collect();
        assert_eq!(combos, ["ab", "ac", "ad", "bc", "bd", "cd"]);
    }

    #[test]
    fn edge_sizes() {
        let pool = [1, 2, 3];
        assert_eq!(Combinations::new(&pool, 0).collect::<Vec<_>>(), vec![Vec::<i32>::new()]);
        assert_eq!(Combinations::new(&pool, 3).collect::<Vec<_>>(), vec![vec![1, 2, 3]]);
        assert_eq!(Combinations::new(&pool, 4).count(), 0);
        assert_eq!(Combinations::<i32>::new(&[], 1).count(), 0);
    }

    #[test]
    fn count_matches_binomial() {
        let pool: Vec<u8> = (0..9).collect();
        for k in 0..=9 {
            assert_eq!(Combinations::new(&pool, k).count() as u64, binomial(9, k));
        }
        assert_eq!(binomial(3, 5), 0);
        assert_eq!(binomial(200, 100), u64::MAX);
    }
}
