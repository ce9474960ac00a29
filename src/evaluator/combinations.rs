/// Iterator over every `K`-element index combination of `0..n`, in
/// lexicographic order. Used to pick five cards out of five, six or seven.
pub struct IndexCombinations<const K: usize> {
    n: usize,
    indices: [usize; K],
    done: bool,
}

impl<const K: usize> IndexCombinations<K> {
    pub fn new(n: usize) -> Self {
        let mut indices = [0; K];
        for (i, slot) in indices.iter_mut().enumerate() {
            *slot = i;
        }
        Self { n, indices, done: K > n }
    }
}

impl<const K: usize> Iterator for IndexCombinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find rightmost index that can be incremented
        let mut i = K;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - (K - i) {
                self.indices[i] += 1;
                for j in (i + 1)..K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(result)
    }
}
