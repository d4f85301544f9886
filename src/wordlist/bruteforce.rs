use super::charset::Charset;

/// Every string of length `1..=max_length` over a charset, shortest first and
/// lexicographic (in charset order) within a length.
///
/// The space is index-addressable so disjoint shards can be handed to
/// separate workers without materialising the strings.
#[derive(Debug, Clone)]
pub struct BruteForceSpace {
    charset: Charset,
    max_length: usize,
    total: u64,
}

impl BruteForceSpace {
    pub fn new(charset: Charset, max_length: usize) -> Self {
        let base = charset.len() as u64;
        let mut total: u64 = 0;
        let mut width: u64 = 1;
        for _ in 0..max_length {
            width = width.saturating_mul(base);
            total = total.saturating_add(width);
        }
        Self { charset, max_length, total }
    }

    pub fn len(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The candidate at position `index`, or `None` past the end.
    pub fn get(&self, index: u64) -> Option<String> {
        if index >= self.total {
            return None;
        }
        let base = self.charset.len() as u64;
        let mut remaining = index;
        let mut length = 1usize;
        let mut width = base;
        while remaining >= width {
            remaining -= width;
            length += 1;
            width = width.saturating_mul(base);
        }

        let chars = self.charset.chars();
        let mut out = vec![chars[0]; length];
        for slot in out.iter_mut().rev() {
            *slot = chars[(remaining % base) as usize];
            remaining /= base;
        }
        Some(out.into_iter().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.total).filter_map(move |i| self.get(i))
    }
}
