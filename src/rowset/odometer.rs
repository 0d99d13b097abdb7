//! Multi-level position counter
//!
//! The row set walks its levels like an odometer with data-dependent digit
//! widths: the innermost level turns fastest and overflow carries into the
//! parent level. The width of a nested level depends on which parent is
//! selected, so after every carry the walk restarts from the outermost level
//! and recomputes every lower width from the new parent.
//!
//! A level whose width is zero is never a valid position; settling carries
//! straight past it.

/// Per-level indices of the current path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Odometer {
    indices: Vec<usize>,
}

impl Odometer {
    /// Creates an odometer with `levels` digits, all zero
    pub fn new(levels: usize) -> Self {
        Self {
            indices: vec![0; levels],
        }
    }

    /// Returns the number of levels
    pub fn levels(&self) -> usize {
        self.indices.len()
    }

    /// Returns the current path, outermost level first
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the index at `level`
    pub fn index(&self, level: usize) -> usize {
        self.indices[level]
    }

    /// Sets every level back to zero
    pub fn reset(&mut self) {
        self.indices.iter_mut().for_each(|index| *index = 0);
    }

    /// Steps the innermost level and settles onto the next valid path.
    ///
    /// Returns false once the outermost level overflows.
    pub fn advance<W>(&mut self, width: W) -> bool
    where
        W: Fn(usize, &[usize]) -> usize,
    {
        match self.indices.last_mut() {
            Some(innermost) => *innermost += 1,
            None => return false,
        }
        self.settle(width)
    }

    /// Carries overflowing levels until the path is valid.
    ///
    /// `width(level, indices)` returns the number of positions at `level`
    /// under the parents selected by `indices[..level]`. A valid current
    /// path is left untouched. Returns false once the outermost level
    /// overflows; the indices are then past the end and must be reset
    /// before reuse.
    pub fn settle<W>(&mut self, width: W) -> bool
    where
        W: Fn(usize, &[usize]) -> usize,
    {
        let mut level = 0;
        while level < self.indices.len() {
            if self.indices[level] < width(level, &self.indices) {
                level += 1;
                continue;
            }
            if level == 0 {
                return false;
            }

            self.indices[level..].iter_mut().for_each(|index| *index = 0);
            self.indices[level - 1] += 1;

            // Lower widths depend on the new parent.
            level = 0;
        }
        true
    }
}
