use std::fmt;

/// Tensor shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    #[inline]
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    #[inline]
    pub fn from_slice(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Element count. Tensors only hold shapes whose count fits in `usize`;
    /// use [`Shape::checked_numel`] for shapes from untrusted input.
    #[inline]
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Element count, or `None` when it overflows `usize`.
    #[inline]
    pub fn checked_numel(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// `(rows, cols)` for rank-2 shapes.
    #[inline]
    pub fn as_2d(&self) -> Option<(usize, usize)> {
        match self.dims.as_slice() {
            &[rows, cols] => Some((rows, cols)),
            _ => None,
        }
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::from_slice(dims)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}

/// Stride information for tensor layout, in elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stride {
    strides: Vec<usize>,
}

impl Stride {
    /// Row-major (C-contiguous) strides for `shape`.
    ///
    /// Saturates instead of overflowing; a saturated stride only occurs next
    /// to a zero-length axis, where it is never dereferenced.
    pub fn contiguous(shape: &Shape) -> Self {
        let dims = shape.dims();
        let mut strides = vec![1usize; dims.len()];

        for i in (0..dims.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1].saturating_mul(dims[i + 1]);
        }

        Self { strides }
    }

    /// Row-major strides for `shape`, or `None` if any stride overflows.
    pub fn checked_contiguous(shape: &Shape) -> Option<Self> {
        let dims = shape.dims();
        let mut strides = vec![1usize; dims.len()];

        for i in (0..dims.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1].checked_mul(dims[i + 1])?;
        }

        Some(Self { strides })
    }

    #[inline]
    pub(crate) fn from_vec(strides: Vec<usize>) -> Self {
        Self { strides }
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self, indices: &[usize]) -> usize {
        indices.iter().zip(&self.strides).map(|(i, s)| i * s).sum()
    }
}
