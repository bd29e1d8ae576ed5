use crate::Price;
use std::collections::VecDeque;

/// Trailing window of the last `size` prices with a running sum.
///
/// The sum is kept over deviations from the first price ever added (the
/// "shift"), so a constant series sums to exactly zero and its mean is
/// exactly the constant.
///
/// Variance is recomputed from the held prices around the window mean on
/// every call. A running sum of squares would cancel catastrophically once
/// prices drift far from the shift.
#[derive(Clone, Debug)]
pub(crate) struct PriceWindow {
    size: usize,
    size_f64: f64,
    window: VecDeque<Price>,
    shift: Option<Price>,
    /// Sum of `price - shift` over the window.
    sum: f64,
}

impl PriceWindow {
    #[allow(clippy::cast_precision_loss)]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            size_f64: size as f64,
            window: VecDeque::with_capacity(size),
            shift: None,
            sum: 0.0,
        }
    }

    #[inline]
    pub fn add(&mut self, price: Price) {
        let shift = *self.shift.get_or_insert(price);

        if self.is_ready() {
            if let Some(old_price) = self.window.pop_front() {
                self.sum -= old_price - shift;
            }
        }

        self.window.push_back(price);
        self.sum += price - shift;
    }

    /// Arithmetic mean of the window, `None` until it is full.
    #[inline]
    pub fn mean(&self) -> Option<Price> {
        match self.shift {
            Some(shift) if self.is_ready() => Some(shift + self.sum / self.size_f64),
            _ => None,
        }
    }

    /// Population variance of the window, `None` until it is full.
    ///
    /// Two-pass: squared deviations are taken from [`mean`](Self::mean),
    /// so a constant window has a variance of exactly zero.
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let squared_deviations: f64 = self
            .window
            .iter()
            .map(|&price| {
                let deviation = price - mean;
                deviation * deviation
            })
            .sum();

        Some(squared_deviations / self.size_f64)
    }

    #[inline]
    fn is_ready(&self) -> bool {
        self.window.len() == self.size
    }
}
