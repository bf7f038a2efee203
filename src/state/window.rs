//! Price windows and the floor-advancement rule
//!
//! A window is one pass over the search API bounded below by a price floor.
//! The upstream serves a limited number of pages per filter, so whenever a
//! window hits that ceiling the crawl restarts at a higher floor, which the API
//! treats as a brand-new filter with a fresh page budget.

use std::fmt;

/// Amount added to the floor to make the upstream range filter exclusive
pub const PRICE_STEP: f64 = 0.01;

/// An optional exclusive lower price bound
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceWindow {
    floor: Option<f64>,
}

impl PriceWindow {
    /// Window starting at the cheapest product
    pub fn open() -> Self {
        Self { floor: None }
    }

    /// Window containing only products strictly above `floor`
    pub fn from_floor(floor: f64) -> Self {
        Self { floor: Some(floor) }
    }

    pub fn floor(&self) -> Option<f64> {
        self.floor
    }

    /// Value of the upstream `prc` filter, `None` for an open window
    ///
    /// The filter is inclusive on the server side, so the floor is nudged up
    /// by one cent: a floor of `149.99` becomes `"150.00-*"`.
    pub fn price_filter(&self) -> Option<String> {
        self.floor
            .map(|floor| format!("{:.2}-*", floor + PRICE_STEP))
    }
}

impl fmt::Display for PriceWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.floor {
            Some(floor) => write!(f, "{:.2} - ∞", floor),
            None => write!(f, "0 - ∞"),
        }
    }
}

/// How a window's page sequence ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEnd {
    /// A page came back empty: the catalog is exhausted
    Exhausted,

    /// The upstream refused the next page index for this filter
    CeilingHit,

    /// The cancellation token fired
    Cancelled,
}

/// Computes the floor of the window that follows a ceiling hit
///
/// Walks `prices` (the original prices of every collected product, in fetch
/// order) from the end and returns the first one strictly below
/// `last_price`. When no such price exists the same price is reused; this
/// relies on the upstream range filter being exclusive at that boundary.
///
/// # Example
///
/// ```
/// use price_ladder::state::next_floor;
///
/// assert_eq!(next_floor([10.0, 10.0, 9.0, 7.0, 7.0, 5.0], 7.0), 5.0);
/// assert_eq!(next_floor([5.0, 5.0, 5.0], 5.0), 5.0);
/// ```
pub fn next_floor<I>(prices: I, last_price: f64) -> f64
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: DoubleEndedIterator,
{
    prices
        .into_iter()
        .rev()
        .find(|price| *price < last_price)
        .unwrap_or(last_price)
}
