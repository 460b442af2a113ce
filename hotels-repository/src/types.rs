//! Result types returned by repository queries.

use hotels_shared::Location;

/// A location returned by a filtered / sorted search.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMatch {
    pub location: Location,
    /// Approximate distance in kilometers, present when the search was sorted by distance.
    pub score: Option<f64>,
}
