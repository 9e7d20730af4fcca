use crate::matrix::RatingMatrix;
use crate::neighbors::Neighbor;

use super::Aggregate;

/// Full scope: aggregate each neighbor's own row of the rating matrix.
///
/// Neighbors absent from `matrix` contribute nothing.
pub fn aggregate_full(matrix: &RatingMatrix, neighbors: &[Neighbor]) -> Aggregate {
    Aggregate::from_rows(
        neighbors
            .iter()
            .filter_map(|n| matrix.row(n.evaluation_id)),
    )
}
