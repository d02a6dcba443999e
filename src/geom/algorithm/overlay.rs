use geo::{Area, BooleanOps, BoundingRect, Intersects, MultiPolygon, Rect};

use crate::geom::SourceId;

/// A disjoint overlay piece and the sources covering it (in insertion order).
pub(crate) type Piece = (MultiPolygon<f64>, Vec<SourceId>);

/// Split possibly-overlapping shapes into disjoint pieces, each tagged with
/// every source that covers it.
///
/// Sources are folded in one at a time: each existing piece is cut into the
/// part inside the new source and the part outside it, and whatever of the
/// source is not yet covered becomes a new piece. Pieces with area at or below
/// `min_area` are dropped as slivers.
pub(crate) fn overlay(shapes: &[(SourceId, MultiPolygon<f64>)], min_area: f64) -> Vec<Piece> {
    let keep = |shape: &MultiPolygon<f64>| !shape.0.is_empty() && shape.unsigned_area() > min_area;

    let mut pieces: Vec<Piece> = Vec::new();
    for (id, shape) in shapes {
        let Some(bounds) = shape.bounding_rect() else { continue };

        let mut remainder = shape.clone();
        let mut next = Vec::with_capacity(pieces.len() * 2 + 1);

        for (piece, sources) in pieces.drain(..) {
            if !overlaps(&bounds, &piece) {
                next.push((piece, sources));
                continue;
            }

            let inside = piece.intersection(shape);
            let outside = piece.difference(shape);
            remainder = remainder.difference(&piece);

            if keep(&inside) {
                let mut covering = sources.clone();
                covering.push(*id);
                next.push((inside, covering));
            }
            if keep(&outside) {
                next.push((outside, sources));
            }
        }

        if keep(&remainder) {
            next.push((remainder, vec![*id]));
        }
        pieces = next;
    }

    log::debug!("overlay of {} shapes produced {} pieces", shapes.len(), pieces.len());
    pieces
}

#[inline]
fn overlaps(bounds: &Rect<f64>, piece: &MultiPolygon<f64>) -> bool {
    piece.bounding_rect().is_some_and(|b| b.intersects(bounds))
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;

    fn square(x: f64, y: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: x, y: y), (x: x + size, y: y), (x: x + size, y: y + size), (x: x, y: y + size),
        ]])
    }

    fn sorted(mut pieces: Vec<Piece>) -> Vec<(Vec<u32>, f64)> {
        let mut out: Vec<(Vec<u32>, f64)> = pieces.drain(..)
            .map(|(shape, ids)| {
                let mut ids: Vec<u32> = ids.into_iter().map(|id| id.0).collect();
                ids.sort();
                (ids, shape.unsigned_area())
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    #[test]
    fn disjoint_shapes_pass_through() {
        let pieces = overlay(&[(SourceId(1), square(0.0, 0.0, 1.0)), (SourceId(2), square(5.0, 0.0, 1.0))], 0.0);
        let pieces = sorted(pieces);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].0, vec![1]);
        assert_eq!(pieces[1].0, vec![2]);
    }

    #[test]
    fn overlapping_squares_split_into_three() {
        // Two 2x2 squares overlapping in a 1x2 strip.
        let pieces = overlay(&[(SourceId(1), square(0.0, 0.0, 2.0)), (SourceId(2), square(1.0, 0.0, 2.0))], 0.0);
        let pieces = sorted(pieces);
        assert_eq!(pieces.len(), 3);

        assert_eq!(pieces[0].0, vec![1]);
        assert_eq!(pieces[1].0, vec![1, 2]);
        assert_eq!(pieces[2].0, vec![2]);
        for (_, area) in &pieces {
            assert!((area - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn nested_square_is_covered_by_both() {
        let pieces = overlay(&[(SourceId(1), square(0.0, 0.0, 4.0)), (SourceId(2), square(1.0, 1.0, 1.0))], 0.0);
        let pieces = sorted(pieces);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].0, vec![1]);
        assert!((pieces[0].1 - 15.0).abs() < 1e-9);
        assert_eq!(pieces[1].0, vec![1, 2]);
        assert!((pieces[1].1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn min_area_drops_slivers() {
        let pieces = overlay(&[(SourceId(1), square(0.0, 0.0, 2.0)), (SourceId(2), square(1.9, 0.0, 2.0))], 0.5);
        let pieces = sorted(pieces);
        assert!(pieces.iter().all(|(ids, _)| ids.len() == 1));
    }
}
