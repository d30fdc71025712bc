//! Tests for constraint propagation and the pending-cell worklist

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use wavetile::algorithm::bitset::PatternBitset;
    use wavetile::algorithm::propagation::{Worklist, propagate};
    use wavetile::analysis::model::Model;
    use wavetile::spatial::Wave;
    use wavetile::spatial::topology::Topology;

    // Tests cells queue at most once while pending
    // Verified by removing the pending check from push
    #[test]
    fn test_worklist_deduplication() {
        let mut worklist = Worklist::new(5);

        worklist.push(2);
        worklist.push(4);
        worklist.push(2);

        assert_eq!(worklist.len(), 2);
        assert_eq!(worklist.pop(), Some(2));
        assert_eq!(worklist.pop(), Some(4));
        assert_eq!(worklist.pop(), None);
        assert!(worklist.is_empty());
    }

    // Tests popped cells may be queued again
    // Verified by leaving the pending bit set after pop
    #[test]
    fn test_worklist_requeue_after_pop() {
        let mut worklist = Worklist::new(3);

        worklist.push(1);
        assert_eq!(worklist.pop(), Some(1));

        worklist.push(1);
        assert_eq!(worklist.len(), 1);
        assert_eq!(worklist.pop(), Some(1));
    }

    // Tests out-of-range cells are never queued
    // Verified by growing the pending vector on demand
    #[test]
    fn test_worklist_out_of_range() {
        let mut worklist = Worklist::new(2);

        worklist.push(7);
        assert!(worklist.is_empty());
    }

    // Tests propagation cascades a collapse around the whole ring
    // Verified by revising only the direct successor of the seed
    #[test]
    fn test_propagate_cascades_around_ring() {
        let sample: Vec<char> = "AB".chars().collect();
        let model = Model::from_sequence(&sample, 2).expect("Failed to build model");
        let mut wave = Wave::full(Topology::Ring { cells: 4 }, model.catalog().len());

        wave.collapse_cell(0, 0);
        let contradiction = propagate(&mut wave, model.adjacency(), 0);

        assert_eq!(contradiction, None);
        assert!(wave.is_collapsed());
        for cell in 0..4 {
            assert_eq!(wave.collapsed_pattern(cell), Some(0));
        }
    }

    // Tests propagation narrows successors without over-restricting
    // Verified by intersecting with a single admitted pattern
    #[test]
    fn test_propagate_partial_narrowing() {
        let sample: Vec<char> = "AAB".chars().collect();
        let model = Model::from_sequence(&sample, 2).expect("Failed to build model");
        let mut wave = Wave::full(Topology::Ring { cells: 5 }, model.catalog().len());

        // Collapsing to AB narrows the successor to its admitted pair
        wave.collapse_cell(0, 1);
        let contradiction = propagate(&mut wave, model.adjacency(), 0);

        assert_eq!(contradiction, None);
        let successor = wave.domain(1).expect("Failed to read domain");
        assert_eq!(successor.to_vec(), vec![0, 1]);
        let unaffected = wave.domain(2).expect("Failed to read domain");
        assert_eq!(unaffected.count(), 3);
    }

    // Tests an unobserved full wave is already at the fixed point
    // Verified by forcing a removal on the seed's first revision
    #[test]
    fn test_propagate_full_wave_is_fixed_point() {
        let sample: Vec<char> = "AAXBBX".chars().collect();
        let model = Model::from_sequence(&sample, 2).expect("Failed to build model");
        let mut wave = Wave::full(Topology::Ring { cells: 6 }, model.catalog().len());

        let contradiction = propagate(&mut wave, model.adjacency(), 0);

        assert_eq!(contradiction, None);
        for domain in wave.domains() {
            assert_eq!(domain.count(), 6);
        }
    }

    // Tests re-running propagation at a fixed point changes nothing
    // Verified by forcing a removal on every revision pass
    #[test]
    fn test_propagate_is_idempotent() {
        let sample: Vec<char> = "AAB".chars().collect();
        let model = Model::from_sequence(&sample, 2).expect("Failed to build model");
        let mut wave = Wave::full(Topology::Ring { cells: 5 }, model.catalog().len());

        wave.collapse_cell(0, 1);
        let first = propagate(&mut wave, model.adjacency(), 0);
        assert_eq!(first, None);

        let before: Vec<Vec<usize>> = wave.domains().iter().map(PatternBitset::to_vec).collect();
        let second = propagate(&mut wave, model.adjacency(), 0);
        let after: Vec<Vec<usize>> = wave.domains().iter().map(PatternBitset::to_vec).collect();

        assert_eq!(second, None);
        assert_eq!(before, after);
    }

    // Tests propagation reports the cell whose domain empties
    // Verified by continuing past the first emptied domain
    #[test]
    fn test_propagate_reports_contradiction() {
        let sample: Vec<char> = "AB".chars().collect();
        let model = Model::from_sequence(&sample, 2).expect("Failed to build model");
        let mut wave = Wave::full(Topology::Ring { cells: 4 }, model.catalog().len());

        let mut conflicting = PatternBitset::new(2);
        conflicting.insert(1);
        wave.restrict(1, &conflicting);
        wave.collapse_cell(0, 0);

        let contradiction = propagate(&mut wave, model.adjacency(), 0);

        assert_eq!(contradiction, Some(1));
    }

    // Tests propagation floods all four grid directions
    // Verified by revising only horizontal neighbors
    #[test]
    fn test_propagate_grid_directions() {
        let sample =
            Array2::from_shape_vec((2, 2), vec![0usize, 1, 2, 3]).expect("Failed to build sample");
        let model = Model::from_grid(&sample, 2).expect("Failed to build model");
        let mut wave = Wave::full(Topology::Grid { rows: 3, cols: 3 }, model.catalog().len());

        // Collapse the center so reaching the corners needs two hops
        wave.collapse_cell(4, 0);
        let contradiction = propagate(&mut wave, model.adjacency(), 4);

        assert_eq!(contradiction, None);
        assert!(wave.is_collapsed());
        for cell in 0..9 {
            assert_eq!(wave.collapsed_pattern(cell), Some(0));
        }
    }

    // Tests out-of-range seeds leave the wave untouched
    // Verified by seeding the worklist unconditionally
    #[test]
    fn test_propagate_out_of_range_seed() {
        let sample: Vec<char> = "AB".chars().collect();
        let model = Model::from_sequence(&sample, 2).expect("Failed to build model");
        let mut wave = Wave::full(Topology::Ring { cells: 3 }, model.catalog().len());

        let contradiction = propagate(&mut wave, model.adjacency(), 9);

        assert_eq!(contradiction, None);
        for domain in wave.domains() {
            assert_eq!(domain.count(), 2);
        }
    }
}
