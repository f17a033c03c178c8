use model::stop::{Stop, StopCollection};

pub use model::stop::TERMINUS_ID_THRESHOLD;

pub fn is_boardable(stop: &Stop) -> bool {
    !stop.is_terminus()
}

/// Drops termini, which can not report arrival times, keeping the relative
/// order of the remaining stops. An empty result means the destination has
/// no boardable stops.
pub fn filter_termini(stops: StopCollection) -> StopCollection {
    let total = stops.len();
    let boardable: StopCollection = stops.into_iter().filter(is_boardable).collect();
    if boardable.len() < total {
        log::debug!("removed {} terminus stops", total - boardable.len());
    }
    boardable
}

#[cfg(test)]
mod tests {
    use utility::{geo::Coordinate, id::Id};

    use super::*;

    fn stops(ids: &[u32]) -> StopCollection {
        ids.iter()
            .map(|&id| {
                Stop::new(
                    Id::new(id),
                    "1",
                    format!("Stop {}", id),
                    "Towards City",
                    Coordinate::new(-37.81, 144.96),
                )
            })
            .collect()
    }

    fn ids(stops: &[Stop]) -> Vec<u32> {
        stops.iter().map(|stop| stop.tram_tracker_id().raw()).collect()
    }

    #[test]
    fn removes_terminus_between_stops() {
        assert_eq!(ids(&filter_termini(stops(&[101, 8003, 205]))), vec![101, 205]);
    }

    #[test]
    fn removes_adjacent_termini() {
        let filtered = filter_termini(stops(&[101, 8000, 8001, 8002, 205, 8100]));
        assert_eq!(ids(&filtered), vec![101, 205]);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(ids(&filter_termini(stops(&[7999, 8000]))), vec![7999]);
    }

    #[test]
    fn only_termini_gives_empty_collection() {
        assert!(filter_termini(stops(&[8000, 8500, 9999])).is_empty());
        assert!(filter_termini(Vec::new()).is_empty());
    }

    #[test]
    fn keeps_duplicates_and_order() {
        assert_eq!(
            ids(&filter_termini(stops(&[300, 101, 300, 8001, 101]))),
            vec![300, 101, 300, 101]
        );
    }

    #[test]
    fn is_idempotent() {
        let once = filter_termini(stops(&[8004, 12, 8005, 47, 9000, 3]));
        let twice = filter_termini(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn never_longer_and_never_keeps_a_terminus() {
        let input = stops(&[1, 8000, 2, 8001, 8002, 3, 7999, 10000]);
        let filtered = filter_termini(input.clone());
        assert!(filtered.len() <= input.len());
        assert!(filtered
            .iter()
            .all(|stop| stop.tram_tracker_id().raw() < TERMINUS_ID_THRESHOLD));
    }
}
