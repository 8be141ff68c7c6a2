//! Column partitioning of the grid across workers.
//!
//! Partition `i` of `n` covers the half-open column range
//! `[i * width / n, (i + 1) * width / n)`. Ranges differ in size by at
//! most one column, are disjoint, and cover `[0, width)`. Each node is
//! handed to the single partition whose range contains its `x`.
//! Partitions are computed once, before tick 0.

use std::ops::Range;

use cortex_core::{InputNode, ObservationNode};

use crate::config::{ConfigError, NodeKind};

/// One worker's share of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    index: usize,
    columns: Range<usize>,
    /// Owned observations tagged with their position in the caller's list.
    observations: Vec<(usize, ObservationNode)>,
    /// Positions of this partition's inputs in the shared input list.
    inputs: Vec<usize>,
}

impl Partition {
    /// Position of this partition (and its worker) in the partition list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The columns this partition computes.
    pub fn columns(&self) -> Range<usize> {
        self.columns.clone()
    }

    /// First column (inclusive).
    pub fn start_x(&self) -> usize {
        self.columns.start
    }

    /// One past the last column.
    pub fn end_x(&self) -> usize {
        self.columns.end
    }

    /// Whether column `x` belongs to this partition.
    pub fn contains(&self, x: usize) -> bool {
        self.columns.contains(&x)
    }

    /// Observations owned by this partition, with their original positions.
    pub fn observations(&self) -> &[(usize, ObservationNode)] {
        &self.observations
    }

    pub(crate) fn observations_mut(&mut self) -> &mut [(usize, ObservationNode)] {
        &mut self.observations
    }

    pub(crate) fn into_observations(self) -> Vec<(usize, ObservationNode)> {
        self.observations
    }

    /// Positions (in the full input list) of the inputs this partition injects.
    pub fn input_indices(&self) -> &[usize] {
        &self.inputs
    }
}

/// The column ranges for `workers` partitions of a `width`-column grid.
///
/// # Errors
///
/// `ZeroWorkers` if `workers == 0`; `TooManyWorkers` if `workers > width`.
pub fn column_ranges(width: usize, workers: usize) -> Result<Vec<Range<usize>>, ConfigError> {
    if workers == 0 {
        return Err(ConfigError::ZeroWorkers);
    }
    if workers > width {
        return Err(ConfigError::TooManyWorkers { workers, width });
    }
    let split = |i: usize| (i as u128 * width as u128 / workers as u128) as usize;
    Ok((0..workers).map(|i| split(i)..split(i + 1)).collect())
}

/// Split the grid into `workers` partitions and distribute the nodes.
///
/// Observations move into their owning partition; inputs stay in the shared
/// list and are referenced by position.
///
/// # Errors
///
/// Fails on an invalid worker count (see [`column_ranges`]) or a node whose
/// `x` is outside `[0, width)`.
pub fn partition(
    width: usize,
    workers: usize,
    observations: Vec<ObservationNode>,
    inputs: &[InputNode],
) -> Result<Vec<Partition>, ConfigError> {
    let ranges = column_ranges(width, workers)?;
    let owner = |x: usize| -> Option<usize> {
        let i = ranges.partition_point(|r| r.end <= x);
        (i < ranges.len()).then_some(i)
    };

    let mut parts: Vec<Partition> = ranges
        .iter()
        .enumerate()
        .map(|(index, columns)| Partition {
            index,
            columns: columns.clone(),
            observations: Vec::new(),
            inputs: Vec::new(),
        })
        .collect();

    for (index, node) in observations.into_iter().enumerate() {
        let Some(p) = owner(node.x()) else {
            return Err(ConfigError::NodeOutOfBounds {
                kind: NodeKind::Observation,
                index,
                x: node.x(),
                y: node.y(),
            });
        };
        parts[p].observations.push((index, node));
    }
    for (index, node) in inputs.iter().enumerate() {
        let Some(p) = owner(node.x()) else {
            return Err(ConfigError::NodeOutOfBounds {
                kind: NodeKind::Input,
                index,
                x: node.x(),
                y: node.y(),
            });
        };
        parts[p].inputs.push(index);
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_worker_spans_grid() {
        assert_eq!(column_ranges(7, 1).unwrap(), vec![0..7]);
    }

    #[test]
    fn uneven_split_differs_by_one() {
        assert_eq!(column_ranges(10, 3).unwrap(), vec![0..3, 3..6, 6..10]);
        assert_eq!(column_ranges(5, 5).unwrap(), vec![0..1, 1..2, 2..3, 3..4, 4..5]);
    }

    #[test]
    fn invalid_worker_counts() {
        assert_eq!(column_ranges(4, 0), Err(ConfigError::ZeroWorkers));
        assert_eq!(
            column_ranges(4, 5),
            Err(ConfigError::TooManyWorkers {
                workers: 5,
                width: 4
            })
        );
    }

    #[test]
    fn nodes_go_to_owning_partition() {
        let observations = vec![
            ObservationNode::new(9, 0, 1),
            ObservationNode::new(0, 0, 1),
            ObservationNode::new(3, 2, 1),
        ];
        let inputs = vec![InputNode::new(5, 1, vec![1.0]), InputNode::new(2, 0, vec![1.0])];
        let parts = partition(10, 3, observations, &inputs).unwrap();

        let owned: Vec<Vec<usize>> = parts
            .iter()
            .map(|p| p.observations().iter().map(|(i, _)| *i).collect())
            .collect();
        assert_eq!(owned, vec![vec![1], vec![2], vec![0]]);
        assert_eq!(parts[0].input_indices(), &[1]);
        assert_eq!(parts[1].input_indices(), &[0]);
        assert!(parts[2].input_indices().is_empty());
    }

    #[test]
    fn out_of_range_node_is_rejected() {
        let observations = vec![ObservationNode::new(4, 0, 1)];
        match partition(4, 2, observations, &[]) {
            Err(ConfigError::NodeOutOfBounds {
                kind: NodeKind::Observation,
                index: 0,
                ..
            }) => {}
            other => panic!("expected NodeOutOfBounds, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn ranges_cover_width_exactly_once(
            (width, workers) in (1usize..500).prop_flat_map(|w| (Just(w), 1..=w)),
        ) {
            let ranges = column_ranges(width, workers).unwrap();
            prop_assert_eq!(ranges.len(), workers);
            prop_assert_eq!(ranges[0].start, 0);
            prop_assert_eq!(ranges[workers - 1].end, width);
            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            let sizes: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
            let min = *sizes.iter().min().unwrap();
            let max = *sizes.iter().max().unwrap();
            prop_assert!(min >= 1);
            prop_assert!(max - min <= 1);
        }

        #[test]
        fn every_node_has_exactly_one_owner(
            (width, workers) in (1usize..64).prop_flat_map(|w| (Just(w), 1..=w)),
            xs in proptest::collection::vec(0usize..64, 0..32),
        ) {
            let observations: Vec<ObservationNode> = xs
                .iter()
                .filter(|&&x| x < width)
                .map(|&x| ObservationNode::new(x, 0, 1))
                .collect();
            let count = observations.len();
            let parts = partition(width, workers, observations, &[]).unwrap();
            let mut seen: Vec<usize> = parts
                .iter()
                .flat_map(|p| {
                    p.observations().iter().map(move |(i, node)| {
                        assert!(p.contains(node.x()));
                        *i
                    })
                })
                .collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..count).collect::<Vec<_>>());
        }
    }
}
