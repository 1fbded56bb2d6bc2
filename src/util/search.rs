use std::collections::{BTreeSet, VecDeque};

use crate::util::agenda::Agenda;

/// Exploration of a graph given by a set of initial elements and a
/// successor function.  The traversal order is determined by the
/// `Agenda` implementation.
pub enum Search<A, I, F>
where
    A: Agenda<Item = I>,
    F: FnMut(&I) -> Vec<I>,
{
    /// Yields elements once per path that reaches them.
    All(A, F),
    /// Keeps the set of expanded elements and yields every element at
    /// most once.  This is the visited-set guard that makes the
    /// traversal terminate on cyclic graphs.
    Uniques(A, F, BTreeSet<I>),
}

impl<A, I, F> Search<A, I, F>
where
    A: Agenda<Item = I>,
    I: Ord,
    F: FnMut(&I) -> Vec<I>,
{
    pub fn uniques(self) -> Self {
        match self {
            Search::All(agenda, succ) | Search::Uniques(agenda, succ, _) => {
                Search::Uniques(agenda, succ, BTreeSet::new())
            }
        }
    }
}

impl<I, F> Search<Vec<I>, I, F>
where
    F: FnMut(&I) -> Vec<I>,
{
    /// Depth-first exploration with a `Vec` as agenda.
    pub fn depth_first<C>(init: C, successors: F) -> Self
    where
        C: IntoIterator<Item = I>,
    {
        Search::All(init.into_iter().collect(), successors)
    }
}

impl<I, F> Search<VecDeque<I>, I, F>
where
    F: FnMut(&I) -> Vec<I>,
{
    /// Breadth-first exploration with a `VecDeque` as agenda.
    pub fn breadth_first<C>(init: C, successors: F) -> Self
    where
        C: IntoIterator<Item = I>,
    {
        Search::All(init.into_iter().collect(), successors)
    }
}

impl<A, I, F> Iterator for Search<A, I, F>
where
    I: Clone + Ord,
    A: Agenda<Item = I>,
    F: FnMut(&I) -> Vec<I>,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        match *self {
            Search::All(ref mut agenda, ref mut succ) => {
                if let Some(item) = agenda.dequeue() {
                    for succ_item in (succ)(&item) {
                        agenda.enqueue(succ_item);
                    }
                    return Some(item);
                }
                None
            }

            Search::Uniques(ref mut agenda, ref mut succ, ref mut found) => {
                while let Some(item) = agenda.dequeue() {
                    if found.insert(item.clone()) {
                        for succ_item in (succ)(&item).into_iter().filter(|i| !found.contains(i)) {
                            agenda.enqueue(succ_item);
                        }
                        return Some(item);
                    }
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breadth_first_yields_nearer_elements_first() {
        let order: Vec<u8> = Search::breadth_first(vec![0u8], |&n| {
            if n < 5 {
                vec![2 * n + 1, 2 * n + 2]
            } else {
                Vec::new()
            }
        })
        .uniques()
        .collect();

        assert_eq!(order, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn uniques_terminates_on_cycles() {
        let reached: BTreeSet<u8> = Search::depth_first(vec![0u8], |&n| vec![(n + 1) % 3])
            .uniques()
            .collect();

        assert_eq!(reached, vec![0, 1, 2].into_iter().collect());
    }
}
