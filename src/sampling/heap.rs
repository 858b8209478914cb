//! Binary heap primitives over a plain slice
//!
//! The reservoir keeps its samples in one `Vec` that is sometimes a heap and
//! sometimes sorted by value, so the heap operations work on the slice in place
//! instead of owning the storage like `BinaryHeap` does.
//!
//! `before(a, b)` returns true when `a` belongs closer to the top than `b`.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[inline]
fn sift_up<E, F>(heap: &mut [E], mut pos: usize, before: &F)
where
    F: Fn(&E, &E) -> bool,
{
    while pos > 0 {
        let parent = (pos - 1) / 2;
        if !before(&heap[pos], &heap[parent]) {
            break;
        }
        heap.swap(pos, parent);
        pos = parent;
    }
}

#[inline]
fn sift_down<E, F>(heap: &mut [E], mut pos: usize, before: &F)
where
    F: Fn(&E, &E) -> bool,
{
    let len = heap.len();
    loop {
        let left = 2 * pos + 1;
        if left >= len {
            break;
        }
        let right = left + 1;
        let child = if right < len && before(&heap[right], &heap[left]) {
            right
        } else {
            left
        };
        if !before(&heap[child], &heap[pos]) {
            break;
        }
        heap.swap(pos, child);
        pos = child;
    }
}

/// Rearrange `items` into a heap in O(n)
pub(crate) fn heapify<E, F>(items: &mut [E], before: &F)
where
    F: Fn(&E, &E) -> bool,
{
    for pos in (0..items.len() / 2).rev() {
        sift_down(items, pos, before);
    }
}

/// Push `item` onto an existing heap
pub(crate) fn push<E, F>(heap: &mut Vec<E>, item: E, before: &F)
where
    F: Fn(&E, &E) -> bool,
{
    heap.push(item);
    let last = heap.len() - 1;
    sift_up(heap, last, before);
}

/// Replace the top of a non-empty heap with `item` in a single sift.
///
/// Equivalent to a push followed by a pop when `item` does not itself belong
/// on top.
pub(crate) fn replace_top<E, F>(heap: &mut [E], item: E, before: &F) -> E
where
    F: Fn(&E, &E) -> bool,
{
    let evicted = core::mem::replace(&mut heap[0], item);
    sift_down(heap, 0, before);
    evicted
}

/// Check the heap property for every parent/child pair
pub(crate) fn is_heap<E, F>(items: &[E], before: &F) -> bool
where
    F: Fn(&E, &E) -> bool,
{
    (1..items.len()).all(|pos| !before(&items[pos], &items[(pos - 1) / 2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn min_first(a: &i32, b: &i32) -> bool {
        a < b
    }

    #[test]
    fn test_heapify() {
        let mut items = vec![9, 4, 7, 1, 8, 2, 6, 3, 5, 0];
        heapify(&mut items, &min_first);
        assert!(is_heap(&items, &min_first));
        assert_eq!(items[0], 0);
    }

    #[test]
    fn test_push_keeps_heap() {
        let mut heap = Vec::new();
        for v in [5, 3, 8, 1, 9, 2] {
            push(&mut heap, v, &min_first);
            assert!(is_heap(&heap, &min_first));
        }
        assert_eq!(heap[0], 1);
        assert_eq!(heap.len(), 6);
    }

    #[test]
    fn test_replace_top() {
        let mut heap = vec![4, 1, 7, 3];
        heapify(&mut heap, &min_first);

        let evicted = replace_top(&mut heap, 6, &min_first);
        assert_eq!(evicted, 1);
        assert!(is_heap(&heap, &min_first));
        assert_eq!(heap[0], 3);

        let mut rest: Vec<i32> = heap.clone();
        rest.sort();
        assert_eq!(rest, vec![3, 4, 6, 7]);
    }

    #[test]
    fn test_is_heap_detects_violation() {
        assert!(is_heap::<i32, _>(&[], &min_first));
        assert!(is_heap(&[1], &min_first));
        assert!(!is_heap(&[2, 1], &min_first));
    }
}
