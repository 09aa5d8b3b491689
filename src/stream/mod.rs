//! Lazy, one-shot, pull-based streams.
//!
//! This module provides [`Stream`], a lazy sequence wrapper with a large
//! combinator algebra and a strict single-consumption discipline.
//!
//! # Overview
//!
//! A `Stream` wraps exactly one underlying lazy sequence (an [`Emitter`])
//! together with two flags:
//!
//! - `forked`: a combinator has already branched off this stream
//! - `drained`: the underlying sequence has been handed out for iteration
//!
//! Every combinator (`map`, `filter`, `zip`, …) follows the same recipe:
//! pull the emitter out of `self` (draining it), run the matching
//! operation from [`ops`], and wrap the operation's output emitter in a
//! brand-new stream (forking). Terminal operations (`fold`, `to_vec`,
//! `exists`, …) pull the emitter and consume it, fully or with early
//! exit. Either way the original stream object remains but is spent: a
//! second combinator or terminal call is a programming error and panics
//! with the [`StreamReuseError`] message immediately, instead of letting
//! two consumers silently interleave pulls on one sequence.
//!
//! Evaluation is single-threaded, cooperative and pull-based: suspension
//! happens only at the produce-next-element boundary, and each element's
//! transformation runs to completion before control returns. The only
//! operation that blocks on the real world is [`Stream::awake_every`].
//!
//! # Examples
//!
//! ```rust
//! use rivulet::stream::Stream;
//!
//! let total = Stream::emits(1..=4)
//!     .map(|element| element * 10)
//!     .filter(|element| element % 20 == 0)
//!     .fold(0, |accumulator, element| accumulator + element);
//! assert_eq!(total, 60);
//! ```
//!
//! Laziness makes infinite sources safe as long as a downstream stage
//! bounds the pull count:
//!
//! ```rust
//! use rivulet::stream::Stream;
//!
//! let sevens = Stream::constant(7).take(3).to_vec();
//! assert_eq!(sevens, vec![7, 7, 7]);
//! ```

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

use crate::error::StreamReuseError;
use crate::persistent::List;

mod emitter;
pub(crate) mod ops;
mod sink;

pub use emitter::Emitter;

/// A lazy, one-shot stream of elements.
///
/// See the [module documentation](self) for the consumption discipline.
///
/// # State machine
///
/// A stream starts `Fresh`. A combinator call moves it to `Forked` (and
/// drains it — handing off the sequence always drains the source); a
/// terminal call moves it to `Drained` directly. Both states are terminal
/// for the instance: any further combinator or terminal call panics with
/// a [`StreamReuseError`] message.
///
/// # Examples
///
/// ```rust
/// use rivulet::stream::Stream;
///
/// let doubled = Stream::emits([1, 2, 3]).map(|x| x * 2).to_vec();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub struct Stream<T: 'static> {
    /// The underlying lazy sequence; present until drained.
    emitter: RefCell<Option<Emitter<T>>>,
    /// A combinator has already branched off this stream.
    forked: Cell<bool>,
    /// The sequence has been handed out for its one-time pull.
    drained: Cell<bool>,
}

// =============================================================================
// Construction
// =============================================================================

impl<T> Stream<T> {
    /// Wraps an existing emitter in a fresh stream.
    ///
    /// This is the escape hatch for custom produce-next sources; most
    /// callers want [`Stream::emits`].
    #[must_use]
    pub fn from_emitter(emitter: Emitter<T>) -> Self {
        Self {
            emitter: RefCell::new(Some(emitter)),
            forked: Cell::new(false),
            drained: Cell::new(false),
        }
    }

    /// Creates a stream that yields a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// assert_eq!(Stream::emit(42).to_vec(), vec![42]);
    /// ```
    #[must_use]
    pub fn emit(element: T) -> Self {
        Self::from_emitter(Emitter::once(element))
    }

    /// Creates a stream over any finite or infinite iterable source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// assert_eq!(Stream::emits(1..=3).to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn emits<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_emitter(Emitter::from_iterable(source))
    }

    /// Creates a stream with no elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_emitter(Emitter::empty())
    }
}

impl<T: Clone> Stream<T> {
    /// Creates an infinite stream repeating one element.
    ///
    /// Must be bounded downstream (`take`, `exists`, …) before a fully
    /// consuming terminal is applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// assert_eq!(Stream::constant(7).take(3).to_vec(), vec![7, 7, 7]);
    /// ```
    #[must_use]
    pub fn constant(element: T) -> Self {
        Self::from_emitter(Emitter::from_fn(move || Some(element.clone())))
    }
}

impl Stream<i64> {
    /// Creates a half-open arithmetic progression
    /// `start, start + step, …` up to but excluding `stop_exclusive`.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// assert_eq!(Stream::range(0, 5, 1).to_vec(), vec![0, 1, 2, 3, 4]);
    /// assert_eq!(Stream::range(0, 10, 3).to_vec(), vec![0, 3, 6, 9]);
    /// ```
    #[must_use]
    pub fn range(start: i64, stop_exclusive: i64, step: i64) -> Self {
        assert!(step > 0, "Stream::range: step must be positive");
        let mut current = start;
        Self::from_emitter(Emitter::from_fn(move || {
            if current < stop_exclusive {
                let element = current;
                current += step;
                Some(element)
            } else {
                None
            }
        }))
    }
}

impl Stream<Duration> {
    /// Creates an infinite stream of cumulative elapsed times, sleeping
    /// for at least `period` before producing each element.
    ///
    /// This is the one wall-clock-dependent source in the crate: elements
    /// are real elapsed durations and are not reproducible across runs.
    #[must_use]
    pub fn awake_every(period: Duration) -> Self {
        let mut started: Option<Instant> = None;
        Self::from_emitter(Emitter::from_fn(move || {
            let start = *started.get_or_insert_with(Instant::now);
            std::thread::sleep(period);
            Some(start.elapsed())
        }))
    }
}

// =============================================================================
// Consumption bookkeeping
// =============================================================================

impl<T> Stream<T> {
    /// Returns `true` if a combinator has already branched off this
    /// stream.
    #[inline]
    #[must_use]
    pub fn is_forked(&self) -> bool {
        self.forked.get()
    }

    /// Returns `true` if the underlying sequence has been handed out.
    #[inline]
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.drained.get()
    }

    /// Hands out the underlying sequence for its one-time pull.
    ///
    /// # Panics
    ///
    /// Panics with the [`StreamReuseError`] message if the stream was
    /// already drained (directly or through a combinator).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// let stream = Stream::emits([1, 2]);
    /// let collected: Vec<i32> = stream.iter().collect();
    /// assert_eq!(collected, vec![1, 2]);
    /// assert!(stream.is_drained());
    /// ```
    #[must_use]
    pub fn iter(&self) -> Emitter<T> {
        self.consume("iter")
    }

    /// Takes the emitter out of this stream, marking it drained.
    fn consume(&self, operation_name: &'static str) -> Emitter<T> {
        if self.drained.get() {
            panic!("{}", StreamReuseError { operation_name });
        }
        self.drained.set(true);
        match self.emitter.borrow_mut().take() {
            Some(emitter) => emitter,
            None => unreachable!("Stream invariant: the emitter is present until drained"),
        }
    }

    /// Wraps an operation's output in a new stream, marking this one
    /// forked.
    fn fork<U: 'static>(&self, emitter: Emitter<U>, operation_name: &'static str) -> Stream<U> {
        if self.forked.get() {
            panic!("{}", StreamReuseError { operation_name });
        }
        self.forked.set(true);
        Stream::from_emitter(emitter)
    }
}

// =============================================================================
// Combinators
// =============================================================================
//
// Each combinator consumes the caller's sequence via `consume` and wraps
// the operation's output via `fork`, so the source stream is spent either
// way. All of them panic with the `StreamReuseError` message when called
// on a spent stream.

impl<T> Stream<T> {
    /// Applies a function to every element.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// let doubled = Stream::emits([1, 2, 3]).map(|x| x * 2).to_vec();
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn map<U: 'static, F>(&self, function: F) -> Stream<U>
    where
        F: FnMut(T) -> U + 'static,
    {
        let input = self.consume("map");
        self.fork(ops::map(input, function), "map")
    }

    /// Keeps only the elements that satisfy the predicate.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        let input = self.consume("filter");
        self.fork(ops::filter(input, predicate), "filter")
    }

    /// Replaces each element with the elements of a derived stream.
    ///
    /// The derived stream is itself drained as it is spliced in.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// let doubled = Stream::emits([1, 2])
    ///     .flat_map(|x| Stream::emits([x, x * 10]))
    ///     .to_vec();
    /// assert_eq!(doubled, vec![1, 10, 2, 20]);
    /// ```
    #[must_use]
    pub fn flat_map<U: 'static, F>(&self, mut function: F) -> Stream<U>
    where
        F: FnMut(T) -> Stream<U> + 'static,
    {
        let input = self.consume("flat_map");
        self.fork(
            ops::flat_map(input, move |element| function(element).consume("flat_map")),
            "flat_map",
        )
    }

    /// Passes through at most `count` elements.
    ///
    /// Never pulls the input past the requested count, so it is safe on
    /// infinite sources.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        let input = self.consume("take");
        self.fork(ops::take(input, count), "take")
    }

    /// Passes elements through while the predicate holds.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        let input = self.consume("take_while");
        self.fork(ops::take_while(input, predicate), "take_while")
    }

    /// Discards the first `count` elements.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn skip(&self, count: usize) -> Self {
        let input = self.consume("skip");
        self.fork(ops::skip(input, count), "skip")
    }

    /// Discards elements while the predicate holds.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn skip_while<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        let input = self.consume("skip_while");
        self.fork(ops::skip_while(input, predicate), "skip_while")
    }

    /// Pairs this stream's elements with another's, in lockstep.
    ///
    /// Stops at the shorter input; both streams are consumed.
    ///
    /// # Panics
    ///
    /// Panics if either stream was already consumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// let zipped = Stream::emits([1, 2, 3, 4])
    ///     .zip(&Stream::emits(["a", "b"]))
    ///     .to_vec();
    /// assert_eq!(zipped, vec![(1, "a"), (2, "b")]);
    /// ```
    #[must_use]
    pub fn zip<U: 'static>(&self, other: &Stream<U>) -> Stream<(T, U)> {
        let left = self.consume("zip");
        let right = other.consume("zip");
        self.fork(ops::zip(left, right), "zip")
    }

    /// Alternates this stream's elements with another's, pairwise.
    ///
    /// Stops at the shorter input; an unpaired trailing element is
    /// dropped. Both streams are consumed.
    ///
    /// # Panics
    ///
    /// Panics if either stream was already consumed.
    #[must_use]
    pub fn interleave(&self, other: &Self) -> Self {
        let left = self.consume("interleave");
        let right = other.consume("interleave");
        self.fork(ops::interleave(left, right), "interleave")
    }

    /// Buffers elements into materialized windows of at most `size`
    /// elements; the final window may be shorter.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero, or if this stream was already consumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// let windows = Stream::emits(1..=5).chunks(2).to_vec();
    /// assert_eq!(windows, vec![vec![1, 2], vec![3, 4], vec![5]]);
    /// ```
    #[must_use]
    pub fn chunks(&self, size: usize) -> Stream<Vec<T>> {
        assert!(size > 0, "Stream::chunks: chunk size must be positive");
        let input = self.consume("chunks");
        self.fork(ops::chunks(input, size), "chunks")
    }

    /// Buffers runs of adjacent elements with an equal discriminator
    /// value and emits each run as `(key, window)`.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// let runs = Stream::emits([1, 3, 2, 4, 5])
    ///     .group_adjacent_by(|element| element % 2 == 0)
    ///     .to_vec();
    /// assert_eq!(
    ///     runs,
    ///     vec![(false, vec![1, 3]), (true, vec![2, 4]), (false, vec![5])]
    /// );
    /// ```
    #[must_use]
    pub fn group_adjacent_by<D, F>(&self, discriminator: F) -> Stream<(D, Vec<T>)>
    where
        D: PartialEq + 'static,
        F: FnMut(&T) -> D + 'static,
    {
        let input = self.consume("group_adjacent_by");
        self.fork(
            ops::group_adjacent_by(input, discriminator),
            "group_adjacent_by",
        )
    }

    /// Observes every element as it passes through, unchanged.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn tap<F>(&self, observer: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        let input = self.consume("tap");
        self.fork(ops::tap(input, observer), "tap")
    }
}

impl<T: Clone> Stream<T> {
    /// Inserts a separator between consecutive elements.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// let separated = Stream::emits([1, 2, 3]).intersperse(0).to_vec();
    /// assert_eq!(separated, vec![1, 0, 2, 0, 3]);
    /// ```
    #[must_use]
    pub fn intersperse(&self, separator: T) -> Self {
        let input = self.consume("intersperse");
        self.fork(ops::intersperse(input, separator), "intersperse")
    }

    /// Cycles this stream's elements indefinitely.
    ///
    /// The first pass streams lazily while buffering; later passes replay
    /// the buffer. Must be bounded downstream.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn repeat(&self) -> Self {
        let input = self.consume("repeat");
        self.fork(ops::repeat(input), "repeat")
    }

    /// Emits this stream's elements `passes` times in total.
    ///
    /// `repeat_n(0)` is empty and does not pull the source.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn repeat_n(&self, passes: usize) -> Self {
        let input = self.consume("repeat_n");
        self.fork(ops::repeat_n(input, passes), "repeat_n")
    }
}

// =============================================================================
// Terminal reducers
// =============================================================================
//
// Terminals drain the stream. The fully consuming ones (`fold`, `every`,
// `drain`, `to_vec`, …) pull to exhaustion and must not be applied to an
// unbounded stream; the early-exit ones (`exists`, `first`, `find`) stop
// pulling as soon as the answer is determined, but still mark the stream
// drained.

impl<T> Stream<T> {
    /// Folds every element into an accumulator, consuming the stream
    /// fully.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rivulet::stream::Stream;
    ///
    /// let sum = Stream::emits(1..=4).fold(0, |accumulator, x| accumulator + x);
    /// assert_eq!(sum, 10);
    /// ```
    pub fn fold<B, F>(&self, init: B, function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.consume("fold").fold(init, function)
    }

    /// Folds the elements pairwise, using the first element as the seed.
    ///
    /// Returns `None` for an empty stream.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    pub fn reduce<F>(&self, function: F) -> Option<T>
    where
        F: FnMut(T, T) -> T,
    {
        self.consume("reduce").reduce(function)
    }

    /// Returns `true` if every element satisfies the predicate,
    /// consuming the stream fully.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    pub fn every<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        let mut holds = true;
        for element in self.consume("every") {
            if !predicate(&element) {
                holds = false;
            }
        }
        holds
    }

    /// Returns `true` as soon as any element satisfies the predicate.
    ///
    /// Stops pulling at the first match, so an infinite source is fine as
    /// long as a match exists. The stream is marked drained regardless.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    pub fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.consume("exists").any(|element| predicate(&element))
    }

    /// Pulls and returns the first element, if any.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    pub fn first(&self) -> Option<T> {
        self.consume("first").pull()
    }

    /// Pulls until an element satisfies the predicate and returns it.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    pub fn find<P>(&self, mut predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.consume("find").find(|element| predicate(element))
    }

    /// Consumes the stream fully and returns the last element, if any.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    pub fn last(&self) -> Option<T> {
        self.consume("last").last()
    }

    /// Consumes the stream fully and returns the number of elements.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    pub fn count(&self) -> usize {
        self.consume("count").count()
    }

    /// Consumes the stream fully, discarding every element.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    pub fn drain(&self) {
        for _ in self.consume("drain") {}
    }

    /// Consumes the stream fully into a `Vec`, in pull order.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.consume("to_vec").collect()
    }

    /// Consumes the stream fully into a persistent [`List`], preserving
    /// pull order.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    #[must_use]
    pub fn to_list(&self) -> List<T> {
        self.consume("to_list").collect()
    }
}

impl<T> std::fmt::Debug for Stream<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Stream")
            .field("forked", &self.forked.get())
            .field("drained", &self.drained.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_fresh_stream_flags() {
        let stream = Stream::emits([1, 2, 3]);
        assert!(!stream.is_forked());
        assert!(!stream.is_drained());
    }

    #[rstest]
    fn test_combinator_forks_and_drains_the_source() {
        let stream = Stream::emits([1, 2, 3]);
        let mapped = stream.map(|element| element + 1);
        assert!(stream.is_forked());
        assert!(stream.is_drained());
        assert!(!mapped.is_forked());
        assert!(!mapped.is_drained());
        assert_eq!(mapped.to_vec(), vec![2, 3, 4]);
    }

    #[rstest]
    fn test_terminal_drains_without_forking() {
        let stream = Stream::emits([1, 2, 3]);
        assert_eq!(stream.count(), 3);
        assert!(stream.is_drained());
        assert!(!stream.is_forked());
    }

    #[rstest]
    #[should_panic(expected = "Stream::map: stream already consumed")]
    fn test_second_combinator_panics() {
        let stream = Stream::emits([1, 2, 3]);
        let _kept = stream.filter(|element| element % 2 == 0);
        let _ = stream.map(|element| element + 1);
    }

    #[rstest]
    #[should_panic(expected = "Stream::iter: stream already consumed")]
    fn test_second_iter_panics() {
        let stream = Stream::emits([1, 2, 3]);
        let _first = stream.iter();
        let _second = stream.iter();
    }

    #[rstest]
    #[should_panic(expected = "Stream::fold: stream already consumed")]
    fn test_combinator_then_terminal_panics() {
        let stream = Stream::emits([1, 2, 3]);
        let _mapped = stream.map(|element| element + 1);
        let _ = stream.fold(0, |accumulator, element| accumulator + element);
    }

    #[rstest]
    #[should_panic(expected = "Stream::range: step must be positive")]
    fn test_range_rejects_non_positive_step() {
        let _ = Stream::range(0, 10, 0);
    }

    #[rstest]
    #[should_panic(expected = "Stream::chunks: chunk size must be positive")]
    fn test_chunks_rejects_zero_size() {
        let _ = Stream::emits([1, 2, 3]).chunks(0);
    }

    #[rstest]
    fn test_zip_consumes_both_streams() {
        let left = Stream::emits([1, 2]);
        let right = Stream::emits(["a", "b", "c"]);
        let zipped = left.zip(&right);
        assert!(right.is_drained());
        assert_eq!(zipped.to_vec(), vec![(1, "a"), (2, "b")]);
    }

    #[rstest]
    fn test_awake_every_produces_cumulative_elapsed() {
        let elapsed = Stream::awake_every(Duration::from_millis(1)).take(2).to_vec();
        assert_eq!(elapsed.len(), 2);
        assert!(elapsed[0] >= Duration::from_millis(1));
        assert!(elapsed[1] >= elapsed[0]);
    }

    #[rstest]
    fn test_to_list_bridges_to_persistent() {
        let list = Stream::range(1, 4, 1).to_list();
        let collected: Vec<i64> = list.iter().copied().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }
}
