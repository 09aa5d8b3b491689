//! Stream operations.
//!
//! Every combinator of [`Stream`](super::Stream) is built from the same
//! uniform shape: a free function that consumes one or more [`Emitter`]s
//! plus its specific parameters and produces a new emitter. Operations are
//! deterministic and side-effect-free apart from the consumption they
//! force, and they never pull more of the input than required to produce
//! the requested output increment — this is what lets `take`, `first` and
//! `exists` terminate on infinite sources.
//!
//! Any internal state (buffers, counters, discriminator memory) is local
//! to one invocation's produced emitter and never shared. The explicitly
//! buffering operations are [`chunks`], [`group_adjacent_by`] (window
//! assembly), [`intersperse`] (one-element lookahead) and
//! [`repeat`]/[`repeat_n`] (one full pass).

use super::Emitter;

/// Applies a function to every element.
pub(crate) fn map<T: 'static, U: 'static, F>(mut input: Emitter<T>, mut function: F) -> Emitter<U>
where
    F: FnMut(T) -> U + 'static,
{
    Emitter::from_fn(move || input.pull().map(&mut function))
}

/// Keeps only the elements that satisfy the predicate.
pub(crate) fn filter<T: 'static, P>(mut input: Emitter<T>, mut predicate: P) -> Emitter<T>
where
    P: FnMut(&T) -> bool + 'static,
{
    Emitter::from_fn(move || {
        loop {
            match input.pull() {
                None => return None,
                Some(element) if predicate(&element) => return Some(element),
                Some(_) => {}
            }
        }
    })
}

/// Replaces each element with the elements of a derived emitter.
pub(crate) fn flat_map<T: 'static, U: 'static, F>(mut input: Emitter<T>, mut function: F) -> Emitter<U>
where
    F: FnMut(T) -> Emitter<U> + 'static,
{
    let mut current: Option<Emitter<U>> = None;
    Emitter::from_fn(move || {
        loop {
            if let Some(inner) = &mut current {
                if let Some(element) = inner.pull() {
                    return Some(element);
                }
            }
            current = Some(function(input.pull()?));
        }
    })
}

/// Passes through at most `count` elements, pulling no further.
pub(crate) fn take<T: 'static>(mut input: Emitter<T>, count: usize) -> Emitter<T> {
    let mut remaining = count;
    Emitter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        remaining -= 1;
        input.pull()
    })
}

/// Passes elements through while the predicate holds, then stops pulling.
pub(crate) fn take_while<T: 'static, P>(mut input: Emitter<T>, mut predicate: P) -> Emitter<T>
where
    P: FnMut(&T) -> bool + 'static,
{
    let mut done = false;
    Emitter::from_fn(move || {
        if done {
            return None;
        }
        let element = input.pull()?;
        if predicate(&element) {
            Some(element)
        } else {
            done = true;
            None
        }
    })
}

/// Discards the first `count` elements.
pub(crate) fn skip<T: 'static>(mut input: Emitter<T>, count: usize) -> Emitter<T> {
    let mut remaining = count;
    Emitter::from_fn(move || {
        while remaining > 0 {
            remaining -= 1;
            input.pull()?;
        }
        input.pull()
    })
}

/// Discards elements while the predicate holds.
pub(crate) fn skip_while<T: 'static, P>(mut input: Emitter<T>, mut predicate: P) -> Emitter<T>
where
    P: FnMut(&T) -> bool + 'static,
{
    let mut skipping = true;
    Emitter::from_fn(move || {
        loop {
            let element = input.pull()?;
            if skipping && predicate(&element) {
                continue;
            }
            skipping = false;
            return Some(element);
        }
    })
}

/// Pulls both inputs in lockstep, stopping at the shorter one.
///
/// When the left input ends, the right one is not pulled again.
pub(crate) fn zip<T: 'static, U: 'static>(mut left: Emitter<T>, mut right: Emitter<U>) -> Emitter<(T, U)> {
    Emitter::from_fn(move || {
        let first = left.pull()?;
        let second = right.pull()?;
        Some((first, second))
    })
}

/// Alternates elements of the two inputs pairwise.
///
/// Elements are pulled a pair at a time; an unpaired trailing element of
/// the longer input is dropped, mirroring `zip`.
pub(crate) fn interleave<T: 'static>(mut left: Emitter<T>, mut right: Emitter<T>) -> Emitter<T> {
    let mut queued: Option<T> = None;
    Emitter::from_fn(move || {
        if let Some(element) = queued.take() {
            return Some(element);
        }
        let first = left.pull()?;
        let second = right.pull()?;
        queued = Some(second);
        Some(first)
    })
}

/// Buffers elements into materialized windows of at most `size` elements.
///
/// The final window may be shorter. `size` must be positive; the caller
/// enforces that contract.
pub(crate) fn chunks<T: 'static>(mut input: Emitter<T>, size: usize) -> Emitter<Vec<T>> {
    Emitter::from_fn(move || {
        let mut window = Vec::new();
        while window.len() < size {
            match input.pull() {
                None => break,
                Some(element) => window.push(element),
            }
        }
        if window.is_empty() { None } else { Some(window) }
    })
}

/// Buffers runs of adjacent elements with an equal discriminator value and
/// emits each run as a materialized window together with its key.
///
/// One element of lookahead is kept between windows: the element that
/// broke the previous run opens the next one.
pub(crate) fn group_adjacent_by<T: 'static, D, F>(
    mut input: Emitter<T>,
    mut discriminator: F,
) -> Emitter<(D, Vec<T>)>
where
    D: PartialEq + 'static,
    F: FnMut(&T) -> D + 'static,
{
    let mut lookahead: Option<(D, T)> = None;
    Emitter::from_fn(move || {
        let (key, opener) = match lookahead.take() {
            Some(pair) => pair,
            None => {
                let element = input.pull()?;
                let key = discriminator(&element);
                (key, element)
            }
        };
        let mut window = vec![opener];
        while let Some(element) = input.pull() {
            let candidate = discriminator(&element);
            if candidate == key {
                window.push(element);
            } else {
                lookahead = Some((candidate, element));
                break;
            }
        }
        Some((key, window))
    })
}

/// Inserts a separator between consecutive elements.
///
/// Needs one element of lookahead: a separator is emitted only once the
/// next element is known to exist.
pub(crate) fn intersperse<T>(mut input: Emitter<T>, separator: T) -> Emitter<T>
where
    T: Clone + 'static,
{
    let mut started = false;
    let mut queued: Option<T> = None;
    Emitter::from_fn(move || {
        if let Some(element) = queued.take() {
            return Some(element);
        }
        let element = input.pull()?;
        if started {
            queued = Some(element);
            Some(separator.clone())
        } else {
            started = true;
            Some(element)
        }
    })
}

/// Cycles the input's elements indefinitely.
///
/// The first pass streams the input lazily while buffering a copy; later
/// passes replay the buffer. An empty input stays empty.
pub(crate) fn repeat<T>(mut input: Emitter<T>) -> Emitter<T>
where
    T: Clone + 'static,
{
    let mut buffer: Vec<T> = Vec::new();
    let mut buffering = true;
    let mut position = 0;
    Emitter::from_fn(move || {
        if buffering {
            match input.pull() {
                Some(element) => {
                    buffer.push(element.clone());
                    return Some(element);
                }
                None => buffering = false,
            }
        }
        if buffer.is_empty() {
            return None;
        }
        let element = buffer[position].clone();
        position = (position + 1) % buffer.len();
        Some(element)
    })
}

/// Emits the input's elements `passes` times in total.
///
/// `passes == 0` yields an empty sequence without pulling the input.
pub(crate) fn repeat_n<T>(mut input: Emitter<T>, passes: usize) -> Emitter<T>
where
    T: Clone + 'static,
{
    let mut remaining = passes;
    let mut buffer: Vec<T> = Vec::new();
    let mut buffering = true;
    let mut position = 0;
    Emitter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        if buffering {
            match input.pull() {
                Some(element) => {
                    buffer.push(element.clone());
                    return Some(element);
                }
                None => {
                    buffering = false;
                    remaining -= 1;
                }
            }
        }
        loop {
            if remaining == 0 || buffer.is_empty() {
                return None;
            }
            if position < buffer.len() {
                let element = buffer[position].clone();
                position += 1;
                return Some(element);
            }
            position = 0;
            remaining -= 1;
        }
    })
}

/// Observes every element as it passes through.
pub(crate) fn tap<T: 'static, F>(mut input: Emitter<T>, mut observer: F) -> Emitter<T>
where
    F: FnMut(&T) + 'static,
{
    Emitter::from_fn(move || {
        let element = input.pull()?;
        observer(&element);
        Some(element)
    })
}
