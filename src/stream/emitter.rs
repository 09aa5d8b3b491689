//! The one-shot lazy sequence behind a stream.
//!
//! [`Emitter`] is an explicit state machine rather than a language-level
//! generator: a boxed produce-next closure plus an `exhausted` flag. Once
//! the closure reports the end, the emitter latches exhausted and never
//! invokes the closure again, so a well-behaved `None` is sticky even over
//! badly-behaved sources.
//!
//! Emitters are deliberately *not* restartable and *not* shareable: the
//! fork/drain bookkeeping that prevents two consumers from pulling the
//! same emitter lives in [`Stream`](super::Stream), which hands its
//! emitter out at most once.

/// A one-shot, pull-based lazy sequence.
///
/// Elements are computed on demand as they are pulled; nothing is
/// materialized eagerly. An emitter may be infinite — consumers that need
/// termination must stop pulling (`take`, `exists`, …).
///
/// # Examples
///
/// ```rust
/// use rivulet::stream::Emitter;
///
/// let mut countdown = 3;
/// let emitter = Emitter::from_fn(move || {
///     if countdown == 0 {
///         None
///     } else {
///         countdown -= 1;
///         Some(countdown)
///     }
/// });
/// let collected: Vec<i32> = emitter.collect();
/// assert_eq!(collected, vec![2, 1, 0]);
/// ```
pub struct Emitter<T: 'static> {
    /// Produces the next element, or `None` at the end of the sequence.
    produce: Box<dyn FnMut() -> Option<T>>,
    /// Latched once `produce` returns `None`.
    exhausted: bool,
}

impl<T> Emitter<T> {
    /// Creates an emitter from a produce-next closure.
    ///
    /// The closure is invoked once per pull until it returns `None`, after
    /// which it is never invoked again.
    #[must_use]
    pub fn from_fn<F>(produce: F) -> Self
    where
        F: FnMut() -> Option<T> + 'static,
    {
        Self {
            produce: Box::new(produce),
            exhausted: false,
        }
    }

    /// Creates an emitter that pulls from any iterable source.
    ///
    /// The source may be finite or infinite; the only requirement is the
    /// produce-next-or-signal-end contract of [`Iterator`].
    #[must_use]
    pub fn from_iterable<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let mut elements = source.into_iter();
        Self::from_fn(move || elements.next())
    }

    /// Creates an emitter that is exhausted from the start.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_fn(|| None)
    }

    /// Creates an emitter that yields a single element.
    #[must_use]
    pub fn once(element: T) -> Self {
        let mut slot = Some(element);
        Self::from_fn(move || slot.take())
    }

    /// Pulls the next element.
    ///
    /// Returns `None` once the sequence ends; the end is sticky.
    pub fn pull(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }
        match (self.produce)() {
            None => {
                self.exhausted = true;
                None
            }
            element => element,
        }
    }

    /// Returns `true` once the sequence has signaled its end.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<T> Iterator for Emitter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull()
    }
}

impl<T> std::fmt::Debug for Emitter<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Emitter")
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}
