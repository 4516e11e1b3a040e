use crate::{
    basic::Basic,
    error::{Error, Result},
    log::{debug, trace},
    parameter::Parameter,
    random::Random,
    settings::Settings,
    strategy::{Simplify, Strategy},
    RUN,
};
#[cfg(feature = "asynchronous")]
use crate::drive::{drive, Body, Pending, Resume, Step};
#[cfg(feature = "asynchronous")]
use core::{future::Future, marker::PhantomData};
use std::collections::HashSet;

/// Finds the simplest value of `strategy` for which `condition` holds.
///
/// Fails with [`Error::NoSuchExample`] when none of the drawn examples
/// satisfies `condition`.
pub fn find<S: Strategy, C: FnMut(S::Value) -> bool>(
    strategy: S,
    mut condition: C,
    settings: Settings,
) -> Result<S::Value> {
    let mut search = Search::new(strategy, settings);
    loop {
        match search.next()? {
            Next::Check(template) => {
                let satisfied = condition(search.strategy.reify(&template));
                search.record(template, satisfied);
            }
            Next::Found(template) => return Ok(search.strategy.reify(&template)),
            Next::Missing(examples) => return Err(Error::NoSuchExample { examples }),
        }
    }
}

/// The asynchronous counterpart of [`find`], where `condition` returns a
/// future.
///
/// A failure of a `condition` future aborts the search and is surfaced
/// unchanged.
#[cfg(feature = "asynchronous")]
pub fn find_async<S, C, F, E>(
    strategy: S,
    condition: C,
    settings: Settings,
) -> Pending<FindTask<S, C, E>>
where
    S: Strategy,
    C: FnMut(S::Value) -> F,
    F: Future<Output = Result<bool, E>> + 'static,
    E: From<Error>,
{
    find_async_with(strategy, condition, settings, drive)
}

/// Like [`find_async`], but hands the search to `driver` instead of
/// [`drive`].
#[cfg(feature = "asynchronous")]
pub fn find_async_with<S, C, E, D, O>(
    strategy: S,
    condition: C,
    settings: Settings,
    driver: D,
) -> O
where
    S: Strategy,
    D: FnOnce(FindTask<S, C, E>) -> O,
{
    driver(FindTask {
        search: Search::new(strategy, settings),
        condition,
        checking: None,
        _marker: PhantomData,
    })
}

/// The search behind [`find_async`], as a [`Body`].
#[cfg(feature = "asynchronous")]
pub struct FindTask<S: Strategy, C, E> {
    search: Search<S>,
    condition: C,
    checking: Option<S::Template>,
    _marker: PhantomData<fn() -> E>,
}

#[cfg(feature = "asynchronous")]
impl<S, C, F, E> Body for FindTask<S, C, E>
where
    S: Strategy,
    C: FnMut(S::Value) -> F,
    F: Future<Output = Result<bool, E>> + 'static,
    E: From<Error>,
{
    type Output = S::Value;
    type Resumed = bool;
    type Error = E;

    fn resume(&mut self, resume: Resume<bool, E>) -> Step<S::Value, bool, E> {
        match resume {
            Resume::Start => {}
            Resume::Value(satisfied) => {
                if let Some(template) = self.checking.take() {
                    self.search.record(template, satisfied);
                }
            }
            Resume::Fail(error) => return Step::Failed(error),
        }

        match self.search.next() {
            Ok(Next::Check(template)) => {
                let check = (self.condition)(self.search.strategy.reify(&template));
                self.checking = Some(template);
                Step::Pending(Box::pin(check))
            }
            Ok(Next::Found(template)) => Step::Return(self.search.strategy.reify(&template)),
            Ok(Next::Missing(examples)) => Step::Failed(Error::NoSuchExample { examples }.into()),
            Err(error) => Step::Failed(error.into()),
        }
    }
}

struct Search<S: Strategy> {
    strategy: S,
    settings: Settings,
    random: Random,
    parameter: Parameter,
    phase: Phase<S::Template>,
    // Every checked template, so that shrinking never cycles.
    seen: HashSet<Basic>,
}

enum Phase<T> {
    Generate {
        examples: usize,
    },
    Shrink {
        best: T,
        candidates: Simplify<T>,
        shrinks: usize,
    },
}

enum Next<T> {
    Check(T),
    Found(T),
    Missing(usize),
}

impl<S: Strategy> Search<S> {
    fn new(strategy: S, settings: Settings) -> Self {
        let mut random = Random::new(settings.seed);
        debug!("search with seed {}", random.seed());
        let parameter = strategy.draw(&mut random);
        Self {
            strategy,
            settings,
            random,
            parameter,
            phase: Phase::Generate { examples: 0 },
            seen: HashSet::new(),
        }
    }

    fn next(&mut self) -> Result<Next<S::Template>> {
        match &mut self.phase {
            Phase::Generate { examples } if *examples >= self.settings.examples => {
                debug!("no example found after {examples} examples");
                Ok(Next::Missing(*examples))
            }
            Phase::Generate { examples } => {
                if *examples > 0 && *examples % RUN == 0 {
                    self.parameter = self.strategy.draw(&mut self.random);
                }
                *examples += 1;
                let template = self
                    .strategy
                    .produce_template(&mut self.random, &self.parameter)?;
                Ok(Next::Check(template))
            }
            Phase::Shrink { shrinks, .. } if *shrinks >= self.settings.shrinks => {
                debug!("stop shrinking after {shrinks} shrinks");
                Ok(self.finish())
            }
            Phase::Shrink { candidates, .. } => {
                let (strategy, seen) = (&self.strategy, &mut self.seen);
                match candidates.find(|candidate| seen.insert(strategy.to_basic(candidate))) {
                    Some(candidate) => Ok(Next::Check(candidate)),
                    None => Ok(self.finish()),
                }
            }
        }
    }

    fn record(&mut self, template: S::Template, satisfied: bool) {
        if !satisfied {
            return;
        }
        match &mut self.phase {
            Phase::Generate { examples } => {
                debug!("found an example after {examples} examples");
                self.seen.insert(self.strategy.to_basic(&template));
                self.phase = Phase::Shrink {
                    candidates: self.strategy.simplify(&template),
                    best: template,
                    shrinks: 0,
                };
            }
            Phase::Shrink {
                best,
                candidates,
                shrinks,
            } => {
                *shrinks += 1;
                trace!("accept shrink #{shrinks}");
                *candidates = self.strategy.simplify(&template);
                *best = template;
            }
        }
    }

    fn finish(&mut self) -> Next<S::Template> {
        match &self.phase {
            Phase::Shrink { best, .. } => Next::Found(best.clone()),
            Phase::Generate { examples } => Next::Missing(*examples),
        }
    }
}
