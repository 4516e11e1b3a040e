//! Driving suspendable test bodies to completion.
//!
//! Operations that complete immediately are resumed in a loop rather than by
//! recursion, so long chains of operations use constant stack.

use crate::log::trace;
use core::{
    fmt,
    future::Future,
    mem,
    pin::Pin,
    task::{Context, Poll},
};
use futures_lite::future::BoxedLocal;

/// An asynchronous operation a body waits on.
pub type Awaitable<R, E> = BoxedLocal<Result<R, E>>;

/// What a body is resumed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resume<R, E> {
    /// The first resumption.
    Start,
    /// The operation the body waited on succeeded.
    Value(R),
    /// The operation the body waited on failed; the body decides whether the
    /// failure is fatal.
    Fail(E),
}

/// What a body does after being resumed.
pub enum Step<T, R, E> {
    /// The body produced a value.
    Return(T),
    /// The body ran to its end without producing a value.
    Exhausted,
    Failed(E),
    /// The body waits on `Awaitable` before it can be resumed.
    Pending(Awaitable<R, E>),
}

/// How a driven body completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Value(T),
    Exhausted,
}

/// A suspendable computation.
pub trait Body {
    type Output;
    /// The result type of the operations the body waits on.
    type Resumed;
    type Error;

    fn resume(
        &mut self,
        resume: Resume<Self::Resumed, Self::Error>,
    ) -> Step<Self::Output, Self::Resumed, Self::Error>;
}

/// The future returned by [`drive`].
///
/// At most one operation is outstanding at any time. Dropping the future
/// drops the body and its outstanding operation.
pub struct Pending<B: Body> {
    body: B,
    state: State<B::Resumed, B::Error>,
    resumes: usize,
}

enum State<R, E> {
    Start,
    Waiting(Awaitable<R, E>),
    Done,
}

/// Drives `body` from its first resumption until it returns, is exhausted or
/// fails. A failure of the body is surfaced unchanged.
pub fn drive<B: Body>(body: B) -> Pending<B> {
    Pending {
        body,
        state: State::Start,
        resumes: 0,
    }
}

impl<B: Body> Pending<B> {
    /// The number of times the body was resumed with the result of an
    /// operation.
    pub const fn resumes(&self) -> usize {
        self.resumes
    }

    pub const fn body(&self) -> &B {
        &self.body
    }
}

impl<B: Body + Unpin> Future for Pending<B> {
    type Output = Result<Outcome<B::Output>, B::Error>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let mut resume = match mem::replace(&mut this.state, State::Done) {
            State::Start => Resume::Start,
            State::Waiting(awaitable) => match this.wait(awaitable, context) {
                Some(resume) => resume,
                None => return Poll::Pending,
            },
            State::Done => panic!("`Pending` polled after completion"),
        };

        loop {
            match this.body.resume(resume) {
                Step::Return(value) => return Poll::Ready(Ok(Outcome::Value(value))),
                Step::Exhausted => return Poll::Ready(Ok(Outcome::Exhausted)),
                Step::Failed(error) => return Poll::Ready(Err(error)),
                Step::Pending(awaitable) => match this.wait(awaitable, context) {
                    Some(next) => resume = next,
                    None => return Poll::Pending,
                },
            }
        }
    }
}

impl<B: Body> Pending<B> {
    fn wait(
        &mut self,
        mut awaitable: Awaitable<B::Resumed, B::Error>,
        context: &mut Context<'_>,
    ) -> Option<Resume<B::Resumed, B::Error>> {
        match awaitable.as_mut().poll(context) {
            Poll::Ready(result) => {
                self.resumes += 1;
                trace!("resume #{}", self.resumes);
                Some(match result {
                    Ok(value) => Resume::Value(value),
                    Err(error) => Resume::Fail(error),
                })
            }
            Poll::Pending => {
                self.state = State::Waiting(awaitable);
                None
            }
        }
    }
}

impl<B: Body + fmt::Debug> fmt::Debug for Pending<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Start => "Start",
            State::Waiting(_) => "Waiting",
            State::Done => "Done",
        };
        f.debug_struct("Pending")
            .field("body", &self.body)
            .field("state", &state)
            .field("resumes", &self.resumes)
            .finish()
    }
}

impl<T: fmt::Debug, R, E: fmt::Debug> fmt::Debug for Step<T, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Self::Exhausted => f.write_str("Exhausted"),
            Self::Failed(error) => f.debug_tuple("Failed").field(error).finish(),
            Self::Pending(_) => f.write_str("Pending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_lite::future::{block_on, yield_now, FutureExt};

    /// Counts down from `remaining`, waiting on one operation per step.
    struct Countdown {
        remaining: usize,
        seen: Vec<Resume<usize, String>>,
    }

    impl Body for Countdown {
        type Output = usize;
        type Resumed = usize;
        type Error = String;

        fn resume(&mut self, resume: Resume<usize, String>) -> Step<usize, usize, String> {
            self.seen.push(resume.clone());
            if let Resume::Fail(error) = resume {
                return Step::Failed(error);
            }
            match self.remaining.checked_sub(1) {
                Some(remaining) => {
                    self.remaining = remaining;
                    Step::Pending(async move { Ok::<_, String>(remaining) }.boxed_local())
                }
                None => Step::Return(self.seen.len()),
            }
        }
    }

    #[test]
    fn long_chains_of_ready_operations_do_not_recurse() {
        let pending = drive(Countdown {
            remaining: 100_000,
            seen: Vec::new(),
        });
        assert_eq!(block_on(pending), Ok(Outcome::Value(100_001)));
    }

    #[test]
    fn parked_operations_are_resumed_once() {
        struct Twice(usize);

        impl Body for Twice {
            type Output = &'static str;
            type Resumed = ();
            type Error = ();

            fn resume(&mut self, _: Resume<(), ()>) -> Step<&'static str, (), ()> {
                self.0 += 1;
                if self.0 > 2 {
                    Step::Exhausted
                } else {
                    Step::Pending(
                        async {
                            yield_now().await;
                            Ok::<_, ()>(())
                        }
                        .boxed_local(),
                    )
                }
            }
        }

        let mut pending = drive(Twice(0));
        let outcome = block_on(async {
            let outcome = (&mut pending).await;
            assert_eq!(pending.resumes(), 2);
            outcome
        });
        assert_eq!(outcome, Ok(Outcome::Exhausted));
    }
}
