//! Combining many outcomes into one.
//!
//! [`all`] succeeds only when every member does and otherwise reports every failure in
//! input order. [`any`] succeeds with the first member that does, preferring values
//! available now over ones still pending. Neither ever panics; partial failure is
//! always encoded in the returned outcome.

use futures::{future::FutureExt, stream::FuturesUnordered, StreamExt};

use crate::{
    outcome::State,
    payload::{join_payloads, Payload},
    Outcome,
};

/// Success with every value if all members succeed, otherwise failure with every error.
///
/// Tracks that are already known decide the result immediately; pending payloads are
/// joined in order. An unsettled member makes the result unsettled.
///
/// ```
/// use outcome::{all, Outcome};
///
/// let ok = all([Outcome::<i32, &str>::success(1), Outcome::success(2)]);
/// assert_eq!(ok.ready(), Some(Ok(vec![1, 2])));
///
/// let err = all([Outcome::success(1), Outcome::failure("a"), Outcome::failure("b")]);
/// assert_eq!(err.ready(), Some(Err(vec!["a", "b"])));
/// ```
pub fn all<T, E, I>(outcomes: I) -> Outcome<Vec<T>, Vec<E>>
where
    T: Clone + 'static,
    E: Clone + 'static,
    I: IntoIterator<Item = Outcome<T, E>>,
{
    let (successes, failures) = match partition(outcomes.into_iter().collect()) {
        Ok(split) => split,
        Err(members) => {
            tracing::trace!(members = members.len(), "all: waiting on unsettled members");
            return Outcome::from_future(async move {
                let settled = futures::future::join_all(members.into_iter().map(Outcome::resolve)).await;
                all(settled)
            });
        }
    };

    if failures.is_empty() {
        Outcome::from_success(join_payloads(successes))
    } else {
        tracing::trace!(failures = failures.len(), "all: members failed");
        Outcome::from_failure(join_payloads(failures))
    }
}

/// The first successful member, or failure with every error if none succeeds.
///
/// A member whose success is available now wins over any pending member, in input
/// order. Otherwise pending members race and the first to settle successfully wins.
///
/// ```
/// use outcome::{any, Outcome};
///
/// let first = any([Outcome::failure("a"), Outcome::success(2), Outcome::success(3)]);
/// assert_eq!(first.ready(), Some(Ok(2)));
///
/// let none = any(Vec::<Outcome<i32, &str>>::new());
/// assert_eq!(none.ready(), Some(Err(vec![])));
/// ```
pub fn any<T, E, I>(outcomes: I) -> Outcome<T, Vec<E>>
where
    T: Clone + 'static,
    E: Clone + 'static,
    I: IntoIterator<Item = Outcome<T, E>>,
{
    let mut members: Vec<Outcome<T, E>> = outcomes.into_iter().collect();

    if let Some(i) = members.iter().position(|m| m.success_ref().is_some()) {
        return members.swap_remove(i).map_err(|e| vec![e]);
    }

    let (successes, failures) = match partition(members) {
        Ok(split) => split,
        Err(members) => {
            tracing::trace!(members = members.len(), "any: racing unsettled members");
            return Outcome::from_future(race(members));
        }
    };

    if successes.is_empty() {
        tracing::trace!(failures = failures.len(), "any: no member succeeded");
        return Outcome::from_failure(join_payloads(failures));
    }

    let racers: Vec<_> = successes
        .into_iter()
        .map(|p| p.settle().boxed_local())
        .collect();
    Outcome::success_from_future(async move { futures::future::select_all(racers).await.0 })
}

/// Split members by track, or hand them back if any track is still unknown.
#[allow(clippy::type_complexity)]
fn partition<T, E>(
    members: Vec<Outcome<T, E>>,
) -> Result<(Vec<Payload<T>>, Vec<Payload<E>>), Vec<Outcome<T, E>>> {
    if members.iter().any(Outcome::is_unsettled) {
        return Err(members);
    }

    let mut successes = Vec::with_capacity(members.len());
    let mut failures = Vec::new();
    for member in members {
        match member.state {
            State::Success(p) => successes.push(p),
            State::Failure(p) => failures.push(p),
            State::Unsettled(_) => {}
        }
    }
    Ok((successes, failures))
}

/// Resolve every member concurrently, returning the first success to settle.
async fn race<T, E>(members: Vec<Outcome<T, E>>) -> Outcome<T, Vec<E>>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    let mut failures: Vec<Option<E>> = vec![None; members.len()];
    let mut running: FuturesUnordered<_> = members
        .into_iter()
        .enumerate()
        .map(|(i, m)| async move { (i, m.resolve().await) })
        .collect();

    while let Some((i, settled)) = running.next().await {
        match settled.ready() {
            Some(Ok(v)) => return Outcome::success(v),
            Some(Err(e)) => failures[i] = Some(e),
            None => {}
        }
    }
    Outcome::failure(failures.into_iter().flatten().collect())
}
