//! Credential selection strategies.

use melies_core::{ApiKey, CredentialPool, SelectionStrategy};
use melies_interface::CredentialSelector;
use rand::seq::SliceRandom;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Picks a key uniformly at random for every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl CredentialSelector for RandomSelector {
    fn next_credential<'a>(&self, pool: &'a CredentialPool) -> Option<&'a ApiKey> {
        pool.keys().choose(&mut rand::thread_rng())
    }
}

/// Cycles through the pool in order.
///
/// # Examples
///
/// ```
/// use melies_core::CredentialPool;
/// use melies_interface::CredentialSelector;
/// use melies_models::RoundRobinSelector;
///
/// let pool = CredentialPool::from_env_value("a,b").unwrap();
/// let selector = RoundRobinSelector::default();
/// let picks: Vec<&str> = (0..3)
///     .map(|_| selector.next_credential(&pool).unwrap().expose())
///     .collect();
/// assert_eq!(picks, vec!["a", "b", "a"]);
/// ```
#[derive(Debug, Default)]
pub struct RoundRobinSelector {
    next: AtomicUsize,
}

impl CredentialSelector for RoundRobinSelector {
    fn next_credential<'a>(&self, pool: &'a CredentialPool) -> Option<&'a ApiKey> {
        if pool.is_empty() {
            return None;
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % pool.len();
        pool.get(index)
    }
}

/// Build the selector for a configured strategy.
pub fn selector_for(strategy: SelectionStrategy) -> Box<dyn CredentialSelector> {
    match strategy {
        SelectionStrategy::Random => Box::new(RandomSelector),
        SelectionStrategy::RoundRobin => Box::new(RoundRobinSelector::default()),
    }
}
