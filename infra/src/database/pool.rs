//! Lazily created, shared connection pool.
//!
//! `ConnectionManager` owns the one pool every request uses. The first caller
//! that finds no usable pool starts a connection attempt; callers that arrive
//! while it is in flight await the same attempt, so there is never more than
//! one physical connect running. A failed attempt is handed to all of its
//! waiters and then forgotten: the next call starts afresh.

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::InfrastructureError;

/// Opens and closes the pools managed by a [`ConnectionManager`]
#[async_trait]
pub trait PoolConnector: Send + Sync + 'static {
    /// Cheaply cloneable pool handle
    type Pool: Clone + Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Pool, InfrastructureError>;

    /// False once the pool has been closed and can no longer hand out connections
    fn is_open(&self, pool: &Self::Pool) -> bool;

    async fn close(&self, pool: Self::Pool);
}

type Attempt<P> = Shared<BoxFuture<'static, Result<P, Arc<InfrastructureError>>>>;

enum PoolState<P> {
    Idle,
    Connecting { generation: u64, attempt: Attempt<P> },
    Ready(P),
}

struct Inner<P> {
    state: PoolState<P>,
    generation: u64,
}

/// Single-flight guard around a lazily connected pool
pub struct ConnectionManager<C: PoolConnector> {
    connector: Arc<C>,
    inner: Mutex<Inner<C::Pool>>,
}

impl<C: PoolConnector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            inner: Mutex::new(Inner {
                state: PoolState::Idle,
                generation: 0,
            }),
        }
    }

    // Never held across an await.
    fn lock(&self) -> MutexGuard<'_, Inner<C::Pool>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the shared pool, connecting first if there is none
    ///
    /// # Returns
    /// * `Ok(pool)` - the current open pool
    /// * `Err(InfrastructureError::Connection)` - the connection attempt this
    ///   call waited on failed
    pub async fn get_connection(&self) -> Result<C::Pool, InfrastructureError> {
        let (generation, attempt, stale) = {
            let mut inner = self.lock();
            match &inner.state {
                PoolState::Ready(pool) if self.connector.is_open(pool) => {
                    return Ok(pool.clone());
                }
                PoolState::Connecting { generation, attempt } => {
                    debug!(generation, "Joining in-flight connection attempt");
                    (*generation, attempt.clone(), None)
                }
                PoolState::Ready(_) | PoolState::Idle => {
                    let stale = match std::mem::replace(&mut inner.state, PoolState::Idle) {
                        PoolState::Ready(pool) => Some(pool),
                        _ => None,
                    };
                    inner.generation += 1;
                    let generation = inner.generation;
                    let connector = Arc::clone(&self.connector);
                    let attempt = async move { connector.connect().await.map_err(Arc::new) }
                        .boxed()
                        .shared();
                    inner.state = PoolState::Connecting {
                        generation,
                        attempt: attempt.clone(),
                    };
                    debug!(generation, "Starting connection attempt");
                    (generation, attempt, stale)
                }
            }
        };

        if let Some(pool) = stale {
            warn!("Connection pool was closed, replacing it");
            self.connector.close(pool).await;
        }

        let outcome = attempt.await;

        {
            let mut inner = self.lock();
            // A newer attempt or an explicit close() owns the state now.
            let current = matches!(
                inner.state,
                PoolState::Connecting { generation: g, .. } if g == generation
            );
            if current {
                inner.state = match &outcome {
                    Ok(pool) => PoolState::Ready(pool.clone()),
                    Err(_) => PoolState::Idle,
                };
            }
        }

        outcome.map_err(InfrastructureError::Connection)
    }

    /// True when an open pool is held
    pub fn is_connected(&self) -> bool {
        match &self.lock().state {
            PoolState::Ready(pool) => self.connector.is_open(pool),
            _ => false,
        }
    }

    /// Closes the current pool, if any, and returns to idle
    ///
    /// An attempt still in flight is awaited and the pool it produces is
    /// closed too; callers that were waiting on it receive that closed pool.
    pub async fn close(&self) {
        let previous = std::mem::replace(&mut self.lock().state, PoolState::Idle);
        let pool = match previous {
            PoolState::Ready(pool) => Some(pool),
            PoolState::Connecting { generation, attempt } => {
                debug!(generation, "Closing after in-flight connection attempt");
                attempt.await.ok()
            }
            PoolState::Idle => None,
        };
        if let Some(pool) = pool {
            self.connector.close(pool).await;
            info!("Connection pool closed");
        }
    }
}
