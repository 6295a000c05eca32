//! Login attempt rate limiting.
//!
//! Attempts are counted per client IP in process memory, so limits reset
//! when the server restarts and are not shared between instances. Clients
//! whose quota has fully replenished are pruned periodically so the table
//! stays bounded by recent traffic.

use std::{
    fmt,
    net::{IpAddr, Ipv4Addr},
    num::NonZeroU32,
    sync::Arc,
    time::Duration,
};

use governor::{
    DefaultKeyedRateLimiter, Quota, RateLimiter,
    clock::{Clock as _, DefaultClock},
};
use salvo::{
    handler,
    http::header::RETRY_AFTER,
    prelude::{Depot, FlowCtrl, Request, Response, StatusError},
};
use tracing::{debug, warn};

/// Key shared by every request whose peer is not an IP socket.
const UNKNOWN_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Rejects requests with 429 once a client exceeds its per-minute quota.
#[derive(Clone)]
pub(crate) struct LoginRateLimit {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    clock: DefaultClock,
}

impl LoginRateLimit {
    pub(crate) fn per_minute(attempts: NonZeroU32) -> Self {
        Self::with_quota(Quota::per_minute(attempts))
    }

    fn with_quota(quota: Quota) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            clock: DefaultClock::default(),
        }
    }

    /// Number of clients currently holding limiter state.
    pub(crate) fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Drop clients whose quota has fully replenished.
    pub(crate) fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Prune stale clients every `period`. Runs until the task is dropped.
    pub(crate) async fn prune_every(self, period: Duration) {
        let mut ticker = tokio::time::interval(period);

        loop {
            ticker.tick().await;
            self.retain_recent();

            debug!(tracked_clients = self.tracked_clients(), "pruned login rate limit state");
        }
    }
}

impl fmt::Debug for LoginRateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRateLimit")
            .field("tracked_clients", &self.tracked_clients())
            .finish_non_exhaustive()
    }
}

#[handler]
impl LoginRateLimit {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let client = client_ip(req);

        if let Err(not_until) = self.limiter.check_key(&client) {
            let retry_after = not_until.wait_time_from(self.clock.now()).as_secs().max(1);

            warn!(%client, retry_after, "login rate limit exceeded");

            if let Err(source) = res.add_header(RETRY_AFTER, retry_after, true) {
                warn!("failed to set retry-after header: {source}");
            }

            res.render(StatusError::too_many_requests().brief("Too many login attempts"));
            ctrl.skip_rest();

            return;
        }

        ctrl.call_next(req, depot, res).await;
    }
}

fn client_ip(req: &Request) -> IpAddr {
    let addr = req.remote_addr();

    addr.as_ipv4()
        .map(|v4| IpAddr::V4(*v4.ip()))
        .or_else(|| addr.as_ipv6().map(|v6| IpAddr::V6(*v6.ip())))
        .unwrap_or(UNKNOWN_CLIENT)
}
