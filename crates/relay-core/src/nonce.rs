//! 서명용 nonce 생성기.
//!
//! 거래소는 현재 시각(epoch 밀리초)을 nonce로 받습니다. 벽시계 의존성을
//! `Clock` trait 뒤로 숨겨 테스트에서 시각을 고정할 수 있게 합니다.
//!
//! - [`ClockNonce`]: 현재 밀리초를 그대로 사용. 같은 밀리초 안의 두 호출은
//!   같은 nonce를 받습니다.
//! - [`MonotonicNonce`]: `max(now, last + 1)`로 프로세스 내에서 엄격히 증가.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use chrono::Utc;

// ============================================================================
// Clock
// ============================================================================

/// 밀리초 단위 시계.
pub trait Clock: Send + Sync {
    /// 현재 epoch 밀리초.
    fn now_millis(&self) -> u64;
}

/// 시스템 벽시계.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // epoch 이전 시각은 0으로 고정
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// 수동으로 조작하는 시계 (테스트용).
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    pub fn new(millis: u64) -> Self {
        Self {
            millis: AtomicU64::new(millis),
        }
    }

    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: u64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

// ============================================================================
// NonceSource
// ============================================================================

/// 서명 요청마다 nonce를 발급하는 생성기.
pub trait NonceSource: Send + Sync {
    /// 다음 nonce (10진수 문자열).
    fn next_nonce(&self) -> String;
}

/// 현재 epoch 밀리초를 그대로 nonce로 사용.
#[derive(Debug, Clone, Default)]
pub struct ClockNonce<C = SystemClock> {
    clock: C,
}

impl ClockNonce<SystemClock> {
    /// 시스템 시계 기반 생성기.
    pub fn system() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> ClockNonce<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> NonceSource for ClockNonce<C> {
    fn next_nonce(&self) -> String {
        self.clock.now_millis().to_string()
    }
}

/// 시계와 카운터를 결합한 엄격 증가 nonce.
///
/// 시계가 멈추거나 뒤로 가도 직전 값보다 1 이상 큰 값을 발급합니다.
#[derive(Debug, Default)]
pub struct MonotonicNonce<C = SystemClock> {
    clock: C,
    last: AtomicU64,
}

impl MonotonicNonce<SystemClock> {
    /// 시스템 시계 기반 생성기.
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> MonotonicNonce<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }

    fn next_value(&self) -> u64 {
        let now = self.clock.now_millis();
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

impl<C: Clock> NonceSource for MonotonicNonce<C> {
    fn next_nonce(&self) -> String {
        self.next_value().to_string()
    }
}

impl<N: NonceSource + ?Sized> NonceSource for Arc<N> {
    fn next_nonce(&self) -> String {
        (**self).next_nonce()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_nonce_uses_millis() {
        let nonce = ClockNonce::new(ManualClock::new(1_700_000_000_123));
        assert_eq!(nonce.next_nonce(), "1700000000123");
    }

    #[test]
    fn test_clock_nonce_collides_within_same_millisecond() {
        // 같은 밀리초에 발급된 두 nonce는 동일 (서명 방식의 알려진 약점)
        let nonce = ClockNonce::new(ManualClock::new(1_000));
        assert_eq!(nonce.next_nonce(), nonce.next_nonce());
    }

    #[test]
    fn test_monotonic_nonce_strictly_increasing() {
        let clock = Arc::new(ManualClock::new(1_000));
        let nonce = MonotonicNonce::new(Arc::clone(&clock));

        assert_eq!(nonce.next_nonce(), "1000");
        assert_eq!(nonce.next_nonce(), "1001");
        assert_eq!(nonce.next_nonce(), "1002");

        // 시계가 앞서 나가면 시계 값을 따라감
        clock.set(5_000);
        assert_eq!(nonce.next_nonce(), "5000");

        // 시계가 뒤로 가도 감소하지 않음
        clock.set(10);
        assert_eq!(nonce.next_nonce(), "5001");
    }

    #[test]
    fn test_monotonic_nonce_unique_across_threads() {
        let nonce = Arc::new(MonotonicNonce::new(ManualClock::new(42)));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let nonce = Arc::clone(&nonce);
                std::thread::spawn(move || {
                    (0..250).map(|_| nonce.next_nonce()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
        assert!(ClockNonce::system().next_nonce().chars().all(|c| c.is_ascii_digit()));
    }
}
