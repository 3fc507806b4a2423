use crate::domain::HttpProbe;
use crate::error::{PipelineError, Result};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Returned by [`retry`] once every attempt has failed.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub last_error: Option<E>,
}

/// Calls `op` up to `max_attempts` times, sleeping `interval` between attempts.
///
/// `op` receives the 1-based attempt number. Stops at the first `Ok`; there
/// is no sleep after the final failure.
pub fn retry<T, E, F>(
    max_attempts: u32,
    interval: Duration,
    mut op: F,
) -> std::result::Result<T, Exhausted<E>>
where
    F: FnMut(u32) -> std::result::Result<T, E>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e),
        }

        if attempt < max_attempts {
            thread::sleep(interval);
        }
    }

    Err(Exhausted {
        attempts: max_attempts,
        last_error,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessProbe {
    pub url: String,
    pub max_attempts: u32,
    pub interval: Duration,
}

pub struct ReadinessProber {
    probe: Arc<dyn HttpProbe>,
}

impl ReadinessProber {
    pub fn new(probe: Arc<dyn HttpProbe>) -> Self {
        Self { probe }
    }

    /// Blocks until `url` answers with a 2xx status or the attempt budget runs out.
    ///
    /// Connection failures and non-success statuses are retried alike.
    pub fn wait_until_ready(&self, target: &ReadinessProbe) -> Result<()> {
        let url = target.url.as_str();

        let outcome = retry(target.max_attempts, target.interval, |attempt| {
            match self.probe.get_status(url) {
                Ok(status) if (200..300).contains(&status) => Ok(status),
                Ok(status) => {
                    debug!("attempt {attempt}: {url} answered {status}");
                    info!("Waiting for service to be ready...");
                    Err(format!("status {status}"))
                }
                Err(e) => {
                    debug!("attempt {attempt}: {url} unreachable: {e:#}");
                    info!("Waiting for service to be ready...");
                    Err(format!("{e:#}"))
                }
            }
        });

        match outcome {
            Ok(_) => {
                info!("Service is ready.");
                Ok(())
            }
            Err(exhausted) => {
                if let Some(last) = &exhausted.last_error {
                    debug!("last readiness failure for {url}: {last}");
                }
                Err(PipelineError::ReadinessTimeout {
                    url: url.to_string(),
                    attempts: exhausted.attempts,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockProbe;
    use std::cell::Cell;
    use std::time::Instant;

    const URL: &str = "http://localhost:3000/swagger.v1.json";

    fn probe(max_attempts: u32) -> ReadinessProbe {
        ReadinessProbe {
            url: URL.into(),
            max_attempts,
            interval: Duration::ZERO,
        }
    }

    #[test]
    fn retry_stops_at_first_success() {
        let calls = Cell::new(0);
        let result: std::result::Result<u32, Exhausted<()>> =
            retry(5, Duration::ZERO, |attempt| {
                calls.set(calls.get() + 1);
                if attempt == 3 { Ok(attempt) } else { Err(()) }
            });

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn retry_gives_up_after_budget() {
        let calls = Cell::new(0);
        let result: std::result::Result<(), Exhausted<&str>> =
            retry(4, Duration::ZERO, |_| {
                calls.set(calls.get() + 1);
                Err("down")
            });

        let exhausted = result.unwrap_err();
        assert_eq!(exhausted.attempts, 4);
        assert_eq!(exhausted.last_error, Some("down"));
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn retry_sleeps_between_attempts_but_not_after_the_last() {
        let interval = Duration::from_millis(200);
        let started = Instant::now();

        let result: std::result::Result<(), Exhausted<()>> = retry(3, interval, |_| Err(()));

        let elapsed = started.elapsed();
        assert!(result.is_err());
        assert!(elapsed >= interval * 2, "waited only {elapsed:?}");
        assert!(elapsed < interval * 3, "slept after the final attempt: {elapsed:?}");
    }

    #[test]
    fn retry_with_zero_budget_never_calls() {
        let calls = Cell::new(0);
        let result: std::result::Result<(), Exhausted<()>> =
            retry(0, Duration::ZERO, |_| {
                calls.set(calls.get() + 1);
                Ok(())
            });

        assert!(result.is_err());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn ready_on_second_call_uses_two_attempts() {
        let mock = Arc::new(MockProbe::with_script(vec![
            Err("connection refused".into()),
            Ok(200),
        ]));
        let prober = ReadinessProber::new(mock.clone());

        prober.wait_until_ready(&probe(3)).unwrap();

        assert_eq!(mock.calls(), 2);
        assert_eq!(mock.urls(), vec![URL.to_string(), URL.to_string()]);
    }

    #[test]
    fn ready_on_attempt_k_stops_probing() {
        for k in 1..=5u32 {
            let mut script: Vec<std::result::Result<u16, String>> =
                (1..k).map(|_| Ok(503)).collect();
            script.push(Ok(204));
            let mock = Arc::new(MockProbe::with_script(script));
            let prober = ReadinessProber::new(mock.clone());

            prober.wait_until_ready(&probe(5)).unwrap();
            assert_eq!(mock.calls(), k as usize);
        }
    }

    #[test]
    fn never_ready_fails_after_exact_budget() {
        let mock = Arc::new(MockProbe::always(Err("connection refused".into())));
        let prober = ReadinessProber::new(mock.clone());

        let err = prober.wait_until_ready(&probe(7)).unwrap_err();

        assert!(matches!(err, PipelineError::ReadinessTimeout { attempts: 7, .. }));
        assert_eq!(mock.calls(), 7);
    }

    #[test]
    fn non_success_statuses_are_retried() {
        let mock = Arc::new(MockProbe::with_script(vec![Ok(404), Ok(500), Ok(302), Ok(200)]));
        let prober = ReadinessProber::new(mock.clone());

        prober.wait_until_ready(&probe(4)).unwrap();
        assert_eq!(mock.calls(), 4);
    }

    #[test]
    fn timeout_error_names_the_url() {
        let mock = Arc::new(MockProbe::always(Ok(503)));
        let prober = ReadinessProber::new(mock);

        let err = prober.wait_until_ready(&probe(2)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "http://localhost:3000/swagger.v1.json did not become ready after 2 attempt(s)"
        );
    }
}
