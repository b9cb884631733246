//! Framework detection with caching and change notification

use crate::{Framework, PlatformConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Environment variable read by [`EnvFrameworkDetector::default`]
pub const FRAMEWORK_ENV_VAR: &str = "AMPLIFY_FRAMEWORK";

/// Source of the current framework classification
///
/// Implementations must be cheap to call: the user agent builder invokes
/// the detector on every build.
pub trait FrameworkDetector: Send + Sync {
    /// Classify the host environment
    fn detect(&self) -> Framework;

    /// Register a callback for changes in the detected framework
    ///
    /// Detectors whose answer never changes ignore the observer.
    fn observe_changes(&self, _observer: FrameworkObserver) {}
}

impl FrameworkDetector for Framework {
    fn detect(&self) -> Framework {
        *self
    }
}

impl<F> FrameworkDetector for F
where
    F: Fn() -> Framework + Send + Sync,
{
    fn detect(&self) -> Framework {
        self()
    }
}

/// Predicate deciding whether a framework is present
pub type Probe = Box<dyn Fn() -> bool + Send + Sync>;

/// Detector driven by an ordered table of probes
///
/// Probes run in insertion order and the first match wins. When nothing
/// matches, the browser probe picks between [`Framework::WebUnknown`] and
/// [`Framework::ServerSideUnknown`].
#[derive(Default)]
pub struct ProbeDetector {
    probes: Vec<(Framework, Probe)>,
    browser: Option<Probe>,
}

impl ProbeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a probe for `framework`
    pub fn probe<P>(mut self, framework: Framework, probe: P) -> Self
    where
        P: Fn() -> bool + Send + Sync + 'static,
    {
        self.probes.push((framework, Box::new(probe)));
        self
    }

    /// Set the probe used to choose the unknown fallback
    pub fn browser_probe<P>(mut self, probe: P) -> Self
    where
        P: Fn() -> bool + Send + Sync + 'static,
    {
        self.browser = Some(Box::new(probe));
        self
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl FrameworkDetector for ProbeDetector {
    fn detect(&self) -> Framework {
        if let Some((framework, _)) = self.probes.iter().find(|(_, probe)| probe()) {
            return *framework;
        }
        match &self.browser {
            Some(is_browser) if is_browser() => Framework::WebUnknown,
            _ => Framework::ServerSideUnknown,
        }
    }
}

impl std::fmt::Debug for ProbeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeDetector")
            .field(
                "probes",
                &self.probes.iter().map(|(fw, _)| *fw).collect::<Vec<_>>(),
            )
            .field("browser", &self.browser.is_some())
            .finish()
    }
}

/// Reads a variable by name
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Detector that reads the framework from an environment variable
///
/// The variable holds a framework name (`"React"`) or wire code (`"1"`).
/// Hosts embedding the library set it before the first call. Unset or
/// unparseable values yield the fallback.
#[derive(Clone)]
pub struct EnvFrameworkDetector {
    var: String,
    fallback: Framework,
    lookup: EnvLookup,
}

impl EnvFrameworkDetector {
    /// Detector over the process environment
    pub fn new(var: impl Into<String>, fallback: Framework) -> Self {
        Self::with_lookup(var, fallback, |name: &str| std::env::var(name).ok())
    }

    /// Detector over a custom variable source
    pub fn with_lookup<L>(var: impl Into<String>, fallback: Framework, lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            var: var.into(),
            fallback,
            lookup: Arc::new(lookup),
        }
    }
}

impl std::fmt::Debug for EnvFrameworkDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvFrameworkDetector")
            .field("var", &self.var)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl Default for EnvFrameworkDetector {
    fn default() -> Self {
        Self::new(FRAMEWORK_ENV_VAR, Framework::ServerSideUnknown)
    }
}

impl FrameworkDetector for EnvFrameworkDetector {
    fn detect(&self) -> Framework {
        (self.lookup)(&self.var)
            .and_then(|value| Framework::parse(value.trim()))
            .unwrap_or(self.fallback)
    }
}

/// Callback invoked when the detected framework changes
pub type FrameworkObserver = Arc<dyn Fn() + Send + Sync>;

/// Delays for the one-shot re-detection of unknown results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryTimings {
    pub ssr_reset_timeout: Duration,
    pub web_reset_timeout: Duration,
    pub prime_framework_delay: Duration,
}

impl From<&PlatformConfig> for RetryTimings {
    fn from(config: &PlatformConfig) -> Self {
        Self {
            ssr_reset_timeout: config.ssr_reset_timeout(),
            web_reset_timeout: config.web_reset_timeout(),
            prime_framework_delay: config.prime_framework_delay(),
        }
    }
}

impl Default for RetryTimings {
    fn default() -> Self {
        Self::from(&PlatformConfig::default())
    }
}

struct DetectionInner {
    detector: Box<dyn FrameworkDetector>,
    timings: RetryTimings,
    cache: Mutex<Option<Framework>>,
    observers: Mutex<Vec<FrameworkObserver>>,
    reset_triggered: AtomicBool,
}

/// Caching wrapper around a [`FrameworkDetector`]
///
/// The first [`detect`](Self::detect) runs the wrapped detector and caches
/// the answer. An unknown answer may simply mean the host framework had not
/// loaded yet, so when running inside a tokio runtime the detection schedules
/// a single re-detection:
///
/// ```text
/// detect() → Unknown ──reset timeout──▶ cache cleared ──prime delay──▶ detect() (final)
/// ```
///
/// Observers are notified on every fresh detection. The final detection
/// drains them, and observers registered after the re-detection was
/// triggered are ignored.
#[derive(Clone)]
pub struct FrameworkDetection {
    inner: Arc<DetectionInner>,
}

impl FrameworkDetection {
    /// Wrap `detector` with default retry timings
    pub fn new<D>(detector: D) -> Self
    where
        D: FrameworkDetector + 'static,
    {
        Self::with_timings(detector, RetryTimings::default())
    }

    pub fn with_timings<D>(detector: D, timings: RetryTimings) -> Self
    where
        D: FrameworkDetector + 'static,
    {
        Self {
            inner: Arc::new(DetectionInner {
                detector: Box::new(detector),
                timings,
                cache: Mutex::new(None),
                observers: Mutex::new(Vec::new()),
                reset_triggered: AtomicBool::new(false),
            }),
        }
    }

    /// Return the cached framework, detecting it first if needed
    pub fn detect(&self) -> Framework {
        // The reset flag only changes under the cache lock, so this read
        // matches the cache state the detection was made against.
        let (framework, fresh, final_detection) = {
            let mut cache = self.inner.cache.lock();
            match *cache {
                Some(framework) => (framework, false, false),
                None => {
                    let framework = self.inner.detector.detect();
                    *cache = Some(framework);
                    (framework, true, self.is_reset_triggered())
                }
            }
        };

        if fresh {
            self.notify_observers(framework, final_detection);
            if !final_detection {
                self.schedule_unknown_retry(framework);
            }
        }
        framework
    }

    /// The cached answer, without running detection
    pub fn cached(&self) -> Option<Framework> {
        *self.inner.cache.lock()
    }

    /// Register a framework change observer
    ///
    /// Ignored once the final re-detection has been triggered.
    pub fn observe<F>(&self, observer: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.add_observer(Arc::new(observer));
    }

    fn add_observer(&self, observer: FrameworkObserver) {
        if self.is_reset_triggered() {
            debug!("framework detection is final, ignoring observer");
            return;
        }
        self.inner.observers.lock().push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.lock().len()
    }

    pub fn clear_cache(&self) {
        *self.inner.cache.lock() = None;
    }

    /// Mark the next detection as final and clear the cache
    ///
    /// Returns `false` if the re-detection was already triggered.
    pub fn trigger_redetection(&self) -> bool {
        {
            let mut cache = self.inner.cache.lock();
            if self.inner.reset_triggered.swap(true, Ordering::SeqCst) {
                return false;
            }
            *cache = None;
        }
        debug!("triggering final framework re-detection");
        true
    }

    pub fn is_reset_triggered(&self) -> bool {
        self.inner.reset_triggered.load(Ordering::SeqCst)
    }

    fn notify_observers(&self, framework: Framework, final_detection: bool) {
        // Snapshot so callbacks run without the lock held
        let observers: Vec<FrameworkObserver> = if final_detection {
            std::mem::take(&mut *self.inner.observers.lock())
        } else {
            self.inner.observers.lock().clone()
        };

        debug!(
            framework = %framework,
            observers = observers.len(),
            final_detection,
            "framework detected"
        );

        for observer in observers {
            observer();
        }
    }

    fn schedule_unknown_retry(&self, framework: Framework) {
        let delay = match framework {
            Framework::ServerSideUnknown => self.inner.timings.ssr_reset_timeout,
            Framework::WebUnknown => self.inner.timings.web_reset_timeout,
            _ => return,
        };
        // Outside a runtime the unknown answer simply stays cached
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };

        let prime_delay = self.inner.timings.prime_framework_delay;
        let detection = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if !detection.trigger_redetection() {
                return;
            }
            tokio::time::sleep(prime_delay).await;
            detection.detect();
        });
    }
}

impl FrameworkDetector for FrameworkDetection {
    fn detect(&self) -> Framework {
        FrameworkDetection::detect(self)
    }

    fn observe_changes(&self, observer: FrameworkObserver) {
        self.add_observer(observer);
    }
}

impl std::fmt::Debug for FrameworkDetection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameworkDetection")
            .field("cached", &self.cached())
            .field("observers", &self.observer_count())
            .field("reset_triggered", &self.is_reset_triggered())
            .finish()
    }
}
