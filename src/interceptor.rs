use crate::common::Placeholder;
use crate::fn_log;
use crate::level::Level;
use crate::pattern::Pattern;
use crate::ports::provided::{Binding, Console as ConsoleTrait, KeyError};
use serde_json::Value;
use std::mem;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Which counter an [`expected`](Interceptor::expected) check reads.
///
/// `All` aggregates the other four. The legacy string keys parse via
/// [`FromStr`]; an unrecognized key is a [`KeyError`], not a silent false.
///
/// # Examples
///
/// ```
/// use console_intercept::Counter;
///
/// assert_eq!("handled".parse::<Counter>(), Ok(Counter::Handled));
/// assert_eq!("".parse::<Counter>(), Ok(Counter::All));
/// assert!("bogusKey".parse::<Counter>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    All,
    Errors,
    Handled,
    Matches,
    Unhandled,
}

impl FromStr for Counter {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Counter::All),
            "errors" => Ok(Counter::Errors),
            "handled" => Ok(Counter::Handled),
            "matches" => Ok(Counter::Matches),
            "unhandled" => Ok(Counter::Unhandled),
            other => Err(KeyError::UnknownCounter(other.to_string())),
        }
    }
}

/// Snapshot of an interceptor's tabulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    /// Number of patterns at install time.
    pub expected: usize,
    /// Intercepted calls that matched some pattern.
    pub handled: usize,
    /// Pattern matches observed, one per matching call. Equal to `handled`
    /// under first-match-wins.
    pub matches: usize,
    /// Intercepted calls that matched no pattern.
    pub unhandled: usize,
}

impl Counts {
    /// Total intercepted calls since install.
    pub fn total(&self) -> usize {
        self.handled + self.unhandled
    }
}

// Shared between the handle and the binding installed on the console.
struct Intercepted {
    patterns: Vec<Pattern>,
    counts: Counts,
    original: Binding,
}

/// Records one console level for the duration of a test.
///
/// Installing swaps the level's binding for a recording one and keeps the
/// displaced binding for restoration. Each intercepted call resolves its `%s`
/// placeholders, is tested against the expected patterns in order, and is
/// either suppressed (matched) or forwarded to the original binding so
/// unexpected messages stay visible in the test report.
///
/// One interceptor per level at a time; stacking a second captures the first
/// as its "original" and receives the calls until restored (last installed
/// wins). Restoring onto a console other than the one installed on is out of
/// contract.
///
/// # Examples
///
/// ```
/// use console_intercept::{Console, Counter, Interceptor, Level, Pattern};
/// use serde_json::json;
///
/// let mut console = Console::new();
/// let interceptor = Interceptor::install(
///     &mut console,
///     Level::Error,
///     vec![Pattern::regex(r"token .* expired").unwrap()],
/// );
///
/// console.error("token %s expired", &[json!("abc123")]);
///
/// assert!(interceptor.expected(Counter::Handled, None));
/// assert!(interceptor.expected(Counter::Unhandled, None)); // zero unexpected
/// interceptor.restore(&mut console);
/// ```
pub struct Interceptor {
    level: Level,
    state: Arc<Mutex<Intercepted>>,
}

impl Interceptor {
    /// Captures the current binding of `level` on `console` and installs the
    /// recording binding in its place. `counts.expected` is fixed here to
    /// `patterns.len()`; an explicitly empty list means zero expectations and
    /// every intercepted call counts as unhandled.
    pub fn install(
        console: &mut dyn ConsoleTrait,
        level: Level,
        patterns: Vec<Pattern>,
    ) -> Self {
        fn_log!("Interceptor", "install", level.as_str());

        let counts = Counts {
            expected: patterns.len(),
            ..Counts::default()
        };
        let state = Arc::new(Mutex::new(Intercepted {
            patterns,
            counts,
            // Placeholder until the swap below hands us the real binding
            original: Box::new(|_, _| {}),
        }));

        let hook: Binding = {
            let state = Arc::clone(&state);
            Box::new(move |message: &str, args: &[Value]| {
                Self::intercept(&state, message, args);
            })
        };
        let original = console.rebind(level, hook);
        state.lock().unwrap().original = original;

        Self { level, state }
    }

    /// Interception with the default expectation: a single catch-all pattern.
    pub fn catch_all(console: &mut dyn ConsoleTrait, level: Level) -> Self {
        Self::install(console, level, vec![Pattern::any()])
    }

    /// The level this interceptor is installed on.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Snapshot of the four counters.
    pub fn counts(&self) -> Counts {
        self.state.lock().unwrap().counts
    }

    /// Checks one counter against `threshold`, or against its implicit
    /// default when `threshold` is `None`: `expected` for `Errors`, `Handled`
    /// and `Matches`, zero for `Unhandled`. `Counter::All` is the logical AND
    /// of the four checks with `threshold` passed through.
    ///
    /// # Examples
    ///
    /// ```
    /// use console_intercept::{Console, Counter, Interceptor, Level, Pattern};
    ///
    /// let mut console = Console::new();
    /// let interceptor = Interceptor::install(
    ///     &mut console,
    ///     Level::Warn,
    ///     vec![Pattern::contains("deprecated"), Pattern::contains("retrying")],
    /// );
    ///
    /// console.warn("call to deprecated endpoint", &[]);
    /// console.warn("retrying in 2s", &[]);
    ///
    /// assert!(interceptor.expected(Counter::Matches, Some(2)));
    /// assert!(interceptor.expected(Counter::All, None)); // both expected, none missed
    /// interceptor.restore(&mut console);
    /// ```
    pub fn expected(&self, counter: Counter, threshold: Option<usize>) -> bool {
        let counts = self.counts();

        match counter {
            Counter::All => {
                self.expected(Counter::Errors, threshold)
                    && self.expected(Counter::Handled, threshold)
                    && self.expected(Counter::Matches, threshold)
                    && self.expected(Counter::Unhandled, threshold)
            }
            Counter::Errors => counts.total() == threshold.unwrap_or(counts.expected),
            Counter::Handled => counts.handled == threshold.unwrap_or(counts.expected),
            Counter::Matches => counts.matches == threshold.unwrap_or(counts.expected),
            // The observed contract: unhandled defaults to zero, not to `expected`
            Counter::Unhandled => counts.unhandled == threshold.unwrap_or(0),
        }
    }

    /// Moves the original binding back onto `console`. Consumes the
    /// interceptor, so restoring twice does not compile; the counters freeze
    /// at their final values inside the dropped recording binding.
    pub fn restore(self, console: &mut dyn ConsoleTrait) {
        fn_log!("Interceptor", "restore", self.level.as_str());

        let original = {
            let mut guard = self.state.lock().unwrap();
            mem::replace(&mut guard.original, Box::new(|_, _| {}))
        };

        // Dropping the displaced hook ends the interception
        let _hook = console.rebind(self.level, original);
    }

    fn intercept(state: &Mutex<Intercepted>, message: &str, args: &[Value]) {
        let mut guard = state.lock().unwrap();
        let st = &mut *guard;

        // 1. resolve positional placeholders
        let resolved = Placeholder::resolve(message, args);

        // 2. pattern order, first match wins
        let matched = st.patterns.iter().any(|p| p.matches(&resolved));

        // 3. matched: tabulate and suppress
        if matched {
            st.counts.matches += 1;
            st.counts.handled += 1;
        } else {
            // 4. unmatched: tabulate and forward the raw call; the receiving
            // binding resolves it the same way, so argument values containing
            // literal tokens survive the hop
            st.counts.unhandled += 1;
            (st.original)(message, args);
        }
    }
}
