//! All arithmetic operators are performed in a precision context.
//!
//! The context decides how many fractional digits the result of `+`, `-`, `*`, and `/` carries,
//! which truncature is applied to it, which algorithm computes it, and whether the operation is
//! recorded. Every thread has its own context. Temporary changes are made with a `Scope`, which
//! restores the previous context when it ends.

use crate::defs::{Error, DEFAULT_ALGORITHM_NAME};
use crate::num::BasedReal;
use core::cell::RefCell;
use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;
use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Rule giving the number of fractional digits of the result of an operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrecisionMode {
    /// Least precision of the two operands.
    Sci,
    /// Greatest precision of the two operands.
    Max,
    /// Exact result. Not supported.
    Full,
    /// Constant number of fractional digits.
    Fixed(usize),
}

impl PrecisionMode {
    /// Number of fractional digits of the result of an operation on `a` and `b`.
    ///
    /// ## Errors
    ///
    ///  - NotImplemented: the mode is `Full`.
    pub fn significant(&self, a: &BasedReal, b: &BasedReal) -> Result<usize, Error> {
        match self {
            PrecisionMode::Sci => Ok(a.significant().min(b.significant())),
            PrecisionMode::Max => Ok(a.significant().max(b.significant())),
            PrecisionMode::Full => Err(Error::NotImplemented("full precision mode")),
            PrecisionMode::Fixed(n) => Ok(*n),
        }
    }

    /// Name of the mode, or the number of digits for `Fixed`.
    pub fn name(&self) -> String {
        match self {
            PrecisionMode::Sci => "SCI".to_owned(),
            PrecisionMode::Max => "MAX".to_owned(),
            PrecisionMode::Full => "FULL".to_owned(),
            PrecisionMode::Fixed(n) => n.to_string(),
        }
    }
}

impl Default for PrecisionMode {
    fn default() -> Self {
        PrecisionMode::Max
    }
}

/// Truncature applied to the result of an operation once its precision is set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TruncatureMode {
    /// Keep the remainder.
    None,
    /// Round half away from zero.
    Round,
    /// Drop the remainder.
    Trunc,
    /// Round toward positive infinity.
    Ceil,
    /// Round toward negative infinity.
    Floor,
}

impl TruncatureMode {
    /// Applies the truncature to `n`.
    pub fn apply(&self, n: &BasedReal) -> Result<BasedReal, Error> {
        match self {
            TruncatureMode::None => Ok(n.clone()),
            TruncatureMode::Round => n.round(None),
            TruncatureMode::Trunc => Ok(n.truncate(None)),
            TruncatureMode::Ceil => n.ceil(None),
            TruncatureMode::Floor => n.floor(None),
        }
    }

    /// Name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            TruncatureMode::None => "NONE",
            TruncatureMode::Round => "ROUND",
            TruncatureMode::Trunc => "TRUNC",
            TruncatureMode::Ceil => "CEIL",
            TruncatureMode::Floor => "FLOOR",
        }
    }
}

impl Default for TruncatureMode {
    fn default() -> Self {
        TruncatureMode::None
    }
}

type AlgorithmFn = dyn Fn(&BasedReal, &BasedReal) -> Result<BasedReal, Error> + Send + Sync;

lazy_static! {
    static ref ALGORITHMS: Mutex<HashMap<String, CustomAlgorithm>> = Mutex::new(HashMap::new());
}

/// A user defined algorithm replacing one of the default arithmetic operations.
/// Every algorithm has a unique name.
#[derive(Clone)]
pub struct CustomAlgorithm {
    name: Arc<str>,
    func: Arc<AlgorithmFn>,
}

impl CustomAlgorithm {
    /// Registers `func` under `name`.
    ///
    /// ## Errors
    ///
    ///  - ReservedAlgorithmName: `name` is `DEFAULT`.
    ///  - DuplicateAlgorithm: an algorithm with the same name is registered.
    pub fn new<F>(name: &str, func: F) -> Result<Self, Error>
    where
        F: Fn(&BasedReal, &BasedReal) -> Result<BasedReal, Error> + Send + Sync + 'static,
    {
        if name == DEFAULT_ALGORITHM_NAME {
            return Err(Error::ReservedAlgorithmName);
        }

        let mut registry = ALGORITHMS.lock();
        if registry.contains_key(name) {
            return Err(Error::DuplicateAlgorithm(name.to_owned()));
        }

        let alg = CustomAlgorithm {
            name: Arc::from(name),
            func: Arc::new(func),
        };
        registry.insert(name.to_owned(), alg.clone());

        tracing::debug!(algorithm = name, "registered custom algorithm");

        Ok(alg)
    }

    /// Registered algorithm named `name`.
    pub fn find(name: &str) -> Option<Self> {
        ALGORITHMS.lock().get(name).cloned()
    }

    /// Unregisters the algorithm named `name`, making the name available again.
    /// Returns false if no such algorithm was registered.
    pub fn remove(name: &str) -> bool {
        ALGORITHMS.lock().remove(name).is_some()
    }

    /// Name of the algorithm.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the algorithm.
    pub fn call(&self, a: &BasedReal, b: &BasedReal) -> Result<BasedReal, Error> {
        (self.func)(a, b)
    }
}

impl PartialEq for CustomAlgorithm {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Debug for CustomAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "CustomAlgorithm({})", self.name)
    }
}

/// Arithmetic operation governed by the context.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    /// Operator symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "*",
            Operation::Div => "/",
        }
    }

    /// Default algorithm of the operation.
    pub fn raw(&self, a: &BasedReal, b: &BasedReal) -> Result<BasedReal, Error> {
        match self {
            Operation::Add => a.raw_add(b),
            Operation::Sub => a.raw_sub(b),
            Operation::Mul => a.raw_mul(b),
            Operation::Div => a.raw_div(b),
        }
    }
}

/// Rules of arithmetic operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrecisionContext {
    pmode: PrecisionMode,
    tmode: TruncatureMode,
    add: Option<CustomAlgorithm>,
    sub: Option<CustomAlgorithm>,
    mul: Option<CustomAlgorithm>,
    div: Option<CustomAlgorithm>,
    recording: bool,
}

impl PrecisionContext {
    /// Creates a context with the `Max` precision mode, no truncature, default algorithms,
    /// and recording off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the precision mode.
    pub fn pmode(&mut self, pmode: PrecisionMode) -> &mut Self {
        self.pmode = pmode;
        self
    }

    /// Sets the truncature mode.
    pub fn tmode(&mut self, tmode: TruncatureMode) -> &mut Self {
        self.tmode = tmode;
        self
    }

    /// Sets the addition algorithm, `None` for the default one.
    pub fn add(&mut self, alg: Option<CustomAlgorithm>) -> &mut Self {
        self.add = alg;
        self
    }

    /// Sets the subtraction algorithm, `None` for the default one.
    pub fn sub(&mut self, alg: Option<CustomAlgorithm>) -> &mut Self {
        self.sub = alg;
        self
    }

    /// Sets the multiplication algorithm, `None` for the default one.
    pub fn mul(&mut self, alg: Option<CustomAlgorithm>) -> &mut Self {
        self.mul = alg;
        self
    }

    /// Sets the division algorithm, `None` for the default one.
    pub fn div(&mut self, alg: Option<CustomAlgorithm>) -> &mut Self {
        self.div = alg;
        self
    }

    /// Sets the recording flag.
    pub fn recording(&mut self, recording: bool) -> &mut Self {
        self.recording = recording;
        self
    }

    /// Returns the precision mode.
    pub fn get_pmode(&self) -> PrecisionMode {
        self.pmode
    }

    /// Returns the truncature mode.
    pub fn get_tmode(&self) -> TruncatureMode {
        self.tmode
    }

    /// Returns the recording flag.
    pub fn get_recording(&self) -> bool {
        self.recording
    }

    /// Returns the custom algorithm of `op`, if any.
    pub fn get_algorithm(&self, op: Operation) -> Option<&CustomAlgorithm> {
        match op {
            Operation::Add => self.add.as_ref(),
            Operation::Sub => self.sub.as_ref(),
            Operation::Mul => self.mul.as_ref(),
            Operation::Div => self.div.as_ref(),
        }
    }

    /// Names of the rules of the context.
    pub fn freeze(&self) -> FrozenContext {
        let name = |op| {
            self.get_algorithm(op)
                .map(|a| a.name().to_owned())
                .unwrap_or_else(|| DEFAULT_ALGORITHM_NAME.to_owned())
        };

        FrozenContext {
            pmode: self.pmode.name(),
            tmode: self.tmode.name(),
            add: name(Operation::Add),
            sub: name(Operation::Sub),
            mul: name(Operation::Mul),
            div: name(Operation::Div),
        }
    }
}

/// Rules of a context by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrozenContext {
    pub pmode: String,
    pub tmode: &'static str,
    pub add: String,
    pub sub: String,
    pub mul: String,
    pub div: String,
}

/// Recorded operation.
#[derive(Clone, Debug)]
pub struct Record {
    pub lhs: BasedReal,
    pub rhs: BasedReal,
    pub op: Operation,
    pub result: BasedReal,
    pub context: FrozenContext,
}

/// Context saved when a scope was entered.
struct Saved {
    id: u64,
    ctx: PrecisionContext,
}

#[derive(Default)]
struct ContextState {
    ctx: PrecisionContext,
    // innermost scope last
    scopes: Vec<Saved>,
    next_id: u64,
    records: Vec<Record>,
}

thread_local! {
    static GCTX: RefCell<ContextState> = RefCell::new(ContextState::default());
}

/// Returns a copy of the context of the current thread.
pub fn current() -> PrecisionContext {
    GCTX.with(|s| s.borrow().ctx.clone())
}

/// Replaces the context of the current thread.
///
/// ## Errors
///
///  - ContextInUse: a scope is active.
pub fn set_context(ctx: PrecisionContext) -> Result<(), Error> {
    GCTX.with(|s| {
        let mut s = s.borrow_mut();
        if !s.scopes.is_empty() {
            return Err(Error::ContextInUse);
        }
        tracing::debug!(context = ?ctx.freeze(), "precision context replaced");
        s.ctx = ctx;
        Ok(())
    })
}

/// Turns recording of operations on or off.
///
/// ## Errors
///
///  - ContextInUse: a scope is active; use `Scope::recording` instead.
pub fn set_recording(flag: bool) -> Result<(), Error> {
    GCTX.with(|s| {
        let mut s = s.borrow_mut();
        if !s.scopes.is_empty() {
            return Err(Error::ContextInUse);
        }
        s.ctx.recording = flag;
        Ok(())
    })
}

/// Operations recorded so far.
pub fn records() -> Vec<Record> {
    GCTX.with(|s| s.borrow().records.clone())
}

/// Removes all recorded operations.
pub fn clear_records() {
    GCTX.with(|s| s.borrow_mut().records.clear())
}

/// Number of nested active scopes.
pub fn depth() -> usize {
    GCTX.with(|s| s.borrow().scopes.len())
}

/// Temporary changes to the context. Rules which are not set keep their current value.
///
/// ``` rust
/// use radix_real::{BasedReal, PrecisionMode, Scope, TruncatureMode, SEXAGESIMAL};
///
/// let a = BasedReal::parse(&SEXAGESIMAL, "1;50").unwrap();
/// let b = BasedReal::parse(&SEXAGESIMAL, "2;0").unwrap();
///
/// let c = Scope::new()
///     .pmode(PrecisionMode::Fixed(0))
///     .tmode(TruncatureMode::Trunc)
///     .run(|| &a + &b);
///
/// assert_eq!(c.to_string(), "03 ;");
/// assert_eq!((&a + &b).to_string(), "03 ; 50");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scope {
    pmode: Option<PrecisionMode>,
    tmode: Option<TruncatureMode>,
    recording: Option<bool>,
    add: Option<Option<CustomAlgorithm>>,
    sub: Option<Option<CustomAlgorithm>>,
    mul: Option<Option<CustomAlgorithm>>,
    div: Option<Option<CustomAlgorithm>>,
}

impl Scope {
    /// A scope changing nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the precision mode.
    pub fn pmode(&mut self, pmode: PrecisionMode) -> &mut Self {
        self.pmode = Some(pmode);
        self
    }

    /// Sets the truncature mode.
    pub fn tmode(&mut self, tmode: TruncatureMode) -> &mut Self {
        self.tmode = Some(tmode);
        self
    }

    /// Sets the recording flag.
    pub fn recording(&mut self, recording: bool) -> &mut Self {
        self.recording = Some(recording);
        self
    }

    /// Sets the addition algorithm; `None` restores the default one.
    pub fn add(&mut self, alg: Option<CustomAlgorithm>) -> &mut Self {
        self.add = Some(alg);
        self
    }

    /// Sets the subtraction algorithm; `None` restores the default one.
    pub fn sub(&mut self, alg: Option<CustomAlgorithm>) -> &mut Self {
        self.sub = Some(alg);
        self
    }

    /// Sets the multiplication algorithm; `None` restores the default one.
    pub fn mul(&mut self, alg: Option<CustomAlgorithm>) -> &mut Self {
        self.mul = Some(alg);
        self
    }

    /// Sets the division algorithm; `None` restores the default one.
    pub fn div(&mut self, alg: Option<CustomAlgorithm>) -> &mut Self {
        self.div = Some(alg);
        self
    }

    fn algorithm(&mut self, op: Operation, alg: Option<CustomAlgorithm>) -> &mut Self {
        match op {
            Operation::Add => self.add(alg),
            Operation::Sub => self.sub(alg),
            Operation::Mul => self.mul(alg),
            Operation::Div => self.div(alg),
        }
    }

    /// Applies the changes until the returned guard is dropped.
    ///
    /// Dropping a guard restores the context it saved and also ends the scopes entered
    /// after it which are still active.
    pub fn enter(&self) -> PrecisionGuard {
        let id = GCTX.with(|s| {
            let mut s = s.borrow_mut();
            let id = s.next_id;
            s.next_id += 1;
            let saved = Saved {
                id,
                ctx: s.ctx.clone(),
            };
            s.scopes.push(saved);

            let ctx = &mut s.ctx;
            if let Some(p) = self.pmode {
                ctx.pmode = p;
            }
            if let Some(t) = self.tmode {
                ctx.tmode = t;
            }
            if let Some(r) = self.recording {
                ctx.recording = r;
            }
            if let Some(a) = &self.add {
                ctx.add = a.clone();
            }
            if let Some(a) = &self.sub {
                ctx.sub = a.clone();
            }
            if let Some(a) = &self.mul {
                ctx.mul = a.clone();
            }
            if let Some(a) = &self.div {
                ctx.div = a.clone();
            }

            tracing::debug!(depth = s.scopes.len(), context = ?s.ctx.freeze(), "entered precision scope");

            id
        });

        PrecisionGuard {
            id,
            _not_send: PhantomData,
        }
    }

    /// Runs `f` with the changes applied.
    pub fn run<T, F: FnOnce() -> T>(&self, f: F) -> T {
        let _guard = self.enter();
        f()
    }
}

/// Restores the context saved by `Scope::enter` when dropped.
#[must_use = "the scope ends when the guard is dropped"]
pub struct PrecisionGuard {
    id: u64,
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for PrecisionGuard {
    fn drop(&mut self) {
        GCTX.with(|s| {
            let mut s = s.borrow_mut();

            // already ended together with an enclosing scope
            let level = match s.scopes.iter().position(|saved| saved.id == self.id) {
                Some(level) => level,
                None => return,
            };

            if level + 1 < s.scopes.len() {
                tracing::warn!(
                    depth = level + 1,
                    nested = s.scopes.len() - level - 1,
                    "precision scope left before its nested scopes"
                );
            }

            let mut ended = s.scopes.split_off(level);
            s.ctx = ended.swap_remove(0).ctx;
            tracing::debug!(depth = s.scopes.len(), "left precision scope");
        });
    }
}

/// Performs `op` on `a` and `b` following the context of the current thread:
/// the custom or default algorithm runs with recording off, then the result is resized,
/// truncated, and recorded. Inside a custom algorithm `op` itself uses the default algorithm.
pub(crate) fn apply(op: Operation, a: &BasedReal, b: &BasedReal) -> Result<BasedReal, Error> {
    let b = a.coerce(b)?;
    let b = b.as_ref();

    let ctx = current();
    let significant = ctx.pmode.significant(a, b)?;

    let raw = {
        let _guard = Scope::new().recording(false).algorithm(op, None).enter();
        match ctx.get_algorithm(op) {
            Some(alg) => alg.call(a, b)?,
            None => op.raw(a, b)?,
        }
    };

    let value = ctx.tmode.apply(&raw.resize(significant))?;

    if ctx.recording {
        tracing::trace!(lhs = %a, rhs = %b, op = op.symbol(), result = %value, "operation recorded");
        GCTX.with(|s| {
            s.borrow_mut().records.push(Record {
                lhs: a.clone(),
                rhs: b.clone(),
                op,
                result: value.clone(),
                context: ctx.freeze(),
            })
        });
    }

    Ok(value)
}
