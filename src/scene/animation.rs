//! Per-frame animation: hover lift, the callback registry driven by the
//! render loop, and the frame clock.

use std::cell::RefCell;
use std::rc::Rc;

/// One exponential-smoothing step toward `target`.
pub fn lift_step(current: f32, target: f32, smoothing: f32) -> f32 {
    current + (target - current) * smoothing
}

/// Vertical offset of a component that rises while hovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverLift {
    pub offset: f32,
    height: f32,
    smoothing: f32,
}

impl HoverLift {
    pub fn new(height: f32, smoothing: f32) -> Self {
        Self { offset: 0.0, height, smoothing }
    }

    pub fn step(&mut self, hovered: bool) -> f32 {
        let target = if hovered { self.height } else { 0.0 };
        self.offset = lift_step(self.offset, target, self.smoothing);
        self.offset
    }

    /// How far the lift has risen, in [0, 1]. Scales the glow.
    pub fn glow(&self) -> f32 {
        if self.height <= 0.0 {
            return 0.0;
        }
        (self.offset / self.height).clamp(0.0, 1.0)
    }
}

/// Identifies a registered tick callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

type TickFn = Box<dyn FnMut(f32)>;

#[derive(Default)]
struct TickerInner {
    next: u64,
    entries: Vec<(TickHandle, TickFn)>,
    /// Handles unregistered while their callbacks were out running.
    removed: Vec<TickHandle>,
    ticking: bool,
}

/// Callbacks run once per frame with the frame's delta in seconds.
/// Cloning shares the registry.
#[derive(Clone, Default)]
pub struct Ticker {
    inner: Rc<RefCell<TickerInner>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, f: impl FnMut(f32) + 'static) -> TickHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = TickHandle(inner.next);
        inner.next += 1;
        inner.entries.push((handle, Box::new(f)));
        handle
    }

    pub fn unregister(&self, handle: TickHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.entries.retain(|(h, _)| *h != handle);
        if inner.ticking {
            inner.removed.push(handle);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs every callback in registration order. Callbacks may register
    /// or unregister others; changes apply from the next tick.
    pub fn tick(&self, dt: f32) {
        let mut running = {
            let mut inner = self.inner.borrow_mut();
            inner.ticking = true;
            std::mem::take(&mut inner.entries)
        };
        for (_, f) in running.iter_mut() {
            f(dt);
        }
        let mut inner = self.inner.borrow_mut();
        let removed = std::mem::take(&mut inner.removed);
        running.retain(|(h, _)| !removed.contains(h));
        running.append(&mut inner.entries);
        inner.entries = running;
        inner.ticking = false;
    }
}

/// Converts `requestAnimationFrame` timestamps to clamped deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    pub elapsed: f32,
}

impl FrameClock {
    /// Longest step handed to animations, so a backgrounded tab does not
    /// jump on return.
    pub const MAX_DT: f32 = 0.1;

    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, Self::MAX_DT),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.elapsed += dt;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn lift_converges_geometrically() {
        let mut lift = HoverLift::new(0.2, 0.12);
        let first = lift.step(true);
        assert!((first - 0.024).abs() < 1e-6);
        for _ in 0..200 {
            lift.step(true);
        }
        assert!((lift.offset - 0.2).abs() < 1e-4);
        assert!((lift.glow() - 1.0).abs() < 1e-3);
        for _ in 0..200 {
            lift.step(false);
        }
        assert!(lift.offset < 1e-4);
    }

    #[test]
    fn ticker_runs_in_order_until_unregistered() {
        let ticker = Ticker::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = {
            let log = log.clone();
            ticker.register(move |_| log.borrow_mut().push('a'))
        };
        {
            let log = log.clone();
            ticker.register(move |_| log.borrow_mut().push('b'));
        }
        ticker.tick(0.016);
        ticker.unregister(a);
        ticker.tick(0.016);
        assert_eq!(*log.borrow(), vec!['a', 'b', 'b']);
        assert_eq!(ticker.len(), 1);
    }

    #[test]
    fn callbacks_may_edit_the_registry_mid_tick() {
        let ticker = Ticker::new();
        let count = Rc::new(Cell::new(0));
        let slot: Rc<Cell<Option<TickHandle>>> = Rc::new(Cell::new(None));
        let handle = {
            let (ticker, count, slot) = (ticker.clone(), count.clone(), slot.clone());
            ticker.clone().register(move |_| {
                count.set(count.get() + 1);
                if let Some(me) = slot.get() {
                    ticker.unregister(me);
                }
                let inner = count.clone();
                ticker.register(move |_| inner.set(inner.get() + 10));
            })
        };
        slot.set(Some(handle));
        ticker.tick(0.0);
        assert_eq!(count.get(), 1);
        assert_eq!(ticker.len(), 1);
        ticker.tick(0.0);
        assert_eq!(count.get(), 11);
    }

    #[test]
    fn frame_clock_clamps_long_gaps() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(1000.0), 0.0);
        assert!((clock.advance(1016.0) - 0.016).abs() < 1e-6);
        assert_eq!(clock.advance(9000.0), FrameClock::MAX_DT);
        assert!((clock.elapsed - 0.116).abs() < 1e-5);
    }
}
