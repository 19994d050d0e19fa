//! The single-page parallax variant: a circular run of full-screen
//! sections that cross-fade one at a time, and its contact form.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::SiteConfig;

/// `(current + delta) mod n`, wrapping both ways.
pub fn advance(current: usize, delta: isize, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let n = n as isize;
    (current as isize + delta).rem_euclid(n) as usize
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub ends_at: f64,
}

/// A finished transition, for the caller to swap classes and nav state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrived {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone)]
pub struct Parallax {
    pub current: usize,
    pub transition: Option<Transition>,
    count: usize,
    fade_ms: f64,
    wheel_threshold: f64,
    swipe_distance: f64,
    touch_start: Option<f64>,
}

impl Parallax {
    pub fn new(count: usize, config: &SiteConfig) -> Self {
        Self {
            current: 0,
            transition: None,
            count,
            fade_ms: config.parallax_fade_ms,
            wheel_threshold: config.wheel_threshold,
            swipe_distance: config.swipe_distance,
            touch_start: None,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Starts a transition to `to` unless one is already running.
    fn start(&mut self, to: usize, now_ms: f64) -> Option<Transition> {
        if self.transition.is_some() || self.count == 0 {
            return None;
        }
        let t = Transition { from: self.current, to, ends_at: now_ms + self.fade_ms };
        self.transition = Some(t);
        Some(t)
    }

    pub fn wheel(&mut self, delta_y: f64, now_ms: f64) -> Option<Transition> {
        if delta_y.abs() < self.wheel_threshold {
            return None;
        }
        let step = if delta_y > 0.0 { 1 } else { -1 };
        self.start(advance(self.current, step, self.count), now_ms)
    }

    pub fn touch_start(&mut self, y: f64) {
        self.touch_start = Some(y);
    }

    /// An upward swipe (finger moving up the screen) goes forward.
    pub fn touch_end(&mut self, y: f64, now_ms: f64) -> Option<Transition> {
        let start = self.touch_start.take()?;
        let delta = start - y;
        if delta.abs() <= self.swipe_distance {
            return None;
        }
        let step = if delta > 0.0 { 1 } else { -1 };
        self.start(advance(self.current, step, self.count), now_ms)
    }

    pub fn nav_click(&mut self, index: usize, now_ms: f64) -> Option<Transition> {
        if index >= self.count || index == self.current {
            return None;
        }
        self.start(index, now_ms)
    }

    pub fn tick(&mut self, now_ms: f64) -> Option<Arrived> {
        let t = self.transition?;
        if now_ms < t.ends_at {
            return None;
        }
        self.transition = None;
        self.current = t.to;
        Some(Arrived { from: t.from, to: t.to })
    }
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
        )
        .expect("static pattern")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(&email.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in all required fields.")]
    MissingField,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Already sending.")]
    Busy,
}

pub const SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SendState {
    #[default]
    Idle,
    Sending { until: f64 },
}

/// Nothing is actually sent; a successful submit just waits out the
/// configured delay and then resets.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub state: SendState,
}

impl ContactForm {
    pub fn submit(&mut self, now_ms: f64, send_ms: f64) -> Result<(), FormError> {
        if matches!(self.state, SendState::Sending { .. }) {
            return Err(FormError::Busy);
        }
        if [&self.name, &self.email, &self.message].iter().any(|f| f.trim().is_empty()) {
            return Err(FormError::MissingField);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }
        self.state = SendState::Sending { until: now_ms + send_ms };
        Ok(())
    }

    pub fn button_label(&self) -> &'static str {
        match self.state {
            SendState::Idle => "Send Message",
            SendState::Sending { .. } => "Sending...",
        }
    }

    /// Finishes a pending send. Returns true exactly once per send.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.state {
            SendState::Sending { until } if now_ms >= until => {
                *self = ContactForm::default();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parallax() -> Parallax {
        Parallax::new(5, &SiteConfig::default())
    }

    #[test]
    fn advance_wraps_both_ways() {
        assert_eq!(advance(4, 1, 5), 0);
        assert_eq!(advance(0, -1, 5), 4);
        assert_eq!(advance(2, 1, 5), 3);
        assert_eq!(advance(0, 1, 0), 0);
    }

    #[test]
    fn wheel_burst_moves_once() {
        let mut p = parallax();
        let mut started = 0;
        for i in 0..5 {
            if p.wheel(120.0, f64::from(i) * 50.0).is_some() {
                started += 1;
            }
        }
        assert_eq!(started, 1);
        assert_eq!(p.tick(499.0), None);
        assert_eq!(p.tick(500.0), Some(Arrived { from: 0, to: 1 }));
        assert_eq!(p.current, 1);
        assert!(!p.is_transitioning());
    }

    #[test]
    fn tiny_wheel_deltas_are_ignored() {
        let mut p = parallax();
        assert!(p.wheel(0.5, 0.0).is_none());
        assert!(p.wheel(-1.0, 0.0).is_some());
        p.tick(500.0);
        assert_eq!(p.current, 4);
    }

    #[test]
    fn swipes_need_distance() {
        let mut p = parallax();
        p.touch_start(400.0);
        assert!(p.touch_end(360.0, 0.0).is_none());
        p.touch_start(400.0);
        let t = p.touch_end(300.0, 0.0).unwrap();
        assert_eq!(t.to, 1);
        assert!(p.touch_end(300.0, 10.0).is_none());
    }

    #[test]
    fn nav_click_jumps_directly() {
        let mut p = parallax();
        assert!(p.nav_click(0, 0.0).is_none());
        assert!(p.nav_click(9, 0.0).is_none());
        assert_eq!(p.nav_click(3, 0.0).map(|t| t.to), Some(3));
        assert!(p.nav_click(2, 100.0).is_none());
        p.tick(500.0);
        assert_eq!(p.current, 3);
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("ali@example.com"));
        assert!(is_valid_email("First.Last@sub.example.org"));
        assert!(is_valid_email("x@[192.168.0.1]"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@example.com"));
    }

    #[test]
    fn form_requires_every_field() {
        let mut f = ContactForm { name: "Ali".into(), email: "ali@example.com".into(), ..Default::default() };
        assert_eq!(f.submit(0.0, 1500.0), Err(FormError::MissingField));
        f.message = "hi".into();
        f.email = "nope".into();
        assert_eq!(f.submit(0.0, 1500.0).unwrap_err().to_string(), "Please enter a valid email address.");
    }

    #[test]
    fn simulated_send_takes_its_time_then_resets() {
        let mut f = ContactForm {
            name: "Ali".into(),
            email: "ali@example.com".into(),
            message: "Hello".into(),
            ..Default::default()
        };
        f.submit(1000.0, 1500.0).unwrap();
        assert_eq!(f.button_label(), "Sending...");
        assert_eq!(f.submit(1100.0, 1500.0), Err(FormError::Busy));
        assert!(!f.tick(2499.0));
        assert!(f.tick(2500.0));
        assert!(f.name.is_empty() && f.message.is_empty());
        assert_eq!(f.button_label(), "Send Message");
        assert!(!f.tick(3000.0));
    }
}
