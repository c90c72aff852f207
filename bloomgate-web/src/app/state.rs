use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bloomgate_core::{Experience, Snapshot};
use yew::prelude::*;

use crate::app::bootstrap;
use crate::app::clock::Clock;
use crate::app::pump;
use crate::audio::ShellAudio;

pub type Session = Experience<ShellAudio>;

#[derive(Clone)]
pub struct AppState {
    pub session: Rc<RefCell<Option<Session>>>,
    pub snapshot: UseStateHandle<Option<Snapshot>>,
    pub boot_error: Option<AttrValue>,
    pub clock: Clock,
    /// Bumped whenever the pending wake-up is superseded.
    pub pump_generation: Rc<Cell<u64>>,
}

#[hook]
pub fn use_app_state() -> AppState {
    let boot = use_memo((), |()| bootstrap::boot());
    let clock = *use_memo((), |()| Clock::start());
    let session = boot.session.clone();
    let snapshot = {
        let session = session.clone();
        use_state(move || session.borrow().as_ref().map(Experience::snapshot))
    };
    let pump_generation = use_memo((), |()| Cell::new(0_u64));
    AppState {
        session,
        snapshot,
        boot_error: boot.error.clone(),
        clock,
        pump_generation,
    }
}

impl AppState {
    /// Catch the session up to wall time, apply `action`, then publish a fresh snapshot.
    pub fn act<R>(&self, action: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let result = {
            let mut slot = self.session.borrow_mut();
            let session = slot.as_mut()?;
            session.advance_to(self.clock.elapsed_ms());
            action(session)
        };
        self.refresh();
        Some(result)
    }

    /// Run whatever came due since the last update.
    pub fn tick(&self) {
        let _ = self.act(|_| ());
    }

    /// Publish the current snapshot and arm the next wake-up.
    pub fn refresh(&self) {
        let snapshot = {
            let mut slot = self.session.borrow_mut();
            let Some(session) = slot.as_mut() else {
                return;
            };
            for notice in session.drain_notifications() {
                log::debug!("journey: {notice:?}");
            }
            session.snapshot()
        };
        self.snapshot.set(Some(snapshot));
        pump::arm(self);
    }

    #[must_use]
    pub fn current_snapshot(&self) -> Option<Snapshot> {
        self.session.borrow().as_ref().map(Experience::snapshot)
    }

    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.session
            .borrow()
            .as_ref()
            .and_then(Experience::next_due_ms)
    }

    /// Cancel pending wake-ups and release the session's resources.
    pub fn teardown(&self) {
        self.pump_generation
            .set(self.pump_generation.get().wrapping_add(1));
        if let Some(session) = self.session.borrow_mut().as_mut() {
            session.teardown();
        }
    }
}
