//! Runtime shell around the core session.
//!
//! The rules themselves are single-threaded; this crate supplies the two
//! execution contexts that drive them and the lock that keeps them honest:
//!
//! - a **tick driver** thread that sleeps for the current fall period and
//!   then applies gravity, and
//! - the caller's thread feeding player [`Command`]s through
//!   [`Engine::apply`].
//!
//! Both paths lock the one session mutex, so a piece's
//! undraw/mutate/redraw is always a single critical section with respect to
//! the other side. While the session is paused (or idle, or over) the driver
//! parks on a condvar instead of polling; the command that resumes play
//! wakes exactly one waiting driver.

mod store;

pub use store::FileHighScores;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gridfall_core::{Session, Snapshot};
use gridfall_types::{Command, Phase};

struct Shared {
    session: Mutex<Session>,
    /// Signalled when the session (re-)enters `Running` or shuts down.
    wake: Condvar,
    shutdown: AtomicBool,
}

/// Thread-safe handle to a running game.
///
/// Cloning the engine clones the handle; all clones address the same session.
#[derive(Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

impl Engine {
    pub fn new(session: Session) -> Self {
        Self {
            shared: Arc::new(Shared {
                session: Mutex::new(session),
                wake: Condvar::new(),
                shutdown: AtomicBool::new(false),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // A poisoned lock means a tick or command handler panicked; the
        // session state is torn either way, so propagate the panic.
        self.shared.session.lock().unwrap()
    }

    /// Begin (or restart) play and wake the driver.
    pub fn start(&self) {
        self.lock().start();
        self.shared.wake.notify_one();
    }

    /// Feed one player command to the session.
    ///
    /// Commands that bring the session back to `Running` (resume, restart)
    /// wake one parked tick driver.
    pub fn apply(&self, command: Command) -> bool {
        let mut session = self.lock();
        let accepted = session.apply(command);
        let running = session.phase() == Phase::Running;
        drop(session);

        if accepted && running {
            self.shared.wake.notify_one();
        }
        accepted
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    /// Copy the current render surface into a reusable buffer.
    pub fn snapshot_into(&self, out: &mut Snapshot) {
        self.lock().snapshot_into(out);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Spawn the gravity thread. One driver per engine is the intended
    /// shape; the wake signal is `notify_one` to match.
    pub fn spawn_driver(&self) -> DriverHandle {
        let shared = Arc::clone(&self.shared);
        let handle = thread::spawn(move || drive(shared));
        DriverHandle { handle }
    }

    /// Ask the driver to exit. It wakes from a condvar park immediately and
    /// from a gravity sleep at the end of the current period.
    pub fn shutdown(&self) {
        self.shared.shutdown.store(true, Ordering::SeqCst);
        self.shared.wake.notify_all();
    }
}

/// Join handle for the tick-driver thread.
pub struct DriverHandle {
    handle: JoinHandle<()>,
}

impl DriverHandle {
    /// Wait for the driver to exit. Call [`Engine::shutdown`] first.
    pub fn join(self) {
        let _ = self.handle.join();
    }
}

fn drive(shared: Arc<Shared>) {
    loop {
        // Park until there is a running session to tick (or we are told to
        // exit). The wait releases the lock, so commands keep flowing.
        let period = {
            let mut session = shared.session.lock().unwrap();
            loop {
                if shared.shutdown.load(Ordering::SeqCst) {
                    return;
                }
                if session.phase() == Phase::Running {
                    break;
                }
                session = shared.wake.wait(session).unwrap();
            }
            session.fall_period()
        };

        // Gravity wait happens outside the lock.
        thread::sleep(Duration::from_millis(u64::from(period)));

        if shared.shutdown.load(Ordering::SeqCst) {
            return;
        }

        let mut session = shared.session.lock().unwrap();
        if session.phase() == Phase::Running {
            session.on_tick();
        }
        // If the session paused or ended during the sleep, the next loop
        // iteration parks on the condvar.
    }
}
