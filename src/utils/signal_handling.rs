use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

static RECEIVED: AtomicBool = AtomicBool::new(false);
static INIT: Once = Once::new();

/// Installs the SIGINT/SIGTERM handler. May be called multiple times; only
/// the first call has an effect.
pub fn initialize() {
    INIT.call_once(|| {
        ctrlc::set_handler(|| RECEIVED.store(true, Ordering::SeqCst))
            .expect("cannot install termination handler");
    });
}

/// True iff a termination signal was received since [`initialize`].
pub fn received_ctrl_c() -> bool {
    RECEIVED.load(Ordering::SeqCst)
}
