use anyhow::Result;
use nix::sys::signal::{signal, SigHandler, Signal};
use signal_hook::consts::SIGTSTP;
use signal_hook::iterator::Signals;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Process-wide foreground-only flag, flipped by SIGTSTP.
///
/// Read at classification time, so a toggle affects lines parsed after it
/// and never an in-flight command.
static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);

pub const ENTER_FOREGROUND_ONLY: &str = "Entering foreground-only mode (& is now ignored)";
pub const EXIT_FOREGROUND_ONLY: &str = "Exiting foreground-only mode";

/// The interpreter's signal dispositions.
///
/// SIGINT is ignored in the interpreter itself; a foreground child
/// restores the default disposition before exec, so a terminal interrupt
/// reaches only that child. SIGTSTP is consumed on a dedicated
/// signal-hook thread where the handler merely flips the foreground-only
/// flag and prints the toggle notice; children ignore SIGTSTP entirely.
#[derive(Clone)]
pub struct SignalPolicy;

impl SignalPolicy {
    /// Install the dispositions and start the SIGTSTP thread.
    ///
    /// Must run before the first prompt; the returned handle is the only
    /// way the rest of the interpreter reads the mode flag.
    pub fn install() -> Result<Self> {
        unsafe { signal(Signal::SIGINT, SigHandler::SigIgn) }?;

        let mut signals = Signals::new([SIGTSTP])?;
        thread::spawn(move || {
            for received in signals.forever() {
                if received == SIGTSTP {
                    let entering = !FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
                    let notice = if entering {
                        ENTER_FOREGROUND_ONLY
                    } else {
                        EXIT_FOREGROUND_ONLY
                    };
                    let mut stdout = std::io::stdout();
                    let _ = writeln!(stdout, "\n{}", notice);
                    let _ = stdout.flush();
                }
            }
        });

        Ok(Self)
    }

    /// Current mode, as of the lines parsed from here on.
    pub fn foreground_only(&self) -> bool {
        FOREGROUND_ONLY.load(Ordering::SeqCst)
    }
}
