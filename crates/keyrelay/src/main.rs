//! keyrelay entry point.
//!
//! Wires the signal handler, the uinput keyboard and the terminal into a
//! [`RelaySession`] and runs it until end of input or Ctrl-C.
//!
//! # Startup order
//!
//! ```text
//! main()
//!  └─ install_shutdown_handler()   -- SIGINT/SIGTERM set the shutdown flag and wake the reader
//!  └─ UinputKeyboard::create()     -- fatal if /dev/uinput is unavailable
//!  └─ RelaySession::start()        -- settle delay, then raw mode if stdin is a tty
//!  └─ RelaySession::run()          -- read -> decode -> lookup -> tap
//!  └─ RelaySession::shutdown()     -- restore terminal, close device
//! ```
//!
//! Only a failure to create the virtual keyboard exits with status 1, before
//! the terminal is modified.  A missing signal handler or a terminal that
//! refuses raw mode is reported and the relay runs anyway.

#[cfg(target_os = "linux")]
fn main() -> anyhow::Result<()> {
    use std::sync::atomic::AtomicBool;

    use anyhow::Context;
    use tracing::{info, warn};
    use tracing_subscriber::EnvFilter;

    use keyrelay::application::{
        config::SessionConfig, relay_session::RelaySession, shutdown::ShutdownFlag,
    };
    use keyrelay::infrastructure::{
        signal::install_shutdown_handler,
        terminal::{stdin::RawStdin, tty::TtyMode},
        virtual_keyboard::uinput::UinputKeyboard,
    };
    use keyrelay_core::{KeyMap, SymbolDecoder};

    // Initialise structured logging on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("keyrelay {} starting", env!("CARGO_PKG_VERSION"));

    static NO_SIGNAL_HANDLER: AtomicBool = AtomicBool::new(false);
    let (shutdown, wake) = match install_shutdown_handler() {
        Ok(signals) => (signals.flag, Some(signals.wake)),
        Err(e) => {
            warn!("{e}; Ctrl-C will end keyrelay without restoring the terminal");
            (ShutdownFlag::new(&NO_SIGNAL_HANDLER), None)
        }
    };

    let config = SessionConfig::default();
    let keymap = KeyMap::new();
    let keyboard = UinputKeyboard::create(&config.device_spec(&keymap))
        .context("Failed to open uinput")?;

    let mut session = RelaySession::start(keymap, keyboard, TtyMode::new(), &config);

    let mut decoder = SymbolDecoder::new(RawStdin::new(wake));
    let summary = session.run(&mut decoder, shutdown);
    session.shutdown();

    info!(
        "keyrelay stopped ({:?}): {} symbols, {} unmapped, {} failed writes",
        summary.reason, summary.stats.symbols, summary.stats.unmapped, summary.stats.failed_writes
    );
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("keyrelay needs Linux uinput and is not supported on this platform")
}
