use tokio::sync::Mutex as AsyncMutex;

/// Process-wide lock for tests that mutate environment variables.
/// Use `.blocking_lock()` in sync tests and `.lock().await` in async tests.
pub static ENV_LOCK: AsyncMutex<()> = AsyncMutex::const_new(());

/// Every variable `Config::load` reads.
pub const CONFIG_VARS: [&str; 8] = [
    "TILDE_PROMPT",
    "TILDE_WELCOME",
    "TILDE_ABOUT",
    "TILDE_SOCIALS",
    "TILDE_BLINK_MS",
    "TILDE_SMOOTH_SCROLL",
    "TILDE_LOG_PATH",
    "TILDE_LOG",
];

/// Call with `ENV_LOCK` held.
pub fn clear_config_env() {
    for var in CONFIG_VARS {
        std::env::remove_var(var);
    }
}
