use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use std::sync::OnceLock;

static PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

/// Install the global logger and the shared progress area
///
/// No logs are shown by default, only human-friendly messages. Enable log
/// output with "export RUST_LOG=debug" in the terminal.
pub fn init() -> &'static MultiProgress {
    PROGRESS.get_or_init(|| {
        let logger =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
                .build();

        let level = logger.filter();
        let multi_progress = MultiProgress::new();

        // Log lines go through the progress area so spinners don't tear
        LogWrapper::new(multi_progress.clone(), logger)
            .try_init()
            .unwrap();
        log::set_max_level(level);

        multi_progress
    })
}

/// Progress area shared by all commands
pub fn multi_progress() -> &'static MultiProgress {
    init()
}
