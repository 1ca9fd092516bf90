mod config;
mod logging;
mod notifier;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use caseclip_engine::{process_clipboard_now, MonitorHandle, SaveService, SystemClipboard};
use caseclip_logging::{clip_info, clip_warn};

use crate::config::{AppConfig, LoadNotice};
use crate::logging::LogDestination;
use crate::notifier::{LogNotifier, Notifier};

struct CliArgs {
    /// Run one synchronous clipboard test and exit.
    test_once: bool,
    config_path: Option<PathBuf>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self {
            test_once: false,
            config_path: None,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "test" => parsed.test_once = true,
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    parsed.config_path = Some(PathBuf::from(path));
                }
                other => bail!("unknown argument {other:?} (usage: caseclip [test] [--config <path>])"),
            }
        }
        Ok(parsed)
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;

    let (config, notices) = AppConfig::load(args.config_path.as_deref());
    config.validate()?;
    logging::initialize(LogDestination::Both, config.parse_log_level()?);
    for notice in &notices {
        match notice {
            LoadNotice::Info(message) => clip_info!("{}", message),
            LoadNotice::Warn(message) => clip_warn!("{}", message),
        }
    }
    clip_info!(
        "caseclip starting; output dir {}, polling every {}s",
        config.output_directory.display(),
        config.polling_interval
    );

    let saver = Arc::new(SaveService::new(config.save_settings()));

    if args.test_once {
        let event = process_clipboard_now(&mut SystemClipboard::new(), &saver);
        LogNotifier::new(true).notify(&event);
        return Ok(());
    }

    let handle = MonitorHandle::spawn(config.monitor_settings(), SystemClipboard::new(), saver)
        .context("failed to start clipboard monitor thread")?;
    let notifier = LogNotifier::new(config.enable_notifications);

    // The loop thread runs until the process exits; this thread just drains
    // outcome events for the notifier.
    loop {
        if let Some(event) = handle.try_recv() {
            notifier.notify(&event);
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    }
}
