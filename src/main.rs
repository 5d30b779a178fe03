use std::sync::Arc;
use tradeshell::config;
use tradeshell::error::{Error, Result};
use tradeshell::locale::loader::HttpResourceFetcher;
use tradeshell::shell::{self, paths, HostEnv, LaunchContext, ReloadSignal};

struct Flags {
    activate: Option<String>,
    data_dir: Option<String>,
    config_dir: Option<String>,
    watch: bool,
}

fn parse_flags() -> Flags {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        activate: args.opt_value_from_str("--activate").unwrap(),
        data_dir: args.opt_value_from_str("--data-dir").unwrap(),
        config_dir: args.opt_value_from_str("--config-dir").unwrap(),
        watch: args.contains("--watch"),
    };
    let leftover = args.finish();
    if !leftover.is_empty() {
        log::warn!("ignoring unexpected arguments: {leftover:?}");
    }
    flags
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let flags = parse_flags();
    paths::init_cli_overrides(flags.data_dir, flags.config_dir);

    let mut config = config::load()?;
    config.overlay_env();

    let env = HostEnv::detect();
    let fetcher =
        HttpResourceFetcher::new().map_err(|err| Error::Config(format!("http client: {err}")))?;
    let mut launch = flags.activate.as_deref().map(LaunchContext::from_url);

    loop {
        let signal = Arc::new(ReloadSignal::new());
        let shell = shell::boot(
            &config,
            &env,
            fetcher.clone(),
            launch.as_mut(),
            Arc::clone(&signal),
        )
        .await;

        log::info!(
            "shell up: {} network, language {}, {} of {} catalog languages",
            shell.network,
            shell.language(),
            shell.locale.catalog.len(),
            config.available_languages().len(),
        );

        let connector = shell.connectors.get().await;
        if connector.has_credentials() {
            log::info!("{} connector ready", connector.kind());
        } else {
            log::warn!(
                "{} connector has no credentials; sign-in will be unavailable",
                connector.kind()
            );
        }

        if !flags.watch {
            return Ok(());
        }

        signal.wait().await;
        log::info!("relaunch requested; rebooting the shell");
        // One-shot activation parameters must not replay into the next boot.
        launch = None;
    }
}
