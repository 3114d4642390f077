use std::io;
use tracing::Level;
use tracing_appender::rolling;
use tracing_subscriber::filter::FilterFn;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const STDOUT_FILTER: &str = "info,llm_request=info,ner_request=info,web_request=warn,dates=warn";
const FILE_FILTER: &str = "info,llm_request=debug,ner_request=debug,dates=debug";

pub fn configure_logging() {
    // Connection pool chatter from the HTTP stack is not useful at warn level.
    let custom_filter = FilterFn::new(|metadata| {
        !(metadata.level() == &Level::WARN && metadata.target().starts_with("hyper"))
    });

    // Stdout log configuration, RUST_LOG overrides the default directives
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(STDOUT_FILTER));
    let stdout_log = fmt::layer()
        .with_writer(io::stdout)
        .with_filter(stdout_filter)
        .with_filter(custom_filter);

    // File log configuration
    let file_appender = rolling::daily("logs", "pipeline.log");
    let file_log = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(EnvFilter::new(FILE_FILTER));

    tracing_subscriber::Registry::default()
        .with(stdout_log)
        .with(file_log)
        .init();
}
