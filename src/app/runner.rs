use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::args::StressArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{
    ClientSettings, DispatchPlan, Dispatcher, ReqwestTransport, RequestBuilder, build_client,
};
use crate::metrics::RunResult;
use crate::source::{
    HttpIdentifierProvider, IdentifierProvider, SourceSettings, load_parameter_pool,
};

use super::summary::print_summary;

/// Runs one stress test from fully merged arguments and prints the summary.
pub(crate) async fn run_stress(args: &StressArgs) -> AppResult<RunResult> {
    let Some(url) = args.url.as_deref() else {
        error!("Missing URL (set --url or provide in config).");
        return Err(AppError::validation(ValidationError::MissingUrl));
    };

    let plan = DispatchPlan::new(
        args.requests,
        args.concurrency.get(),
        args.request_timeout,
        args.run_timeout,
        args.seed,
    )?;
    let builder = RequestBuilder::new(url, args.mode)?;
    let client = build_client(&ClientSettings {
        request_timeout: args.request_timeout,
        connect_timeout: args.connect_timeout,
        max_idle_per_host: args.concurrency.get(),
        disable_keepalive: args.disable_keepalive,
        insecure: args.insecure,
    })?;

    let provider = args.provider_url.as_ref().map(|provider_url| {
        HttpIdentifierProvider::new(
            client.clone(),
            provider_url.clone(),
            args.provider_field.clone(),
        )
    });
    let settings = SourceSettings {
        cache_file: PathBuf::from(&args.cache_file),
        date_start: args.date_start,
        date_days: args.date_days.get(),
    };
    let pool = match load_parameter_pool(
        &settings,
        provider
            .as_ref()
            .map(|provider| provider as &dyn IdentifierProvider),
    )
    .await
    {
        Ok(pool) => pool,
        Err(err) => {
            error!("Failed to load request parameters: {}", err);
            return Err(err.into());
        }
    };
    info!(
        "Targeting {} ({} mode) with {} identifiers x {} dates",
        builder.base(),
        builder.mode().as_str(),
        pool.identifiers().len(),
        pool.dates().len()
    );

    let dispatcher = Dispatcher::new(
        Arc::new(ReqwestTransport::new(client)),
        Arc::new(pool),
        builder,
    );
    let result = dispatcher.run(&plan).await?;
    print_summary(&result, args.output_format);
    Ok(result)
}
