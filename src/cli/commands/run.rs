//! Run command - restore the Gradle cache

use crate::cache::CommandRestorerFactory;
use crate::command::TokioCommandFactory;
use crate::env::{EnvRepository, OsEnvRepository};
use crate::error::StepResult;
use crate::input::EnvInputParser;
use crate::log::Logger;
use crate::step::RestoreCacheStep;
use std::sync::Arc;

/// Execute the run command against the process environment
pub async fn execute(logger: Arc<dyn Logger>, cache_client: Option<String>) -> StepResult<()> {
    let env: Arc<dyn EnvRepository> = Arc::new(OsEnvRepository);
    let step = RestoreCacheStep::new(
        logger.clone(),
        Arc::new(EnvInputParser::new(env.clone())),
        env,
        Arc::new(TokioCommandFactory),
    )
    .with_restorer_factory(Arc::new(CommandRestorerFactory::new(cache_client)));

    if let Err(e) = step.run().await {
        logger.error(&format!("Cache restore did not finish ({} phase)", e.phase()));
        return Err(e);
    }
    logger.done("Cache restore finished");
    Ok(())
}
