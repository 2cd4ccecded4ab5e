//! Daily triggers for the reminder jobs.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::error::ReminderError;
use crate::models::{JobKind, RunReport};
use crate::services::reminder::ReminderService;

/// The cron scheduler plus the id each job was registered under.
pub struct ReminderScheduler {
    scheduler: JobScheduler,
    jobs: Vec<(JobKind, Uuid)>,
}

impl ReminderScheduler {
    /// Starts firing. The handle must stay alive for the jobs to keep running.
    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        self.scheduler.start().await
    }

    pub fn job_id(&self, kind: JobKind) -> Option<Uuid> {
        self.jobs
            .iter()
            .find(|(registered, _)| *registered == kind)
            .map(|(_, id)| *id)
    }

    pub async fn next_run(&mut self, kind: JobKind) -> Result<Option<DateTime<Utc>>, JobSchedulerError> {
        match self.job_id(kind) {
            Some(id) => self.scheduler.next_tick_for_job(id).await,
            None => Ok(None),
        }
    }
}

/// Registers every job on its cron schedule, in host local time. A cron
/// expression that does not parse fails here, before anything is served.
pub async fn build_scheduler(service: Arc<ReminderService>) -> Result<ReminderScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    let mut jobs = Vec::with_capacity(JobKind::ALL.len());

    for kind in JobKind::ALL {
        let cron = service.schedule_for(kind).to_string();
        let service = Arc::clone(&service);

        let job = Job::new_async_tz(cron.as_str(), Local, move |_uuid, _lock| {
            let service = Arc::clone(&service);
            Box::pin(async move {
                // Failures are already logged; the next day's trigger still fires
                let _ = run_scheduled(&service, kind).await;
            })
        })
        .inspect_err(|e| error!("Invalid schedule '{}' for {}: {}", cron, kind, e))?;

        let id = scheduler.add(job).await?;
        info!("Scheduled {} on '{}'", kind, cron);
        jobs.push((kind, id));
    }

    Ok(ReminderScheduler { scheduler, jobs })
}

/// One trigger: runs the job for today's local date and logs the outcome.
pub async fn run_scheduled(service: &ReminderService, kind: JobKind) -> Result<RunReport, ReminderError> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("scheduled_run", job = %kind, run_id = %run_id);

    async {
        let today = Local::now().date_naive();
        let result = service.run(kind, today).await;
        match &result {
            Ok(report) => info!(
                matched = report.matched,
                delivered = report.delivered(),
                failed = report.failed(),
                "Run complete"
            ),
            Err(e) => error!("Run failed: {}", e),
        }
        result
    }
    .instrument(span)
    .await
}
