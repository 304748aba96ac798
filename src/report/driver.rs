use std::io::Write;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::{info_span, warn};

use crate::system::process::ProcessRecord;
use crate::system::provider::MetricsProvider;

use super::rank::{RankMode, order_by_name, rank_by};
use super::render;
use super::sampler::{DEFAULT_CPU_WINDOW, DEFAULT_WARMUP, sample_performance, sample_processes};

#[derive(Clone, Debug, PartialEq)]
pub struct ReportOptions {
    pub warmup: Duration,
    pub cpu_window: Duration,
    pub processes: RankMode,
    pub details: RankMode,
    pub services: RankMode,
    /// Re-sample for the details section instead of reusing the summary's pass.
    pub independent_passes: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            warmup: DEFAULT_WARMUP,
            cpu_window: DEFAULT_CPU_WINDOW,
            processes: RankMode::All,
            details: RankMode::All,
            services: RankMode::All,
            independent_passes: false,
        }
    }
}

/// Runs the five report sections in order against one provider.
pub struct Report<'a, P: ?Sized> {
    provider: &'a mut P,
    options: ReportOptions,
}

impl<'a, P> Report<'a, P>
where
    P: MetricsProvider + ?Sized,
{
    pub fn new(provider: &'a mut P, options: ReportOptions) -> Self {
        Report { provider, options }
    }

    /// Writes every section to `out`, each one in full before the next is
    /// sampled. Provider failures stay inside their section; only write
    /// errors end the run.
    pub fn write_to<W: Write>(&mut self, out: &mut W) -> Result<()> {
        emit(out, &self.performance(), "performance")?;

        let records = self.sample();
        emit(out, &self.processes(&records), "processes")?;

        let records = if self.options.independent_passes {
            self.sample()
        } else {
            records
        };
        emit(out, &self.details(&records), "details")?;

        emit(out, &self.users(), "users")?;
        emit(out, &self.services(), "services")?;
        out.flush().wrap_err("failed to flush report")
    }

    pub fn sample(&mut self) -> Vec<ProcessRecord> {
        sample_processes(&mut *self.provider, self.options.warmup)
    }

    pub fn performance(&mut self) -> String {
        let _span = info_span!("report", section = "performance").entered();
        match sample_performance(&mut *self.provider, self.options.cpu_window) {
            Ok(snapshot) => render::render_performance(&snapshot),
            Err(err) => {
                warn!(%err, "performance counters unavailable");
                render::render_section_error(&render::performance_title(), "performance", &err)
            }
        }
    }

    pub fn processes(&self, records: &[ProcessRecord]) -> String {
        let _span = info_span!("report", section = "processes").entered();
        let ranked = rank_by(
            records.to_vec(),
            |r| f64::from(r.cpu_percent),
            self.options.processes,
        );
        render::render_process_summary(&ranked, self.options.processes)
    }

    pub fn details(&self, records: &[ProcessRecord]) -> String {
        let _span = info_span!("report", section = "details").entered();
        let ranked = rank_by(
            records.to_vec(),
            |r| f64::from(r.cpu_percent),
            self.options.details,
        );
        render::render_process_details(&ranked, self.options.details)
    }

    pub fn users(&mut self) -> String {
        let _span = info_span!("report", section = "users").entered();
        match self.provider.enumerate_user_sessions() {
            Ok(sessions) => render::render_users(&sessions),
            Err(err) => {
                warn!(%err, "user sessions unavailable");
                render::render_section_error(&render::users_title(), "user sessions", &err)
            }
        }
    }

    pub fn services(&mut self) -> String {
        let _span = info_span!("report", section = "services").entered();
        let mode = self.options.services;
        match self.provider.enumerate_services() {
            Ok(services) => {
                let ordered = order_by_name(services, |s| s.name.as_str(), mode);
                render::render_services(&ordered, mode)
            }
            Err(err) => {
                warn!(%err, "services unavailable");
                render::render_section_error(&render::services_title(mode), "services", &err)
            }
        }
    }
}

fn emit<W: Write>(out: &mut W, section: &str, name: &str) -> Result<()> {
    out.write_all(section.as_bytes())
        .wrap_err_with(|| format!("failed to write {name} section"))
}
